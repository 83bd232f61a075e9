//! Interactive editing session.
//!
//! Reads one command per line. The editor's timers are polled before and
//! after every line, so a debounced save fires on the first line read
//! after the quiet period has passed. Leaving the shell flushes pending
//! edits and persists the store.

use anyhow::{Context, Result, anyhow, bail};
use chrono::{Local, Utc};
use std::io::{BufRead, Write};
use std::ops::Range;
use std::path::Path;
use std::time::Instant;

use super::edit::append_line;
use super::list::{category_counts, write_list};
use super::open_store;
use super::transfer::export_target;
use crate::cli::config::Config;
use crate::domain::{NoteId, now_timestamp};
use crate::editor::{
    Action, EditorConfig, FlushOutcome, Focus, KeyChord, Markup, NoteEditorController,
};
use crate::store::{NoteStorage, NoteStore, StorageError};
use crate::transfer::{ImportMode, export_json, import};
use crate::view::{ListFilter, NoteListView};

const HELP: &str = "\
Notes:
  ls                      list notes with the current filter
  search [term]           set or clear the search term
  filter [category]       set or clear the category filter
  categories              list categories in use
  new                     create a note and open it
  open <id>               open a note
  rm <id>                 delete a note
Editing the open note:
  show                    print the edit buffer
  title <text>            replace the title
  body <text>             replace the body (\\n for a line break)
  append <text>           add a line to the body
  cat <category>          replace the category
  bold|italic|underline <start> <end>
                          wrap a character range in markup
  list [pos]              insert a bullet list
  date [pos]              insert today's date
  save                    save now
  discard                 drop unsaved changes
  status                  save status and text stats
Other:
  key <chord>             press a shortcut such as ctrl+s
  focus content|search|other
  export <path>           write an export document
  import <path> [--replace]
  clear --yes             delete every note
  quit                    save and leave
";

/// Whether the shell keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A store, an editor bound to it, and the list filter.
pub struct Session<S: NoteStorage> {
    store: NoteStore<S>,
    editor: NoteEditorController,
    filter: ListFilter,
    focus: Focus,
}

impl<S: NoteStorage> Session<S> {
    /// Starts a session with the editor bound to the store's active note.
    pub fn new(store: NoteStore<S>, config: EditorConfig, now: Instant) -> Self {
        let mut editor = NoteEditorController::new(config, now);
        editor.attach(&store);
        Self {
            store,
            editor,
            filter: ListFilter::new(),
            focus: Focus::default(),
        }
    }

    pub fn store(&self) -> &NoteStore<S> {
        &self.store
    }

    pub fn editor(&self) -> &NoteEditorController {
        &self.editor
    }

    /// Runs due timers. Failures are reported, not returned; the buffer
    /// stays dirty so the next tick retries.
    pub fn tick(&mut self, out: &mut impl Write, now: Instant) -> std::io::Result<()> {
        match self.editor.poll(&mut self.store, now) {
            Ok(Some(FlushOutcome::Saved)) => writeln!(out, "[auto-saved]"),
            Ok(_) => Ok(()),
            Err(err) => writeln!(out, "autosave failed: {err}"),
        }
    }

    /// Runs one command line. Command errors are printed and the session
    /// continues; only output failures are returned.
    pub fn execute(&mut self, line: &str, out: &mut impl Write, now: Instant) -> Result<Flow> {
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        match self.dispatch(command, rest.trim(), out, now) {
            Ok(flow) => Ok(flow),
            Err(err) => {
                writeln!(out, "error: {err:#}")?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Flushes pending edits and tears the store down.
    pub fn finish(self) -> Result<S, StorageError> {
        self.editor.teardown(self.store)
    }

    // ===========================================
    // Dispatch
    // ===========================================

    fn dispatch(
        &mut self,
        command: &str,
        rest: &str,
        out: &mut impl Write,
        now: Instant,
    ) -> Result<Flow> {
        match command {
            "" => {}
            "help" | "?" => write!(out, "{HELP}")?,
            "quit" | "exit" => return Ok(Flow::Quit),

            "ls" => self.write_list(out)?,
            "search" => {
                self.filter.search = rest.to_string();
                self.write_list(out)?;
            }
            "filter" => {
                self.filter = self.filter.clone().category(rest);
                self.write_list(out)?;
            }
            "categories" => {
                let listings = category_counts(self.store.list(), self.store.categories());
                for listing in listings {
                    writeln!(out, "{} ({})", listing.name, listing.count)?;
                }
            }
            "new" => self.new_note(out)?,
            "open" => {
                self.editor.select(&mut self.store, parse_id(rest)?)?;
                self.write_buffer(out)?;
            }
            "rm" => {
                let removed = self.editor.delete(&mut self.store, parse_id(rest)?)?;
                writeln!(out, "Deleted: {} [#{}]", removed.title(), removed.id())?;
            }

            "show" => self.write_buffer(out)?,
            "title" => self.editor.set_title(rest, now)?,
            "body" => self.editor.set_content(unescape(rest), now)?,
            "append" => {
                let content = append_line(&self.editor.buffer().content, &unescape(rest));
                self.editor.set_content(content, now)?;
            }
            "cat" => self.editor.set_category(rest, now)?,
            "bold" | "italic" | "underline" => {
                let markup = match command {
                    "bold" => Markup::Bold,
                    "italic" => Markup::Italic,
                    _ => Markup::Underline,
                };
                let selection = self.editor.format(markup, parse_range(rest)?, now)?;
                writeln!(out, "selected {}..{}", selection.start, selection.end)?;
            }
            "list" => {
                let cursor = self.cursor(rest)?;
                let selection = self.editor.insert_list(cursor, now)?;
                writeln!(out, "selected {}..{}", selection.start, selection.end)?;
            }
            "date" => {
                let cursor = self.cursor(rest)?;
                let today = Local::now().date_naive();
                self.editor.insert_date(cursor, today, now)?;
            }
            "save" => {
                self.editor.save(&mut self.store)?;
                writeln!(out, "{}", self.editor.status())?;
            }
            "discard" => {
                self.editor.discard(&self.store);
                writeln!(out, "Discarded unsaved changes")?;
            }
            "status" => self.write_status(out)?,

            "key" => return self.press(rest, out),
            "focus" => {
                self.focus = match rest {
                    "content" => Focus::Content,
                    "search" => Focus::Search,
                    "other" | "" => Focus::Other,
                    other => bail!("unknown focus '{other}'"),
                };
            }
            "export" => self.export(rest, out)?,
            "import" => self.import(rest, out)?,
            "clear" => {
                if rest != "--yes" {
                    bail!("type `clear --yes` to delete {} notes", self.store.len());
                }
                let removed = self.store.clear_all();
                self.editor.detach();
                self.store.persist()?;
                writeln!(out, "Deleted {removed} notes")?;
            }
            other => bail!("unknown command '{other}'; type `help`"),
        }
        Ok(Flow::Continue)
    }

    fn press(&mut self, raw: &str, out: &mut impl Write) -> Result<Flow> {
        let chord: KeyChord = raw.parse()?;
        match chord.action(self.focus) {
            None => writeln!(out, "no action for '{raw}' here")?,
            Some(Action::NewNote) => self.new_note(out)?,
            Some(Action::Save) => {
                self.editor.save(&mut self.store)?;
                writeln!(out, "{}", self.editor.status())?;
            }
            Some(Action::FocusSearch) => {
                self.focus = Focus::Search;
                writeln!(out, "search focused")?;
            }
            Some(Action::ClearFilters) => {
                self.filter = ListFilter::new();
                self.focus = Focus::Other;
                self.write_list(out)?;
            }
            Some(Action::Format(markup)) => {
                bail!("pick a selection with `{} <start> <end>`", markup.name())
            }
        }
        Ok(Flow::Continue)
    }

    fn new_note(&mut self, out: &mut impl Write) -> Result<()> {
        let id = self.editor.new_note(&mut self.store)?;
        writeln!(out, "Created #{id}")?;
        Ok(())
    }

    fn export(&self, rest: &str, out: &mut impl Write) -> Result<()> {
        if rest.is_empty() {
            bail!("usage: export <path>");
        }
        let path = export_target(Path::new(rest), Local::now().date_naive());
        let json = export_json(self.store.list(), now_timestamp())?;
        std::fs::write(&path, format!("{json}\n"))
            .with_context(|| format!("failed to write export to {}", path.display()))?;
        writeln!(out, "Exported {} notes to {}", self.store.len(), path.display())?;
        Ok(())
    }

    fn import(&mut self, rest: &str, out: &mut impl Write) -> Result<()> {
        let (file, mode) = match rest.strip_suffix("--replace") {
            Some(file) => (file.trim(), ImportMode::Replace),
            None => (rest, ImportMode::Merge),
        };
        if file.is_empty() {
            bail!("usage: import <path> [--replace]");
        }
        let json = std::fs::read_to_string(file)
            .with_context(|| format!("failed to read {file}"))?;

        if self.editor.has_unsaved_changes() {
            self.editor.save(&mut self.store)?;
        }
        let summary = import(&mut self.store, &json, mode)?;
        if self
            .editor
            .bound_id()
            .is_some_and(|id| !self.store.contains(id))
        {
            self.editor.detach();
        }
        self.store.persist()?;

        writeln!(
            out,
            "Imported {} notes ({} skipped, {} total)",
            summary.imported, summary.skipped, summary.total
        )?;
        Ok(())
    }

    // ===========================================
    // Rendering
    // ===========================================

    fn write_list(&self, out: &mut impl Write) -> std::io::Result<()> {
        let view = NoteListView::build(
            self.store.list(),
            &self.filter,
            self.store.active_id(),
            Utc::now(),
        );
        write_list(out, &view)
    }

    fn write_buffer(&self, out: &mut impl Write) -> std::io::Result<()> {
        let Some(id) = self.editor.bound_id() else {
            return writeln!(out, "No note selected");
        };
        let buffer = self.editor.buffer();
        writeln!(out, "# {} [#{}]", buffer.title, id)?;
        writeln!(out, "Category: {}", buffer.category)?;
        writeln!(out)?;
        if !buffer.content.is_empty() {
            writeln!(out, "{}", buffer.content)?;
        }
        Ok(())
    }

    fn write_status(&self, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(out, "{}", self.editor.status())?;
        if self.editor.bound_id().is_some() {
            writeln!(out, "{}", self.editor.stats())?;
        }
        Ok(())
    }

    fn cursor(&self, rest: &str) -> Result<usize> {
        if rest.is_empty() {
            return Ok(self.editor.buffer().content.chars().count());
        }
        rest.parse()
            .map_err(|_| anyhow!("invalid position '{rest}'"))
    }
}

/// Reads lines from `input` until EOF or `quit`, then tears the session
/// down and returns the storage.
pub fn run_shell<S, R, W>(
    mut session: Session<S>,
    input: R,
    out: &mut W,
    mut clock: impl FnMut() -> Instant,
) -> Result<S>
where
    S: NoteStorage,
    R: BufRead,
    W: Write,
{
    writeln!(out, "jotter shell. Type `help` for commands.")?;
    for line in input.lines() {
        let line = line.context("failed to read input")?;
        session.tick(out, clock())?;
        let flow = session.execute(&line, out, clock())?;
        session.tick(out, clock())?;
        if flow == Flow::Quit {
            break;
        }
    }
    session.finish().context("failed to save on exit")
}

pub fn handle_shell(store_path: &Path, config: &Config) -> Result<()> {
    let store = open_store(store_path)?;
    let session = Session::new(store, config.editor_config(), Instant::now());

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_shell(session, stdin.lock(), &mut stdout.lock(), Instant::now)?;
    Ok(())
}

fn parse_id(raw: &str) -> Result<NoteId> {
    if raw.is_empty() {
        bail!("missing note id");
    }
    Ok(raw.parse()?)
}

fn parse_range(raw: &str) -> Result<Range<usize>> {
    let mut parts = raw.split_whitespace().map(str::parse::<usize>);
    match (parts.next(), parts.next()) {
        (Some(Ok(start)), Some(Ok(end))) => Ok(start..end),
        _ => bail!("expected `<start> <end>` character positions"),
    }
}

fn unescape(raw: &str) -> String {
    raw.replace("\\n", "\n")
}
