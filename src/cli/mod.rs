//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::domain::NoteId;
use output::OutputFormat;

/// jotter - quick categorized notes with auto-save
#[derive(Parser, Debug)]
#[command(name = "jotter", version, about, long_about = None)]
pub struct Cli {
    /// Store file (overrides config file)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new note
    New(NewArgs),

    /// Change a note's title, content or category
    Edit(EditArgs),

    /// Delete a note
    Rm(RmArgs),

    /// List notes, optionally filtered by search term and category
    #[command(name = "ls")]
    List(ListArgs),

    /// Show a note's contents
    Show(ShowArgs),

    /// List categories in use
    Categories(CategoriesArgs),

    /// Export all notes to a JSON document
    Export(ExportArgs),

    /// Import notes from a JSON document
    Import(ImportArgs),

    /// Delete every note
    Clear(ClearArgs),

    /// Interactive editing session with auto-save
    Shell,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `new` command
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Note title (defaults to "Untitled Note")
    pub title: Option<String>,

    /// Note body
    #[arg(short, long)]
    pub content: Option<String>,

    /// Category for the note
    #[arg(short = 'C', long)]
    pub category: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `edit` command
#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Note ID
    pub id: NoteId,

    /// New title
    #[arg(short, long)]
    pub title: Option<String>,

    /// New body (replaces the whole body)
    #[arg(short, long, conflicts_with = "append")]
    pub content: Option<String>,

    /// Text appended to the body on a new line
    #[arg(short, long)]
    pub append: Option<String>,

    /// New category
    #[arg(short = 'C', long)]
    pub category: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct RmArgs {
    /// Note ID
    pub id: NoteId,
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Search term matched against title, content and category
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only show notes in this exact category
    #[arg(short = 'C', long)]
    pub category: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Note ID
    pub id: NoteId,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `categories` command
#[derive(Parser, Debug)]
pub struct CategoriesArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `export` command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Output file, or a directory to write `jotter-notes-<date>.json` into.
    /// Writes to stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `import` command
#[derive(Parser, Debug)]
pub struct ImportArgs {
    /// JSON document to import
    pub file: PathBuf,

    /// Discard existing notes instead of merging
    #[arg(long)]
    pub replace: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `clear` command
#[derive(Parser, Debug)]
pub struct ClearArgs {
    /// Confirm deleting every note
    #[arg(long)]
    pub yes: bool,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
