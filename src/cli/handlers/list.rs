//! List and categories command handlers.

use anyhow::Result;
use chrono::Utc;
use std::io::Write;
use std::path::Path;

use super::{open_store, truncate_str};
use crate::cli::output::{CategoryListing, Output, OutputFormat};
use crate::cli::{CategoriesArgs, ListArgs};
use crate::domain::Note;
use crate::view::{ListFilter, NoteListView};

pub fn handle_list(args: &ListArgs, store_path: &Path) -> Result<()> {
    let store = open_store(store_path)?;

    let mut filter = ListFilter::new();
    if let Some(search) = &args.search {
        filter = filter.search(search.as_str());
    }
    if let Some(category) = &args.category {
        filter = filter.category(category.as_str());
    }

    let view = NoteListView::build(store.list(), &filter, store.active_id(), Utc::now());

    match args.format {
        OutputFormat::Human => write_list(&mut std::io::stdout().lock(), &view)?,
        OutputFormat::Json => println!("{}", Output::new(&view).to_json()?),
    }
    Ok(())
}

/// Writes the human-readable list table.
pub(crate) fn write_list(out: &mut impl Write, view: &NoteListView) -> std::io::Result<()> {
    if let Some(empty) = view.empty {
        writeln!(out, "{}", empty.message())?;
        return Ok(());
    }

    writeln!(out, "  {:<6}  {:<32}  {:<14}  {:>10}", "ID", "Title", "Category", "Updated")?;
    writeln!(
        out,
        "  {:<6}  {:<32}  {:<14}  {:>10}",
        "------", "--------------------------------", "--------------", "----------"
    )?;
    for card in &view.cards {
        let marker = if card.active { '*' } else { ' ' };
        writeln!(
            out,
            "{} {:<6}  {:<32}  {:<14}  {:>10}",
            marker,
            format!("#{}", card.id),
            truncate_str(&card.title, 32),
            truncate_str(&card.category, 14),
            card.updated
        )?;
        writeln!(out, "          {}", truncate_str(&card.preview, 72))?;
    }
    writeln!(out)?;
    writeln!(out, "{}", view.count_label())?;
    Ok(())
}

pub fn handle_categories(args: &CategoriesArgs, store_path: &Path) -> Result<()> {
    let store = open_store(store_path)?;
    let listings = category_counts(store.list(), store.categories());

    match args.format {
        OutputFormat::Human => {
            if listings.is_empty() {
                println!("No categories.");
            }
            for listing in &listings {
                println!("{} ({})", listing.name, listing.count);
            }
        }
        OutputFormat::Json => println!("{}", Output::new(&listings).to_json()?),
    }
    Ok(())
}

/// Counts notes per category, keeping the given category order.
pub(crate) fn category_counts(notes: &[Note], categories: Vec<&str>) -> Vec<CategoryListing> {
    categories
        .into_iter()
        .map(|name| CategoryListing {
            name: name.to_string(),
            count: notes.iter().filter(|n| n.category() == name).count(),
        })
        .collect()
}
