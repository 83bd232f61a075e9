//! Text-markup insertion on the content field.
//!
//! Positions are character offsets, not byte offsets.

use chrono::NaiveDate;
use std::ops::Range;
use thiserror::Error;

/// Inline markup applied around a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    Bold,
    Italic,
    Underline,
}

impl Markup {
    /// The delimiter written on both sides of the selection.
    pub fn delimiter(self) -> &'static str {
        match self {
            Markup::Bold => "**",
            Markup::Italic => "*",
            Markup::Underline => "_",
        }
    }

    /// Lowercase name, as used in messages.
    pub fn name(self) -> &'static str {
        match self {
            Markup::Bold => "bold",
            Markup::Italic => "italic",
            Markup::Underline => "underline",
        }
    }
}

/// Errors raised by markup insertion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    #[error("select text to format")]
    EmptySelection,

    #[error("position {position} is past the end of the text ({len} characters)")]
    OutOfBounds { position: usize, len: usize },
}

/// Result of a markup insertion: the new text and the range to select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub text: String,
    pub selection: Range<usize>,
}

const LIST_TEMPLATE: &str = "\n• Item 1\n• Item 2\n• Item 3\n";

/// Wraps the selected characters in the markup delimiter. The returned
/// selection covers the wrapped text including delimiters.
pub fn wrap_selection(
    text: &str,
    selection: Range<usize>,
    markup: Markup,
) -> Result<TextEdit, MarkupError> {
    if selection.start >= selection.end {
        return Err(MarkupError::EmptySelection);
    }
    let start = byte_offset(text, selection.start)?;
    let end = byte_offset(text, selection.end)?;

    let delimiter = markup.delimiter();
    let wrapped = format!("{delimiter}{}{delimiter}", &text[start..end]);
    let wrapped_len = wrapped.chars().count();

    let mut out = String::with_capacity(text.len() + 2 * delimiter.len());
    out.push_str(&text[..start]);
    out.push_str(&wrapped);
    out.push_str(&text[end..]);

    Ok(TextEdit {
        text: out,
        selection: selection.start..selection.start + wrapped_len,
    })
}

/// Inserts a three-item bullet list at `cursor` and selects the first
/// item's number.
pub fn insert_list(text: &str, cursor: usize) -> Result<TextEdit, MarkupError> {
    let at = byte_offset(text, cursor)?;
    let number = "\n• Item ".chars().count();
    Ok(TextEdit {
        text: splice(text, at, LIST_TEMPLATE),
        selection: cursor + number..cursor + number + 1,
    })
}

/// Inserts a `Date: Saturday, October 17, 2026` line at `cursor` and puts
/// the caret after it.
pub fn insert_date(text: &str, cursor: usize, date: NaiveDate) -> Result<TextEdit, MarkupError> {
    let at = byte_offset(text, cursor)?;
    let line = format!("\nDate: {}\n", date.format("%A, %B %-d, %Y"));
    let end = cursor + line.chars().count();
    Ok(TextEdit {
        text: splice(text, at, &line),
        selection: end..end,
    })
}

fn splice(text: &str, at: usize, insert: &str) -> String {
    let mut out = String::with_capacity(text.len() + insert.len());
    out.push_str(&text[..at]);
    out.push_str(insert);
    out.push_str(&text[at..]);
    out
}

fn byte_offset(text: &str, position: usize) -> Result<usize, MarkupError> {
    if position == 0 {
        return Ok(0);
    }
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .nth(position)
        .ok_or(MarkupError::OutOfBounds {
            position,
            len: text.chars().count(),
        })
}
