//! Plain-text rendering of books for terminal output.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt::Write as _;

use bookshelf::Book;
use bookshelf::catalog::{BookList, EMPTY_MESSAGE};

/// One card per book: title line, author, then whichever optionals are set.
pub fn render_book(book: &Book) -> String {
    let mut out = format!("#{} {}\n  by {}", book.id, book.title, book.author);
    if let Some(isbn) = book.isbn.as_deref().filter(|v| !v.is_empty()) {
        let _ = write!(out, "\n  ISBN: {isbn}");
    }
    if let Some(date) = book.published_date.as_deref().filter(|v| !v.is_empty()) {
        let _ = write!(out, "\n  Published: {date}");
    }
    if let Some(description) = book.description.as_deref().filter(|v| !v.is_empty()) {
        let _ = write!(out, "\n  {description}");
    }
    out
}

pub fn render_list(list: &BookList) -> String {
    if list.is_empty() {
        return EMPTY_MESSAGE.to_owned();
    }
    list.books
        .iter()
        .map(render_book)
        .collect::<Vec<_>>()
        .join("\n\n")
}
