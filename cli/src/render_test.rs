use super::*;

fn book(isbn: Option<&str>, date: Option<&str>, description: Option<&str>) -> Book {
    Book {
        id: 12,
        title: "Dune".to_owned(),
        author: "Frank Herbert".to_owned(),
        isbn: isbn.map(str::to_owned),
        published_date: date.map(str::to_owned),
        description: description.map(str::to_owned),
        created_at: "c".to_owned(),
        updated_at: "u".to_owned(),
    }
}

#[test]
fn render_book_skips_absent_optionals() {
    assert_eq!(render_book(&book(None, None, None)), "#12 Dune\n  by Frank Herbert");
}

#[test]
fn render_book_includes_present_optionals() {
    let out = render_book(&book(Some("978"), Some("1965-08-01"), Some("Spice.")));
    assert_eq!(
        out,
        "#12 Dune\n  by Frank Herbert\n  ISBN: 978\n  Published: 1965-08-01\n  Spice."
    );
}

#[test]
fn render_list_shows_empty_state() {
    let mut list = BookList::default();
    list.apply_loaded(Ok(Vec::new()));
    assert_eq!(render_list(&list), EMPTY_MESSAGE);
}

#[test]
fn render_list_separates_cards() {
    let mut list = BookList::default();
    list.apply_loaded(Ok(vec![book(None, None, None), book(None, None, None)]));
    assert_eq!(render_list(&list).matches("#12 Dune").count(), 2);
    assert!(render_list(&list).contains("\n\n"));
}
