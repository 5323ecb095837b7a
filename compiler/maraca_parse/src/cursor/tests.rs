use super::*;

#[test]
fn test_cursor_navigation() {
    let mut cursor = Cursor::new("ab");
    assert_eq!(cursor.peek(), Some('a'));
    assert_eq!(cursor.bump(), Some('a'));
    assert_eq!(cursor.position(), 1);
    assert_eq!(cursor.bump(), Some('b'));
    assert!(cursor.is_at_end());
    assert_eq!(cursor.bump(), None);
    assert_eq!(cursor.peek(), None);
}

#[test]
fn test_eat_and_at() {
    let mut cursor = Cursor::new("=>>x");
    assert!(cursor.at("=>"));
    assert!(!cursor.eat('>'));
    assert!(cursor.eat_str("=>>"));
    assert!(cursor.eat('x'));
    assert!(cursor.is_at_end());
}

#[test]
fn test_eat_while_multibyte() {
    let mut cursor = Cursor::new("café bar");
    assert_eq!(cursor.eat_while(char::is_alphanumeric), "café");
    assert_eq!(cursor.position(), 5);
    assert_eq!(cursor.rest(), " bar");
}

#[test]
fn test_skip_whitespace_counts_newlines() {
    let mut cursor = Cursor::new(" \n\t\n  x");
    assert_eq!(cursor.skip_whitespace(), 2);
    assert_eq!(cursor.peek(), Some('x'));

    let mut cursor = Cursor::new("  \nx");
    cursor.skip_blanks();
    assert_eq!(cursor.peek(), Some('\n'));
}

#[test]
fn test_set_position_and_span() {
    let mut cursor = Cursor::new("abc");
    cursor.bump();
    let start = cursor.position();
    cursor.bump();
    cursor.bump();
    assert_eq!(cursor.span_from(start), Span::new(1, 3));
    cursor.set_position(start);
    assert_eq!(cursor.peek(), Some('b'));
}
