use super::*;

fn ws(text: &str) -> SyntaxTrivia {
    SyntaxTrivia::whitespace(text)
}

fn comment(text: &str) -> SyntaxTrivia {
    SyntaxTrivia::new(TriviaKind::SingleLineComment, text)
}

#[test]
fn test_new_picks_canonical_shape() {
    assert!(matches!(TriviaList::new(vec![]), TriviaList::Empty));
    assert!(matches!(TriviaList::new(vec![ws(" ")]), TriviaList::Single(_)));
    assert!(matches!(
        TriviaList::new(vec![ws(" "), comment("// x")]),
        TriviaList::Many(_)
    ));
}

#[test]
fn test_item_at_out_of_range() {
    let list = TriviaList::new(vec![ws(" "), comment("// x")]);
    assert_eq!(list.get(1).map(SyntaxTrivia::text), Ok("// x"));
    assert_eq!(
        list.get(2),
        Err(SyntaxError::IndexOutOfRange { index: 2, count: 2 })
    );
    assert_eq!(
        TriviaList::EMPTY.get(0),
        Err(SyntaxError::IndexOutOfRange { index: 0, count: 0 })
    );
}

#[test]
fn test_concat_collapses_empty_sides() {
    let single = TriviaList::single(ws("  "));
    assert_eq!(TriviaList::EMPTY.concat(&single), single);
    assert_eq!(single.concat(&TriviaList::EMPTY), single);

    let merged = single.concat(&TriviaList::single(comment("/* c */")));
    assert_eq!(merged.count(), 2);
    assert_eq!(merged.full_text(), "  /* c */");
    assert_eq!(merged.full_width(), 9);
}

#[test]
fn test_concat_never_nests() {
    let a = TriviaList::new(vec![ws(" "), ws("\t")]);
    let b = TriviaList::new(vec![comment("// a"), SyntaxTrivia::new_line("\n")]);
    let merged = a.concat(&b);
    assert_eq!(merged.count(), 4);
    assert_eq!(merged.full_text(), a.full_text() + &b.full_text());
    assert!(merged.iter().all(|item| item.full_width() > 0));
}

#[test]
fn test_flags_are_consistent_across_shapes() {
    let single = TriviaList::single(comment("// x"));
    let many = TriviaList::new(vec![ws(" "), comment("// x")]);
    assert!(single.has_comment());
    assert!(many.has_comment());
    assert!(!single.has_new_line());
    assert!(!many.has_new_line());

    let with_newline = many.concat(&TriviaList::single(SyntaxTrivia::new_line("\r\n")));
    assert!(with_newline.has_new_line());
    assert!(!with_newline.has_skipped_text());

    let skipped = TriviaList::single(SyntaxTrivia::new(TriviaKind::SkippedText, "@"));
    assert!(skipped.has_skipped_text());
}

#[test]
fn test_is_missing_requires_every_item_missing() {
    assert!(TriviaList::EMPTY.is_missing());
    assert!(TriviaList::new(vec![ws(""), ws("")]).is_missing());
    assert!(!TriviaList::new(vec![ws(""), ws(" ")]).is_missing());
}

#[test]
fn test_before_first_new_line() {
    let list = TriviaList::new(vec![
        ws(" "),
        comment("// keep"),
        SyntaxTrivia::new_line("\n"),
        ws("    "),
    ]);
    assert_eq!(list.before_first_new_line().full_text(), " // keep");
}
