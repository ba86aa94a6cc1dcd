use super::*;

fn kinds(text: &str) -> Vec<SyntaxKind> {
    scan_all(text).iter().map(SyntaxToken::kind).collect()
}

#[test]
fn test_tokens_reproduce_source_text() {
    let source = "// header\nvar x = 1; /* c */\n\tfoo(x, 'a\\n') // tail\n";
    let rendered: String = scan_all(source).iter().map(SyntaxToken::full_text).collect();
    assert_eq!(rendered, source);
}

#[test]
fn test_trailing_trivia_stops_after_first_newline() {
    let tokens = scan_all("a // note\n\n  b");
    assert_eq!(tokens[0].trailing_trivia().full_text(), " // note\n");
    assert_eq!(tokens[1].leading_trivia().full_text(), "\n  ");
    assert_eq!(tokens[1].text(), "b");
}

#[test]
fn test_keywords_and_contextual_words() {
    assert_eq!(
        kinds("class module declare"),
        [
            SyntaxKind::ClassKeyword,
            SyntaxKind::IdentifierName,
            SyntaxKind::IdentifierName,
            SyntaxKind::EndOfFileToken
        ]
    );
}

#[test]
fn test_longest_punctuation_match() {
    assert_eq!(
        kinds("a >>>= b => c !== d"),
        [
            SyntaxKind::IdentifierName,
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken,
            SyntaxKind::IdentifierName,
            SyntaxKind::EqualsGreaterThanToken,
            SyntaxKind::IdentifierName,
            SyntaxKind::ExclamationEqualsEqualsToken,
            SyntaxKind::IdentifierName,
            SyntaxKind::EndOfFileToken
        ]
    );
}

#[test]
fn test_literal_values() {
    let tokens = scan_all("0x1f 1.5e2 \"a\\tb\" true");
    assert_eq!(tokens[0].value(), &TokenValue::Number(31.0));
    assert_eq!(tokens[1].value(), &TokenValue::Number(150.0));
    assert_eq!(tokens[2].value_text(), "a\tb");
    assert_eq!(tokens[3].value(), &TokenValue::Boolean(true));
}

#[test]
fn test_rescan_slash_as_regex() {
    let source = "x = /a[/]b/g;";
    let mut scanner = Scanner::new(source);
    scanner.scan();
    scanner.scan();
    let full_start = scanner.position();
    let slash = scanner.scan();
    assert_eq!(slash.kind(), SyntaxKind::SlashToken);
    let regex = scanner.rescan_slash(full_start);
    assert_eq!(regex.kind(), SyntaxKind::RegularExpressionLiteral);
    assert_eq!(regex.text(), "/a[/]b/g");
    assert_eq!(scanner.scan().kind(), SyntaxKind::SemicolonToken);
}

#[test]
fn test_unterminated_string_is_reported() {
    let mut scanner = Scanner::new("'abc\nx");
    let token = scanner.scan();
    assert_eq!(token.kind(), SyntaxKind::StringLiteral);
    let diagnostic = scanner.take_diagnostic().expect("unterminated");
    assert_eq!(diagnostic.offset, 0);
    assert!(scanner.take_diagnostic().is_none());
}

#[test]
fn test_end_of_file_carries_remaining_trivia() {
    let tokens = scan_all("a;\n// done\n");
    let eof = tokens.last().expect("eof");
    assert_eq!(eof.kind(), SyntaxKind::EndOfFileToken);
    assert_eq!(eof.leading_trivia().full_text(), "// done\n");
}
