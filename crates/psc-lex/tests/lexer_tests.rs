//! Integration and property tests for the lexer.
//!
//! The round-trip property: tokens tile the source. Every token's span
//! slices back to exactly the text it was lexed from, and the gaps between
//! consecutive tokens contain nothing but whitespace. Reinserting the
//! whitespace between the lexed slices therefore reproduces the source.

use proptest::prelude::*;
use psc_lex::{tokenize, TokenKind};

/// Assert the tiling property for `source`.
fn assert_round_trip(source: &str) {
    let tokens = tokenize(source).unwrap();
    let mut prev_end = 0;

    for token in &tokens {
        let gap = &source[prev_end..token.span.start];
        assert!(
            gap.chars().all(|c| matches!(c, ' ' | '\t' | '\n' | '\r')),
            "gap {:?} before {:?} is not whitespace",
            gap,
            token,
        );

        let slice = &source[token.span.start..token.span.end];
        if token.kind != TokenKind::Str {
            assert_eq!(slice, token.lexeme, "lexeme does not match source slice");
        } else {
            assert!(slice.starts_with('"') && slice.ends_with('"'));
        }
        prev_end = token.span.end;
    }

    // Eof sits at the end; only whitespace may follow the last real token.
    assert_eq!(prev_end, source.len());
}

#[test]
fn test_round_trip_examples() {
    assert_round_trip("x = 4: y = x * 5: display y:");
    assert_round_trip("display \"ID=\" ~ 1 ~ 2 ~ 3:");
    assert_round_trip("loop i in 1..3 { display \"Step \" ~ i ~ \": \" ~ (\"-\" * i): }");
    assert_round_trip(
        "name = \"Love\": score = 8: check score > 5 { display name ~ \" passed!\": } \
         else { display name ~ \" failed!\": }",
    );
    assert_round_trip(
        "day = 3: choose day { 1: display \"Mon\": 2: display \"Tue\": \
         3: display \"Wed\": default: display \"Unknown\": }",
    );
}

#[test]
fn test_eof_is_always_last() {
    let tokens = tokenize("display 1:").unwrap();
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    assert_eq!(
        tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(),
        1,
    );
}

/// One source fragment of a generated token stream.
fn token_text() -> impl Strategy<Value = String> {
    prop_oneof![
        // identifiers and keywords
        "[a-z_][a-z0-9_]{0,6}",
        // numbers
        "[0-9]{1,6}",
        // strings without escapes, quotes or newlines
        "\"[a-zA-Z0-9 ,.!*-]{0,8}\"",
        // operators and punctuation
        prop_oneof![
            Just("==".to_string()),
            Just("!=".to_string()),
            Just("<=".to_string()),
            Just(">=".to_string()),
            Just("..".to_string()),
            Just("=".to_string()),
            Just("<".to_string()),
            Just(">".to_string()),
            Just("+".to_string()),
            Just("-".to_string()),
            Just("*".to_string()),
            Just("%".to_string()),
            Just("~".to_string()),
            Just(":".to_string()),
            Just("{".to_string()),
            Just("}".to_string()),
            Just("(".to_string()),
            Just(")".to_string()),
        ],
    ]
}

fn whitespace() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(" ".to_string()),
        Just("  ".to_string()),
        Just("\t".to_string()),
        Just("\n".to_string()),
        Just(" \r\n ".to_string()),
    ]
}

proptest! {
    /// Any whitespace-separated stream of valid token texts lexes cleanly
    /// and tiles the source.
    #[test]
    fn prop_lexer_round_trip(
        fragments in prop::collection::vec((token_text(), whitespace()), 0..40),
        leading in whitespace(),
    ) {
        let mut source = leading;
        for (text, ws) in &fragments {
            source.push_str(text);
            source.push_str(ws);
        }

        let tokens = tokenize(&source).unwrap();
        prop_assert_eq!(tokens.len(), fragments.len() + 1);
        assert_round_trip(&source);
    }

    /// Token count and kinds are independent of the whitespace between
    /// tokens.
    #[test]
    fn prop_whitespace_insensitive_kinds(
        fragments in prop::collection::vec(token_text(), 1..20),
    ) {
        let narrow = fragments.join(" ");
        let wide = fragments.join(" \n\t ");

        let narrow_kinds: Vec<_> =
            tokenize(&narrow).unwrap().into_iter().map(|t| t.kind).collect();
        let wide_kinds: Vec<_> =
            tokenize(&wide).unwrap().into_iter().map(|t| t.kind).collect();
        prop_assert_eq!(narrow_kinds, wide_kinds);
    }
}
