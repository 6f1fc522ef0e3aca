//! End-to-end coverage of the playground controller wired to the real
//! formatter and share codec, with an in-memory fragment standing in for
//! the session file.

use querypad::playground::{Playground, SAMPLE_QUERY};
use querypad::query::DEFAULT_WIDTH;
use querypad::render::{QueryFormatter, Rendered, Renderer};
use querypad::share::{token, MemoryFragment, ShareCodec};

fn fresh_playground() -> Playground<QueryFormatter, MemoryFragment> {
    let renderer = Renderer::new(QueryFormatter::new(DEFAULT_WIDTH));
    let codec = ShareCodec::new(MemoryFragment::new());
    Playground::start(renderer, codec)
}

#[test]
fn first_visit_shows_the_sample_query_formatted() {
    let playground = fresh_playground();

    assert_eq!(playground.source(), SAMPLE_QUERY);
    match playground.rendered() {
        Rendered::Formatted(text) => {
            assert!(text.contains("(class_declaration"));
            assert!(text.contains("@the-method-name"));
        }
        Rendered::Error(e) => panic!("sample query failed to render: {}", e),
    }
}

#[test]
fn editing_updates_output_and_share_token() {
    let mut playground = fresh_playground();

    playground.on_change("(string) @string");
    assert_eq!(playground.output(), "(string) @string");

    let saved = playground
        .codec()
        .fragment()
        .token()
        .expect("edit should persist a token")
        .to_string();
    assert_eq!(token::decode(&saved).unwrap(), "(string) @string");
}

#[test]
fn a_saved_session_survives_a_restart() {
    let mut playground = fresh_playground();
    let query = "(binary_expression left: (number) @lhs right: (number) @rhs)";
    playground.on_change(query);

    let saved = playground.codec().fragment().token().unwrap().to_string();

    // A new playground seeded with the stored token resumes where the
    // previous one left off.
    let renderer = Renderer::new(QueryFormatter::new(DEFAULT_WIDTH));
    let codec = ShareCodec::new(MemoryFragment::with_token(saved));
    let resumed = Playground::start(renderer, codec);

    assert_eq!(resumed.source(), query);
    assert!(matches!(resumed.rendered(), Rendered::Formatted(_)));
}

#[test]
fn a_corrupt_token_falls_back_to_the_sample() {
    let renderer = Renderer::new(QueryFormatter::new(DEFAULT_WIDTH));
    let codec = ShareCodec::new(MemoryFragment::with_token("%%%not-base64%%%"));
    let playground = Playground::start(renderer, codec);

    assert_eq!(playground.source(), SAMPLE_QUERY);
}

#[test]
fn an_invalid_edit_keeps_the_session_alive() {
    let mut playground = fresh_playground();

    playground.on_change("(unclosed");
    assert!(playground.output().starts_with("Error: "));
    assert!(playground.output().contains("parse error at line 1"));

    // The broken source is still persisted, so the author can resume
    // mid-edit in the next session.
    let saved = playground.codec().fragment().token().unwrap().to_string();
    assert_eq!(token::decode(&saved).unwrap(), "(unclosed");

    // Fixing the query recovers without any reset.
    playground.on_change("(closed)");
    assert_eq!(playground.output(), "(closed)");
}

#[test]
fn clearing_the_editor_clears_the_stored_session() {
    let mut playground = fresh_playground();

    playground.on_change("(comment) @c");
    assert!(playground.codec().fragment().token().is_some());

    playground.on_change("");
    assert_eq!(playground.codec().fragment().token(), None);
    assert_eq!(playground.output(), "");
}
