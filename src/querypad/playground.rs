//! The playground controller: the one owner of the source buffer and its
//! derived rendered buffer.
//!
//! Lifecycle is a single transition, Uninitialized → Ready, performed by
//! [`Playground::start`]. After that, the front end feeds every discrete edit
//! through [`Playground::on_change`]; each call completes fully (token saved,
//! render finished, rendered buffer replaced) before the next one can be
//! observed, because the front end delivers edits on one sequential stream.

use crate::render::{Rendered, Renderer, Transform};
use crate::share::{Fragment, ShareCodec};

/// Seed document shown when there is no (usable) saved session.
pub const SAMPLE_QUERY: &str = r#"[(class_declaration name: (identifier) @the-class-name body: (class_body (method_definition name: (property_identifier) @the-method-name)))
(comment (_))]"#;

pub struct Playground<T: Transform, F: Fragment> {
    renderer: Renderer<T>,
    codec: ShareCodec<F>,
    source: String,
    rendered: Rendered,
}

impl<T: Transform, F: Fragment> Playground<T, F> {
    /// Startup: load the shared document (falling back to the sample) and
    /// run one render pass so the output is populated before any edit.
    pub fn start(renderer: Renderer<T>, codec: ShareCodec<F>) -> Self {
        let source = codec
            .load()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| SAMPLE_QUERY.to_string());
        let rendered = renderer.render(&source);
        Self {
            renderer,
            codec,
            source,
            rendered,
        }
    }

    /// One edit notification: adopt the new source, re-save the share token,
    /// re-render. Failures surface in the rendered buffer and nowhere else.
    pub fn on_change(&mut self, source: &str) {
        self.source = source.to_string();
        self.codec.save(&self.source);
        self.rendered = self.renderer.render(&self.source);
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn rendered(&self) -> &Rendered {
        &self.rendered
    }

    /// The text for the read-only pane: formatted output, or the failure
    /// behind a fixed prefix.
    pub fn output(&self) -> String {
        match &self.rendered {
            Rendered::Formatted(text) => text.clone(),
            Rendered::Error(message) => format!("Error: {message}"),
        }
    }

    pub fn codec(&self) -> &ShareCodec<F> {
        &self.codec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::QueryFormatter;
    use crate::share::memory::MemoryFragment;
    use crate::share::token;

    fn playground_with(fragment: MemoryFragment) -> Playground<QueryFormatter, MemoryFragment> {
        Playground::start(
            Renderer::new(QueryFormatter::default()),
            ShareCodec::new(fragment),
        )
    }

    #[test]
    fn starts_from_the_sample_when_nothing_is_saved() {
        let playground = playground_with(MemoryFragment::new());
        assert_eq!(playground.source(), SAMPLE_QUERY);
        assert!(matches!(playground.rendered(), Rendered::Formatted(_)));
        assert!(!playground.output().is_empty());
    }

    #[test]
    fn starts_from_the_saved_session_when_present() {
        let saved = "(call (identifier) @fn)";
        let fragment = MemoryFragment::with_token(token::encode(saved).unwrap());
        let playground = playground_with(fragment);
        assert_eq!(playground.source(), saved);
    }

    #[test]
    fn undecodable_token_falls_back_to_the_sample() {
        let playground = playground_with(MemoryFragment::with_token("???not-a-token???"));
        assert_eq!(playground.source(), SAMPLE_QUERY);
    }

    #[test]
    fn edits_update_token_and_output() {
        let mut playground = playground_with(MemoryFragment::new());
        playground.on_change("(comment) @doc");
        assert_eq!(
            playground.codec().fragment().token(),
            Some(token::encode("(comment) @doc").unwrap().as_str())
        );
        assert_eq!(playground.output(), "(comment) @doc");
    }

    #[test]
    fn render_failure_keeps_the_source_and_prefixes_the_output() {
        let mut playground = playground_with(MemoryFragment::new());
        playground.on_change("(((");
        assert_eq!(playground.source(), "(((");
        assert!(playground.output().starts_with("Error: "));
    }

    #[test]
    fn failure_does_not_poison_the_next_edit() {
        let mut playground = playground_with(MemoryFragment::new());
        playground.on_change("(((");
        playground.on_change("(call)");
        assert_eq!(playground.output(), "(call)");
    }

    #[test]
    fn clearing_the_source_clears_the_token() {
        let mut playground = playground_with(MemoryFragment::new());
        playground.on_change("(call)");
        playground.on_change("");
        assert_eq!(playground.codec().fragment().token(), None);
        assert_eq!(playground.output(), "");
    }
}
