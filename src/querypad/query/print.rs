//! Width-aware layout for parsed queries.
//!
//! Layout rules:
//! - top-level patterns sit one per line;
//! - a node with field children always breaks, one field per line, indented
//!   two spaces, with the closing paren hugging the last child;
//! - a node without fields stays on one line when it fits;
//! - alternations always break, one branch per line;
//! - groupings break only when over width;
//! - a predicate with several string arguments breaks the strings;
//! - a comment child forces its node onto multiple lines, since a comment
//!   runs to the end of its line and would swallow anything after it.

use super::ast::{
    Alternation, Child, Field, Group, Missing, MissingTarget, NamedNode, Pattern, Predicate,
    PredicateArg, Quantifier,
};
use pretty::RcDoc;

pub(crate) fn program(patterns: &[Pattern]) -> RcDoc<'_, ()> {
    RcDoc::intersperse(patterns.iter().map(pattern), RcDoc::hardline())
}

fn pattern(p: &Pattern) -> RcDoc<'_, ()> {
    match p {
        Pattern::Node(node) => named_node(node),
        Pattern::Anonymous(a) => {
            quoted(&a.text).append(decorations(a.quantifier, &a.captures))
        }
        Pattern::Wildcard(w) => RcDoc::text("_").append(decorations(w.quantifier, &w.captures)),
        Pattern::Group(g) => grouping(g),
        Pattern::Alternation(alt) => alternation(alt),
        Pattern::Anchor => RcDoc::text("."),
        Pattern::Predicate(pred) => predicate(pred),
        Pattern::Missing(m) => missing(m),
        Pattern::Comment(text) => RcDoc::text(text.as_str()),
    }
}

fn named_node(node: &NamedNode) -> RcDoc<'_, ()> {
    let has_fields = node
        .children
        .iter()
        .any(|c| matches!(c, Child::Field(_) | Child::Negated(_)));
    let has_comment = node
        .children
        .iter()
        .any(|c| matches!(c, Child::Pattern(Pattern::Comment(_))));
    let head = RcDoc::text("(").append(RcDoc::text(node.name.as_str()));

    let doc = if has_fields {
        // Non-field children stay on the head line; fields, predicates, and
        // comments each get their own indented line.
        let mut inline = Vec::new();
        let mut block = Vec::new();
        let mut predicates = Vec::new();
        let mut last_is_comment = false;
        for child in &node.children {
            match child {
                Child::Field(f) => {
                    block.push(field(f));
                    last_is_comment = false;
                }
                Child::Negated(name) => {
                    block.push(RcDoc::text(format!("!{name}")));
                    last_is_comment = false;
                }
                Child::Pattern(Pattern::Predicate(p)) => predicates.push(predicate(p)),
                Child::Pattern(p @ Pattern::Comment(_)) => {
                    block.push(pattern(p));
                    last_is_comment = true;
                }
                Child::Pattern(p) => inline.push(pattern(p)),
            }
        }
        if !predicates.is_empty() {
            last_is_comment = false;
        }
        block.extend(predicates);
        let inline_doc =
            RcDoc::concat(inline.into_iter().map(|d| RcDoc::text(" ").append(d)));
        let body = RcDoc::hardline()
            .append(RcDoc::intersperse(block, RcDoc::hardline()))
            .nest(2);
        let close = if last_is_comment {
            RcDoc::hardline().append(RcDoc::text(")"))
        } else {
            RcDoc::text(")")
        };
        head.append(inline_doc).append(body).append(close)
    } else if has_comment {
        // Never flattened: a comment would swallow the rest of the line,
        // including the closing paren when the comment comes last.
        let body = RcDoc::concat(node.children.iter().filter_map(|c| match c {
            Child::Pattern(p) => Some(RcDoc::hardline().append(pattern(p))),
            _ => None,
        }))
        .nest(2);
        let close = if matches!(
            node.children.last(),
            Some(Child::Pattern(Pattern::Comment(_)))
        ) {
            RcDoc::hardline().append(RcDoc::text(")"))
        } else {
            RcDoc::text(")")
        };
        head.append(body).append(close)
    } else {
        let body = RcDoc::concat(node.children.iter().filter_map(|c| match c {
            Child::Pattern(p) => Some(RcDoc::line().append(pattern(p))),
            _ => None,
        }))
        .nest(2);
        head.append(body).append(RcDoc::text(")")).group()
    };

    doc.append(decorations(node.quantifier, &node.captures))
}

fn field(f: &Field) -> RcDoc<'_, ()> {
    RcDoc::text(f.name.as_str())
        .append(RcDoc::text(": "))
        .append(pattern(&f.value))
}

fn grouping(g: &Group) -> RcDoc<'_, ()> {
    let has_comment = g.items.iter().any(|p| matches!(p, Pattern::Comment(_)));
    let inner = if has_comment {
        RcDoc::hardline()
            .append(RcDoc::intersperse(
                g.items.iter().map(pattern),
                RcDoc::hardline(),
            ))
            .nest(2)
            .append(RcDoc::hardline())
    } else if g.items.len() == 1 {
        pattern(&g.items[0])
    } else {
        RcDoc::line_()
            .append(RcDoc::intersperse(g.items.iter().map(pattern), RcDoc::line()))
            .nest(2)
            .append(RcDoc::line_())
            .group()
    };
    RcDoc::text("(")
        .append(inner)
        .append(RcDoc::text(")"))
        .append(decorations(g.quantifier, &g.captures))
}

fn alternation(alt: &Alternation) -> RcDoc<'_, ()> {
    RcDoc::text("[")
        .append(
            RcDoc::hardline()
                .append(RcDoc::intersperse(
                    alt.branches.iter().map(pattern),
                    RcDoc::hardline(),
                ))
                .nest(2),
        )
        .append(RcDoc::hardline())
        .append(RcDoc::text("]"))
        .append(decorations(alt.quantifier, &alt.captures))
}

fn predicate(pred: &Predicate) -> RcDoc<'_, ()> {
    let string_count = pred
        .args
        .iter()
        .filter(|a| matches!(a, PredicateArg::Str(_)))
        .count();
    let mut head = RcDoc::text("(#").append(RcDoc::text(pred.name.as_str()));
    let mut broken_strings = Vec::new();
    for arg in &pred.args {
        match arg {
            PredicateArg::Capture(c) => head = head.append(RcDoc::text(format!(" @{c}"))),
            PredicateArg::Ident(i) => {
                head = head.append(RcDoc::text(" ")).append(RcDoc::text(i.as_str()));
            }
            PredicateArg::Str(s) => {
                if string_count > 1 {
                    broken_strings.push(quoted(s));
                } else {
                    head = head.append(RcDoc::text(" ")).append(quoted(s));
                }
            }
        }
    }
    if !broken_strings.is_empty() {
        head = head.append(
            RcDoc::hardline()
                .append(RcDoc::intersperse(broken_strings, RcDoc::hardline()))
                .nest(2),
        );
    }
    head.append(RcDoc::text(")"))
}

fn missing(m: &Missing) -> RcDoc<'_, ()> {
    let target = match &m.target {
        MissingTarget::Name(name) => RcDoc::text(name.as_str()),
        MissingTarget::Literal(text) => quoted(text),
    };
    RcDoc::text("(MISSING ")
        .append(target)
        .append(RcDoc::text(")"))
        .append(decorations(None, &m.captures))
}

fn quoted(text: &str) -> RcDoc<'_, ()> {
    RcDoc::text("\"")
        .append(RcDoc::text(text))
        .append(RcDoc::text("\""))
}

fn decorations(quantifier: Option<Quantifier>, captures: &[String]) -> RcDoc<'_, ()> {
    let quant = match quantifier {
        Some(q) => RcDoc::text(q.symbol()),
        None => RcDoc::nil(),
    };
    quant.append(RcDoc::concat(
        captures.iter().map(|c| RcDoc::text(format!(" @{c}"))),
    ))
}
