//! The tree-sitter query formatter: lexer, parser, and pretty printer.
//!
//! The printer is the canonical-form authority for the whole playground;
//! everything else treats it as an opaque `text -> text` transform.

pub mod ast;
mod lexer;
mod parser;
mod print;

use ast::{Child, Pattern, PredicateArg, Quantifier};
use thiserror::Error;

/// Target line width used when nothing else is configured.
pub const DEFAULT_WIDTH: usize = 80;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("parse error at line {line}, column {column}: {message}")]
pub struct ParseError {
    pub line: u32,
    pub column: u32,
    pub message: String,
}

/// Parse a query document into its pattern sequence.
pub fn parse(input: &str) -> Result<Vec<Pattern>, ParseError> {
    parser::parse(input)
}

/// Format a query document to the given line width.
pub fn format(input: &str, width: usize) -> Result<String, ParseError> {
    let patterns = parse(input)?;
    let out = print::program(&patterns).pretty(width).to_string();
    Ok(out)
}

/// Render the parse tree as an indented dump, for `querypad tree`.
pub fn tree(input: &str) -> Result<String, ParseError> {
    let patterns = parse(input)?;
    let mut out = String::from("program\n");
    for pattern in &patterns {
        dump(pattern, 1, &mut out);
    }
    Ok(out)
}

fn dump(pattern: &Pattern, depth: usize, out: &mut String) {
    let pad = "  ".repeat(depth);
    match pattern {
        Pattern::Node(node) => {
            out.push_str(&format!(
                "{pad}named_node {}{}\n",
                node.name,
                suffix(node.quantifier, &node.captures)
            ));
            for child in &node.children {
                match child {
                    Child::Field(f) => {
                        out.push_str(&format!("{pad}  field {}:\n", f.name));
                        dump(&f.value, depth + 2, out);
                    }
                    Child::Negated(name) => {
                        out.push_str(&format!("{pad}  negated_field !{name}\n"));
                    }
                    Child::Pattern(p) => dump(p, depth + 1, out),
                }
            }
        }
        Pattern::Anonymous(a) => {
            out.push_str(&format!(
                "{pad}anonymous_node \"{}\"{}\n",
                a.text,
                suffix(a.quantifier, &a.captures)
            ));
        }
        Pattern::Wildcard(w) => {
            out.push_str(&format!(
                "{pad}wildcard{}\n",
                suffix(w.quantifier, &w.captures)
            ));
        }
        Pattern::Group(g) => {
            out.push_str(&format!(
                "{pad}grouping{}\n",
                suffix(g.quantifier, &g.captures)
            ));
            for item in &g.items {
                dump(item, depth + 1, out);
            }
        }
        Pattern::Alternation(alt) => {
            out.push_str(&format!(
                "{pad}alternation{}\n",
                suffix(alt.quantifier, &alt.captures)
            ));
            for branch in &alt.branches {
                dump(branch, depth + 1, out);
            }
        }
        Pattern::Anchor => out.push_str(&format!("{pad}anchor\n")),
        Pattern::Predicate(pred) => {
            let mut line = format!("{pad}predicate #{}", pred.name);
            for arg in &pred.args {
                match arg {
                    PredicateArg::Capture(c) => line.push_str(&format!(" @{c}")),
                    PredicateArg::Ident(i) => line.push_str(&format!(" {i}")),
                    PredicateArg::Str(s) => line.push_str(&format!(" \"{s}\"")),
                }
            }
            out.push_str(&line);
            out.push('\n');
        }
        Pattern::Missing(m) => {
            let target = match &m.target {
                ast::MissingTarget::Name(name) => name.clone(),
                ast::MissingTarget::Literal(text) => format!("\"{text}\""),
            };
            out.push_str(&format!(
                "{pad}missing {target}{}\n",
                suffix(None, &m.captures)
            ));
        }
        Pattern::Comment(text) => out.push_str(&format!("{pad}comment {text}\n")),
    }
}

fn suffix(quantifier: Option<Quantifier>, captures: &[String]) -> String {
    let mut s = String::new();
    if let Some(q) = quantifier {
        s.push_str(q.symbol());
    }
    for c in captures {
        s.push_str(&format!(" @{c}"));
    }
    s
}
