use super::ast::{
    Alternation, AnonymousNode, Child, Field, Group, Missing, MissingTarget, NamedNode, Pattern,
    Predicate, PredicateArg, Quantifier, Wildcard,
};
use super::lexer::{self, Tok, Token};
use super::ParseError;

pub(crate) fn parse(input: &str) -> Result<Vec<Pattern>, ParseError> {
    let out = lexer::lex(input)?;
    Parser {
        tokens: out.tokens,
        pos: 0,
        eof: out.eof,
    }
    .program()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    eof: (u32, u32),
}

impl Parser {
    fn program(mut self) -> Result<Vec<Pattern>, ParseError> {
        let mut patterns = Vec::new();
        while self.pos < self.tokens.len() {
            patterns.push(self.pattern()?);
        }
        Ok(patterns)
    }

    fn pattern(&mut self) -> Result<Pattern, ParseError> {
        let Some(token) = self.tokens.get(self.pos).cloned() else {
            return Err(self.error_here("expected a pattern, found end of input".to_string()));
        };
        match token.tok {
            Tok::LParen => {
                self.pos += 1;
                self.parenthesized()
            }
            Tok::LBracket => {
                self.pos += 1;
                self.alternation()
            }
            Tok::Str(text) => {
                self.pos += 1;
                let (quantifier, captures) = self.decorations();
                Ok(Pattern::Anonymous(AnonymousNode {
                    text,
                    quantifier,
                    captures,
                }))
            }
            Tok::Ident(ref name) if name == "_" => {
                self.pos += 1;
                let (quantifier, captures) = self.decorations();
                Ok(Pattern::Wildcard(Wildcard {
                    quantifier,
                    captures,
                }))
            }
            Tok::Dot => {
                self.pos += 1;
                Ok(Pattern::Anchor)
            }
            Tok::Comment(text) => {
                self.pos += 1;
                Ok(Pattern::Comment(text))
            }
            other => Err(self.error_here(format!(
                "expected a pattern, found {}",
                describe(&other)
            ))),
        }
    }

    /// Dispatch for everything that starts with `(`: named nodes, groupings,
    /// predicates, and MISSING nodes.
    fn parenthesized(&mut self) -> Result<Pattern, ParseError> {
        match self.peek() {
            Some(Tok::Hash) => self.predicate(),
            Some(Tok::Ident(name)) if name == "MISSING" => self.missing(),
            Some(Tok::Ident(_)) => self.named_node(),
            Some(Tok::LParen | Tok::LBracket | Tok::Str(_) | Tok::Dot | Tok::Comment(_)) => {
                self.grouping()
            }
            Some(Tok::RParen) => Err(self.error_here("expected a pattern inside '()'".to_string())),
            Some(other) => {
                let message = format!("expected a node name after '(', found {}", describe(other));
                Err(self.error_here(message))
            }
            None => Err(self.error_here("unclosed '(' at end of input".to_string())),
        }
    }

    fn named_node(&mut self) -> Result<Pattern, ParseError> {
        let name = self.expect_ident("a node name")?;
        let mut children = Vec::new();
        loop {
            let Some(token) = self.tokens.get(self.pos).cloned() else {
                return Err(self.error_here(format!("unclosed '(' in ({name} ...)")));
            };
            match token.tok {
                Tok::RParen => {
                    self.pos += 1;
                    break;
                }
                Tok::Ident(ref child_name) => {
                    if matches!(self.peek2(), Some(Tok::Colon)) {
                        let field_name = child_name.clone();
                        self.pos += 2;
                        let value = self.pattern()?;
                        children.push(Child::Field(Field {
                            name: field_name,
                            value,
                        }));
                    } else if child_name == "_" {
                        children.push(Child::Pattern(self.pattern()?));
                    } else {
                        return Err(self.error_here(format!(
                            "expected ':' after field name '{child_name}'"
                        )));
                    }
                }
                Tok::Bang => {
                    self.pos += 1;
                    let field = self.expect_ident("a field name after '!'")?;
                    children.push(Child::Negated(field));
                }
                Tok::LParen | Tok::LBracket | Tok::Str(_) | Tok::Dot | Tok::Comment(_) => {
                    children.push(Child::Pattern(self.pattern()?));
                }
                other => {
                    return Err(self.error_here(format!(
                        "unexpected {} inside ({name} ...)",
                        describe(&other)
                    )));
                }
            }
        }
        let (quantifier, captures) = self.decorations();
        Ok(Pattern::Node(NamedNode {
            name,
            children,
            quantifier,
            captures,
        }))
    }

    fn grouping(&mut self) -> Result<Pattern, ParseError> {
        let mut items = Vec::new();
        loop {
            match self.peek() {
                Some(Tok::RParen) => {
                    self.pos += 1;
                    break;
                }
                None => return Err(self.error_here("unclosed '(' at end of input".to_string())),
                _ => items.push(self.pattern()?),
            }
        }
        let (quantifier, captures) = self.decorations();
        Ok(Pattern::Group(Group {
            items,
            quantifier,
            captures,
        }))
    }

    fn alternation(&mut self) -> Result<Pattern, ParseError> {
        let mut branches = Vec::new();
        loop {
            match self.peek() {
                Some(Tok::RBracket) if branches.is_empty() => {
                    return Err(
                        self.error_here("expected at least one pattern inside '[]'".to_string())
                    );
                }
                Some(Tok::RBracket) => {
                    self.pos += 1;
                    break;
                }
                None => return Err(self.error_here("unclosed '[' at end of input".to_string())),
                _ => branches.push(self.pattern()?),
            }
        }
        let (quantifier, captures) = self.decorations();
        Ok(Pattern::Alternation(Alternation {
            branches,
            quantifier,
            captures,
        }))
    }

    fn predicate(&mut self) -> Result<Pattern, ParseError> {
        self.pos += 1; // '#'
        let mut name = self.expect_ident("a predicate name after '#'")?;
        // The sigil lexes as its own token: `eq` `?` or `set` `!`.
        match self.peek() {
            Some(Tok::Quant(Quantifier::Optional)) => {
                name.push('?');
                self.pos += 1;
            }
            Some(Tok::Bang) => {
                name.push('!');
                self.pos += 1;
            }
            _ => {}
        }
        let mut args = Vec::new();
        loop {
            let Some(token) = self.tokens.get(self.pos).cloned() else {
                return Err(self.error_here(format!("unclosed '(' in (#{name} ...)")));
            };
            match token.tok {
                Tok::RParen => {
                    self.pos += 1;
                    break;
                }
                Tok::Capture(c) => {
                    self.pos += 1;
                    args.push(PredicateArg::Capture(c));
                }
                Tok::Ident(i) => {
                    self.pos += 1;
                    args.push(PredicateArg::Ident(i));
                }
                Tok::Str(s) => {
                    self.pos += 1;
                    args.push(PredicateArg::Str(s));
                }
                other => {
                    return Err(self.error_here(format!(
                        "unexpected {} in (#{name} ...)",
                        describe(&other)
                    )));
                }
            }
        }
        Ok(Pattern::Predicate(Predicate { name, args }))
    }

    fn missing(&mut self) -> Result<Pattern, ParseError> {
        self.pos += 1; // MISSING
        let target = match self.tokens.get(self.pos).cloned() {
            Some(Token {
                tok: Tok::Ident(n), ..
            }) => {
                self.pos += 1;
                MissingTarget::Name(n)
            }
            Some(Token {
                tok: Tok::Str(s), ..
            }) => {
                self.pos += 1;
                MissingTarget::Literal(s)
            }
            _ => {
                return Err(
                    self.error_here("expected a node name or string after MISSING".to_string())
                );
            }
        };
        match self.peek() {
            Some(Tok::RParen) => self.pos += 1,
            _ => return Err(self.error_here("expected ')' after MISSING target".to_string())),
        }
        let captures = self.captures();
        Ok(Pattern::Missing(Missing { target, captures }))
    }

    fn decorations(&mut self) -> (Option<Quantifier>, Vec<String>) {
        let mut quantifier = None;
        let mut captures = Vec::new();
        loop {
            match self.tokens.get(self.pos).map(|t| t.tok.clone()) {
                Some(Tok::Quant(q)) => {
                    quantifier = Some(q);
                    self.pos += 1;
                }
                Some(Tok::Capture(c)) => {
                    captures.push(c);
                    self.pos += 1;
                }
                _ => break,
            }
        }
        (quantifier, captures)
    }

    fn captures(&mut self) -> Vec<String> {
        let mut captures = Vec::new();
        while let Some(Tok::Capture(c)) = self.tokens.get(self.pos).map(|t| t.tok.clone()) {
            captures.push(c);
            self.pos += 1;
        }
        captures
    }

    fn peek(&self) -> Option<&Tok> {
        self.tokens.get(self.pos).map(|t| &t.tok)
    }

    fn peek2(&self) -> Option<&Tok> {
        self.tokens.get(self.pos + 1).map(|t| &t.tok)
    }

    fn expect_ident(&mut self, what: &str) -> Result<String, ParseError> {
        match self.tokens.get(self.pos).cloned() {
            Some(Token {
                tok: Tok::Ident(name),
                ..
            }) => {
                self.pos += 1;
                Ok(name)
            }
            _ => Err(self.error_here(format!("expected {what}"))),
        }
    }

    fn error_here(&self, message: String) -> ParseError {
        match self.tokens.get(self.pos) {
            Some(token) => ParseError {
                line: token.line,
                column: token.column,
                message,
            },
            None => ParseError {
                line: self.eof.0,
                column: self.eof.1,
                message,
            },
        }
    }
}

fn describe(tok: &Tok) -> String {
    match tok {
        Tok::LParen => "'('".to_string(),
        Tok::RParen => "')'".to_string(),
        Tok::LBracket => "'['".to_string(),
        Tok::RBracket => "']'".to_string(),
        Tok::Ident(name) => format!("'{name}'"),
        Tok::Capture(name) => format!("'@{name}'"),
        Tok::Str(_) => "a string".to_string(),
        Tok::Quant(q) => format!("'{}'", q.symbol()),
        Tok::Hash => "'#'".to_string(),
        Tok::Bang => "'!'".to_string(),
        Tok::Colon => "':'".to_string(),
        Tok::Dot => "'.'".to_string(),
        Tok::Comment(_) => "a comment".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(input: &str) -> Pattern {
        let mut patterns = parse(input).unwrap();
        assert_eq!(patterns.len(), 1, "expected one pattern in {input:?}");
        patterns.remove(0)
    }

    #[test]
    fn parses_a_field_with_a_captured_value() {
        let Pattern::Node(node) = one("(pair key: (string) @key)") else {
            panic!("expected a named node");
        };
        assert_eq!(node.name, "pair");
        let Child::Field(field) = &node.children[0] else {
            panic!("expected a field child");
        };
        assert_eq!(field.name, "key");
        let Pattern::Node(value) = &field.value else {
            panic!("expected a node value");
        };
        assert_eq!(value.name, "string");
        assert_eq!(value.captures, vec!["key".to_string()]);
    }

    #[test]
    fn capture_binds_to_the_preceding_pattern() {
        let Pattern::Node(node) = one("(comment)* @doc") else {
            panic!("expected a named node");
        };
        assert_eq!(node.quantifier, Some(Quantifier::ZeroOrMore));
        assert_eq!(node.captures, vec!["doc".to_string()]);
    }

    #[test]
    fn negated_fields_and_anchors_are_children() {
        let Pattern::Node(node) = one("(function_declaration . !body)") else {
            panic!("expected a named node");
        };
        assert_eq!(node.children.len(), 2);
        assert!(matches!(node.children[0], Child::Pattern(Pattern::Anchor)));
        assert!(matches!(&node.children[1], Child::Negated(f) if f == "body"));
    }

    #[test]
    fn bare_and_named_wildcards_differ() {
        assert!(matches!(one("_"), Pattern::Wildcard(_)));
        assert!(matches!(one("(_)"), Pattern::Node(n) if n.name == "_"));
    }

    #[test]
    fn supertype_names_parse_whole() {
        let Pattern::Node(node) = one("(expression/binary_expression)") else {
            panic!("expected a named node");
        };
        assert_eq!(node.name, "expression/binary_expression");
    }

    #[test]
    fn predicate_sigils_join_the_name() {
        let Pattern::Group(group) = one(r#"((identifier) @id (#eq? @id "self") (#set! kind "x"))"#)
        else {
            panic!("expected a grouping");
        };
        let preds: Vec<_> = group
            .items
            .iter()
            .filter_map(|p| match p {
                Pattern::Predicate(pred) => Some(pred.name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(preds, vec!["eq?", "set!"]);
    }

    #[test]
    fn missing_nodes_take_captures() {
        let Pattern::Missing(missing) = one(r#"(MISSING ";") @semi"#) else {
            panic!("expected a MISSING pattern");
        };
        assert_eq!(missing.target, MissingTarget::Literal(";".to_string()));
        assert_eq!(missing.captures, vec!["semi".to_string()]);
    }

    #[test]
    fn unclosed_parens_point_past_the_input() {
        let err = parse("(((").unwrap_err();
        assert_eq!((err.line, err.column), (1, 4));
    }

    #[test]
    fn bare_identifier_child_is_rejected() {
        let err = parse("(call ident)").unwrap_err();
        assert!(err.message.contains("expected ':' after field name 'ident'"));
        assert_eq!((err.line, err.column), (1, 7));
    }

    #[test]
    fn empty_alternation_is_rejected() {
        let err = parse("[]").unwrap_err();
        assert!(err.message.contains("inside '[]'"));
    }
}
