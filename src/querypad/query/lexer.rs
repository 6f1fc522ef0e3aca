use super::ast::Quantifier;
use super::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Tok {
    LParen,
    RParen,
    LBracket,
    RBracket,
    Ident(String),
    Capture(String),
    Str(String),
    Quant(Quantifier),
    Hash,
    Bang,
    Colon,
    Dot,
    Comment(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Token {
    pub tok: Tok,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug)]
pub(crate) struct LexOutput {
    pub tokens: Vec<Token>,
    /// Position just past the last character, for end-of-input diagnostics.
    pub eof: (u32, u32),
}

pub(crate) fn lex(input: &str) -> Result<LexOutput, ParseError> {
    Lexer::new(input).run()
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
    tokens: Vec<Token>,
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

// '/' covers supertype paths (a/b), '.' and '-' appear in capture names.
fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '/')
}

impl Lexer {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<LexOutput, ParseError> {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' => {
                    self.bump();
                }
                '\n' => {
                    self.pos += 1;
                    self.line += 1;
                    self.column = 1;
                }
                '(' => self.simple(Tok::LParen),
                ')' => self.simple(Tok::RParen),
                '[' => self.simple(Tok::LBracket),
                ']' => self.simple(Tok::RBracket),
                '#' => self.simple(Tok::Hash),
                '!' => self.simple(Tok::Bang),
                ':' => self.simple(Tok::Colon),
                '.' => self.simple(Tok::Dot),
                '*' => self.simple(Tok::Quant(Quantifier::ZeroOrMore)),
                '+' => self.simple(Tok::Quant(Quantifier::OneOrMore)),
                '?' => self.simple(Tok::Quant(Quantifier::Optional)),
                '@' => self.capture()?,
                '"' => self.string()?,
                ';' => self.comment(),
                c if is_ident_start(c) => self.ident(),
                c => {
                    return Err(self.error_here(format!("unexpected character '{}'", c)));
                }
            }
        }
        Ok(LexOutput {
            tokens: self.tokens,
            eof: (self.line, self.column),
        })
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        self.column += 1;
        Some(c)
    }

    fn push(&mut self, tok: Tok, line: u32, column: u32) {
        self.tokens.push(Token { tok, line, column });
    }

    fn simple(&mut self, tok: Tok) {
        let (line, column) = (self.line, self.column);
        self.bump();
        self.push(tok, line, column);
    }

    fn take_ident(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if !is_ident_continue(c) {
                break;
            }
            name.push(c);
            self.bump();
        }
        name
    }

    fn ident(&mut self) {
        let (line, column) = (self.line, self.column);
        let name = self.take_ident();
        self.push(Tok::Ident(name), line, column);
    }

    fn capture(&mut self) -> Result<(), ParseError> {
        let (line, column) = (self.line, self.column);
        self.bump(); // '@'
        let name = self.take_ident();
        if name.is_empty() {
            return Err(ParseError {
                line,
                column,
                message: "expected a capture name after '@'".to_string(),
            });
        }
        self.push(Tok::Capture(name), line, column);
        Ok(())
    }

    fn string(&mut self) -> Result<(), ParseError> {
        let (line, column) = (self.line, self.column);
        self.bump(); // opening quote
        let mut text = String::new();
        loop {
            match self.peek() {
                None | Some('\n') => {
                    return Err(ParseError {
                        line,
                        column,
                        message: "unterminated string literal".to_string(),
                    });
                }
                Some('"') => {
                    self.bump();
                    break;
                }
                Some('\\') => {
                    // Keep escapes verbatim; the printer emits them unchanged.
                    text.push('\\');
                    self.bump();
                    if let Some(escaped) = self.bump() {
                        text.push(escaped);
                    }
                }
                Some(c) => {
                    text.push(c);
                    self.bump();
                }
            }
        }
        self.push(Tok::Str(text), line, column);
        Ok(())
    }

    fn comment(&mut self) {
        let (line, column) = (self.line, self.column);
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            text.push(c);
            self.bump();
        }
        self.push(Tok::Comment(text.trim_end().to_string()), line, column);
    }

    fn error_here(&self, message: String) -> ParseError {
        ParseError {
            line: self.line,
            column: self.column,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(input: &str) -> Vec<Tok> {
        lex(input).unwrap().tokens.into_iter().map(|t| t.tok).collect()
    }

    #[test]
    fn lexes_a_simple_node() {
        assert_eq!(
            toks("(identifier) @name"),
            vec![
                Tok::LParen,
                Tok::Ident("identifier".into()),
                Tok::RParen,
                Tok::Capture("name".into()),
            ]
        );
    }

    #[test]
    fn quantifiers_are_single_tokens() {
        assert_eq!(
            toks("* + ?"),
            vec![
                Tok::Quant(Quantifier::ZeroOrMore),
                Tok::Quant(Quantifier::OneOrMore),
                Tok::Quant(Quantifier::Optional),
            ]
        );
    }

    #[test]
    fn strings_keep_escapes_verbatim() {
        assert_eq!(toks(r#""a\"b""#), vec![Tok::Str(r#"a\"b"#.into())]);
    }

    #[test]
    fn unterminated_string_reports_its_start() {
        let err = lex("  \"abc").unwrap_err();
        assert_eq!((err.line, err.column), (1, 3));
        assert!(err.message.contains("unterminated"));
    }

    #[test]
    fn dots_inside_identifiers_are_not_anchors() {
        assert_eq!(
            toks("@keyword.operator ."),
            vec![Tok::Capture("keyword.operator".into()), Tok::Dot]
        );
    }

    #[test]
    fn tracks_line_and_column() {
        let out = lex("(a\n  !b)").unwrap();
        let bang = &out.tokens[2];
        assert_eq!(bang.tok, Tok::Bang);
        assert_eq!((bang.line, bang.column), (2, 3));
    }

    #[test]
    fn rejects_stray_characters() {
        let err = lex("(a) %").unwrap_err();
        assert!(err.message.contains('%'));
    }
}
