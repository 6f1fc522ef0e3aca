//! Syntax tree for the tree-sitter query language.
//!
//! A query is a flat sequence of [`Pattern`]s. Captures and quantifiers are
//! stored on the pattern they decorate, in the order `pattern quantifier
//! captures` (`(comment)* @doc`), which is the only order the grammar allows.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    ZeroOrMore,
    OneOrMore,
    Optional,
}

impl Quantifier {
    pub fn symbol(&self) -> &'static str {
        match self {
            Quantifier::ZeroOrMore => "*",
            Quantifier::OneOrMore => "+",
            Quantifier::Optional => "?",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// `(name ...)`, including the named wildcard `(_)` and supertypes `(a/b)`
    Node(NamedNode),
    /// A quoted literal node: `"+"`
    Anonymous(AnonymousNode),
    /// The bare wildcard `_`, matching named and anonymous nodes alike
    Wildcard(Wildcard),
    /// `(pattern pattern ...)`: a parenthesized sequence
    Group(Group),
    /// `[pattern pattern ...]`: ordered choice
    Alternation(Alternation),
    /// The anchor `.`
    Anchor,
    /// `(#eq? ...)` predicates and `(#set! ...)` directives
    Predicate(Predicate),
    /// `(MISSING name)` / `(MISSING "literal")`
    Missing(Missing),
    /// `; ...` to end of line, kept verbatim
    Comment(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedNode {
    pub name: String,
    pub children: Vec<Child>,
    pub quantifier: Option<Quantifier>,
    pub captures: Vec<String>,
}

/// One entry in a named node's body. Fields are kept apart from ordinary
/// child patterns because the printer lays them out differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Field(Field),
    /// `!field`: the node must not have this field
    Negated(String),
    Pattern(Pattern),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: Pattern,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnonymousNode {
    /// Raw text between the quotes, escapes preserved as written.
    pub text: String,
    pub quantifier: Option<Quantifier>,
    pub captures: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wildcard {
    pub quantifier: Option<Quantifier>,
    pub captures: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub items: Vec<Pattern>,
    pub quantifier: Option<Quantifier>,
    pub captures: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternation {
    pub branches: Vec<Pattern>,
    pub quantifier: Option<Quantifier>,
    pub captures: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    /// Name with its sigil, e.g. `eq?` or `set!`.
    pub name: String,
    pub args: Vec<PredicateArg>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateArg {
    Capture(String),
    Ident(String),
    Str(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Missing {
    pub target: MissingTarget,
    pub captures: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingTarget {
    Name(String),
    Literal(String),
}
