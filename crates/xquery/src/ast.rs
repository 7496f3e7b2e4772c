//! Abstract syntax tree for the XQuery FLWR dialect.

use quarry_xpath::{AbsolutePath, RelativePath};

/// An XQuery expression. Every form evaluates to a sequence of nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum XQuery {
    /// `$name`
    Var(String),
    /// `"text"`: a fresh text node with the given content.
    Literal(String),
    /// A `doc(..)`-rooted path.
    Absolute(AbsolutePath),
    /// `(xq)`
    Paren(Box<XQuery>),
    /// `xq1, xq2`: concatenation.
    Sequence(Box<XQuery>, Box<XQuery>),
    /// `xq/rp`
    Path(Box<XQuery>, RelativePath),
    /// `xq//rp`
    PathAll(Box<XQuery>, RelativePath),
    /// `<tag>{ xq }</tag>`: a fresh element wrapping deep copies of the
    /// body's results.
    Element(String, Box<XQuery>),
    /// `for .. let .. where .. return ..`
    Flwr(Flwr),
    /// `let $v := xq  body`
    Let(Vec<(String, XQuery)>, Box<XQuery>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Flwr {
    pub for_bindings: Vec<(String, XQuery)>,
    pub let_bindings: Vec<(String, XQuery)>,
    pub condition: Option<Condition>,
    pub body: Box<XQuery>,
}

/// A boolean condition in `where`, `satisfies`, and their combinations.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `xq1 = xq2` / `xq1 eq xq2`: some pair is structurally equal.
    ValueEq(Box<XQuery>, Box<XQuery>),
    /// `xq1 == xq2` / `xq1 is xq2`: some pair is the same node.
    IdentityEq(Box<XQuery>, Box<XQuery>),
    /// `empty(xq)`
    Empty(Box<XQuery>),
    /// `some $v in xq, .. satisfies cond`
    SomeSatisfies(Vec<(String, XQuery)>, Box<Condition>),
    /// `(cond)`
    Paren(Box<Condition>),
    And(Box<Condition>, Box<Condition>),
    Or(Box<Condition>, Box<Condition>),
    Not(Box<Condition>),
}

impl Condition {
    pub fn and(left: Condition, right: Condition) -> Self {
        Condition::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Condition, right: Condition) -> Self {
        Condition::Or(Box::new(left), Box::new(right))
    }

    pub fn not(inner: Condition) -> Self {
        Condition::Not(Box::new(inner))
    }
}
