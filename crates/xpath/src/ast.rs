//! Abstract syntax tree for the XPath query dialect.

/// A query rooted at a named document.
#[derive(Debug, Clone, PartialEq)]
pub enum AbsolutePath {
    /// `doc("file")` alone: the document node itself.
    Doc(String),
    /// `doc("file")/rp`
    Children(String, RelativePath),
    /// `doc("file")//rp`
    Descendants(String, RelativePath),
}

/// A path evaluated against an already-established context set.
#[derive(Debug, Clone, PartialEq)]
pub enum RelativePath {
    /// `name`: children of the context nodes with the given element name.
    Tag(String),
    /// `*`: all children.
    Wildcard,
    /// `.`: the context set itself.
    Current,
    /// `..`: parents of the context nodes.
    Parent,
    /// `text()`: direct text children.
    Text,
    /// `@name`: the named attribute node of each context node.
    Attribute(String),
    /// `(rp)`
    Paren(Box<RelativePath>),
    /// `rp1/rp2`
    Step(Box<RelativePath>, Box<RelativePath>),
    /// `rp1//rp2`
    StepAll(Box<RelativePath>, Box<RelativePath>),
    /// `rp[f]`
    Filter(Box<RelativePath>, Box<Filter>),
    /// `rp1, rp2`: concatenation of both results over the same context.
    Pair(Box<RelativePath>, Box<RelativePath>),
}

impl RelativePath {
    pub fn step(first: RelativePath, second: RelativePath) -> Self {
        RelativePath::Step(Box::new(first), Box::new(second))
    }

    pub fn step_all(first: RelativePath, second: RelativePath) -> Self {
        RelativePath::StepAll(Box::new(first), Box::new(second))
    }

    pub fn filtered(path: RelativePath, filter: Filter) -> Self {
        RelativePath::Filter(Box::new(path), Box::new(filter))
    }

    pub fn pair(first: RelativePath, second: RelativePath) -> Self {
        RelativePath::Pair(Box::new(first), Box::new(second))
    }
}

/// A predicate over a single-element context. Truthy filters return the
/// context unchanged; falsy filters return the empty set.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `rp`: truthy iff the path selects at least one node.
    Exists(RelativePath),
    /// `a = b` / `a eq b`: some pair of results is structurally equal.
    ValueEq(Operand, Operand),
    /// `a == b` / `a is b`: some pair of results is the same node.
    IdentityEq(Operand, Operand),
    /// `(f)`
    Paren(Box<Filter>),
    /// `f1 and f2`
    And(Box<Filter>, Box<Filter>),
    /// `f1 or f2`
    Or(Box<Filter>, Box<Filter>),
    /// `not f`
    Not(Box<Filter>),
}

impl Filter {
    pub fn and(left: Filter, right: Filter) -> Self {
        Filter::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Filter, right: Filter) -> Self {
        Filter::Or(Box::new(left), Box::new(right))
    }

    pub fn not(inner: Filter) -> Self {
        Filter::Not(Box::new(inner))
    }
}

/// One side of an equality filter: a path, or a quoted string constant
/// standing for a detached text node with that content.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Path(RelativePath),
    Literal(String),
}
