use thiserror::Error;

/// Errors surfaced by query parsing and evaluation.
///
/// A query that simply matches nothing is not an error; it produces an
/// empty node-set.
#[derive(Error, Debug)]
pub enum XPathError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed XML: {0}")]
    Xml(String),

    #[error("query parse error in '{input}': {message}")]
    Query { input: String, message: String },

    #[error("evaluation error: {0}")]
    Eval(String),
}
