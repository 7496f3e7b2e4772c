use quarry_xpath::XPathError;
use thiserror::Error;

/// Errors surfaced by XQuery parsing and evaluation.
#[derive(Error, Debug)]
pub enum XQueryError {
    #[error(transparent)]
    XPath(#[from] XPathError),

    #[error("query parse error in '{input}': {message}")]
    Parse { input: String, message: String },

    #[error("unbound variable ${0}")]
    UnboundVariable(String),
}
