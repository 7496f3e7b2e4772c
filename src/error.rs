use quarry_xpath::XPathError;
use quarry_xquery::XQueryError;
use thiserror::Error;

/// A comprehensive error type for the whole query pipeline.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("XPath query failed: {0}")]
    XPath(#[from] XPathError),

    #[error("XQuery query failed: {0}")]
    XQuery(#[from] XQueryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
