use quarry_xpath::XPathError;
use thiserror::Error;

/// Errors produced while turning XML text into a document tree.
#[derive(Error, Debug)]
pub enum DomError {
    #[error("XML syntax error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("invalid UTF-8 in document: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("malformed document: {0}")]
    Malformed(String),
}

impl From<DomError> for XPathError {
    fn from(e: DomError) -> Self {
        XPathError::Xml(e.to_string())
    }
}
