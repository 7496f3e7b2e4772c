//! Filesystem-backed document loading.

use crate::node::NodeHandle;
use crate::parse::parse_document;
use crate::tree::Document;
use quarry_xpath::{DocumentLoader, XPathError};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

/// Resolves `doc("name")` references against a base directory, caching
/// parsed documents per name.
///
/// The cache is what makes repeated references to one file inside a query
/// dedup correctly: they all receive handles into the same document.
pub struct FileLoader {
    base: PathBuf,
    cache: RefCell<HashMap<String, Rc<Document>>>,
}

impl FileLoader {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        FileLoader {
            base: base.into(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn load_document(&self, file: &str) -> Result<Rc<Document>, XPathError> {
        if let Some(doc) = self.cache.borrow().get(file) {
            log::debug!("document cache hit: {file}");
            return Ok(Rc::clone(doc));
        }
        let path = self.base.join(file);
        log::debug!("loading document: {}", path.display());
        let text = fs::read_to_string(&path)?;
        let doc = Rc::new(parse_document(&text)?);
        self.cache
            .borrow_mut()
            .insert(file.to_string(), Rc::clone(&doc));
        Ok(doc)
    }
}

impl Default for FileLoader {
    /// Resolves file references against the process working directory.
    fn default() -> Self {
        FileLoader::new(".")
    }
}

impl DocumentLoader<NodeHandle> for FileLoader {
    fn load(&self, file: &str) -> Result<NodeHandle, XPathError> {
        Ok(NodeHandle::document_node(self.load_document(file)?))
    }
}
