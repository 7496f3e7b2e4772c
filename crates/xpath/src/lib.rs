pub mod ast;
pub mod engine;
pub mod error;
pub mod parser;
pub mod sets;
pub mod tree;

pub use ast::{AbsolutePath, Filter, Operand, RelativePath};
pub use engine::{evaluate, evaluate_relative, filter_holds};
pub use error::XPathError;
pub use parser::{parse_query, parse_relative};
pub use tree::{DocumentLoader, NodeKind, XmlNode};
