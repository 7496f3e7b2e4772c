pub mod error;
pub mod loader;
pub mod node;
pub mod parse;
pub mod serialize;
pub mod tree;

pub use error::DomError;
pub use loader::FileLoader;
pub use node::NodeHandle;
pub use parse::parse_document;
pub use tree::{Document, NodeId, NodePayload};
