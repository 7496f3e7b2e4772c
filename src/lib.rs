//! # Quarry
//!
//! An evaluator for a compact XPath/XQuery dialect over XML documents.
//!
//! ## Module Structure
//!
//! - `quarry-xpath`: the query core, generic over a node trait: AST,
//!   node-set operations, the recursive evaluator, and the query parser
//! - `quarry-dom`: the arena-backed XML document tree, file loading, and
//!   fragment serialization
//! - `quarry-xquery`: the FLWR layer (for/let/where/return) built on the
//!   core
//! - `pipeline`: query text in, rendered node-set out
//!
//! ## Usage
//!
//! ```ignore
//! use quarry::{run_xpath, QueryError};
//! use quarry_dom::FileLoader;
//!
//! let loader = FileLoader::default();
//! let output = run_xpath(r#"doc("books.xml")//title"#, &loader)?;
//! println!("{output}");
//! ```

pub mod error;
pub mod pipeline;

pub use error::QueryError;
pub use pipeline::{render, run_xpath, run_xquery};
