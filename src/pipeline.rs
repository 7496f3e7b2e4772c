//! Orchestrates a query run: parse the query text, evaluate it against
//! documents resolved by a loader, and render the resulting node-set.

use crate::error::QueryError;
use quarry_dom::{serialize, FileLoader, NodeHandle};
use quarry_xpath::{engine, parser};
use quarry_xquery::{parse_xquery, Evaluator};

/// Runs an XPath query and renders the result.
pub fn run_xpath(query: &str, loader: &FileLoader) -> Result<String, QueryError> {
    log::debug!("parsing XPath query ({} bytes)", query.len());
    let ast = parser::parse_query(query)?;
    let nodes = engine::evaluate(&ast, loader)?;
    log::debug!("query selected {} node(s)", nodes.len());
    Ok(render(&nodes))
}

/// Runs an XQuery query and renders the result.
pub fn run_xquery(query: &str, loader: &FileLoader) -> Result<String, QueryError> {
    log::debug!("parsing XQuery query ({} bytes)", query.len());
    let ast = parse_xquery(query)?;
    let nodes = Evaluator::new(loader).eval(&ast)?;
    log::debug!("query selected {} node(s)", nodes.len());
    Ok(render(&nodes))
}

/// Renders a node-set as concatenated XML fragments, each preceded by a
/// comment naming its position, under a node-count header.
pub fn render(nodes: &[NodeHandle]) -> String {
    let mut out = format!("<!-- Number of nodes: {} -->\n", nodes.len());
    for (i, node) in nodes.iter().enumerate() {
        out.push_str(&format!("<!-- Node #{} -->\n", i + 1));
        out.push_str(&serialize::fragment(node));
        out.push('\n');
    }
    out
}
