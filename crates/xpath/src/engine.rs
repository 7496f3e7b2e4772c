//! The recursive evaluator: interprets a query AST against node-set
//! contexts.
//!
//! Every relative-path production maps a context set to a new set; every
//! filter production decides a predicate over a context without touching
//! it. The evaluator is a pure function of the AST and the loaded
//! documents, so filter purity holds by construction rather than by a
//! save/restore discipline.

use crate::ast::{AbsolutePath, Filter, Operand, RelativePath};
use crate::error::XPathError;
use crate::sets;
use crate::tree::{DocumentLoader, NodeKind, XmlNode};

/// Evaluates an absolute path, loading documents through `loader`.
///
/// The result is deduplicated by node identity and ordered by first
/// production, which for tree traversals is document order.
pub fn evaluate<N, L>(path: &AbsolutePath, loader: &L) -> Result<Vec<N>, XPathError>
where
    N: XmlNode,
    L: DocumentLoader<N> + ?Sized,
{
    match path {
        AbsolutePath::Doc(file) => Ok(vec![loader.load(file)?]),
        AbsolutePath::Children(file, rp) => {
            let context = vec![loader.load(file)?];
            let result = sets::unique(evaluate_relative(rp, &context)?);
            log::debug!("path over {file} selected {} node(s)", result.len());
            Ok(result)
        }
        AbsolutePath::Descendants(file, rp) => {
            let context = sets::descendants_or_self(&[loader.load(file)?]);
            let result = sets::unique(evaluate_relative(rp, &context)?);
            log::debug!("descendant path over {file} selected {} node(s)", result.len());
            Ok(result)
        }
    }
}

/// Evaluates a relative path against a context set, producing the new
/// context set.
///
/// Only `/`, `//` and the enclosing absolute path deduplicate; a single
/// axis step or a `,` pair may emit duplicates.
pub fn evaluate_relative<N: XmlNode>(
    rp: &RelativePath,
    context: &[N],
) -> Result<Vec<N>, XPathError> {
    match rp {
        RelativePath::Tag(name) => {
            if name.is_empty() {
                return Err(XPathError::Eval("tag step with an empty name".into()));
            }
            let mut result = Vec::new();
            for node in context {
                for child in node.children() {
                    if child.tag() == Some(name.as_str()) {
                        result.push(child);
                    }
                }
            }
            Ok(result)
        }
        RelativePath::Wildcard => Ok(context.iter().flat_map(|n| n.children()).collect()),
        RelativePath::Current => Ok(context.to_vec()),
        RelativePath::Parent => Ok(context.iter().filter_map(|n| n.parent()).collect()),
        RelativePath::Text => Ok(context.iter().flat_map(|n| n.text()).collect()),
        RelativePath::Attribute(name) => {
            if name.is_empty() {
                return Err(XPathError::Eval("attribute step with an empty name".into()));
            }
            Ok(context.iter().filter_map(|n| n.attribute(name)).collect())
        }
        RelativePath::Paren(inner) => evaluate_relative(inner, context),
        RelativePath::Step(first, second) => {
            // The second half sees each intermediate node as a singleton
            // context, in the order the first half produced them.
            let mut result = Vec::new();
            for node in evaluate_relative(first, context)? {
                result.extend(evaluate_relative(second, std::slice::from_ref(&node))?);
            }
            Ok(sets::unique(result))
        }
        RelativePath::StepAll(first, second) => {
            let expanded = sets::descendants_or_self(&evaluate_relative(first, context)?);
            Ok(sets::unique(evaluate_relative(second, &expanded)?))
        }
        RelativePath::Filter(inner, filter) => {
            let mut result = Vec::new();
            for node in evaluate_relative(inner, context)? {
                if filter_holds(filter, std::slice::from_ref(&node))? {
                    result.push(node);
                }
            }
            Ok(result)
        }
        RelativePath::Pair(left, right) => {
            // Both halves see the original context.
            let mut result = evaluate_relative(left, context)?;
            result.extend(evaluate_relative(right, context)?);
            Ok(result)
        }
    }
}

/// Decides a filter against a context set.
///
/// Truthy means "the caller keeps its context"; falsy means "the caller
/// drops it". `and`/`or` short-circuit.
pub fn filter_holds<N: XmlNode>(filter: &Filter, context: &[N]) -> Result<bool, XPathError> {
    match filter {
        Filter::Exists(rp) => Ok(!evaluate_relative(rp, context)?.is_empty()),
        Filter::ValueEq(left, right) => value_equal(left, right, context),
        Filter::IdentityEq(left, right) => identity_equal(left, right, context),
        Filter::Paren(inner) => filter_holds(inner, context),
        Filter::And(a, b) => Ok(filter_holds(a, context)? && filter_holds(b, context)?),
        Filter::Or(a, b) => Ok(filter_holds(a, context)? || filter_holds(b, context)?),
        Filter::Not(inner) => Ok(!filter_holds(inner, context)?),
    }
}

/// `∃ x ∈ left, y ∈ right` with deep structural equality. A string
/// constant stands for a detached text node, so it matches exactly the
/// text nodes carrying its content.
fn value_equal<N: XmlNode>(
    left: &Operand,
    right: &Operand,
    context: &[N],
) -> Result<bool, XPathError> {
    match (left, right) {
        (Operand::Literal(a), Operand::Literal(b)) => Ok(a == b),
        (Operand::Path(rp), Operand::Literal(s)) | (Operand::Literal(s), Operand::Path(rp)) => {
            Ok(evaluate_relative(rp, context)?
                .iter()
                .any(|n| n.kind() == NodeKind::Text && n.value() == Some(s.as_str())))
        }
        (Operand::Path(l), Operand::Path(r)) => {
            let lhs = evaluate_relative(l, context)?;
            let rhs = evaluate_relative(r, context)?;
            Ok(lhs.iter().any(|x| rhs.iter().any(|y| x.structural_eq(y))))
        }
    }
}

/// `∃ x ∈ left, y ∈ right` where x and y are the same node. A string
/// constant denotes a fresh node, which is never identical to anything.
fn identity_equal<N: XmlNode>(
    left: &Operand,
    right: &Operand,
    context: &[N],
) -> Result<bool, XPathError> {
    match (left, right) {
        (Operand::Path(l), Operand::Path(r)) => {
            let lhs = evaluate_relative(l, context)?;
            let rhs = evaluate_relative(r, context)?;
            Ok(lhs.iter().any(|x| rhs.iter().any(|y| x == y)))
        }
        _ => Ok(false),
    }
}
