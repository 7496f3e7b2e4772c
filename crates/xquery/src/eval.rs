//! Evaluates FLWR expressions over node sequences.
//!
//! Variables live in a name-to-sequence map. Clause forms snapshot the
//! map on entry and restore it on exit, so bindings scope to the clause
//! body and shadow outer bindings of the same name while inside it.

use crate::ast::{Condition, Flwr, XQuery};
use crate::error::XQueryError;
use quarry_dom::{Document, FileLoader, NodeHandle};
use quarry_xpath::{engine, sets, XmlNode};
use std::collections::HashMap;
use std::rc::Rc;

pub struct Evaluator<'a> {
    loader: &'a FileLoader,
    vars: HashMap<String, Vec<NodeHandle>>,
}

impl<'a> Evaluator<'a> {
    pub fn new(loader: &'a FileLoader) -> Self {
        Evaluator {
            loader,
            vars: HashMap::new(),
        }
    }

    pub fn eval(&mut self, query: &XQuery) -> Result<Vec<NodeHandle>, XQueryError> {
        match query {
            XQuery::Var(name) => self
                .vars
                .get(name)
                .cloned()
                .ok_or_else(|| XQueryError::UnboundVariable(name.clone())),
            XQuery::Literal(content) => Ok(vec![text_node(content)]),
            XQuery::Absolute(ap) => Ok(engine::evaluate(ap, self.loader)?),
            XQuery::Paren(inner) => self.eval(inner),
            XQuery::Sequence(left, right) => {
                let mut result = self.eval(left)?;
                result.extend(self.eval(right)?);
                Ok(result)
            }
            XQuery::Path(base, rp) => {
                let context = self.eval(base)?;
                Ok(sets::unique(engine::evaluate_relative(rp, &context)?))
            }
            XQuery::PathAll(base, rp) => {
                let context = sets::descendants_or_self(&self.eval(base)?);
                Ok(sets::unique(engine::evaluate_relative(rp, &context)?))
            }
            XQuery::Element(tag, body) => {
                let content = self.eval(body)?;
                Ok(vec![make_element(tag, &content)])
            }
            XQuery::Flwr(flwr) => {
                let saved = self.vars.clone();
                let mut out = Vec::new();
                let result = self.eval_for(&flwr.for_bindings, flwr, &mut out);
                self.vars = saved;
                result.map(|()| out)
            }
            XQuery::Let(bindings, body) => {
                let saved = self.vars.clone();
                let result = self
                    .bind_lets(bindings)
                    .and_then(|()| self.eval(body));
                self.vars = saved;
                result
            }
        }
    }

    /// Iterates the cartesian product of the `for` bindings in order; at
    /// the innermost level applies `let`, `where`, and `return`.
    fn eval_for(
        &mut self,
        remaining: &[(String, XQuery)],
        flwr: &Flwr,
        out: &mut Vec<NodeHandle>,
    ) -> Result<(), XQueryError> {
        let Some(((name, source), rest)) = remaining.split_first() else {
            let saved = self.vars.clone();
            let result: Result<(), XQueryError> = (|| {
                self.bind_lets(&flwr.let_bindings)?;
                let keep = match &flwr.condition {
                    Some(cond) => self.eval_condition(cond)?,
                    None => true,
                };
                if keep {
                    out.extend(self.eval(&flwr.body)?);
                }
                Ok(())
            })();
            self.vars = saved;
            return result;
        };
        for node in self.eval(source)? {
            self.vars.insert(name.clone(), vec![node]);
            self.eval_for(rest, flwr, out)?;
        }
        Ok(())
    }

    fn bind_lets(&mut self, bindings: &[(String, XQuery)]) -> Result<(), XQueryError> {
        for (name, expr) in bindings {
            let value = self.eval(expr)?;
            log::trace!("let ${name} bound to {} node(s)", value.len());
            self.vars.insert(name.clone(), value);
        }
        Ok(())
    }

    pub fn eval_condition(&mut self, cond: &Condition) -> Result<bool, XQueryError> {
        match cond {
            Condition::ValueEq(left, right) => {
                let lhs = self.eval(left)?;
                let rhs = self.eval(right)?;
                Ok(lhs.iter().any(|x| rhs.iter().any(|y| x.structural_eq(y))))
            }
            Condition::IdentityEq(left, right) => {
                let lhs = self.eval(left)?;
                let rhs = self.eval(right)?;
                Ok(lhs.iter().any(|x| rhs.iter().any(|y| x == y)))
            }
            Condition::Empty(inner) => Ok(self.eval(inner)?.is_empty()),
            Condition::SomeSatisfies(bindings, inner) => {
                let saved = self.vars.clone();
                let result = self.eval_some(bindings, inner);
                self.vars = saved;
                result
            }
            Condition::Paren(inner) => self.eval_condition(inner),
            Condition::And(a, b) => Ok(self.eval_condition(a)? && self.eval_condition(b)?),
            Condition::Or(a, b) => Ok(self.eval_condition(a)? || self.eval_condition(b)?),
            Condition::Not(inner) => Ok(!self.eval_condition(inner)?),
        }
    }

    fn eval_some(
        &mut self,
        remaining: &[(String, XQuery)],
        cond: &Condition,
    ) -> Result<bool, XQueryError> {
        let Some(((name, source), rest)) = remaining.split_first() else {
            return self.eval_condition(cond);
        };
        for node in self.eval(source)? {
            self.vars.insert(name.clone(), vec![node]);
            if self.eval_some(rest, cond)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// A detached text node in a document of its own.
fn text_node(content: &str) -> NodeHandle {
    let mut doc = Document::new();
    let id = doc.new_text(content.to_string());
    NodeHandle::new(Rc::new(doc), id)
}

/// A fresh element whose children are deep copies of `content`.
fn make_element(tag: &str, content: &[NodeHandle]) -> NodeHandle {
    let mut doc = Document::new();
    let root = doc.root();
    let elem = doc.new_element(tag.to_string());
    doc.append_child(root, elem);
    for node in content {
        doc.copy_node(elem, node.document(), node.id());
    }
    NodeHandle::new(Rc::new(doc), elem)
}
