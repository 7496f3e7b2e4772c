//! A `nom`-based parser for the FLWR expression language.
//!
//! Path steps, identifiers, and string constants are the same productions
//! the XPath parser uses; this module adds variables, clauses, element
//! constructors, and conditions on top. Binding sources and comparison
//! sides take paths without a top-level `,` (wrap a sequence in
//! parentheses where one is needed).

use crate::ast::{Condition, Flwr, XQuery};
use crate::error::XQueryError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, multispace0, satisfy},
    combinator::{map, not, opt},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded, terminated},
};
use quarry_xpath::parser::{absolute_path, identifier, step_path, string_literal};

/// Parses a complete FLWR query, rejecting trailing input.
pub fn parse_xquery(input: &str) -> Result<XQuery, XQueryError> {
    match xquery(input.trim()) {
        Ok(("", xq)) => Ok(xq),
        Ok((rest, _)) => Err(XQueryError::Parse {
            input: input.to_string(),
            message: format!("unexpected trailing input: '{rest}'"),
        }),
        Err(e) => Err(XQueryError::Parse {
            input: input.to_string(),
            message: e.to_string(),
        }),
    }
}

fn ws<'a, F, O, E>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
    E: nom::error::ParseError<&'a str>,
{
    delimited(multispace0, inner, multispace0)
}

fn keyword<'a>(
    kw: &'static str,
) -> impl Parser<&'a str, Output = &'a str, Error = nom::error::Error<&'a str>> {
    terminated(
        tag(kw),
        not(satisfy(|c: char| {
            c.is_alphanumeric() || c == '_' || c == '-' || c == '.'
        })),
    )
}

// --- Expressions ---

pub fn xquery(input: &str) -> IResult<&str, XQuery> {
    let (i, first) = xq_path(input)?;
    let (i, rest) = many0(preceded(ws(char(',')), xq_path)).parse(i)?;
    let xq = rest
        .into_iter()
        .fold(first, |acc, next| XQuery::Sequence(Box::new(acc), Box::new(next)));
    Ok((i, xq))
}

fn xq_path(input: &str) -> IResult<&str, XQuery> {
    let (i, base) = xq_primary(input)?;
    let (i, rest) = many0(pair(ws(alt((tag("//"), tag("/")))), step_path)).parse(i)?;
    let xq = rest.into_iter().fold(base, |acc, (sep, rp)| {
        if sep == "//" {
            XQuery::PathAll(Box::new(acc), rp)
        } else {
            XQuery::Path(Box::new(acc), rp)
        }
    });
    Ok((i, xq))
}

fn xq_primary(input: &str) -> IResult<&str, XQuery> {
    ws(alt((
        map(variable, XQuery::Var),
        map(string_literal, XQuery::Literal),
        flwr,
        let_expr,
        element_constructor,
        map(absolute_path, XQuery::Absolute),
        map(delimited(char('('), xquery, ws(char(')'))), |xq| {
            XQuery::Paren(Box::new(xq))
        }),
    )))
    .parse(input)
}

fn variable(input: &str) -> IResult<&str, String> {
    map(preceded(char('$'), identifier), str::to_string).parse(input)
}

// --- Clauses ---

/// `$v in xq`
fn for_binding(input: &str) -> IResult<&str, (String, XQuery)> {
    let (i, name) = ws(variable).parse(input)?;
    let (i, _) = ws(keyword("in")).parse(i)?;
    let (i, source) = xq_path(i)?;
    Ok((i, (name, source)))
}

/// `$v := xq`
fn let_binding(input: &str) -> IResult<&str, (String, XQuery)> {
    let (i, name) = ws(variable).parse(input)?;
    let (i, _) = ws(tag(":=")).parse(i)?;
    let (i, value) = xq_path(i)?;
    Ok((i, (name, value)))
}

fn flwr(input: &str) -> IResult<&str, XQuery> {
    let (i, _) = ws(keyword("for")).parse(input)?;
    let (i, for_bindings) = separated_list1(ws(char(',')), for_binding).parse(i)?;
    let (i, let_bindings) = opt(preceded(
        ws(keyword("let")),
        separated_list1(ws(char(',')), let_binding),
    ))
    .parse(i)?;
    let (i, condition) = opt(preceded(ws(keyword("where")), condition)).parse(i)?;
    let (i, _) = ws(keyword("return")).parse(i)?;
    let (i, body) = xquery(i)?;
    Ok((
        i,
        XQuery::Flwr(Flwr {
            for_bindings,
            let_bindings: let_bindings.unwrap_or_default(),
            condition,
            body: Box::new(body),
        }),
    ))
}

fn let_expr(input: &str) -> IResult<&str, XQuery> {
    let (i, _) = ws(keyword("let")).parse(input)?;
    let (i, bindings) = separated_list1(ws(char(',')), let_binding).parse(i)?;
    let (i, body) = xquery(i)?;
    Ok((i, XQuery::Let(bindings, Box::new(body))))
}

/// `<tag>{ xq }</tag>`; the closing tag must repeat the opening name.
fn element_constructor(input: &str) -> IResult<&str, XQuery> {
    let (i, open) = delimited(char('<'), identifier, char('>')).parse(input)?;
    let (i, body) = delimited(ws(char('{')), xquery, ws(char('}'))).parse(i)?;
    let (i, close) = delimited(ws(tag("</")), identifier, char('>')).parse(i)?;
    if open != close {
        return Err(nom::Err::Failure(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }
    Ok((i, XQuery::Element(open.to_string(), Box::new(body))))
}

// --- Conditions ---

pub fn condition(input: &str) -> IResult<&str, Condition> {
    let (i, first) = and_condition(input)?;
    let (i, rest) = many0(preceded(ws(keyword("or")), and_condition)).parse(i)?;
    Ok((i, rest.into_iter().fold(first, Condition::or)))
}

fn and_condition(input: &str) -> IResult<&str, Condition> {
    let (i, first) = not_condition(input)?;
    let (i, rest) = many0(preceded(ws(keyword("and")), not_condition)).parse(i)?;
    Ok((i, rest.into_iter().fold(first, Condition::and)))
}

fn not_condition(input: &str) -> IResult<&str, Condition> {
    alt((
        map(preceded(ws(keyword("not")), not_condition), Condition::not),
        atom_condition,
    ))
    .parse(input)
}

fn atom_condition(input: &str) -> IResult<&str, Condition> {
    alt((empty_condition, some_condition, comparison, paren_condition)).parse(input)
}

fn empty_condition(input: &str) -> IResult<&str, Condition> {
    map(
        preceded(
            ws(keyword("empty")),
            delimited(ws(char('(')), xquery, ws(char(')'))),
        ),
        |xq| Condition::Empty(Box::new(xq)),
    )
    .parse(input)
}

fn some_condition(input: &str) -> IResult<&str, Condition> {
    let (i, _) = ws(keyword("some")).parse(input)?;
    let (i, bindings) = separated_list1(ws(char(',')), for_binding).parse(i)?;
    let (i, _) = ws(keyword("satisfies")).parse(i)?;
    let (i, inner) = not_condition(i)?;
    Ok((i, Condition::SomeSatisfies(bindings, Box::new(inner))))
}

fn comparison(input: &str) -> IResult<&str, Condition> {
    let (i, left) = xq_path(input)?;
    let (i, make) = ws(alt((
        map(tag("=="), |_| make_identity as MakeCondition),
        map(keyword("is"), |_| make_identity as MakeCondition),
        map(tag("="), |_| make_value as MakeCondition),
        map(keyword("eq"), |_| make_value as MakeCondition),
    )))
    .parse(i)?;
    let (i, right) = xq_path(i)?;
    Ok((i, make(left, right)))
}

type MakeCondition = fn(XQuery, XQuery) -> Condition;

fn make_value(left: XQuery, right: XQuery) -> Condition {
    Condition::ValueEq(Box::new(left), Box::new(right))
}

fn make_identity(left: XQuery, right: XQuery) -> Condition {
    Condition::IdentityEq(Box::new(left), Box::new(right))
}

fn paren_condition(input: &str) -> IResult<&str, Condition> {
    map(delimited(ws(char('(')), condition, ws(char(')'))), |c| {
        Condition::Paren(Box::new(c))
    })
    .parse(input)
}
