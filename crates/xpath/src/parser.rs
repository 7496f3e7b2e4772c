//! A `nom`-based parser for the XPath query dialect.
//!
//! Grammar, loosest binding first: `,` pairs, then `/` and `//` steps,
//! then postfix `[f]` filters. Inside filters: `or`, then `and`, then the
//! prefix `not`, then equality comparisons over paths and string
//! constants.

use crate::ast::{AbsolutePath, Filter, Operand, RelativePath};
use crate::error::XPathError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, multispace0, satisfy},
    combinator::{map, not, opt, recognize},
    multi::many0,
    sequence::{delimited, pair, preceded, terminated},
};

// --- Main Public Parsers ---

/// Parses a complete absolute-path query, rejecting trailing input.
pub fn parse_query(input: &str) -> Result<AbsolutePath, XPathError> {
    match absolute_path(input.trim()) {
        Ok(("", ap)) => Ok(ap),
        Ok((rest, _)) => Err(XPathError::Query {
            input: input.to_string(),
            message: format!("unexpected trailing input: '{rest}'"),
        }),
        Err(e) => Err(XPathError::Query {
            input: input.to_string(),
            message: e.to_string(),
        }),
    }
}

/// Parses a standalone relative path, rejecting trailing input.
pub fn parse_relative(input: &str) -> Result<RelativePath, XPathError> {
    match relative_path(input.trim()) {
        Ok(("", rp)) => Ok(rp),
        Ok((rest, _)) => Err(XPathError::Query {
            input: input.to_string(),
            message: format!("unexpected trailing input: '{rest}'"),
        }),
        Err(e) => Err(XPathError::Query {
            input: input.to_string(),
            message: e.to_string(),
        }),
    }
}

// --- Combinators & Helpers ---

fn ws<'a, F, O, E>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
    E: nom::error::ParseError<&'a str>,
{
    delimited(multispace0, inner, multispace0)
}

/// A reserved word, not to be confused with a tag name it prefixes
/// (`and` must not match the start of `android`).
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

/// An XML Name: a letter or underscore, then letters, digits, `_`, `-`, `.`.
pub fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_alphabetic() || c == '_'),
        take_while(|c: char| c.is_alphanumeric() || c == '_' || c == '-' || c == '.'),
    ))
    .parse(input)
}

pub fn string_literal(input: &str) -> IResult<&str, String> {
    map(
        alt((
            delimited(char('\''), take_while(|c| c != '\''), char('\'')),
            delimited(char('"'), take_while(|c| c != '"'), char('"')),
        )),
        |s: &str| s.to_string(),
    )
    .parse(input)
}

// --- Absolute Paths ---

/// `doc("file")`, optionally followed by `/rp` or `//rp`.
pub fn absolute_path(input: &str) -> IResult<&str, AbsolutePath> {
    let (i, file) = preceded(
        ws(tag("doc")),
        delimited(ws(char('(')), string_literal, ws(char(')'))),
    )
    .parse(input)?;
    let (i, tail) = opt(pair(ws(alt((tag("//"), tag("/")))), relative_path)).parse(i)?;
    let ap = match tail {
        Some(("//", rp)) => AbsolutePath::Descendants(file, rp),
        Some((_, rp)) => AbsolutePath::Children(file, rp),
        None => AbsolutePath::Doc(file),
    };
    Ok((i, ap))
}

// --- Relative Paths (in order of precedence) ---

pub fn relative_path(input: &str) -> IResult<&str, RelativePath> {
    let (i, first) = step_path(input)?;
    let (i, rest) = many0(preceded(ws(char(',')), step_path)).parse(i)?;
    Ok((i, rest.into_iter().fold(first, RelativePath::pair)))
}

/// A relative path without a top-level `,`; the shape comparison sides
/// and clause bodies embed.
pub fn step_path(input: &str) -> IResult<&str, RelativePath> {
    let (i, first) = postfix_path(input)?;
    let (i, rest) = many0(pair(ws(alt((tag("//"), tag("/")))), postfix_path)).parse(i)?;
    let path = rest.into_iter().fold(first, |acc, (sep, next)| {
        if sep == "//" {
            RelativePath::step_all(acc, next)
        } else {
            RelativePath::step(acc, next)
        }
    });
    Ok((i, path))
}

fn postfix_path(input: &str) -> IResult<&str, RelativePath> {
    let (i, base) = primary_path(input)?;
    let (i, filters) = many0(delimited(ws(char('[')), filter_expr, ws(char(']')))).parse(i)?;
    Ok((i, filters.into_iter().fold(base, RelativePath::filtered)))
}

fn primary_path(input: &str) -> IResult<&str, RelativePath> {
    ws(alt((
        map(tag(".."), |_| RelativePath::Parent),
        map(char('.'), |_| RelativePath::Current),
        map(char('*'), |_| RelativePath::Wildcard),
        text_step,
        map(preceded(char('@'), identifier), |name: &str| {
            RelativePath::Attribute(name.to_string())
        }),
        map(delimited(char('('), relative_path, ws(char(')'))), |rp| {
            RelativePath::Paren(Box::new(rp))
        }),
        map(identifier, |name: &str| RelativePath::Tag(name.to_string())),
    )))
    .parse(input)
}

/// `text()`. A bare `text` with no parentheses is an ordinary tag name.
fn text_step(input: &str) -> IResult<&str, RelativePath> {
    map(
        terminated(tag("text"), pair(ws(char('(')), char(')'))),
        |_| RelativePath::Text,
    )
    .parse(input)
}

// --- Filters (in order of precedence) ---

pub fn filter_expr(input: &str) -> IResult<&str, Filter> {
    let (i, first) = and_filter(input)?;
    let (i, rest) = many0(preceded(ws(keyword("or")), and_filter)).parse(i)?;
    Ok((i, rest.into_iter().fold(first, Filter::or)))
}

fn and_filter(input: &str) -> IResult<&str, Filter> {
    let (i, first) = not_filter(input)?;
    let (i, rest) = many0(preceded(ws(keyword("and")), not_filter)).parse(i)?;
    Ok((i, rest.into_iter().fold(first, Filter::and)))
}

fn not_filter(input: &str) -> IResult<&str, Filter> {
    alt((
        map(preceded(ws(keyword("not")), not_filter), Filter::not),
        atom_filter,
    ))
    .parse(input)
}

/// A comparison, a parenthesized filter, or a bare path (existence test).
/// Comparisons go first: `(a) = b` must reach the equality branch even
/// though it opens with a parenthesis.
fn atom_filter(input: &str) -> IResult<&str, Filter> {
    alt((comparison, paren_filter, exists_filter)).parse(input)
}

fn comparison(input: &str) -> IResult<&str, Filter> {
    let (i, left) = operand(input)?;
    let (i, make) = ws(alt((
        map(tag("=="), |_| Filter::IdentityEq as fn(Operand, Operand) -> Filter),
        map(keyword("is"), |_| Filter::IdentityEq as fn(Operand, Operand) -> Filter),
        map(tag("="), |_| Filter::ValueEq as fn(Operand, Operand) -> Filter),
        map(keyword("eq"), |_| Filter::ValueEq as fn(Operand, Operand) -> Filter),
    )))
    .parse(i)?;
    let (i, right) = operand(i)?;
    Ok((i, make(left, right)))
}

fn paren_filter(input: &str) -> IResult<&str, Filter> {
    map(delimited(ws(char('(')), filter_expr, ws(char(')'))), |f| {
        Filter::Paren(Box::new(f))
    })
    .parse(input)
}

fn exists_filter(input: &str) -> IResult<&str, Filter> {
    map(relative_path, Filter::Exists).parse(input)
}

/// A comparison side: a path (without top-level `,`) or a string constant.
fn operand(input: &str) -> IResult<&str, Operand> {
    ws(alt((
        map(string_literal, Operand::Literal),
        map(step_path, Operand::Path),
    )))
    .parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag_path(name: &str) -> RelativePath {
        RelativePath::Tag(name.to_string())
    }

    #[test]
    fn parses_doc_alone() {
        let ap = parse_query(r#"doc("books.xml")"#).unwrap();
        assert_eq!(ap, AbsolutePath::Doc("books.xml".to_string()));

        let single = parse_query("doc('books.xml')").unwrap();
        assert_eq!(single, AbsolutePath::Doc("books.xml".to_string()));
    }

    #[test]
    fn parses_absolute_children_path() {
        let ap = parse_query(r#"doc("books.xml")/library/book"#).unwrap();
        assert_eq!(
            ap,
            AbsolutePath::Children(
                "books.xml".to_string(),
                RelativePath::step(tag_path("library"), tag_path("book")),
            )
        );
    }

    #[test]
    fn parses_absolute_descendants_path() {
        let ap = parse_query(r#"doc("books.xml")//title"#).unwrap();
        assert_eq!(
            ap,
            AbsolutePath::Descendants("books.xml".to_string(), tag_path("title"))
        );
    }

    #[test]
    fn steps_are_left_associative() {
        let rp = parse_relative("a/b//c/d").unwrap();
        assert_eq!(
            rp,
            RelativePath::step(
                RelativePath::step_all(RelativePath::step(tag_path("a"), tag_path("b")), tag_path("c")),
                tag_path("d"),
            )
        );
    }

    #[test]
    fn parses_every_primary_step() {
        assert_eq!(parse_relative("*").unwrap(), RelativePath::Wildcard);
        assert_eq!(parse_relative(".").unwrap(), RelativePath::Current);
        assert_eq!(parse_relative("..").unwrap(), RelativePath::Parent);
        assert_eq!(parse_relative("text()").unwrap(), RelativePath::Text);
        assert_eq!(parse_relative("text ( )").unwrap(), RelativePath::Text);
        assert_eq!(
            parse_relative("@id").unwrap(),
            RelativePath::Attribute("id".to_string())
        );
        assert_eq!(
            parse_relative("(a)").unwrap(),
            RelativePath::Paren(Box::new(tag_path("a")))
        );
    }

    #[test]
    fn bare_text_is_a_tag_name() {
        assert_eq!(parse_relative("text").unwrap(), tag_path("text"));
    }

    #[test]
    fn pair_binds_loosest() {
        let rp = parse_relative("a/b, c").unwrap();
        assert_eq!(
            rp,
            RelativePath::pair(RelativePath::step(tag_path("a"), tag_path("b")), tag_path("c"))
        );
    }

    #[test]
    fn filters_attach_postfix_and_nest() {
        let rp = parse_relative("book[title][@id]").unwrap();
        assert_eq!(
            rp,
            RelativePath::filtered(
                RelativePath::filtered(tag_path("book"), Filter::Exists(tag_path("title"))),
                Filter::Exists(RelativePath::Attribute("id".to_string())),
            )
        );
    }

    #[test]
    fn parses_comparison_filters() {
        let rp = parse_relative("book[title = title]").unwrap();
        assert_eq!(
            rp,
            RelativePath::filtered(
                tag_path("book"),
                Filter::ValueEq(
                    Operand::Path(tag_path("title")),
                    Operand::Path(tag_path("title")),
                ),
            )
        );

        let eq = parse_relative("book[title eq title]").unwrap();
        assert_eq!(rp, eq);

        let identity = parse_relative("book[. == .]").unwrap();
        assert_eq!(
            identity,
            RelativePath::filtered(
                tag_path("book"),
                Filter::IdentityEq(
                    Operand::Path(RelativePath::Current),
                    Operand::Path(RelativePath::Current),
                ),
            )
        );

        let is = parse_relative("book[. is .]").unwrap();
        assert_eq!(identity, is);
    }

    #[test]
    fn parses_string_literal_operands() {
        let rp = parse_relative(r#"book[title/text() = "A"]"#).unwrap();
        assert_eq!(
            rp,
            RelativePath::filtered(
                tag_path("book"),
                Filter::ValueEq(
                    Operand::Path(RelativePath::step(tag_path("title"), RelativePath::Text)),
                    Operand::Literal("A".to_string()),
                ),
            )
        );
    }

    #[test]
    fn boolean_filters_have_conventional_precedence() {
        let rp = parse_relative("a[b or c and not d]").unwrap();
        assert_eq!(
            rp,
            RelativePath::filtered(
                tag_path("a"),
                Filter::or(
                    Filter::Exists(tag_path("b")),
                    Filter::and(
                        Filter::Exists(tag_path("c")),
                        Filter::not(Filter::Exists(tag_path("d"))),
                    ),
                ),
            )
        );
    }

    #[test]
    fn keywords_still_work_as_tag_names() {
        assert_eq!(parse_relative("a[not]").unwrap(),
            RelativePath::filtered(tag_path("a"), Filter::Exists(tag_path("not"))));
        assert_eq!(parse_relative("a[android]").unwrap(),
            RelativePath::filtered(tag_path("a"), Filter::Exists(tag_path("android"))));
        assert_eq!(parse_relative("a[nots]").unwrap(),
            RelativePath::filtered(tag_path("a"), Filter::Exists(tag_path("nots"))));
    }

    #[test]
    fn parenthesized_comparison_inside_boolean() {
        let rp = parse_relative("a[(b = c) and d]").unwrap();
        assert_eq!(
            rp,
            RelativePath::filtered(
                tag_path("a"),
                Filter::and(
                    Filter::Paren(Box::new(Filter::ValueEq(
                        Operand::Path(tag_path("b")),
                        Operand::Path(tag_path("c")),
                    ))),
                    Filter::Exists(tag_path("d")),
                ),
            )
        );
    }

    #[test]
    fn parenthesized_path_as_comparison_side() {
        let rp = parse_relative("a[(b) = c]").unwrap();
        assert_eq!(
            rp,
            RelativePath::filtered(
                tag_path("a"),
                Filter::ValueEq(
                    Operand::Path(RelativePath::Paren(Box::new(tag_path("b")))),
                    Operand::Path(tag_path("c")),
                ),
            )
        );
    }

    #[test]
    fn pair_inside_parentheses() {
        let rp = parse_relative("library/(book, book/title)").unwrap();
        assert_eq!(
            rp,
            RelativePath::step(
                tag_path("library"),
                RelativePath::Paren(Box::new(RelativePath::pair(
                    tag_path("book"),
                    RelativePath::step(tag_path("book"), tag_path("title")),
                ))),
            )
        );
    }

    #[test]
    fn rejects_trailing_input_and_garbage() {
        assert!(parse_query(r#"doc("a.xml")/x y"#).is_err());
        assert!(parse_query("library/book").is_err());
        assert!(parse_relative("").is_err());
        assert!(parse_relative("book[").is_err());
        assert!(parse_relative("/book").is_err());
    }

    #[test]
    fn whitespace_is_insignificant() {
        let compact = parse_query(r#"doc("b.xml")/a/b[c="d"]"#).unwrap();
        let spaced = parse_query(" doc( \"b.xml\" ) / a / b [ c = \"d\" ] ").unwrap();
        assert_eq!(compact, spaced);
    }
}
