mod common;

use common::{library_fixture, node_count};
use quarry::run_xquery;

#[test]
fn flwr_over_books_builds_entries()  {
    let (_dir, loader) = library_fixture();
    let query = r#"for $b in doc("books.xml")//book
                   where $b/title/text() = "A"
                   return <entry>{ $b/title }</entry>"#;
    let out = run_xquery(query, &loader).unwrap();
    assert_eq!(
        out,
        "<!-- Number of nodes: 2 -->\n\
         <!-- Node #1 -->\n<entry>\n  <title>A</title>\n</entry>\n\
         <!-- Node #2 -->\n<entry>\n  <title>A</title>\n</entry>\n"
    );
}

#[test]
fn where_clause_can_reject_everything() {
    let (_dir, loader) = library_fixture();
    let query = r#"for $b in doc("books.xml")//book
                   where empty($b/title)
                   return $b"#;
    let out = run_xquery(query, &loader).unwrap();
    assert_eq!(node_count(&out), 0);
}

#[test]
fn let_wraps_everything_in_one_constructor() {
    let (_dir, loader) = library_fixture();
    let query = r#"let $ts := doc("books.xml")//title <all>{ $ts }</all>"#;
    let out = run_xquery(query, &loader).unwrap();
    assert_eq!(
        out,
        "<!-- Number of nodes: 1 -->\n\
         <!-- Node #1 -->\n<all>\n  <title>A</title>\n  <title>A</title>\n</all>\n"
    );
}

#[test]
fn nested_for_takes_the_product() {
    let (_dir, loader) = library_fixture();
    let query = r#"for $a in doc("books.xml")//book, $t in $a/title return $t"#;
    let out = run_xquery(query, &loader).unwrap();
    assert_eq!(node_count(&out), 2);
}

#[test]
fn some_satisfies_in_where() {
    let (_dir, loader) = library_fixture();
    let query = r#"for $b in doc("books.xml")//book
                   where some $t in $b/title satisfies $t/text() = "A"
                   return $b/@id"#;
    let out = run_xquery(query, &loader).unwrap();
    assert_eq!(
        out,
        "<!-- Number of nodes: 2 -->\n\
         <!-- Node #1 -->\nid=\"1\"\n\
         <!-- Node #2 -->\nid=\"2\"\n"
    );
}

#[test]
fn sequences_and_literals_render_in_order() {
    let (_dir, loader) = library_fixture();
    let out = run_xquery(r#""first", "second""#, &loader).unwrap();
    assert_eq!(
        out,
        "<!-- Number of nodes: 2 -->\n\
         <!-- Node #1 -->\nfirst\n\
         <!-- Node #2 -->\nsecond\n"
    );
}

#[test]
fn constructed_elements_copy_attributes_too() {
    let (_dir, loader) = library_fixture();
    let query = r#"<shelf>{ doc("books.xml")//book }</shelf>"#;
    let out = run_xquery(query, &loader).unwrap();
    assert_eq!(node_count(&out), 1);
    assert!(out.contains("<book id=\"1\">"));
    assert!(out.contains("<book id=\"2\">"));
}

#[test]
fn unbound_variables_are_reported() {
    let (_dir, loader) = library_fixture();
    let err = run_xquery("$missing", &loader).unwrap_err();
    assert!(err.to_string().contains("unbound variable $missing"));
}
