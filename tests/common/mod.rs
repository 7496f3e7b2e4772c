use quarry_dom::FileLoader;
use std::fs;
use tempfile::TempDir;

/// The two-book library document the end-to-end suites query against.
pub const BOOKS_XML: &str = r#"<library>
  <book id="1">
    <title>A</title>
  </book>
  <book id="2">
    <title>A</title>
  </book>
</library>
"#;

/// Writes `books.xml` into a fresh temp dir and returns a loader rooted
/// there. Keep the `TempDir` alive for the duration of the test.
pub fn library_fixture() -> (TempDir, FileLoader) {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(dir.path().join("books.xml"), BOOKS_XML).expect("write fixture");
    let loader = FileLoader::new(dir.path());
    (dir, loader)
}

/// The number a rendered result declares in its node-count header.
pub fn node_count(output: &str) -> usize {
    let line = output.lines().next().unwrap_or_default();
    line.trim_start_matches("<!-- Number of nodes: ")
        .trim_end_matches(" -->")
        .parse()
        .expect("node count header")
}
