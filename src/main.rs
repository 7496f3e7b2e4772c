use quarry::{run_xpath, run_xquery, QueryError};
use quarry_dom::FileLoader;
use std::env;
use std::fs;

/// A simple CLI to evaluate an XPath or XQuery query file against XML
/// documents in the working directory.
fn main() -> Result<(), QueryError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 || !matches!(args[1].as_str(), "xpath" | "xquery") {
        eprintln!("A tool to evaluate XPath and XQuery queries against XML documents.");
        eprintln!();
        eprintln!("Usage: {} <xpath|xquery> <path/to/query>", args[0]);
        eprintln!();
        eprintln!("Documents referenced by doc(\"...\") inside the query are resolved");
        eprintln!("against the current working directory.");
        std::process::exit(1);
    }

    let query = fs::read_to_string(&args[2])?;
    let loader = FileLoader::default();

    let output = match args[1].as_str() {
        "xpath" => run_xpath(&query, &loader)?,
        _ => run_xquery(&query, &loader)?,
    };
    print!("{output}");
    Ok(())
}
