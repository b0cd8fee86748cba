//! Examples of using the Patricia lookup dictionary
use patricia_lookup::{csv, render, Dictionary, Outcome, PatriciaDict, ScanDict, Schema};
use std::io::{self, Cursor};

const DATASET: &str = "\
PFI,EZI_ADD,SUBURB
101,12 MAIN ST CARLTON,CARLTON
102,14 MAIN ST CARLTON,CARLTON
103,12 MAIN ST CARLTON,CARLTON
104,\"3 HIGH ST, KEW\",KEW
";

fn main() -> patricia_lookup::Result<()> {
    // Load the dataset, keyed on the address column
    let reader = csv::Reader::new(Cursor::new(DATASET))?;
    let headers = reader.headers().to_vec();
    let schema = Schema::new(headers.len(), 1)?;

    let mut trie = PatriciaDict::new(schema);
    patricia_lookup::load(&mut trie, reader.records(schema))?;
    assert_eq!(trie.len(), 4);
    assert_eq!(trie.key_count(), 3);

    // Exact match: both records with the same address, in insertion order
    let result = trie.lookup("12 MAIN ST CARLTON");
    assert_eq!(result.outcome(), Outcome::Exact);
    assert_eq!(result.len(), 2);
    assert_eq!(result.records()[0].field(0), Some("101"));

    // A misspelled query still finds the nearest address
    let result = trie.lookup("14 MAIN RD CARLTON");
    assert!(!result.is_exact());
    assert_eq!(result.records()[0].field(0), Some("102"));

    // Print summary and details for a few queries
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for query in ["12 MAIN ST CARLTON", "3 HIGH ST, KEW", "3 HIGH ST KEW"] {
        render::render(&trie.lookup(query), &headers, &mut io::sink(), &mut out)?;
    }

    // The scan baseline agrees on exact matches but compares far more strings
    let mut scan = ScanDict::new(schema);
    let reader = csv::Reader::new(Cursor::new(DATASET))?;
    patricia_lookup::load(&mut scan, reader.records(schema))?;
    let from_scan = scan.lookup("12 MAIN ST CARLTON");
    let from_trie = trie.lookup("12 MAIN ST CARLTON");
    assert_eq!(from_scan.records(), from_trie.records());
    assert_eq!(from_scan.comparisons().strings, 4);
    assert_eq!(from_trie.comparisons().strings, 1);

    Ok(())
}
