// src/runner.rs
use std::error::Error;
use std::fs;

use crate::cli::Params;
use crate::core::html;
use crate::extract;

/// Parse a document and render the surviving rows as one compact JSON array.
pub fn convert_document(input: &str) -> Result<String, serde_json::Error> {
    let doc = html::parse(input);
    let records = extract::extract_records(&doc);
    serde_json::to_string(&records)
}

/// Read the input file and convert it. A missing or unreadable file is
/// fatal and propagates; malformed rows are already gone by this point.
pub fn run(params: &Params) -> Result<String, Box<dyn Error>> {
    let text = fs::read_to_string(&params.input)?;
    Ok(convert_document(&text)?)
}
