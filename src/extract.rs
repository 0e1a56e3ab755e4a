// src/extract.rs
//
// Row → record extraction. Every <tr> either yields a ColorRecord or a
// RowError; failures are dropped here and never propagate.

use std::fmt;

use crate::core::html::{Document, Element};
use crate::record::ColorRecord;

/// Why a row was dropped. Only ever seen by the debug log.
#[derive(Debug, PartialEq, Eq)]
pub enum RowError {
    TooFewCells(usize),
    BadComponent { field: &'static str, value: String },
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowError::TooFewCells(n) => write!(f, "row has {n} cells, need 5"),
            RowError::BadComponent { field, value } => {
                write!(f, "{field} is not an integer: {value:?}")
            }
        }
    }
}

/// One record per well-formed row, in document order.
pub fn extract_records(doc: &Document) -> Vec<ColorRecord> {
    let mut out = Vec::new();
    let mut skipped = 0usize;
    for (i, row) in doc.find_all("tr").into_iter().enumerate() {
        match record_from_row(row) {
            Ok(rec) => out.push(rec),
            Err(e) => {
                skipped += 1;
                logd!("skipping row {i}: {e}");
            }
        }
    }
    logf!("extracted {} records, skipped {} rows", out.len(), skipped);
    out
}

/// Fixed column order: id, name, red, green, blue. Extra cells are ignored.
fn record_from_row(row: &Element) -> Result<ColorRecord, RowError> {
    let cells = row.find_all("td");
    if cells.len() < 5 {
        return Err(RowError::TooFewCells(cells.len()));
    }
    Ok(ColorRecord {
        id: cells[0].text(),
        name: cells[1].text(),
        red: int_cell(cells[2], "red")?,
        green: int_cell(cells[3], "green")?,
        blue: int_cell(cells[4], "blue")?,
    })
}

fn int_cell(cell: &Element, field: &'static str) -> Result<i64, RowError> {
    let text = cell.text();
    let trimmed = text.trim();
    trimmed.parse().map_err(|_| RowError::BadComponent {
        field,
        value: s!(trimmed),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::html::parse;

    fn records(doc: &str) -> Vec<ColorRecord> {
        extract_records(&parse(doc))
    }

    #[test]
    fn well_formed_row_becomes_a_record() {
        let recs = records("<tr><td>1</td><td>black</td><td>0</td><td>0</td><td>0</td></tr>");
        assert_eq!(
            recs,
            vec![ColorRecord {
                id: s!("1"),
                name: s!("black"),
                red: 0,
                green: 0,
                blue: 0,
            }]
        );
    }

    #[test]
    fn short_row_is_dropped() {
        assert!(records("<tr><td>1</td><td>black</td><td>0</td></tr>").is_empty());
    }

    #[test]
    fn non_integer_component_drops_only_that_row() {
        let recs = records(
            "<table>\
             <tr><td>1</td><td>ok</td><td>1</td><td>2</td><td>3</td></tr>\
             <tr><td>2</td><td>bad</td><td>xyz</td><td>0</td><td>0</td></tr>\
             <tr><td>3</td><td>also ok</td><td>4</td><td>5</td><td>6</td></tr>\
             </table>",
        );
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].name, "ok");
        assert_eq!(recs[1].name, "also ok");
    }

    #[test]
    fn components_tolerate_surrounding_whitespace() {
        let recs =
            records("<tr><td>9</td><td>gray</td><td> 128 </td><td>\n128</td><td>128\t</td></tr>");
        assert_eq!((recs[0].red, recs[0].green, recs[0].blue), (128, 128, 128));
    }

    #[test]
    fn out_of_range_and_negative_components_pass_through() {
        let recs = records("<tr><td>x</td><td>odd</td><td>999</td><td>-1</td><td>+2</td></tr>");
        assert_eq!((recs[0].red, recs[0].green, recs[0].blue), (999, -1, 2));
    }

    #[test]
    fn id_and_name_stay_strings_verbatim() {
        let recs = records("<tr><td>007</td><td> pale gold </td><td>1</td><td>2</td><td>3</td></tr>");
        assert_eq!(recs[0].id, "007");
        assert_eq!(recs[0].name, " pale gold ");
    }

    #[test]
    fn extra_cells_are_ignored() {
        let recs = records(
            "<tr><td>1</td><td>teal</td><td>0</td><td>128</td><td>128</td><td>junk</td></tr>",
        );
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].blue, 128);
    }

    #[test]
    fn cell_markup_reads_as_plain_text() {
        let recs = records(
            "<tr><td><b>12</b></td><td><span>sky&nbsp;blue</span></td>\
             <td><b> 135 </b></td><td>206</td><td>235</td></tr>",
        );
        assert_eq!(recs[0].id, "12");
        assert_eq!(recs[0].name, "sky blue");
        assert_eq!(recs[0].red, 135);
    }

    #[test]
    fn row_errors_name_the_offending_field() {
        let row = parse("<tr><td>1</td><td>n</td><td>0</td><td>zz</td><td>0</td></tr>");
        let tr = row.find_all("tr")[0];
        assert_eq!(
            record_from_row(tr),
            Err(RowError::BadComponent { field: "green", value: s!("zz") })
        );
    }
}
