// src/record.rs
use serde::Serialize;

/// One output row. Field order is the emitted JSON key order.
/// Components are whatever the table says; no 0-255 clamping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ColorRecord {
    pub id: String,
    pub name: String,
    pub red: i64,
    pub green: i64,
    pub blue: i64,
}
