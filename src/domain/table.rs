use std::collections::BTreeSet;

use serde_json::Value;

/// One result row: column name to cell value.
pub type Row = serde_json::Map<String, Value>;

/// A tabular query result as returned by datasource connectors.
///
/// Column order is the order given at construction. `from_rows` derives it
/// from the union of row keys, sorted, so output files are deterministic
/// regardless of driver iteration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut names = BTreeSet::new();
        for row in &rows {
            for key in row.keys() {
                names.insert(key.clone());
            }
        }
        Self { columns: names.into_iter().collect(), rows }
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render as RFC 4180 CSV with a header line. Missing cells and JSON
    /// nulls become empty fields; nested values are serialized compactly.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        push_record(&mut out, self.columns.iter().map(String::as_str));
        for row in &self.rows {
            let cells: Vec<String> =
                self.columns.iter().map(|c| cell_text(row.get(c))).collect();
            push_record(&mut out, cells.iter().map(String::as_str));
        }
        out
    }
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn push_record<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    let mut first = true;
    for field in fields {
        if !first {
            out.push(',');
        }
        first = false;
        if field.contains([',', '"', '\n', '\r']) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push('\n');
}
