use serde::{Deserialize, Serialize};

/// A spreadsheet-shaped table: ordered column names and rows of text cells.
///
/// This is what the file parser hands over. Every row holds exactly one cell
/// per header; short rows are padded with empty cells and surplus cells are
/// dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        RawTable {
            headers,
            rows: Vec::new(),
        }
    }

    /// Build a table from anything string-like. Handy for tests and for
    /// callers that already hold parsed rows.
    pub fn from_rows<H, R, C>(headers: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let mut table = RawTable::new(headers.into_iter().map(Into::into).collect());
        for row in rows {
            table.push_row(row.into_iter().map(Into::into).collect());
        }
        table
    }

    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the column called `name`, matched case-insensitively with
    /// surrounding whitespace ignored.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| header_matches(h, name))
    }

    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows[row][col].as_str()
    }

    /// Cells of one column, top to bottom.
    pub fn column(&self, col: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(move |r| r[col].as_str())
    }

    pub(crate) fn rename_column(&mut self, col: usize, name: &str) {
        self.headers[col] = name.to_string();
    }

    pub(crate) fn set_cell(&mut self, row: usize, col: usize, value: String) {
        self.rows[row][col] = value;
    }

    /// Index of `name`, appending an empty column at the end if absent.
    pub(crate) fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column_index(name) {
            return idx;
        }
        self.headers.push(name.to_string());
        for row in &mut self.rows {
            row.push(String::new());
        }
        self.headers.len() - 1
    }
}

pub fn header_matches(header: &str, name: &str) -> bool {
    header.trim().eq_ignore_ascii_case(name.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ragged_rows_are_padded_and_truncated() {
        let table = RawTable::from_rows(
            ["a", "b", "c"],
            [vec!["1"], vec!["1", "2", "3", "4"]],
        );
        assert_eq!(table.rows()[0], vec!["1", "", ""]);
        assert_eq!(table.rows()[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn test_column_lookup_ignores_case_and_whitespace() {
        let table = RawTable::from_rows([" TckrSymb ", "Asst"], Vec::<Vec<&str>>::new());
        assert_eq!(table.column_index("tckrsymb"), Some(0));
        assert_eq!(table.column_index("ASST "), Some(1));
        assert_eq!(table.column_index("Last"), None);
    }

    #[test]
    fn test_ensure_column_reuses_existing() {
        let mut table = RawTable::from_rows(["a"], [vec!["x"]]);
        assert_eq!(table.ensure_column("b"), 1);
        assert_eq!(table.ensure_column("B"), 1);
        assert_eq!(table.rows()[0], vec!["x", ""]);
    }
}
