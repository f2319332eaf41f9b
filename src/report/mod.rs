//! Report tables
//!
//! Builders decide what data appears where; renderers decide how it looks.
//! A [`Table`] is a header row plus data rows of [`Cell`]s, and a
//! [`CompositeTable`] groups captioned sub-tables (one per model class).
//!
//! ```text
//! builders::performance_table ─┐
//! builders::hyperparameter_table ─┼─> CompositeTable ─> render::TableRenderer ─> text
//! builders::dataset_table ─────┘
//! ```

pub mod builders;
pub mod render;

pub use builders::{dataset_table, hyperparameter_table, performance_table};
pub use render::{full_width, LatexBooktabs, PlainText, TableRenderer};

/// One table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Text rendered as-is (left-aligned).
    Text(String),
    /// Integer (right-aligned).
    Integer(i64),
    /// Real number rendered with the table's float precision (right-aligned).
    Float(f64),
}

impl Cell {
    /// Whether the cell is numeric (right-aligned in rendered output).
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }

    /// Format the cell, using `precision` decimals for floats.
    #[must_use]
    pub fn format(&self, precision: usize) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Integer(value) => value.to_string(),
            Self::Float(value) => format!("{value:.precision$}"),
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<u32> for Cell {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

/// A header row plus data rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    caption: Option<String>,
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create a table with the given header row and no data.
    #[must_use]
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            caption: None,
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Attach a caption.
    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Append a data row.
    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Get the caption, if any.
    #[must_use]
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    /// Get the header row.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get the data rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Look up a cell by row index and header name.
    #[must_use]
    pub fn cell(&self, row: usize, header: &str) -> Option<&Cell> {
        let col = self.headers.iter().position(|h| h == header)?;
        self.rows.get(row)?.get(col)
    }

    /// Whether column `col` holds only numeric cells (and at least one).
    #[must_use]
    pub fn is_numeric_column(&self, col: usize) -> bool {
        let mut cells = self.rows.iter().filter_map(|row| row.get(col)).peekable();
        cells.peek().is_some() && cells.all(Cell::is_numeric)
    }
}

/// Captioned sub-tables rendered side by side.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompositeTable {
    caption: Option<String>,
    label: Option<String>,
    tables: Vec<Table>,
}

impl CompositeTable {
    /// Create a composite from sub-tables.
    #[must_use]
    pub const fn new(tables: Vec<Table>) -> Self {
        Self {
            caption: None,
            label: None,
            tables,
        }
    }

    /// Attach an outer caption (renders as a floating table).
    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Attach a cross-reference label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the outer caption.
    #[must_use]
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    /// Get the cross-reference label.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Get the sub-tables.
    #[must_use]
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_format() {
        assert_eq!(Cell::Float(0.123_456).format(4), "0.1235");
        assert_eq!(Cell::Integer(8).format(4), "8");
        assert_eq!(Cell::from("LSTM").format(4), "LSTM");
    }

    #[test]
    fn test_table_cell_lookup() {
        let mut table = Table::new(["Model", "Amazon"]);
        table.push_row(vec!["LSTM".into(), Cell::Float(0.5)]);
        assert_eq!(table.cell(0, "Amazon"), Some(&Cell::Float(0.5)));
        assert!(table.cell(0, "Goodbooks").is_none());
        assert!(table.cell(1, "Model").is_none());
    }

    #[test]
    fn test_numeric_column() {
        let mut table = Table::new(["Model", "Amazon"]);
        assert!(!table.is_numeric_column(1));
        table.push_row(vec!["LSTM".into(), Cell::Float(0.5)]);
        assert!(!table.is_numeric_column(0));
        assert!(table.is_numeric_column(1));
    }
}
