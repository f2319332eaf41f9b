//! Table renderers
//!
//! [`LatexBooktabs`] produces `booktabs` markup for the paper;
//! [`PlainText`] produces aligned columns for the terminal. Both right-align
//! numeric columns and format floats with the requested precision.

use super::{Cell, CompositeTable, Table};

/// Turns report tables into text.
pub trait TableRenderer {
    /// Render a single table.
    fn render_table(&self, table: &Table, precision: usize) -> String;

    /// Render a composite of captioned sub-tables.
    fn render_composite(&self, composite: &CompositeTable, precision: usize) -> String;
}

/// Widen a LaTeX table to the full column width.
///
/// Pure substitution: `tabular` becomes `tabularx` and every
/// `\begin{tabularx}` gains a `{\columnwidth}` width argument. Apply it
/// once per document fragment.
#[must_use]
pub fn full_width(tex: &str) -> String {
    tex.replace("tabular", "tabularx")
        .replace("\\begin{tabularx}", "\\begin{tabularx}{\\columnwidth}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// Formatted cells plus per-column width and alignment.
struct Layout {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    widths: Vec<usize>,
    aligns: Vec<Align>,
}

impl Layout {
    fn new(table: &Table, precision: usize, escape: fn(&str) -> String) -> Self {
        let columns = table
            .rows()
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(table.headers().len()))
            .max()
            .unwrap_or(0);

        let headers: Vec<String> = (0..columns)
            .map(|col| table.headers().get(col).map_or_else(String::new, |h| escape(h)))
            .collect();

        let rows: Vec<Vec<String>> = table
            .rows()
            .iter()
            .map(|row| {
                (0..columns)
                    .map(|col| match row.get(col) {
                        Some(Cell::Text(text)) => escape(text),
                        Some(cell) => cell.format(precision),
                        None => String::new(),
                    })
                    .collect()
            })
            .collect();

        let widths = (0..columns)
            .map(|col| {
                rows.iter()
                    .map(|row| row[col].chars().count())
                    .chain(std::iter::once(headers[col].chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let aligns = (0..columns)
            .map(|col| {
                if table.is_numeric_column(col) {
                    Align::Right
                } else {
                    Align::Left
                }
            })
            .collect();

        Self {
            headers,
            rows,
            widths,
            aligns,
        }
    }

    fn pad(&self, col: usize, text: &str) -> String {
        let width = self.widths[col];
        match self.aligns[col] {
            Align::Left => format!("{text:<width$}"),
            Align::Right => format!("{text:>width$}"),
        }
    }

    fn line(&self, cells: &[String], separator: &str) -> String {
        cells
            .iter()
            .enumerate()
            .map(|(col, text)| self.pad(col, text))
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// Escape LaTeX special characters in a text cell.
#[must_use]
pub fn escape_latex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            '^' => escaped.push_str("\\^{}"),
            '~' => escaped.push_str("\\textasciitilde{}"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// LaTeX `booktabs` renderer.
///
/// Tables are widened with [`full_width`] unless disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatexBooktabs {
    full_width: bool,
}

impl Default for LatexBooktabs {
    fn default() -> Self {
        Self::new()
    }
}

impl LatexBooktabs {
    /// Renderer producing full-width `tabularx` tables.
    #[must_use]
    pub const fn new() -> Self {
        Self { full_width: true }
    }

    /// Keep the natural `tabular` width.
    #[must_use]
    pub const fn natural_width(mut self) -> Self {
        self.full_width = false;
        self
    }

    fn tabular(table: &Table, precision: usize) -> String {
        let layout = Layout::new(table, precision, escape_latex);
        let spec: String = layout
            .aligns
            .iter()
            .map(|align| match align {
                Align::Left => 'l',
                Align::Right => 'r',
            })
            .collect();

        let mut out = format!("\\begin{{tabular}}{{{spec}}}\n\\toprule\n");
        out.push_str(&format!(" {} \\\\\n", layout.line(&layout.headers, " & ")));
        out.push_str("\\midrule\n");
        for row in &layout.rows {
            out.push_str(&format!(" {} \\\\\n", layout.line(row, " & ")));
        }
        out.push_str("\\bottomrule\n\\end{tabular}");
        out
    }

    fn finish(&self, tex: String) -> String {
        if self.full_width {
            full_width(&tex)
        } else {
            tex
        }
    }
}

impl TableRenderer for LatexBooktabs {
    fn render_table(&self, table: &Table, precision: usize) -> String {
        self.finish(Self::tabular(table, precision))
    }

    fn render_composite(&self, composite: &CompositeTable, precision: usize) -> String {
        let subtables: Vec<String> = composite
            .tables()
            .iter()
            .map(|table| {
                let mut sub = String::from("\\begin{subtable}{\\columnwidth}\n");
                if let Some(caption) = table.caption() {
                    sub.push_str(&format!("\\caption{{{}}}\n", escape_latex(caption)));
                }
                sub.push_str(&Self::tabular(table, precision));
                sub.push_str("\n\\end{subtable}");
                sub
            })
            .collect();

        let body = subtables.join("\n\\hspace{\\fill}\n");

        let tex = match composite.caption() {
            Some(caption) => {
                let mut tex = format!("\\begin{{table}}\n\\caption{{{}}}\n", escape_latex(caption));
                if let Some(label) = composite.label() {
                    tex.push_str(&format!("\\label{{{label}}}\n"));
                }
                tex.push_str(&body);
                tex.push_str("\n\\end{table}");
                tex
            }
            None => body,
        };

        self.finish(tex)
    }
}

/// Aligned plain-text renderer for terminal output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlainText;

impl TableRenderer for PlainText {
    fn render_table(&self, table: &Table, precision: usize) -> String {
        let layout = Layout::new(table, precision, str::to_string);
        let rule = layout
            .widths
            .iter()
            .map(|&w| "-".repeat(w))
            .collect::<Vec<_>>()
            .join("  ");

        let mut lines = Vec::with_capacity(layout.rows.len() + 3);
        if let Some(caption) = table.caption() {
            lines.push(caption.to_string());
        }
        lines.push(layout.line(&layout.headers, "  "));
        lines.push(rule);
        lines.extend(layout.rows.iter().map(|row| layout.line(row, "  ")));

        lines
            .iter()
            .map(|line| line.trim_end())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_composite(&self, composite: &CompositeTable, precision: usize) -> String {
        let mut sections = Vec::with_capacity(composite.tables().len() + 1);
        if let Some(caption) = composite.caption() {
            sections.push(caption.to_string());
        }
        sections.extend(
            composite
                .tables()
                .iter()
                .map(|table| self.render_table(table, precision)),
        );
        sections.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(["Model", "Amazon"]).with_caption("Sequence models");
        table.push_row(vec!["LSTM".into(), Cell::Float(0.061_23)]);
        table.push_row(vec!["Mixture-LSTM".into(), Cell::Float(0.07)]);
        table
    }

    #[test]
    fn test_full_width() {
        let tex = full_width("\\begin{tabular}{lr}\n\\end{tabular}");
        assert_eq!(tex, "\\begin{tabularx}{\\columnwidth}{lr}\n\\end{tabularx}");
    }

    #[test]
    fn test_escape_latex() {
        assert_eq!(escape_latex("50%_a&b"), "50\\%\\_a\\&b");
        assert_eq!(escape_latex("95th/50th"), "95th/50th");
    }

    #[test]
    fn test_latex_table() {
        let tex = LatexBooktabs::new().natural_width().render_table(&sample(), 4);
        assert!(tex.starts_with("\\begin{tabular}{lr}\n\\toprule\n"));
        assert!(tex.contains(" Model        & Amazon \\\\\n\\midrule\n"));
        assert!(tex.contains(" LSTM         & 0.0612 \\\\"));
        assert!(tex.contains(" Mixture-LSTM & 0.0700 \\\\"));
        assert!(tex.ends_with("\\bottomrule\n\\end{tabular}"));
    }

    #[test]
    fn test_latex_table_full_width() {
        let tex = LatexBooktabs::new().render_table(&sample(), 4);
        assert!(tex.starts_with("\\begin{tabularx}{\\columnwidth}{lr}"));
        assert!(tex.ends_with("\\end{tabularx}"));
        assert!(!tex.contains("tabularxx"));
    }

    #[test]
    fn test_latex_composite() {
        let composite = CompositeTable::new(vec![sample(), sample()])
            .with_caption("Effect")
            .with_label("tab:x");
        let tex = LatexBooktabs::new().render_composite(&composite, 4);

        assert!(tex.starts_with("\\begin{table}\n\\caption{Effect}\n\\label{tab:x}\n"));
        assert_eq!(tex.matches("\\begin{subtable}{\\columnwidth}").count(), 2);
        assert_eq!(tex.matches("\\caption{Sequence models}").count(), 2);
        assert_eq!(tex.matches("\\hspace{\\fill}").count(), 1);
        assert_eq!(tex.matches("\\begin{tabularx}{\\columnwidth}").count(), 2);
        assert!(!tex.contains("tabularxx"));
        assert!(tex.ends_with("\\end{table}"));
    }

    #[test]
    fn test_plain_text() {
        let text = PlainText.render_table(&sample(), 3);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Sequence models");
        assert_eq!(lines[1], "Model         Amazon");
        assert_eq!(lines[2], "------------  ------");
        assert_eq!(lines[3], "LSTM           0.061");
        assert_eq!(lines[4], "Mixture-LSTM   0.070");
    }
}
