use crate::classify::pretty_interpreter_tag;
use crate::coverage::CellCoverage;
use crate::matrix::CoverageMatrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
}

/// Package × interpreter grid of coverage codes.
///
/// Row 0 is the header (empty corner, then prettified interpreter tags).
/// Every following row is one package, in lexical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageTable {
    rows: Vec<Vec<String>>,
}

impl CoverageTable {
    pub fn from_matrix(matrix: &CoverageMatrix) -> Self {
        let interpreters: Vec<&str> = matrix.interpreters().collect();

        let mut header = Vec::with_capacity(interpreters.len() + 1);
        header.push(String::new());
        header.extend(interpreters.iter().map(|tag| pretty_interpreter_tag(tag)));

        let mut rows = vec![header];
        for package in matrix.packages() {
            let mut row = Vec::with_capacity(interpreters.len() + 1);
            row.push(package.to_string());
            for interpreter in &interpreters {
                row.push(CellCoverage::evaluate(matrix, package, interpreter).code());
            }
            rows.push(row);
        }

        Self { rows }
    }

    pub fn header(&self) -> &[String] {
        &self.rows[0]
    }

    /// Package rows, without the header.
    pub fn body(&self) -> &[Vec<String>] {
        &self.rows[1..]
    }

    /// Widest cell per column, in characters.
    pub fn column_widths(&self) -> Vec<usize> {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0usize; columns];
        for row in &self.rows {
            for (idx, cell) in row.iter().enumerate() {
                widths[idx] = widths[idx].max(cell.chars().count());
            }
        }
        widths
    }

    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(render_line(self.header(), &widths));
        lines.push(render_line(&separator, &widths));
        for row in self.body() {
            lines.push(render_line(row, &widths));
        }
        lines.join("\n")
    }
}

fn render_line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(idx, (cell, width))| {
            let align = if idx == 0 { Align::Left } else { Align::Center };
            pad(cell, *width, align)
        })
        .collect();
    format!("| {} |", padded.join(" | "))
}

fn pad(cell: &str, width: usize, align: Align) -> String {
    match align {
        Align::Left => format!("{cell:<width$}"),
        Align::Center => format!("{cell:^width$}"),
    }
}
