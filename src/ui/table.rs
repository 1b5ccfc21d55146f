//! Box-drawn tables for license and rule listings.

use console::measure_text_width;

/// A simple table for formatted output.
///
/// Column widths are measured on visible text, so cells may carry
/// terminal styling.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    widths: Vec<usize>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        let widths = headers.iter().map(|h| measure_text_width(h)).collect();

        Self {
            headers,
            rows: Vec::new(),
            widths,
        }
    }

    /// Add a row. Cells beyond the header count are ignored.
    pub fn add_row(&mut self, row: Vec<String>) {
        for (width, cell) in self.widths.iter_mut().zip(&row) {
            *width = (*width).max(measure_text_width(cell));
        }
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 4);

        lines.push(self.border('┌', '┬', '┐'));
        lines.push(self.line(&self.headers));
        lines.push(self.border('├', '┼', '┤'));
        lines.extend(self.rows.iter().map(|row| self.line(row)));
        lines.push(self.border('└', '┴', '┘'));

        lines.join("\n")
    }

    fn border(&self, left: char, mid: char, right: char) -> String {
        let segments: Vec<String> = self.widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(&mid.to_string()), right)
    }

    fn line(&self, row: &[String]) -> String {
        let mut s = String::from("│");
        for (i, width) in self.widths.iter().enumerate() {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            let pad = width.saturating_sub(measure_text_width(cell));
            s.push_str(&format!(" {}{} │", cell, " ".repeat(pad)));
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn empty_table_renders_headers() {
        let table = Table::new(&["Category", "Prerequisites"]);
        assert!(table.is_empty());

        let output = table.render();
        assert!(output.contains("Category"));
        assert!(output.contains("Prerequisites"));
        assert_eq!(output.lines().count(), 4);
    }

    #[test]
    fn rows_are_padded_to_widest_cell() {
        let mut table = Table::new(&["Id", "Categories"]);
        table.add_row(row(&["auto-c1e-c1", "C1"]));
        table.add_row(row(&["ext-1", "B, BE"]));

        assert_eq!(table.row_count(), 2);
        let output = table.render();
        let widths: Vec<usize> = output.lines().map(measure_text_width).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn styled_cells_do_not_skew_widths() {
        let mut table = Table::new(&["Status"]);
        table.add_row(vec![console::Style::new().green().force_styling(true).apply_to("ACTIVE").to_string()]);
        table.add_row(row(&["EXPIRED"]));

        let output = table.render();
        let widths: Vec<usize> = output.lines().map(measure_text_width).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn missing_cells_render_blank() {
        let mut table = Table::new(&["A", "B", "C"]);
        table.add_row(row(&["only"]));

        let output = table.render();
        assert!(output.contains("only"));
        assert!(output.contains("┬"));
        assert!(output.contains("┴"));
    }
}
