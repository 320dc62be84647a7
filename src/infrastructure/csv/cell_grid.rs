// ============================================================
// CELL GRID
// ============================================================
// Sparse, lazily grown row/column string table

/// 2-D string buffer addressed by (row, col).
///
/// Touching a position that does not exist yet creates every missing row
/// and cell up to it as empty strings, so rows may end up with different
/// lengths.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CellGrid {
    rows: Vec<Vec<String>>,
}

impl CellGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure (row, col) exists
    pub fn touch(&mut self, row: usize, col: usize) {
        self.cell_mut(row, col);
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> &mut String {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize_with(col + 1, String::new);
        }
        &mut cells[col]
    }

    pub fn push_char(&mut self, row: usize, col: usize, c: char) {
        self.cell_mut(row, col).push(c);
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
