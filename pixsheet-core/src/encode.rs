use std::collections::{HashMap, HashSet};
use std::path::Path;

use rust_xlsxwriter::{Color, Format, FormatPattern, Workbook, Worksheet};

use crate::error::SheetError;
use crate::format::*;

/// Builds a single-sheet workbook of filled cells in memory, then saves it once.
pub struct SheetWriter {
    worksheet: Worksheet,
    formats: HashMap<Rgb, Format>,
    sized_rows: HashSet<u32>,
    sized_cols: HashSet<u16>,
    column_width: f64,
    row_height: f64,
    cell_count: u32,
}

impl SheetWriter {
    /// Writer using the fixed `COLUMN_WIDTH` x `ROW_HEIGHT` cell geometry.
    pub fn new() -> Self {
        Self::with_geometry(COLUMN_WIDTH, ROW_HEIGHT)
    }

    pub fn with_geometry(column_width: f64, row_height: f64) -> Self {
        Self {
            worksheet: Worksheet::new(),
            formats: HashMap::new(),
            sized_rows: HashSet::new(),
            sized_cols: HashSet::new(),
            column_width,
            row_height,
            cell_count: 0,
        }
    }

    /// Write one blank cell with a solid fill. Its row and column are sized
    /// the first time they are touched.
    pub fn write_cell(&mut self, cell: &Cell) -> Result<(), SheetError> {
        let (row, col) = cell.zero_based()?;

        if self.sized_cols.insert(col) {
            self.worksheet.set_column_width(col, self.column_width)?;
        }
        if self.sized_rows.insert(row) {
            self.worksheet.set_row_height(row, self.row_height)?;
        }

        let format = self.formats.entry(cell.fill).or_insert_with(|| {
            tracing::debug!(color = %cell.fill.to_hex(), "new fill format");
            fill_format(cell.fill)
        });
        self.worksheet.write_blank(row, col, format)?;
        self.cell_count += 1;
        Ok(())
    }

    pub fn write_cells(&mut self, cells: &[Cell]) -> Result<(), SheetError> {
        for c in cells {
            self.write_cell(c)?;
        }
        Ok(())
    }

    pub fn cell_count(&self) -> u32 {
        self.cell_count
    }

    /// Distinct fill colors written so far.
    pub fn color_count(&self) -> usize {
        self.formats.len()
    }

    /// Save the workbook to `path`, replacing any existing file.
    /// Returns the number of cells written.
    pub fn finish(self, path: &Path) -> Result<u32, SheetError> {
        let mut workbook = Workbook::new();
        workbook.push_worksheet(self.worksheet);
        workbook.save(path)?;
        tracing::debug!(
            path = %path.display(),
            cells = self.cell_count,
            colors = self.formats.len(),
            "workbook saved"
        );
        Ok(self.cell_count)
    }
}

impl Default for SheetWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn fill_format(fill: Rgb) -> Format {
    let color = Color::RGB(fill.to_u32());
    Format::new()
        .set_foreground_color(color)
        .set_background_color(color)
        .set_pattern(FormatPattern::Solid)
}
