use pixsheet_core::format::{Cell, PixelGrid};

/// Map every grid pixel to one spreadsheet cell.
/// Pixel (x, y) becomes the cell at row y + 1, column x + 1.
///
/// Output: `size * size` cells, row-major
pub fn grid_to_cells(grid: &PixelGrid) -> Vec<Cell> {
    let n = grid.size() as usize;
    let mut cells = Vec::with_capacity(n * n);

    for (y, row) in grid.rows().enumerate() {
        for (x, &fill) in row.iter().enumerate() {
            cells.push(Cell {
                row: y as u32 + 1,
                col: x as u32 + 1,
                fill,
            });
        }
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixsheet_core::format::Rgb;

    #[test]
    fn every_pixel_maps_to_one_cell() {
        let data: Vec<u8> = (0..27).collect();
        let grid = PixelGrid::from_rgb24(3, &data).unwrap();
        let cells = grid_to_cells(&grid);

        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0], Cell { row: 1, col: 1, fill: Rgb::new(0, 1, 2) });
        assert_eq!(cells[1], Cell { row: 1, col: 2, fill: Rgb::new(3, 4, 5) });
        assert_eq!(cells[3], Cell { row: 2, col: 1, fill: Rgb::new(9, 10, 11) });
        assert_eq!(cells[8], Cell { row: 3, col: 3, fill: Rgb::new(24, 25, 26) });

        let mut positions: Vec<(u32, u32)> = cells.iter().map(|c| (c.row, c.col)).collect();
        positions.sort();
        positions.dedup();
        assert_eq!(positions.len(), 9);
    }
}
