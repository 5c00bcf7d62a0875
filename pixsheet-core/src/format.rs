use crate::error::SheetError;

/// Column width in Excel character units. Together with `ROW_HEIGHT` this
/// renders roughly square cells in the default viewer.
pub const COLUMN_WIDTH: f64 = 2.5;
/// Row height in points.
pub const ROW_HEIGHT: f64 = 15.0;
/// Height of rows that carry no explicit `ht`.
pub const DEFAULT_ROW_HEIGHT: f64 = 15.0;

/// Largest 1-indexed row an xlsx worksheet can hold.
pub const MAX_ROWS: u32 = 1_048_576;
/// Largest 1-indexed column an xlsx worksheet can hold.
pub const MAX_COLS: u32 = 16_384;

/// A single opaque pixel color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const SIZE: usize = 3;

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_bytes(b: &[u8]) -> Self {
        Self {
            r: b[0],
            g: b[1],
            b: b[2],
        }
    }

    /// Uppercase `RRGGBB`, two digits per channel.
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse `RRGGBB` or `AARRGGBB` (alpha ignored).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let rgb = match hex.len() {
            6 => hex,
            8 => hex.get(2..)?,
            _ => return None,
        };
        let channel = |i: usize| u8::from_str_radix(rgb.get(i..i + 2)?, 16).ok();
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Packed `0xRRGGBB`.
    pub fn to_u32(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }
}

/// Square, row-major grid of resampled pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    size: u32,
    pixels: Vec<Rgb>,
}

impl PixelGrid {
    /// Build a `size` x `size` grid from packed RGB24 data.
    pub fn from_rgb24(size: u32, data: &[u8]) -> Result<Self, SheetError> {
        Self::check_size(size)?;
        let expected = (size as usize) * (size as usize) * Rgb::SIZE;
        if data.len() != expected {
            return Err(SheetError::OutOfRange(format!(
                "expected {expected} bytes for a {size}x{size} grid, got {}",
                data.len()
            )));
        }
        let pixels = data.chunks_exact(Rgb::SIZE).map(Rgb::from_bytes).collect();
        Ok(Self { size, pixels })
    }

    /// A grid side must fit the worksheet: at least 1, at most `MAX_COLS`
    /// (the row limit is larger).
    pub fn check_size(size: u32) -> Result<(), SheetError> {
        if size == 0 || size > MAX_COLS {
            return Err(SheetError::OutOfRange(format!("grid size {size} outside 1..={MAX_COLS}")));
        }
        Ok(())
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size
    }

    pub fn height(&self) -> u32 {
        self.size
    }

    /// Pixel at column `x`, row `y` (0-indexed).
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.size || y >= self.size {
            return None;
        }
        let idx = y as usize * self.size as usize + x as usize;
        self.pixels.get(idx).copied()
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> {
        self.pixels.chunks_exact(self.size as usize)
    }
}

/// One filled spreadsheet cell. `row` and `col` are 1-indexed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
    pub fill: Rgb,
}

impl Cell {
    /// Zero-based coordinates as the xlsx writer expects them.
    pub fn zero_based(&self) -> Result<(u32, u16), SheetError> {
        if self.row == 0 || self.row > MAX_ROWS {
            return Err(SheetError::OutOfRange(format!("row {} outside 1..={MAX_ROWS}", self.row)));
        }
        if self.col == 0 || self.col > MAX_COLS {
            return Err(SheetError::OutOfRange(format!("column {} outside 1..={MAX_COLS}", self.col)));
        }
        // MAX_COLS fits in u16
        Ok((self.row - 1, (self.col - 1) as u16))
    }
}

/// Parse an A1-style reference into 1-indexed `(row, col)`.
pub fn parse_cell_ref(reference: &str) -> Option<(u32, u32)> {
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);
    if letters.is_empty() {
        return None;
    }
    let mut col = 0u32;
    for c in letters.chars() {
        if !c.is_ascii_uppercase() {
            return None;
        }
        col = col.checked_mul(26)?.checked_add(c as u32 - 'A' as u32 + 1)?;
    }
    let row = digits.parse::<u32>().ok()?;
    if row == 0 {
        return None;
    }
    Some((row, col))
}
