use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader as XmlReader;
use zip::ZipArchive;

use crate::error::SheetError;
use crate::format::*;

const STYLES_PART: &str = "xl/styles.xml";
const SHEET_PART: &str = "xl/worksheets/sheet1.xml";

/// A cell read back from a workbook. `row` and `col` are 1-indexed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SheetCell {
    pub row: u32,
    pub col: u32,
    pub fill: Option<Rgb>,
}

/// A `<col>` entry: a custom width applied to columns `min..=max`.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ColumnSpan {
    min: u32,
    max: u32,
    width: f64,
}

/// Everything read from the worksheet part.
#[derive(Debug, Default)]
struct SheetContent {
    cells: Vec<SheetCell>,
    row_heights: HashMap<u32, f64>,
    columns: Vec<ColumnSpan>,
    default_row_height: Option<f64>,
}

/// Reads the logical content (cells, fills, geometry) of the first
/// worksheet of an xlsx file.
pub struct SheetReader {
    content: SheetContent,
}

impl SheetReader {
    pub fn open(path: &Path) -> Result<Self, SheetError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self, SheetError> {
        let mut archive = ZipArchive::new(reader)?;
        let styles = read_part(&mut archive, STYLES_PART)?;
        let sheet = read_part(&mut archive, SHEET_PART)?;

        let style_fills = parse_style_fills(&styles)?;
        let content = parse_sheet(&sheet, &style_fills)?;
        Ok(Self { content })
    }

    /// Cells in document order (row-major).
    pub fn cells(&self) -> &[SheetCell] {
        &self.content.cells
    }

    pub fn cell(&self, row: u32, col: u32) -> Option<&SheetCell> {
        self.content.cells.iter().find(|c| c.row == row && c.col == col)
    }

    /// Explicit height of `row` in points, if the row carries one.
    pub fn row_height(&self, row: u32) -> Option<f64> {
        self.content.row_heights.get(&row).copied()
    }

    /// Height every row without an explicit `ht` renders at
    /// (`sheetFormatPr defaultRowHeight`).
    pub fn default_row_height(&self) -> f64 {
        self.content.default_row_height.unwrap_or(DEFAULT_ROW_HEIGHT)
    }

    /// Custom width of `col`, if a `<col>` entry covers it.
    pub fn column_width(&self, col: u32) -> Option<f64> {
        self.content
            .columns
            .iter()
            .find(|span| (span.min..=span.max).contains(&col))
            .map(|span| span.width)
    }

    /// `(rows, cols)` spanned by the cells, counted from (1, 1).
    pub fn dimensions(&self) -> (u32, u32) {
        self.content
            .cells
            .iter()
            .fold((0, 0), |(rows, cols), c| (rows.max(c.row), cols.max(c.col)))
    }
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &'static str) -> Result<String, SheetError> {
    let mut part = match archive.by_name(name) {
        Ok(part) => part,
        Err(zip::result::ZipError::FileNotFound) => return Err(SheetError::MissingPart(name)),
        Err(e) => return Err(e.into()),
    };
    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    Ok(xml)
}

fn attr(e: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>, SheetError> {
    for a in e.attributes() {
        let a = a?;
        if a.key.as_ref() == name {
            return Ok(Some(String::from_utf8_lossy(&a.value).into_owned()));
        }
    }
    Ok(None)
}

/// Map each `cellXfs` style index to the solid fill color it applies, if any.
fn parse_style_fills(xml: &str) -> Result<Vec<Option<Rgb>>, SheetError> {
    let mut reader = XmlReader::from_str(xml);

    let mut fills: Vec<Option<Rgb>> = Vec::new();
    let mut xf_fill_ids: Vec<usize> = Vec::new();

    let mut in_fills = false;
    let mut in_cell_xfs = false;
    let mut solid = false;
    let mut color: Option<Rgb> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"fills" => in_fills = true,
                b"cellXfs" => in_cell_xfs = true,
                b"fill" if in_fills => {
                    solid = false;
                    color = None;
                }
                b"patternFill" if in_fills => {
                    solid = attr(&e, b"patternType")?.as_deref() == Some("solid");
                }
                b"xf" if in_cell_xfs => xf_fill_ids.push(fill_id(&e)?),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"fgColor" if in_fills && color.is_none() => {
                    color = attr(&e, b"rgb")?.as_deref().and_then(Rgb::from_hex);
                }
                b"patternFill" if in_fills => {
                    solid = attr(&e, b"patternType")?.as_deref() == Some("solid");
                }
                b"xf" if in_cell_xfs => xf_fill_ids.push(fill_id(&e)?),
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"fills" => in_fills = false,
                b"cellXfs" => in_cell_xfs = false,
                b"fill" if in_fills => fills.push(if solid { color } else { None }),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(xf_fill_ids
        .into_iter()
        .map(|id| fills.get(id).copied().flatten())
        .collect())
}

fn fill_id(e: &BytesStart<'_>) -> Result<usize, SheetError> {
    Ok(attr(e, b"fillId")?.and_then(|v| v.parse().ok()).unwrap_or(0))
}

fn parse_sheet(xml: &str, style_fills: &[Option<Rgb>]) -> Result<SheetContent, SheetError> {
    let mut reader = XmlReader::from_str(xml);
    let mut content = SheetContent::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => match e.name().as_ref() {
                b"row" => {
                    let row = attr(&e, b"r")?.and_then(|v| v.parse::<u32>().ok());
                    let height = attr(&e, b"ht")?.and_then(|v| v.parse::<f64>().ok());
                    if let (Some(row), Some(height)) = (row, height) {
                        content.row_heights.insert(row, height);
                    }
                }
                b"col" => {
                    if attr(&e, b"customWidth")?.as_deref() != Some("1") {
                        continue;
                    }
                    let min = attr(&e, b"min")?.and_then(|v| v.parse::<u32>().ok());
                    let max = attr(&e, b"max")?.and_then(|v| v.parse::<u32>().ok());
                    let width = attr(&e, b"width")?.and_then(|v| v.parse::<f64>().ok());
                    if let (Some(min), Some(max), Some(width)) = (min, max, width) {
                        content.columns.push(ColumnSpan { min, max, width });
                    }
                }
                b"sheetFormatPr" => {
                    content.default_row_height =
                        attr(&e, b"defaultRowHeight")?.and_then(|v| v.parse::<f64>().ok());
                }
                b"c" => {
                    let Some(reference) = attr(&e, b"r")? else {
                        continue;
                    };
                    let Some((row, col)) = parse_cell_ref(&reference) else {
                        continue;
                    };
                    let style = attr(&e, b"s")?.and_then(|v| v.parse::<usize>().ok()).unwrap_or(0);
                    let fill = style_fills.get(style).copied().flatten();
                    content.cells.push(SheetCell { row, col, fill });
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(content)
}
