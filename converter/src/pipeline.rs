use std::path::{Path, PathBuf};

use anyhow::Context;
use pixsheet_core::encode::SheetWriter;

use crate::cells::grid_to_cells;
use crate::decode::decode_rgb;
use crate::locate::{find_image, DEFAULT_EXTENSIONS};
use crate::resize::GridResizer;

/// One conversion run.
pub struct Job<'a> {
    pub source_dir: &'a Path,
    pub output: &'a Path,
    pub cell_size: u32,
    pub extensions: &'a [&'a str],
}

impl<'a> Job<'a> {
    pub fn new(source_dir: &'a Path, output: &'a Path, cell_size: u32) -> Self {
        Self {
            source_dir,
            output,
            cell_size,
            extensions: DEFAULT_EXTENSIONS,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// No image in the source directory; nothing was written.
    NoImage { dir: PathBuf },
    Written {
        image: PathBuf,
        output: PathBuf,
        cells: u32,
    },
}

/// Locate, decode, resample and write. The cell size is checked before the
/// directory is read; the output file is only touched once the whole grid
/// has been built.
pub fn run(job: &Job<'_>) -> anyhow::Result<Outcome> {
    let mut resizer = GridResizer::new(job.cell_size)?;

    let image_path = find_image(job.source_dir, job.extensions)
        .with_context(|| format!("failed to read directory {}", job.source_dir.display()))?;
    let Some(image_path) = image_path else {
        return Ok(Outcome::NoImage {
            dir: job.source_dir.to_path_buf(),
        });
    };

    tracing::info!(image = %image_path.display(), "decoding image");
    let source = decode_rgb(&image_path)?;
    let n = resizer.cell_size();
    tracing::info!("source: {}x{} pixels, target: {n}x{n} cells", source.width, source.height);

    let grid = resizer.resize(source)?;
    let cells = grid_to_cells(&grid);

    let mut writer = SheetWriter::new();
    writer.write_cells(&cells)?;
    tracing::info!(cells = writer.cell_count(), colors = writer.color_count(), "grid built");

    let written = writer
        .finish(job.output)
        .with_context(|| format!("failed to save {}", job.output.display()))?;

    Ok(Outcome::Written {
        image: image_path,
        output: job.output.to_path_buf(),
        cells: written,
    })
}
