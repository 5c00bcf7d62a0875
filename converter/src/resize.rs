use anyhow::Context;
use fast_image_resize::images::Image;
use fast_image_resize::{PixelType, ResizeAlg, ResizeOptions, Resizer};
use pixsheet_core::format::PixelGrid;

use crate::decode::SourceImage;

/// Nearest-neighbour resampler onto a square `cell_size` grid.
pub struct GridResizer {
    cell_size: u32,
    resizer: Resizer,
    options: ResizeOptions,
}

impl GridResizer {
    /// Fails for sizes the worksheet cannot hold, before anything is allocated.
    pub fn new(cell_size: u32) -> anyhow::Result<Self> {
        PixelGrid::check_size(cell_size)?;

        Ok(Self {
            cell_size,
            resizer: Resizer::new(),
            options: ResizeOptions::new().resize_alg(ResizeAlg::Nearest),
        })
    }

    /// Sample `src` onto the grid; each cell copies the source pixel under its centre.
    pub fn resize(&mut self, src: SourceImage) -> anyhow::Result<PixelGrid> {
        let (width, height) = (src.width, src.height);
        let src_image = Image::from_vec_u8(width, height, src.data, PixelType::U8x3)
            .with_context(|| format!("{width}x{height} RGB buffer has the wrong length"))?;

        let n = self.cell_size;
        let mut grid_image = Image::new(n, n, PixelType::U8x3);
        self.resizer
            .resize(&src_image, &mut grid_image, &self.options)
            .with_context(|| format!("nearest-neighbour sampling {width}x{height} onto {n}x{n} failed"))?;

        Ok(PixelGrid::from_rgb24(n, &grid_image.into_vec())?)
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixsheet_core::format::{Rgb, MAX_COLS};

    const RED: [u8; 3] = [255, 0, 0];
    const GREEN: [u8; 3] = [0, 255, 0];
    const BLUE: [u8; 3] = [0, 0, 255];
    const WHITE: [u8; 3] = [255, 255, 255];

    fn image_from(width: u32, height: u32, pixel: impl Fn(u32, u32) -> [u8; 3]) -> SourceImage {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&pixel(x, y));
            }
        }
        SourceImage { data, width, height }
    }

    fn quadrants(x: u32, y: u32, half: u32) -> [u8; 3] {
        match (x < half, y < half) {
            (true, true) => RED,
            (false, true) => GREEN,
            (true, false) => BLUE,
            (false, false) => WHITE,
        }
    }

    #[test]
    fn sizes_outside_the_sheet_are_rejected() {
        assert!(GridResizer::new(0).is_err());
        assert!(GridResizer::new(MAX_COLS + 1).is_err());
        assert!(GridResizer::new(MAX_COLS).is_ok());
    }

    #[test]
    fn output_is_always_square() {
        let src = image_from(7, 3, |x, y| [x as u8, y as u8, 0]);
        for n in [1, 2, 5, 16] {
            let grid = GridResizer::new(n).unwrap().resize(src.clone()).unwrap();
            assert_eq!(grid.width(), n);
            assert_eq!(grid.height(), n);
            assert_eq!(grid.pixels().len(), (n * n) as usize);
        }
    }

    #[test]
    fn downscale_keeps_hard_edges() {
        let src = image_from(4, 4, |x, y| quadrants(x, y, 2));
        let grid = GridResizer::new(2).unwrap().resize(src).unwrap();

        assert_eq!(grid.get(0, 0), Some(Rgb::from_bytes(&RED)));
        assert_eq!(grid.get(1, 0), Some(Rgb::from_bytes(&GREEN)));
        assert_eq!(grid.get(0, 1), Some(Rgb::from_bytes(&BLUE)));
        assert_eq!(grid.get(1, 1), Some(Rgb::from_bytes(&WHITE)));
    }

    #[test]
    fn upscale_replicates_pixels() {
        let src = image_from(2, 2, |x, y| quadrants(x, y, 1));
        let grid = GridResizer::new(4).unwrap().resize(src).unwrap();

        for y in 0..4 {
            for x in 0..4 {
                let expected = quadrants(x, y, 2);
                assert_eq!(grid.get(x, y), Some(Rgb::from_bytes(&expected)), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn single_cell_samples_the_centre() {
        let src = image_from(3, 3, |x, y| if (x, y) == (1, 1) { BLUE } else { RED });
        let grid = GridResizer::new(1).unwrap().resize(src).unwrap();
        assert_eq!(grid.pixels(), &[Rgb::from_bytes(&BLUE)]);
    }

    #[test]
    fn same_size_keeps_every_pixel() {
        let src = image_from(3, 3, |x, y| [x as u8 * 10, y as u8 * 10, 7]);
        let grid = GridResizer::new(3).unwrap().resize(src).unwrap();
        assert_eq!(grid.get(2, 1), Some(Rgb::new(20, 10, 7)));
    }
}
