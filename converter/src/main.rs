mod cells;
mod decode;
mod locate;
mod pipeline;
mod resize;

use std::path::PathBuf;

use clap::Parser;
use pixsheet_core::format::MAX_COLS;
use tracing_subscriber::EnvFilter;

use crate::pipeline::{Job, Outcome};

#[derive(Parser)]
#[command(
    name = "pixsheet-convert",
    about = "Turn the first image in a directory into spreadsheet pixel art"
)]
struct Cli {
    /// Output .xlsx file path (overwritten if it exists)
    #[arg(default_value = "pixel_art.xlsx")]
    output: PathBuf,

    /// Directory searched for a .png/.jpg/.jpeg image
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Grid dimension: the image is resampled to N x N cells
    #[arg(long, default_value = "200", value_parser = clap::value_parser!(u32).range(1..=MAX_COLS as i64))]
    cell_size: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let job = Job::new(&cli.dir, &cli.output, cli.cell_size);

    match pipeline::run(&job)? {
        Outcome::NoImage { dir } => {
            println!("No image found in {}.", dir.display());
        }
        Outcome::Written { image, output, cells } => {
            tracing::info!(image = %image.display(), cells, "conversion finished");
            println!("Spreadsheet saved at: {}", output.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_reference_invocation() {
        let cli = Cli::try_parse_from(["pixsheet-convert"]).unwrap();
        assert_eq!(cli.output, PathBuf::from("pixel_art.xlsx"));
        assert_eq!(cli.dir, PathBuf::from("."));
        assert_eq!(cli.cell_size, 200);
    }

    #[test]
    fn cell_size_outside_sheet_limits_is_refused_by_parser() {
        assert!(Cli::try_parse_from(["pixsheet-convert", "--cell-size", "0"]).is_err());
        assert!(Cli::try_parse_from(["pixsheet-convert", "--cell-size", "16385"]).is_err());
        assert!(Cli::try_parse_from(["pixsheet-convert", "--cell-size", "16384"]).is_ok());
    }

    #[test]
    fn explicit_arguments_are_parsed() {
        let cli = Cli::try_parse_from(["pixsheet-convert", "art.xlsx", "-d", "pics", "--cell-size", "32"]).unwrap();
        assert_eq!(cli.output, PathBuf::from("art.xlsx"));
        assert_eq!(cli.dir, PathBuf::from("pics"));
        assert_eq!(cli.cell_size, 32);
    }
}
