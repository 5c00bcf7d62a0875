use std::io;
use std::path::{Path, PathBuf};

/// File name suffixes recognised as images, matched case-insensitively.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg"];

/// Return the first regular file in `dir` whose name ends with one of
/// `extensions`. "First" follows the directory enumeration order, which is
/// platform dependent; with several candidates the pick is not stable.
pub fn find_image(dir: &Path, extensions: &[&str]) -> io::Result<Option<PathBuf>> {
    let extensions: Vec<String> = extensions.iter().map(|e| e.to_ascii_lowercase()).collect();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_ascii_lowercase();
        if !extensions.iter().any(|ext| name.ends_with(ext.as_str())) {
            continue;
        }
        let path = entry.path();
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "skipping non-file match");
            continue;
        }
        return Ok(Some(path));
    }

    Ok(None)
}
