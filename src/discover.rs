use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::error::{SlidereelError, SlidereelResult};

/// Extensions accepted as slideshow input, matched case-insensitively.
pub const SUPPORTED_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff"];

pub fn is_supported_image(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    let ext = ext.to_ascii_lowercase();
    SUPPORTED_EXTENSIONS.iter().any(|s| *s == ext)
}

/// List the images of `dir` in lexicographic file-name order.
///
/// The ordering is part of the observable contract: the same directory
/// contents always yield the same slideshow order. Subdirectories are
/// ignored.
pub fn discover_images(dir: &Path) -> SlidereelResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read input directory '{}'", dir.display()))?;

    let mut images = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("failed to read entry of directory '{}'", dir.display()))?;
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        if is_supported_image(&path) {
            images.push(path);
        } else {
            tracing::debug!(path = %path.display(), "skipping non-image entry");
        }
    }

    // Sort by file name rather than full path; byte order keeps the result
    // independent of the platform's directory iteration order.
    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if images.is_empty() {
        return Err(SlidereelError::no_input(format!(
            "no images with a supported extension ({}) in '{}'",
            SUPPORTED_EXTENSIONS.join(", "),
            dir.display()
        )));
    }

    tracing::debug!(count = images.len(), dir = %dir.display(), "discovered images");
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_dir(name: &str) -> PathBuf {
        let dir = PathBuf::from("target").join("discover_tests").join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn supported_extension_match_is_case_insensitive() {
        assert!(is_supported_image(Path::new("a.png")));
        assert!(is_supported_image(Path::new("a.JPG")));
        assert!(is_supported_image(Path::new("a.TiFf")));
        assert!(!is_supported_image(Path::new("a.txt")));
        assert!(!is_supported_image(Path::new("a.mp4")));
        assert!(!is_supported_image(Path::new("png")));
    }

    #[test]
    fn discovery_sorts_by_file_name_and_filters() {
        let dir = fixture_dir("sorts");
        touch(&dir, "b.jpg");
        touch(&dir, "a.png");
        touch(&dir, "c.TIFF");
        touch(&dir, "notes.txt");
        std::fs::create_dir_all(dir.join("sub.png")).unwrap();

        let images = discover_images(&dir).unwrap();
        let names: Vec<_> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.png", "b.jpg", "c.TIFF"]);
    }

    #[test]
    fn discovery_is_deterministic() {
        let dir = fixture_dir("deterministic");
        for name in ["3.png", "1.png", "2.png", "10.png"] {
            touch(&dir, name);
        }

        let first = discover_images(&dir).unwrap();
        let second = discover_images(&dir).unwrap();
        assert_eq!(first, second);

        // Lexicographic, not numeric: "10" sorts before "2".
        let names: Vec<_> = first
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["1.png", "10.png", "2.png", "3.png"]);
    }

    #[test]
    fn empty_directory_is_no_input() {
        let dir = fixture_dir("empty");
        let err = discover_images(&dir).unwrap_err();
        assert!(matches!(err, SlidereelError::NoInput(_)));
    }

    #[test]
    fn directory_without_matching_extensions_is_no_input() {
        let dir = fixture_dir("no_match");
        touch(&dir, "readme.md");
        touch(&dir, "clip.mp4");
        let err = discover_images(&dir).unwrap_err();
        assert!(matches!(err, SlidereelError::NoInput(_)));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = PathBuf::from("target/discover_tests/definitely_missing");
        let _ = std::fs::remove_dir_all(&dir);
        assert!(discover_images(&dir).is_err());
    }
}
