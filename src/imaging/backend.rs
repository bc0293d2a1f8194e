//! Image backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the one seam between the scanner and the
//! pixel formats on disk. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend).

use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image backends.
///
/// `Sync` so a single backend can be shared across rayon workers.
pub trait ImageBackend: Sync {
    /// Get image dimensions from the file header.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock backend answering from a file-name table and recording calls.
    ///
    /// Answers are keyed by file name rather than call order, so results are
    /// stable when identify runs on several rayon workers at once. Unknown
    /// names fail like an unreadable file.
    /// Uses Mutex (not RefCell) so it is Sync.
    #[derive(Default)]
    pub struct MockBackend {
        pub dimensions: HashMap<String, Dimensions>,
        pub identified: Mutex<Vec<String>>,
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_dimensions(entries: &[(&str, u32, u32)]) -> Self {
            Self {
                dimensions: entries
                    .iter()
                    .map(|&(name, width, height)| (name.to_string(), Dimensions { width, height }))
                    .collect(),
                identified: Mutex::new(Vec::new()),
            }
        }

        /// File names identified so far, sorted.
        pub fn get_identified(&self) -> Vec<String> {
            let mut names = self.identified.lock().unwrap().clone();
            names.sort();
            names
        }
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            self.identified.lock().unwrap().push(name.clone());

            self.dimensions
                .get(&name)
                .copied()
                .ok_or_else(|| BackendError::ProcessingFailed(format!("No mock dimensions: {name}")))
        }
    }

    #[test]
    fn mock_answers_by_file_name() {
        let backend = MockBackend::with_dimensions(&[("a.jpg", 800, 600), ("b.jpg", 600, 800)]);

        let b = backend.identify(Path::new("/book/Infantil1/b.jpg")).unwrap();
        let a = backend.identify(Path::new("/book/Infantil1/a.jpg")).unwrap();
        assert_eq!(a, Dimensions { width: 800, height: 600 });
        assert_eq!(b, Dimensions { width: 600, height: 800 });
        assert_eq!(backend.get_identified(), vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn mock_unknown_file_errors() {
        let backend = MockBackend::new();
        let err = backend.identify(Path::new("missing.jpg")).unwrap_err();
        assert!(err.to_string().contains("missing.jpg"));
    }
}
