//! Filesystem scanning and manifest generation.
//!
//! Stage 1 of the photobook pipeline. Finds the five year folders under the
//! book root, lists their photos and reads each photo's pixel size, producing
//! a [`Manifest`] the compose stage consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! book/                            # Book root
//! ├── config.toml                  # Book configuration (optional)
//! ├── Infantil1/                   # Year folder, rank 1 (name is case-insensitive)
//! │   ├── IMG_0001.jpg             # Photos, ordered by file name
//! │   ├── IMG_0002.png
//! │   └── .DS_Store                # Hidden files are ignored
//! ├── infantil2/
//! │   └── ...
//! ├── ...
//! ├── Infantil5/
//! │   └── ...
//! └── _capas/                      # Pre-made page artwork (optional)
//!     ├── capa.jpg                 # Cover
//!     ├── subcapa_infantil1.jpg    # Divider of Infantil1
//!     └── contra_capa.jpg          # Back cover
//! ```
//!
//! Folder names come from the `[[years]]` config entries. Other directories
//! and files in the root are ignored, as is anything nested below a year
//! folder. Artwork folder and file names are matched case-insensitively;
//! any missing file just means that page is drawn from text.
//!
//! ## Validation
//!
//! - Every configured year folder must exist
//! - Every listed photo must have a readable header
//!
//! A year folder without photos is not a scan error: it is kept in the
//! manifest so composition can report it by rank.

use crate::config::{self, BookConfig};
use crate::imaging::{BackendError, ImageBackend, RustBackend, supported_input_extensions};
use crate::types::{Artwork, Folder, Image};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Book root is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Year folder not found: {0}")]
    MissingFolder(String),
    #[error("Failed to identify {id}: {source}")]
    Identify {
        id: String,
        #[source]
        source: BackendError,
    },
}

/// Directory under the book root holding pre-made page artwork.
pub const ARTWORK_DIR: &str = "_capas";
const COVER_ARTWORK: &str = "capa.jpg";
const BACK_COVER_ARTWORK: &str = "contra_capa.jpg";

/// Manifest output from the scan stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Year folders in rank order.
    pub folders: Vec<Folder>,
    #[serde(default)]
    pub artwork: Artwork,
    pub config: BookConfig,
}

/// Progress reported while scanning, in folder and file-name order.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanEvent {
    FolderStarted {
        rank: u8,
        name: String,
        image_count: usize,
    },
    ImageIdentified {
        /// 1-based position within the folder.
        index: usize,
        id: String,
        width: u32,
        height: u32,
    },
}

pub fn scan(root: &Path, events: Option<Sender<ScanEvent>>) -> Result<Manifest, ScanError> {
    scan_with_backend(&RustBackend::new(), root, events)
}

/// Scan using a specific backend (allows testing with mock).
pub fn scan_with_backend(
    backend: &impl ImageBackend,
    root: &Path,
    events: Option<Sender<ScanEvent>>,
) -> Result<Manifest, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }
    let config = config::load_config(root)?;
    let dirs = list_dirs(root)?;

    let mut folders = Vec::new();
    for (rank, year) in (1..).zip(&config.years) {
        let dir = find_dir(&dirs, &year.folder)
            .ok_or_else(|| ScanError::MissingFolder(year.folder.clone()))?;
        let folder = scan_folder(backend, root, dir, rank, events.as_ref())?;
        folders.push(folder);
    }

    let artwork = match find_dir(&dirs, ARTWORK_DIR) {
        Some(dir) => find_artwork(root, dir, &folders)?,
        None => Artwork::default(),
    };

    Ok(Manifest {
        folders,
        artwork,
        config,
    })
}

/// Match the cover, divider and back cover files in the artwork directory.
///
/// A divider is `subcapa_<folder>.jpg`, with the year folder's name as found
/// on disk.
fn find_artwork(root: &Path, dir: &Path, folders: &[Folder]) -> Result<Artwork, ScanError> {
    let files = list_files(dir)?;
    let lookup = |name: &str| find_dir(&files, name).map(|path| image_id(root, path));

    let dividers = folders
        .iter()
        .filter_map(|folder| {
            let name = format!("subcapa_{}.jpg", folder.name.to_lowercase());
            lookup(name.as_str()).map(|path| (folder.rank, path))
        })
        .collect();

    Ok(Artwork {
        cover: lookup(COVER_ARTWORK),
        dividers,
        back_cover: lookup(BACK_COVER_ARTWORK),
    })
}

/// Immediate subdirectories of the root, sorted by name.
fn list_dirs(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut dirs = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_dir() && !is_hidden(&entry) {
            dirs.push(entry.into_path());
        }
    }
    Ok(dirs)
}

/// Case-insensitive lookup; an exact match wins over a case-folded one.
fn find_dir<'a>(paths: &'a [PathBuf], name: &str) -> Option<&'a PathBuf> {
    let wanted = name.to_lowercase();
    paths
        .iter()
        .find(|p| file_name_of(p) == name)
        .or_else(|| paths.iter().find(|p| file_name_of(p).to_lowercase() == wanted))
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn scan_folder(
    backend: &impl ImageBackend,
    root: &Path,
    dir: &Path,
    rank: u8,
    events: Option<&Sender<ScanEvent>>,
) -> Result<Folder, ScanError> {
    let name = file_name_of(dir);
    let paths = list_images(dir)?;

    if let Some(tx) = events {
        tx.send(ScanEvent::FolderStarted {
            rank,
            name: name.clone(),
            image_count: paths.len(),
        })
        .ok();
    }

    let images = paths
        .par_iter()
        .map(|path| {
            let id = image_id(root, path);
            match backend.identify(path) {
                Ok(dims) => Ok(Image::new(id, dims.width, dims.height)),
                Err(source) => Err(ScanError::Identify { id, source }),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(tx) = events {
        for (i, image) in images.iter().enumerate() {
            tx.send(ScanEvent::ImageIdentified {
                index: i + 1,
                id: image.id.clone(),
                width: image.width,
                height: image.height,
            })
            .ok();
        }
    }

    Ok(Folder::new(rank, name, images))
}

/// Photo files directly inside `dir`, ordered by file name.
fn list_images(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    Ok(list_files(dir)?
        .into_iter()
        .filter(|path| is_image(path))
        .collect())
}

/// Visible regular files directly inside `dir`, ordered by file name.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_file() && !is_hidden(&entry) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn is_image(path: &Path) -> bool {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    supported_input_extensions().contains(&ext.as_str())
}

/// Image id: path relative to the book root with `/` separators.
fn image_id(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockBackend;
    use crate::test_helpers::{book_dir, write_png};
    use std::fs;
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn names(folder: &Folder) -> Vec<&str> {
        folder.images.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn scan_finds_five_folders_in_rank_order() {
        let tmp = book_dir(&[2, 1, 3, 1, 2]);
        let manifest = scan(tmp.path(), None).unwrap();

        let ranks: Vec<u8> = manifest.folders.iter().map(|f| f.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
        let counts: Vec<usize> = manifest.folders.iter().map(|f| f.images.len()).collect();
        assert_eq!(counts, vec![2, 1, 3, 1, 2]);
    }

    #[test]
    fn images_carry_real_dimensions_and_relative_ids() {
        let tmp = book_dir(&[1, 1, 1, 1, 1]);
        write_png(&tmp.path().join("Infantil3/00.png"), 20, 40);
        let manifest = scan(tmp.path(), None).unwrap();

        let year3 = &manifest.folders[2];
        assert_eq!(names(year3), vec!["Infantil3/00.png", "Infantil3/01.png"]);
        assert_eq!((year3.images[0].width, year3.images[0].height), (20, 40));
        assert_eq!((year3.images[1].width, year3.images[1].height), (30, 20));
    }

    #[test]
    fn folder_lookup_is_case_insensitive() {
        let tmp = book_dir(&[1, 1, 1, 1, 0]);
        fs::remove_dir(tmp.path().join("Infantil5")).unwrap();
        fs::create_dir(tmp.path().join("INFANTIL5")).unwrap();
        write_png(&tmp.path().join("INFANTIL5/a.png"), 10, 10);

        let manifest = scan(tmp.path(), None).unwrap();
        assert_eq!(manifest.folders[4].name, "INFANTIL5");
        assert_eq!(names(&manifest.folders[4]), vec!["INFANTIL5/a.png"]);
    }

    #[test]
    fn missing_folder_is_reported_by_name() {
        let tmp = book_dir(&[1, 1, 1, 1, 1]);
        fs::remove_dir_all(tmp.path().join("Infantil4")).unwrap();
        let err = scan(tmp.path(), None).unwrap_err();
        assert!(matches!(err, ScanError::MissingFolder(ref name) if name == "Infantil4"));
    }

    #[test]
    fn empty_folder_is_kept() {
        let tmp = book_dir(&[1, 0, 1, 1, 1]);
        let manifest = scan(tmp.path(), None).unwrap();
        assert!(manifest.folders[1].images.is_empty());
    }

    #[test]
    fn non_images_hidden_files_and_subdirs_are_skipped() {
        let tmp = book_dir(&[1, 1, 1, 1, 1]);
        let dir = tmp.path().join("Infantil1");
        fs::write(dir.join("notes.txt"), "hello").unwrap();
        fs::write(dir.join(".hidden.jpg"), "x").unwrap();
        fs::create_dir(dir.join("nested")).unwrap();
        write_png(&dir.join("nested/deep.png"), 10, 10);
        write_png(&dir.join("UPPER.PNG"), 10, 10);

        let manifest = scan(tmp.path(), None).unwrap();
        assert_eq!(
            names(&manifest.folders[0]),
            vec!["Infantil1/01.png", "Infantil1/UPPER.PNG"]
        );
    }

    #[test]
    fn config_folder_names_are_used() {
        let tmp = TempDir::new().unwrap();
        let mut config = String::new();
        for year in 1..=5 {
            let dir = tmp.path().join(format!("Ano{year}"));
            fs::create_dir(&dir).unwrap();
            write_png(&dir.join("a.png"), 10, 10);
            config.push_str(&format!("[[years]]\nfolder = \"Ano{year}\"\n\n"));
        }
        fs::write(tmp.path().join("config.toml"), config).unwrap();

        let manifest = scan(tmp.path(), None).unwrap();
        assert_eq!(manifest.folders[0].name, "Ano1");
        assert_eq!(manifest.config.years[4].folder, "Ano5");
    }

    #[test]
    fn invalid_config_aborts_scan() {
        let tmp = book_dir(&[1, 1, 1, 1, 1]);
        fs::write(tmp.path().join("config.toml"), "[page]\nwidth_mm = -1.0\n").unwrap();
        assert!(matches!(
            scan(tmp.path(), None),
            Err(ScanError::Config(_))
        ));
    }

    #[test]
    fn root_must_be_a_directory() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        assert!(matches!(
            scan(&missing, None),
            Err(ScanError::NotADirectory(_))
        ));
    }

    #[test]
    fn unreadable_image_fails_with_its_id() {
        let tmp = book_dir(&[1, 1, 1, 1, 1]);
        fs::write(tmp.path().join("Infantil2/broken.jpg"), "not a jpeg").unwrap();
        let err = scan(tmp.path(), None).unwrap_err();
        assert!(matches!(err, ScanError::Identify { ref id, .. } if id == "Infantil2/broken.jpg"));
    }

    // =========================================================================
    // Mock backend
    // =========================================================================

    #[test]
    fn scan_with_mock_backend_uses_its_dimensions() {
        let tmp = book_dir(&[2, 1, 1, 1, 1]);
        let backend = MockBackend::with_dimensions(&[("01.png", 3000, 2000), ("02.png", 2000, 3000)]);

        let manifest = scan_with_backend(&backend, tmp.path(), None).unwrap();
        let year1 = &manifest.folders[0].images;
        assert_eq!((year1[0].width, year1[0].height), (3000, 2000));
        assert_eq!((year1[1].width, year1[1].height), (2000, 3000));
        // Every photo identified exactly once
        assert_eq!(backend.get_identified().len(), 6);
    }

    #[test]
    fn events_arrive_in_folder_and_file_order() {
        let tmp = book_dir(&[2, 1, 1, 1, 1]);
        let (tx, rx) = mpsc::channel();
        scan(tmp.path(), Some(tx)).unwrap();
        let events: Vec<ScanEvent> = rx.iter().collect();

        assert_eq!(events.len(), 5 + 6);
        assert_eq!(
            events[0],
            ScanEvent::FolderStarted {
                rank: 1,
                name: "Infantil1".into(),
                image_count: 2
            }
        );
        assert_eq!(
            events[2],
            ScanEvent::ImageIdentified {
                index: 2,
                id: "Infantil1/02.png".into(),
                width: 30,
                height: 20
            }
        );
    }

    // =========================================================================
    // Artwork
    // =========================================================================

    #[test]
    fn no_artwork_folder_means_no_artwork() {
        let tmp = book_dir(&[1, 1, 1, 1, 1]);
        let manifest = scan(tmp.path(), None).unwrap();
        assert_eq!(manifest.artwork, Artwork::default());
    }

    #[test]
    fn artwork_files_are_found_case_insensitively() {
        let tmp = book_dir(&[1, 1, 1, 1, 1]);
        let dir = tmp.path().join("_Capas");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("CAPA.JPG"), "x").unwrap();
        fs::write(dir.join("subcapa_infantil2.jpg"), "x").unwrap();
        fs::write(dir.join("Subcapa_Infantil5.jpg"), "x").unwrap();
        fs::write(dir.join("subcapa_infantil9.jpg"), "x").unwrap();
        fs::write(dir.join(".contra_capa.jpg"), "x").unwrap();

        let manifest = scan(tmp.path(), None).unwrap();
        let artwork = &manifest.artwork;
        assert_eq!(artwork.cover.as_deref(), Some("_Capas/CAPA.JPG"));
        let dividers: Vec<(u8, &str)> = artwork
            .dividers
            .iter()
            .map(|(rank, path)| (*rank, path.as_str()))
            .collect();
        assert_eq!(
            dividers,
            vec![
                (2, "_Capas/subcapa_infantil2.jpg"),
                (5, "_Capas/Subcapa_Infantil5.jpg")
            ]
        );
        // Hidden files are not artwork
        assert_eq!(artwork.back_cover, None);
    }

    #[test]
    fn artwork_folder_is_not_a_year() {
        let tmp = book_dir(&[1, 1, 1, 1, 1]);
        let dir = tmp.path().join(ARTWORK_DIR);
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("contra_capa.jpg"), "x").unwrap();

        let manifest = scan(tmp.path(), None).unwrap();
        assert_eq!(manifest.folders.len(), 5);
        assert_eq!(
            manifest.artwork.back_cover.as_deref(),
            Some("_capas/contra_capa.jpg")
        );
    }

    #[test]
    fn manifest_round_trips_through_json() {
        let tmp = book_dir(&[1, 1, 1, 1, 1]);
        let manifest = scan(tmp.path(), None).unwrap();
        let json = serde_json::to_string_pretty(&manifest).unwrap();
        let back: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, manifest);
    }
}
