//! Book planning: the scan manifest in, a complete [`BookPlan`] out.
//!
//! Stage 2 of the photobook pipeline. Wraps [`book::assemble_interleaved`]
//! with what a printed book needs around the photo pages:
//!
//! ```text
//! printed  1        cover          title, subtitle, period, total photo count
//! printed  2        divider 1      "Infantil 1 / 2021"
//! printed  3..      content pages 1..=k of year 1
//!          ...      divider 2, content pages k+1.., ... divider 5, ...
//! printed  last     back cover
//! ```
//!
//! Every printed page counts towards spine parity, so each content page
//! carries both its content `index` and its `printed_page`.
//!
//! The plan is written as pretty JSON (`book.json` by default) for a
//! renderer to draw.

use crate::book::{self, ComposeError, Interleave, PageSpec, Size};
use crate::config::{self, BookConfig};
use crate::scan::Manifest;
use crate::types::{Artwork, Folder};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// A cover before the book and a divider before every year.
const BOOK_INTERLEAVE: Interleave = Interleave {
    before_book: 1,
    before_folder: 1,
};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Compose error: {0}")]
    Compose(#[from] ComposeError),
}

/// Everything a renderer needs to draw the book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookPlan {
    pub page_size: Size,
    pub cover: Cover,
    /// One per year, in rank order.
    pub sections: Vec<Section>,
    /// Content pages, indices `1..=pages.len()`.
    pub pages: Vec<PageSpec>,
    pub back_cover: BackCover,
}

/// Always printed page 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cover {
    pub title: String,
    pub subtitle: String,
    pub period: String,
    pub photo_count: usize,
    /// Full-page image replacing the generated cover.
    pub artwork: Option<String>,
}

/// A year: its divider page and the range of content pages it owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub rank: u8,
    /// Directory name as found on disk.
    pub folder: String,
    pub title: String,
    pub period: String,
    pub photo_count: usize,
    /// Printed position of the divider.
    pub divider_page: u32,
    pub artwork: Option<String>,
    /// Content page indices, inclusive.
    pub first_page: u32,
    pub last_page: u32,
}

/// The last printed page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackCover {
    pub printed_page: u32,
    pub title: String,
    pub period: String,
    pub artwork: Option<String>,
}

impl BookPlan {
    /// Content pages of one section. Empty when the range does not fit the
    /// plan, which can only happen for a hand-edited plan.
    pub fn section_pages(&self, section: &Section) -> &[PageSpec] {
        let Some(start) = (section.first_page as usize).checked_sub(1) else {
            return &[];
        };
        self.pages
            .get(start..section.last_page as usize)
            .unwrap_or_default()
    }

    /// Pages in the printed book: cover, dividers, content and back cover.
    pub fn printed_page_count(&self) -> u32 {
        self.back_cover.printed_page
    }

    /// Point the cover, dividers and back cover at pre-made artwork.
    pub fn with_artwork(mut self, artwork: &Artwork) -> Self {
        self.cover.artwork = artwork.cover.clone();
        for section in &mut self.sections {
            section.artwork = artwork.dividers.get(&section.rank).cloned();
        }
        self.back_cover.artwork = artwork.back_cover.clone();
        self
    }
}

/// Compose every page and wrap them with cover, section and back cover data.
pub fn plan_book(folders: &[Folder], config: &BookConfig) -> Result<BookPlan, ComposeError> {
    let setup = config.page_setup();
    let pages = book::assemble_interleaved(folders, &setup, &config.slots, BOOK_INTERLEAVE)?;

    // assemble succeeded, so every rank 1..=5 is present exactly once
    let mut ordered: Vec<&Folder> = folders.iter().collect();
    ordered.sort_by_key(|f| f.rank);

    let sections = ordered
        .iter()
        .map(|folder| {
            let owned = pages.iter().filter(|p| p.rank == folder.rank);
            let first_page = owned.clone().map(|p| p.index).min().unwrap_or(0);
            let last_page = owned.map(|p| p.index).max().unwrap_or(0);
            let year = config.year(folder.rank);
            let first_printed = BOOK_INTERLEAVE.printed_page(u32::from(folder.rank), first_page);
            Section {
                rank: folder.rank,
                folder: folder.name.clone(),
                title: year
                    .map(|y| y.display_title().to_string())
                    .unwrap_or_else(|| folder.name.clone()),
                period: year.map(|y| y.period.clone()).unwrap_or_default(),
                photo_count: folder.images.len(),
                divider_page: first_printed - 1,
                artwork: None,
                first_page,
                last_page,
            }
        })
        .collect();

    let last_printed = pages
        .last()
        .map_or(BOOK_INTERLEAVE.before_book, |p| p.printed_page);

    Ok(BookPlan {
        page_size: setup.page,
        cover: Cover {
            title: config.book.title.clone(),
            subtitle: config.book.subtitle.clone(),
            period: config.book.period.clone(),
            photo_count: folders.iter().map(|f| f.images.len()).sum(),
            artwork: None,
        },
        sections,
        pages,
        back_cover: BackCover {
            printed_page: last_printed + 1,
            title: config.book.title.clone(),
            period: config.book.period.clone(),
            artwork: None,
        },
    })
}

/// [`plan_book`] for a scanned book, artwork included.
pub fn plan_manifest(manifest: &Manifest) -> Result<BookPlan, ComposeError> {
    Ok(plan_book(&manifest.folders, &manifest.config)?.with_artwork(&manifest.artwork))
}

/// Read a scan manifest from disk.
pub fn read_manifest(path: &Path) -> Result<Manifest, PipelineError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Compose the book described by a scan manifest file.
///
/// Sizes the global rayon pool from the manifest's `[processing]` settings
/// first; a pool that is already running is kept.
pub fn compose(manifest_path: &Path) -> Result<BookPlan, PipelineError> {
    let manifest = read_manifest(manifest_path)?;
    config::init_thread_pool(&manifest.config.processing);
    Ok(plan_manifest(&manifest)?)
}

/// Write a plan as pretty JSON, creating parent directories as needed.
pub fn write_plan(plan: &BookPlan, path: &Path) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(plan)?;
    std::fs::write(path, json)?;
    Ok(())
}
