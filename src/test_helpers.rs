//! Shared test utilities for the photobook test suite.
//!
//! Builders for images and year folders, a default page setup, a float
//! comparison, and an on-disk book fixture for scan tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let folders = book_of(&[4, 2, 1, 3, 5]);
//! let pages = assemble(&folders, &default_setup(), &SlotHints::new()).unwrap();
//! assert_close(pages[0].usable.x, 56.69291338582677);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::book::PageSetup;
use crate::config::BookConfig;
use crate::types::{Folder, Image, YEAR_COUNT};

// =========================================================================
// Float comparison
// =========================================================================

/// Assert two point values are equal up to rounding noise.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// =========================================================================
// Image and folder builders
// =========================================================================

/// 3:2 landscape.
pub fn landscape(id: &str) -> Image {
    Image::new(id, 3000, 2000)
}

/// 2:3 portrait.
pub fn portrait(id: &str) -> Image {
    Image::new(id, 2000, 3000)
}

pub fn square(id: &str) -> Image {
    Image::new(id, 1000, 1000)
}

/// Five year folders `Infantil1..5` holding `counts[i]` landscapes each.
///
/// Image ids follow the scan convention `Infantil{rank}/{nn}.jpg`.
pub fn book_of(counts: &[usize]) -> Vec<Folder> {
    assert_eq!(counts.len(), YEAR_COUNT as usize, "one count per year");
    counts
        .iter()
        .zip(1..=YEAR_COUNT)
        .map(|(&count, rank)| {
            let name = format!("Infantil{rank}");
            let images = (1..=count)
                .map(|n| landscape(&format!("{name}/{n:02}.jpg")))
                .collect();
            Folder::new(rank, name, images)
        })
        .collect()
}

/// Page setup from the stock config (A4 landscape, default margins).
pub fn default_setup() -> PageSetup {
    BookConfig::default().page_setup()
}

// =========================================================================
// On-disk fixtures
// =========================================================================

/// Write a small PNG of the given size.
pub fn write_png(path: &Path, width: u32, height: u32) {
    image::RgbImage::new(width, height).save(path).unwrap();
}

/// Create a temp book root with the five default year folders.
///
/// `counts[i]` PNG landscapes (30x20) are written into `Infantil{i+1}`.
pub fn book_dir(counts: &[usize]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (&count, rank) in counts.iter().zip(1..=YEAR_COUNT) {
        let dir = tmp.path().join(format!("Infantil{rank}"));
        std::fs::create_dir_all(&dir).unwrap();
        for n in 1..=count {
            write_png(&dir.join(format!("{n:02}.png")), 30, 20);
        }
    }
    tmp
}
