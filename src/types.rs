//! Shared types passed between the scan and compose stages.
//!
//! These are serialized into the scan manifest (`manifest.json`) and read
//! back by the compose stage, so both sides must agree on them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of year folders in a book. Ranks run `1..=YEAR_COUNT`.
pub const YEAR_COUNT: u8 = 5;

/// A photo as seen by the composer: a stable identifier and its pixel size.
///
/// The identifier is the image path relative to the book root
/// (`Infantil1/IMG_0001.jpg`), which is also the key used by slot hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: String,
    pub width: u32,
    pub height: u32,
}

impl Image {
    pub fn new(id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            width,
            height,
        }
    }

    /// Width over height. Only meaningful when both are positive.
    pub fn ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// One school year: an ordered list of photos tagged with its fixed rank.
///
/// Rank 1 is the first year (`Infantil1`), rank 5 the last. Year boundaries
/// are page boundaries; photos never move from one folder to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub rank: u8,
    /// Directory name as found on disk.
    pub name: String,
    pub images: Vec<Image>,
}

impl Folder {
    pub fn new(rank: u8, name: impl Into<String>, images: Vec<Image>) -> Self {
        Self {
            rank,
            name: name.into(),
            images,
        }
    }
}

/// Pre-made full-page artwork found in the book root's artwork folder.
///
/// Paths are relative to the book root, like image ids. A page without
/// artwork is drawn from the plan's text instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Artwork {
    pub cover: Option<String>,
    /// Divider artwork keyed by folder rank.
    pub dividers: BTreeMap<u8, String>,
    pub back_cover: Option<String>,
}
