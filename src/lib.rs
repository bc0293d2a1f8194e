//! # Photobook
//!
//! Lays out five chronological photo folders (one per school year) as a
//! paginated, print-ready photo book. Your filesystem is the data source:
//! each year is a folder, photos are ordered by file name, and every page is
//! one of five fixed layouts chosen from the photos' orientations.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      book/     →  manifest.json    (filesystem → folders with pixel sizes)
//! 2. Compose   manifest  →  book.json        (pages with exact rectangles in points)
//! ```
//!
//! Both outputs are human-readable JSON. Drawing the plan (PDF, preview,
//! print service upload) is left to a renderer that makes no decisions of
//! its own: every rectangle it needs is in the plan.
//!
//! The compose stage is a pure function from folders and config to pages,
//! so the layout rules are unit-tested without touching the filesystem or
//! decoding a single image.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: finds the year folders, lists photos, reads pixel sizes |
//! | [`compose`] | Stage 2: builds the [`compose::BookPlan`] (cover, sections, pages) |
//! | [`book`] | Pure layout engine: orientation, grouping, geometry, layouts, placement |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`types`] | Shared types serialized between stages (`Folder`, `Image`) |
//! | [`imaging`] | Header-only dimension reading behind the `ImageBackend` trait |
//! | [`output`] | CLI output formatting for scan progress and the composed book |
//!
//! # Design Decisions
//!
//! ## Contain, Never Crop
//!
//! Every photo is scaled to the largest size that fits its box without
//! distortion and centered. Nothing is cut off; the box may show margins on
//! one axis. Layouts are chosen so that margins stay small: portraits go in
//! tall boxes, landscapes and squares in wide ones.
//!
//! ## Year Boundaries Are Page Boundaries
//!
//! Photos from different years never share a page. Each year is grouped on
//! its own (in parallel with rayon), and page numbers run continuously
//! through the book so the binding margin keeps alternating across years.
//!
//! ## Deterministic Output
//!
//! The same folders and config always give byte-identical plans: folder
//! order comes from configured ranks, photo order from file names, and
//! parallel work is collected back in order before anything is numbered.
//!
//! ## Points, Bottom-Left Origin
//!
//! All geometry is in PostScript points (1/72 inch) with the origin at the
//! bottom-left corner of the page, the convention PDF renderers use.
//! Millimeter config values are converted once, by [`book::mm_to_points`].

pub mod book;
pub mod compose;
pub mod config;
pub mod imaging;
pub mod output;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
