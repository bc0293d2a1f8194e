//! Page composition: pure functions from folders to page instructions.
//!
//! | Step | Module / function |
//! |---|---|
//! | **Classify** | [`orientation::classify`] |
//! | **Group** | [`grouping::group_folder`] over the [`grouping::decide`] table |
//! | **Geometry** | [`PageSetup::usable_rect`], margins flip with page parity |
//! | **Layout** | [`Layout::boxes`] |
//! | **Place** | [`placement::fit_and_center`] |
//! | **Assemble** | [`assemble::assemble`], [`assemble::assemble_interleaved`] for printed parity |
//!
//! Nothing here touches the filesystem or decodes pixels: inputs are
//! already-identified [`Folder`](crate::types::Folder)s and the output is a
//! list of [`PageSpec`]s a renderer can draw without further decisions.

pub mod assemble;
pub mod geometry;
pub mod grouping;
pub mod layout;
pub mod orientation;
pub mod placement;
mod units;

use thiserror::Error;

pub use assemble::{Interleave, PageSpec, Placement, assemble, assemble_interleaved};
pub use geometry::{PageSetup, PageSetupMm, Rect, Size, SpineSide};
pub use grouping::{SlotHint, SlotHints};
pub use layout::{Layout, Spacing};
pub use orientation::Orientation;
pub use units::mm_to_points;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    #[error("Invalid image dimensions {width}x{height}: {id}")]
    InvalidImageDimensions { id: String, width: u32, height: u32 },
    #[error("Folder {0} has no images")]
    EmptyFolder(u8),
    #[error("Folder {0} is missing")]
    MissingFolder(u8),
    #[error("Folder {0} is declared more than once")]
    DuplicateFolder(u8),
    #[error("Folder rank {0} is outside 1-5")]
    UnexpectedFolder(u8),
    #[error("Grouping stopped with {0} images left (internal invariant violated)")]
    UngroupableRemainder(usize),
}
