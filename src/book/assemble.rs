//! Page assembly: folders in, ordered page instructions out.
//!
//! Folders are taken in rank order; each is grouped independently (in
//! parallel, results kept in rank order) and every group becomes one page.
//! Page indices are 1-based and run continuously across folders, so the
//! spine side of a year's first page depends on how many pages came before.
//!
//! In print, non-photo pages (a cover, one divider per year) sit between the
//! content pages. Geometry follows the printed position, which is the content
//! index shifted by the [`Interleave`] pages printed so far.

use super::ComposeError;
use super::geometry::{PageSetup, Rect, Size, SpineSide};
use super::grouping::{Group, SlotHints, group_folder};
use super::layout::Layout;
use super::placement::fit_and_center;
use crate::types::{Folder, YEAR_COUNT};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One photo on a page: its layout box and the contain-fit image rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub id: String,
    pub slot: Rect,
    pub image: Rect,
}

/// Non-photo pages printed around the content pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interleave {
    /// Printed once, before the first folder.
    pub before_book: u32,
    /// Printed before every folder's first page.
    pub before_folder: u32,
}

impl Interleave {
    /// Printed position of a content page from the `folder_pos`-th folder
    /// (1-based, rank order).
    pub fn printed_page(&self, folder_pos: u32, index: u32) -> u32 {
        self.before_book + folder_pos * self.before_folder + index
    }
}

/// A fully resolved content page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSpec {
    /// 1-based, continuous across the whole book.
    pub index: u32,
    /// 1-based position in the printed book. Spine side and usable area
    /// follow this number.
    pub printed_page: u32,
    /// Rank of the folder the photos come from.
    pub rank: u8,
    pub page_size: Size,
    pub spine: SpineSide,
    pub usable: Rect,
    pub layout: Layout,
    /// In painting order.
    pub placements: Vec<Placement>,
}

/// Compose every content page of the book.
///
/// Requires exactly one folder per rank 1..=5, none of them empty. Any
/// failure aborts the whole book. Content pages are the only pages, so
/// `printed_page == index`.
pub fn assemble(
    folders: &[Folder],
    setup: &PageSetup,
    hints: &SlotHints,
) -> Result<Vec<PageSpec>, ComposeError> {
    assemble_interleaved(folders, setup, hints, Interleave::default())
}

/// [`assemble`] for a book that prints `interleave` pages around the
/// content pages.
pub fn assemble_interleaved(
    folders: &[Folder],
    setup: &PageSetup,
    hints: &SlotHints,
    interleave: Interleave,
) -> Result<Vec<PageSpec>, ComposeError> {
    let ordered = order_folders(folders)?;

    // Collect per-folder results first so the reported error is always the
    // one from the lowest rank.
    let grouped = ordered
        .par_iter()
        .map(|folder| group_folder(&folder.images, hints))
        .collect::<Vec<_>>()
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    let pages = (1..)
        .zip(ordered.iter().zip(&grouped))
        .fold(Vec::new(), |mut pages, (folder_pos, (folder, groups))| {
            for group in groups {
                let index = pages.len() as u32 + 1;
                let printed = interleave.printed_page(folder_pos, index);
                pages.push(compose_page(index, printed, folder, group, setup));
            }
            pages
        });
    Ok(pages)
}

/// Check the folder set and return it sorted by rank.
fn order_folders(folders: &[Folder]) -> Result<Vec<&Folder>, ComposeError> {
    if let Some(stray) = folders.iter().find(|f| f.rank == 0 || f.rank > YEAR_COUNT) {
        return Err(ComposeError::UnexpectedFolder(stray.rank));
    }
    (1..=YEAR_COUNT)
        .map(|rank| {
            let mut matching = folders.iter().filter(|f| f.rank == rank);
            let folder = matching.next().ok_or(ComposeError::MissingFolder(rank))?;
            if matching.next().is_some() {
                return Err(ComposeError::DuplicateFolder(rank));
            }
            if folder.images.is_empty() {
                return Err(ComposeError::EmptyFolder(rank));
            }
            Ok(folder)
        })
        .collect()
}

fn compose_page(
    index: u32,
    printed_page: u32,
    folder: &Folder,
    group: &Group,
    setup: &PageSetup,
) -> PageSpec {
    let usable = setup.usable_rect(printed_page);
    let boxes = group.layout.boxes(&usable, &setup.spacing());
    let placements = group
        .members
        .iter()
        .zip(boxes)
        .map(|(&member, slot)| {
            let image = &folder.images[member];
            Placement {
                id: image.id.clone(),
                slot,
                image: fit_and_center(image.width, image.height, &slot),
            }
        })
        .collect();
    PageSpec {
        index,
        printed_page,
        rank: folder.rank,
        page_size: setup.page,
        spine: SpineSide::for_page(printed_page),
        usable,
        layout: group.layout,
        placements,
    }
}
