//! Page geometry: rectangles, page setup and the usable content area.
//!
//! Coordinates are points with the origin at the bottom-left corner of the
//! page, x growing rightward and y growing upward.
//!
//! ## Margins
//!
//! ```text
//!  odd page (spine on the left)          even page (spine on the right)
//! ┌───────────────────────────────┐     ┌───────────────────────────────┐
//! │   outer                       │     │                       outer   │
//! │ ┌───────────────────────────┐ │     │ ┌───────────────────────────┐ │
//! │ │ usable (after padding)    │ │     │ │ usable (after padding)    │ │
//! │ └───────────────────────────┘ │     │ └───────────────────────────┘ │
//! │ ↑ outer + spine extra         │     │         outer + spine extra ↑ │
//! └───────────────────────────────┘     └───────────────────────────────┘
//! ```
//!
//! The inner padding is applied on all four sides after the margins.

use super::layout::Spacing;
use super::units::mm_to_points;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    pub fn ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Shrink by the given amounts on each side.
    pub fn inset(&self, left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            x: self.x + left,
            y: self.y + bottom,
            width: self.width - left - right,
            height: self.height - top - bottom,
        }
    }

    /// True when `other` lies entirely inside `self`, allowing `eps` slack.
    pub fn contains(&self, other: &Rect, eps: f64) -> bool {
        other.x >= self.x - eps
            && other.y >= self.y - eps
            && other.right() <= self.right() + eps
            && other.top() <= self.top() + eps
    }

    /// True when the interiors of the two rectangles intersect.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.top()
            && other.y < self.top()
    }
}

/// Physical page size in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Which vertical edge of a page is bound into the spine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpineSide {
    Left,
    Right,
}

impl SpineSide {
    /// Odd pages sit on the right of an open spread, so they bind on the left.
    pub fn for_page(index: u32) -> Self {
        if index % 2 == 1 {
            SpineSide::Left
        } else {
            SpineSide::Right
        }
    }
}

/// Page size and margins, already converted to points.
///
/// Built once per book (see [`PageSetup::from_mm`]); the per-page work is
/// only choosing which side carries the spine extra.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    pub page: Size,
    pub outer_margin: f64,
    pub spine_extra: f64,
    pub inner_padding: f64,
    pub gap: f64,
    /// Share of `usable.height - gap` given to the two-box row of L3A/L3B.
    pub pair_row_share: f64,
}

/// Millimeter inputs for [`PageSetup::from_mm`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetupMm {
    pub page_width: f64,
    pub page_height: f64,
    pub outer_margin: f64,
    pub spine_extra: f64,
    pub inner_padding: f64,
    pub gap: f64,
}

impl PageSetup {
    pub fn from_mm(mm: PageSetupMm, pair_row_share: f64) -> Self {
        Self {
            page: Size {
                width: mm_to_points(mm.page_width),
                height: mm_to_points(mm.page_height),
            },
            outer_margin: mm_to_points(mm.outer_margin),
            spine_extra: mm_to_points(mm.spine_extra),
            inner_padding: mm_to_points(mm.inner_padding),
            gap: mm_to_points(mm.gap),
            pair_row_share,
        }
    }

    pub fn spacing(&self) -> Spacing {
        Spacing {
            gap: self.gap,
            pair_row_share: self.pair_row_share,
        }
    }

    /// Usable content rectangle for the given 1-based page index.
    ///
    /// Recomputed for every page: the spine side flips with parity.
    pub fn usable_rect(&self, page_index: u32) -> Rect {
        let spine = self.outer_margin + self.spine_extra;
        let (left, right) = match SpineSide::for_page(page_index) {
            SpineSide::Left => (spine, self.outer_margin),
            SpineSide::Right => (self.outer_margin, spine),
        };
        let pad = self.inner_padding;
        Rect::new(0.0, 0.0, self.page.width, self.page.height)
            .inset(left, right, self.outer_margin, self.outer_margin)
            .inset(pad, pad, pad, pad)
    }
}
