//! The layout catalog: five fixed partitions of the usable rectangle.
//!
//! | Layout | Boxes | Arrangement |
//! |---|---|---|
//! | `L1`  | 1 | the whole usable area |
//! | `L2H` | 2 | side by side |
//! | `L2V` | 2 | stacked |
//! | `L3A` | 3 | two side by side on top, one centered below |
//! | `L3B` | 3 | one centered on top, two side by side below |
//!
//! Boxes are returned in painting order: top-to-bottom, left-to-right.
//! Layouts never look at orientations; the grouper picks which one to use.

use super::geometry::Rect;
use serde::{Deserialize, Serialize};

/// Default share of the rows height given to the two-box row of L3A/L3B.
pub const DEFAULT_PAIR_ROW_SHARE: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layout {
    L1,
    L2H,
    L2V,
    L3A,
    L3B,
}

/// Spacing inputs shared by every layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    pub gap: f64,
    pub pair_row_share: f64,
}

type BoxFn = fn(&Rect, &Spacing) -> Vec<Rect>;

impl Layout {
    pub const ALL: [Layout; 5] = [Layout::L1, Layout::L2H, Layout::L2V, Layout::L3A, Layout::L3B];

    /// Number of photos the layout holds.
    pub fn slots(self) -> usize {
        match self {
            Layout::L1 => 1,
            Layout::L2H | Layout::L2V => 2,
            Layout::L3A | Layout::L3B => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Layout::L1 => "L1",
            Layout::L2H => "L2H",
            Layout::L2V => "L2V",
            Layout::L3A => "L3A",
            Layout::L3B => "L3B",
        }
    }

    fn box_fn(self) -> BoxFn {
        match self {
            Layout::L1 => single,
            Layout::L2H => side_by_side,
            Layout::L2V => stacked,
            Layout::L3A => pair_over_single,
            Layout::L3B => single_over_pair,
        }
    }

    /// Partition `usable` into this layout's boxes.
    pub fn boxes(self, usable: &Rect, spacing: &Spacing) -> Vec<Rect> {
        (self.box_fn())(usable, spacing)
    }
}

fn single(usable: &Rect, _: &Spacing) -> Vec<Rect> {
    vec![*usable]
}

fn side_by_side(usable: &Rect, spacing: &Spacing) -> Vec<Rect> {
    let w = (usable.width - spacing.gap) / 2.0;
    vec![
        Rect::new(usable.x, usable.y, w, usable.height),
        Rect::new(usable.x + w + spacing.gap, usable.y, w, usable.height),
    ]
}

fn stacked(usable: &Rect, spacing: &Spacing) -> Vec<Rect> {
    let h = (usable.height - spacing.gap) / 2.0;
    vec![
        Rect::new(usable.x, usable.y + h + spacing.gap, usable.width, h),
        Rect::new(usable.x, usable.y, usable.width, h),
    ]
}

/// Row heights and box width shared by the three-photo layouts.
struct ThreeUp {
    pair_h: f64,
    single_h: f64,
    box_w: f64,
    single_x: f64,
}

impl ThreeUp {
    fn new(usable: &Rect, spacing: &Spacing) -> Self {
        let rows = usable.height - spacing.gap;
        let pair_h = rows * spacing.pair_row_share;
        let box_w = (usable.width - spacing.gap) / 2.0;
        Self {
            pair_h,
            single_h: rows - pair_h,
            box_w,
            single_x: usable.x + (usable.width - box_w) / 2.0,
        }
    }
}

fn pair_over_single(usable: &Rect, spacing: &Spacing) -> Vec<Rect> {
    let t = ThreeUp::new(usable, spacing);
    let top_y = usable.y + t.single_h + spacing.gap;
    vec![
        Rect::new(usable.x, top_y, t.box_w, t.pair_h),
        Rect::new(usable.x + t.box_w + spacing.gap, top_y, t.box_w, t.pair_h),
        Rect::new(t.single_x, usable.y, t.box_w, t.single_h),
    ]
}

fn single_over_pair(usable: &Rect, spacing: &Spacing) -> Vec<Rect> {
    let t = ThreeUp::new(usable, spacing);
    vec![
        Rect::new(t.single_x, usable.y + t.pair_h + spacing.gap, t.box_w, t.single_h),
        Rect::new(usable.x, usable.y, t.box_w, t.pair_h),
        Rect::new(usable.x + t.box_w + spacing.gap, usable.y, t.box_w, t.pair_h),
    ]
}
