//! Partitioning a year's photos into pages.
//!
//! The grouper walks a folder left to right and, at each position, looks at
//! up to three upcoming orientations to decide how many photos go on the next
//! page and under which layout. Photos never cross a group boundary out of
//! order; only inside a group may they be rearranged to match their slots.
//!
//! ## Decision table
//!
//! "Wide" means landscape or square.
//!
//! | Window | Take | Layout |
//! |---|---|---|
//! | 1 photo | 1 | `L1` |
//! | wide, wide | 2 | `L2H` |
//! | portrait, portrait | 2 | `L2V` |
//! | mixed pair | 2 | `L2H` (fallback, no dedicated layout) |
//! | wide, wide, wide | 3 | `L3A` |
//! | portrait, wide, wide | 3 | `L3B` |
//! | any other triple | 2 | pair rule on the first two |
//!
//! When a triple falls back to a pair the third photo stays at the head of
//! the remainder and is reconsidered on the next page.
//!
//! ## Slot hints
//!
//! A photo may carry a [`SlotHint`] from the book config. Hinted photos are
//! placed by their hint (alone, or paired left/right or top/bottom with the
//! next photo) and end the lookahead window for automatic photos before them.

use super::ComposeError;
use super::layout::Layout;
use super::orientation::{Orientation, classify};
use crate::types::Image;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum number of photos on one page.
pub const MAX_GROUP: usize = 3;

/// User override for where a photo goes, keyed by image id in the config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotHint {
    #[default]
    Auto,
    /// A page of its own.
    Full,
    /// Left half of a side-by-side pair.
    Left,
    /// Right half of a side-by-side pair.
    Right,
    /// Upper half of a stacked pair.
    Top,
    /// Lower half of a stacked pair.
    Bottom,
}

/// Image id → hint. Photos not listed are [`SlotHint::Auto`].
pub type SlotHints = BTreeMap<String, SlotHint>;

/// How many photos to take and how to lay them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub take: usize,
    pub layout: Layout,
}

/// One page worth of photos.
///
/// `members` are indices into the folder's image list, in slot order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub members: Vec<usize>,
    pub layout: Layout,
}

/// The fixed decision table over the next one to three orientations.
///
/// An empty window means the caller asked for a page with nothing left to
/// place, which is a grouping bug.
pub fn decide(window: &[Orientation]) -> Result<Decision, ComposeError> {
    let decision = match *window {
        [] => return Err(ComposeError::UngroupableRemainder(0)),
        [_] => Decision {
            take: 1,
            layout: Layout::L1,
        },
        [a, b] => decide_pair(a, b),
        [a, b, c, ..] => {
            if a.is_wide() && b.is_wide() && c.is_wide() {
                Decision {
                    take: 3,
                    layout: Layout::L3A,
                }
            } else if !a.is_wide() && b.is_wide() && c.is_wide() {
                Decision {
                    take: 3,
                    layout: Layout::L3B,
                }
            } else {
                decide_pair(a, b)
            }
        }
    };
    Ok(decision)
}

fn decide_pair(a: Orientation, b: Orientation) -> Decision {
    let layout = if a == Orientation::Portrait && b == Orientation::Portrait {
        Layout::L2V
    } else {
        Layout::L2H
    };
    Decision { take: 2, layout }
}

/// Split one folder's photos into page groups.
///
/// Every photo lands in exactly one group and groups come out in folder
/// order. Fails on the first photo with invalid dimensions.
pub fn group_folder(images: &[Image], hints: &SlotHints) -> Result<Vec<Group>, ComposeError> {
    let orientations = images
        .iter()
        .map(classify)
        .collect::<Result<Vec<_>, _>>()?;
    let hint_of = |i: usize| hints.get(&images[i].id).copied().unwrap_or_default();

    let mut groups = Vec::new();
    let mut cursor = 0;
    while cursor < images.len() {
        let group = match hint_of(cursor) {
            SlotHint::Auto => {
                let run = (cursor..images.len())
                    .take(MAX_GROUP)
                    .take_while(|&i| hint_of(i) == SlotHint::Auto)
                    .count();
                let decision = decide(&orientations[cursor..cursor + run])?;
                Group {
                    members: (cursor..cursor + decision.take).collect(),
                    layout: decision.layout,
                }
            }
            SlotHint::Full => Group {
                members: vec![cursor],
                layout: Layout::L1,
            },
            hint @ (SlotHint::Left | SlotHint::Right) => {
                paired(cursor, images.len(), hint, hint_of, Layout::L2H)
            }
            hint @ (SlotHint::Top | SlotHint::Bottom) => {
                paired(cursor, images.len(), hint, hint_of, Layout::L2V)
            }
        };
        if group.members.is_empty() {
            return Err(ComposeError::UngroupableRemainder(images.len() - cursor));
        }
        cursor += group.members.len();
        groups.push(group);
    }
    Ok(groups)
}

/// Pair a left/right or top/bottom hinted photo with its successor.
///
/// The successor joins when it is automatic or hinted for the same pair
/// kind; the photo hinted for the first slot (left or top) goes first.
fn paired(
    cursor: usize,
    len: usize,
    hint: SlotHint,
    hint_of: impl Fn(usize) -> SlotHint,
    layout: Layout,
) -> Group {
    let (first, second) = match layout {
        Layout::L2V => (SlotHint::Top, SlotHint::Bottom),
        _ => (SlotHint::Left, SlotHint::Right),
    };
    let next = cursor + 1;
    let partner = (next < len).then(|| hint_of(next));
    match partner {
        Some(p) if p == SlotHint::Auto || p == first || p == second => {
            let swap = hint == second || p == first;
            let members = if swap {
                vec![next, cursor]
            } else {
                vec![cursor, next]
            };
            Group { members, layout }
        }
        _ => Group {
            members: vec![cursor],
            layout: Layout::L1,
        },
    }
}
