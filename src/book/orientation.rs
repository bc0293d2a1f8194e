//! Orientation classification from pixel dimensions.

use super::ComposeError;
use crate::types::Image;
use serde::{Deserialize, Serialize};

/// Lower bound (inclusive) of the near-square ratio band.
pub const SQUARE_RATIO_MIN: f64 = 0.9;
/// Upper bound (inclusive) of the near-square ratio band.
pub const SQUARE_RATIO_MAX: f64 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
    Square,
}

impl Orientation {
    /// Classify a width/height ratio. The square band wins over direction.
    pub fn from_ratio(ratio: f64) -> Self {
        if (SQUARE_RATIO_MIN..=SQUARE_RATIO_MAX).contains(&ratio) {
            Orientation::Square
        } else if ratio > 1.0 {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    /// Landscape or square: fits the horizontal slots.
    pub fn is_wide(self) -> bool {
        matches!(self, Orientation::Landscape | Orientation::Square)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
            Orientation::Square => "square",
        }
    }
}

/// Classify an image, rejecting zero-sized dimensions.
pub fn classify(image: &Image) -> Result<Orientation, ComposeError> {
    if image.width == 0 || image.height == 0 {
        return Err(ComposeError::InvalidImageDimensions {
            id: image.id.clone(),
            width: image.width,
            height: image.height,
        });
    }
    Ok(Orientation::from_ratio(image.ratio()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orient(w: u32, h: u32) -> Orientation {
        classify(&Image::new("x.jpg", w, h)).unwrap()
    }

    #[test]
    fn clear_landscape_and_portrait() {
        assert_eq!(orient(3000, 2000), Orientation::Landscape);
        assert_eq!(orient(2000, 3000), Orientation::Portrait);
    }

    #[test]
    fn square_band_is_inclusive() {
        // 0.9 and 1.1 exactly
        assert_eq!(orient(900, 1000), Orientation::Square);
        assert_eq!(orient(1100, 1000), Orientation::Square);
        assert_eq!(orient(1000, 1000), Orientation::Square);
    }

    #[test]
    fn just_outside_square_band() {
        assert_eq!(orient(899, 1000), Orientation::Portrait);
        assert_eq!(orient(1101, 1000), Orientation::Landscape);
    }

    #[test]
    fn zero_dimension_is_error() {
        let err = classify(&Image::new("bad.jpg", 0, 100)).unwrap_err();
        assert_eq!(
            err,
            ComposeError::InvalidImageDimensions {
                id: "bad.jpg".into(),
                width: 0,
                height: 100
            }
        );
        assert!(classify(&Image::new("bad.jpg", 100, 0)).is_err());
    }

    #[test]
    fn every_positive_size_gets_exactly_one_class() {
        for w in (1..=3000).step_by(37) {
            for h in (1..=3000).step_by(41) {
                let o = orient(w, h);
                let ratio = w as f64 / h as f64;
                match o {
                    Orientation::Square => assert!((0.9..=1.1).contains(&ratio)),
                    Orientation::Landscape => assert!(ratio > 1.1),
                    Orientation::Portrait => assert!(ratio < 0.9),
                }
            }
        }
    }

    #[test]
    fn wide_means_landscape_or_square() {
        assert!(Orientation::Landscape.is_wide());
        assert!(Orientation::Square.is_wide());
        assert!(!Orientation::Portrait.is_wide());
    }
}
