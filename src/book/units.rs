//! Physical length conversion.
//!
//! Every length in the composed book is expressed in PostScript points
//! (1/72 inch). Configuration is written in millimeters; this is the only
//! place the two meet.

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Convert millimeters to points.
///
/// ```
/// # use photobook::book::mm_to_points;
/// assert_eq!(mm_to_points(25.4), 72.0);
/// ```
pub fn mm_to_points(mm: f64) -> f64 {
    mm * POINTS_PER_INCH / MM_PER_INCH
}
