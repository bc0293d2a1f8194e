//! Contain-fit placement of an image inside a layout box.

use super::geometry::Rect;

/// Scale `(width, height)` to the largest size that fits `target` without
/// distortion, centered in it.
///
/// The image touches the box on the axis where it is relatively larger and is
/// centered on the other one. Both dimensions must be positive.
pub fn fit_and_center(width: u32, height: u32, target: &Rect) -> Rect {
    let ratio_img = width as f64 / height as f64;
    let (w, h) = if ratio_img >= target.ratio() {
        (target.width, target.width / ratio_img)
    } else {
        (target.height * ratio_img, target.height)
    };
    Rect::new(
        target.x + (target.width - w) / 2.0,
        target.y + (target.height - h) / 2.0,
        w,
        h,
    )
}
