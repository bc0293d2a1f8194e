//! Reading photo headers in pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** (JPEG, PNG, TIFF, WebP) | `image::image_dimensions` |
//! | **Identify** (AVIF) | `avif-parse` container metadata |
//!
//! Only pixel dimensions are needed to lay a photo out, so nothing here
//! decodes pixel data.
//!
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use rust_backend::{RustBackend, supported_input_extensions};
