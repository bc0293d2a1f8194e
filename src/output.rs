//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Years are shown by
//! rank and title, pages by index and layout, with file paths as secondary
//! context on indented lines.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Years
//! 001 Infantil1 (4 photos)
//!     Source: Infantil1/
//!     001 IMG_0001.jpg 4032x3024 landscape
//!     002 IMG_0002.jpg 3024x4032 portrait
//!
//! Config
//!     config.toml
//! ```
//!
//! ## Compose
//!
//! ```text
//! Cover: Photo Book (15 photos)
//!
//! 001 Infantil 1 ~ 2021 (4 photos, pages 001-002)
//!     001 L3A spine left
//!         Infantil1/IMG_0001.jpg
//!         Infantil1/IMG_0002.jpg
//!         Infantil1/IMG_0003.jpg
//!     002 L1 spine right
//!         Infantil1/IMG_0004.jpg
//!
//! Back cover: Photo Book
//!
//! Composed 7 pages in 5 sections (14 printed)
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure,
//! apart from the scan summary checking whether `config.toml` exists.

use crate::book::{Orientation, SpineSide};
use crate::compose::BookPlan;
use crate::scan::{Manifest, ScanEvent};
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + title, with optional detail.
///
/// ```text
/// 001 Infantil1 (5 photos)
/// 001 Infantil1
/// ```
fn entity_header(index: usize, title: &str, count: Option<usize>) -> String {
    match count {
        Some(1) => format!("{} {} (1 photo)", format_index(index), title),
        Some(n) => format!("{} {} ({} photos)", format_index(index), title, n),
        None => format!("{} {}", format_index(index), title),
    }
}

/// Format a photo line: index, file name, size and orientation.
///
/// ```text
/// 001 IMG_0001.jpg 4032x3024 landscape
/// 002 broken.jpg 0x0 invalid
/// ```
fn image_line(index: usize, id: &str, width: u32, height: u32) -> String {
    let filename = id.rsplit('/').next().unwrap_or(id);
    let orientation = if width == 0 || height == 0 {
        "invalid"
    } else {
        Orientation::from_ratio(width as f64 / height as f64).as_str()
    };
    format!(
        "{} {} {}x{} {}",
        format_index(index),
        filename,
        width,
        height,
        orientation
    )
}

fn spine_label(spine: SpineSide) -> &'static str {
    match spine {
        SpineSide::Left => "left",
        SpineSide::Right => "right",
    }
}

/// Title with optional period: `Infantil 1 ~ 2021`.
fn titled(title: &str, period: &str) -> String {
    if period.is_empty() {
        title.to_string()
    } else {
        format!("{} ~ {}", title, period)
    }
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format a single scan progress event as display lines.
pub fn format_scan_event(event: &ScanEvent) -> Vec<String> {
    match event {
        ScanEvent::FolderStarted {
            rank,
            name,
            image_count,
        } => vec![entity_header(*rank as usize, name, Some(*image_count))],
        ScanEvent::ImageIdentified {
            index,
            id,
            width,
            height,
        } => vec![format!(
            "{}{}",
            indent(1),
            image_line(*index, id, *width, *height)
        )],
    }
}

/// Format scan stage output showing the discovered years.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Years".to_string());
    for folder in &manifest.folders {
        lines.push(entity_header(
            folder.rank as usize,
            &folder.name,
            Some(folder.images.len()),
        ));
        lines.push(format!("{}Source: {}/", indent(1), folder.name));
        if folder.images.is_empty() {
            lines.push(format!("{}(no photos)", indent(1)));
        }
        for (i, img) in folder.images.iter().enumerate() {
            lines.push(format!(
                "{}{}",
                indent(1),
                image_line(i + 1, &img.id, img.width, img.height)
            ));
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push(format!("{}config.toml", indent(1)));
    } else {
        lines.push(format!("{}(stock defaults)", indent(1)));
    }
    if !manifest.config.slots.is_empty() {
        lines.push(format!(
            "{}{} slot overrides",
            indent(1),
            manifest.config.slots.len()
        ));
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Compose output
// ============================================================================

/// Format the composed book: cover, then each section with its pages.
pub fn format_plan_output(plan: &BookPlan) -> Vec<String> {
    let mut lines = Vec::new();

    let cover = &plan.cover;
    let cover_title = titled(&cover.title, &cover.period);
    lines.push(format!(
        "Cover: {} ({} photos)",
        cover_title, cover.photo_count
    ));
    if !cover.subtitle.is_empty() {
        lines.push(format!("{}{}", indent(1), cover.subtitle));
    }
    if let Some(artwork) = &cover.artwork {
        lines.push(format!("{}Artwork: {}", indent(1), artwork));
    }

    for section in &plan.sections {
        lines.push(String::new());
        lines.push(format!(
            "{} ({} photos, pages {}-{})",
            entity_header(section.rank as usize, &titled(&section.title, &section.period), None),
            section.photo_count,
            format_index(section.first_page as usize),
            format_index(section.last_page as usize)
        ));
        if let Some(artwork) = &section.artwork {
            lines.push(format!("{}Artwork: {}", indent(1), artwork));
        }
        for page in plan.section_pages(section) {
            lines.push(format!(
                "{}{} {} spine {}",
                indent(1),
                format_index(page.index as usize),
                page.layout.name(),
                spine_label(page.spine)
            ));
            for placement in &page.placements {
                lines.push(format!("{}{}", indent(2), placement.id));
            }
        }
    }

    let back = &plan.back_cover;
    lines.push(String::new());
    lines.push(format!("Back cover: {}", titled(&back.title, &back.period)));
    if let Some(artwork) = &back.artwork {
        lines.push(format!("{}Artwork: {}", indent(1), artwork));
    }

    lines.push(String::new());
    lines.push(format!(
        "Composed {} pages in {} sections ({} printed)",
        plan.pages.len(),
        plan.sections.len(),
        plan.printed_page_count()
    ));
    lines
}

/// Print compose output to stdout.
pub fn print_plan_output(plan: &BookPlan) {
    for line in format_plan_output(plan) {
        println!("{}", line);
    }
}
