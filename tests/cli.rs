//! The `photobook` binary against a book root on disk.

use photobook::compose::BookPlan;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn book_root() -> TempDir {
    let tmp = TempDir::new().unwrap();
    for year in 1..=5 {
        let dir = tmp.path().join(format!("Infantil{year}"));
        fs::create_dir(&dir).unwrap();
        for n in 1..=2 {
            image::RgbImage::new(30, 20)
                .save(dir.join(format!("photo_{n}.png")))
                .unwrap();
        }
    }
    tmp
}

fn photobook(root: &Path, temp: &Path, args: &[&str]) -> Output {
    let output = Command::new(env!("CARGO_BIN_EXE_photobook"))
        .arg("--source")
        .arg(root)
        .arg("--temp-dir")
        .arg(temp)
        .args(args)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "photobook {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

#[test]
fn scan_lists_each_photo_once() {
    let root = book_root();
    let temp = TempDir::new().unwrap();
    let output = photobook(root.path(), temp.path(), &["scan"]);

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.matches("photo_1.png").count(), 5);
    assert_eq!(stdout.matches("Infantil3 (2 photos)").count(), 1);
    assert!(temp.path().join("manifest.json").exists());
}

#[test]
fn compose_writes_plan_from_manifest() {
    let root = book_root();
    let temp = TempDir::new().unwrap();
    photobook(root.path(), temp.path(), &["scan"]);

    let plan_path = temp.path().join("out/book.json");
    let output = photobook(
        root.path(),
        temp.path(),
        &["compose", "--output", plan_path.to_str().unwrap()],
    );
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Composed 5 pages in 5 sections (12 printed)"));

    let plan: BookPlan = serde_json::from_str(&fs::read_to_string(&plan_path).unwrap()).unwrap();
    assert_eq!(plan.pages.len(), 5);
    assert_eq!(plan.back_cover.printed_page, 12);
}
