use clap::{Parser, Subcommand};
use photobook::{compose, config, output, scan};
use std::path::{Path, PathBuf};

/// Shared flags for commands that write the book plan.
#[derive(clap::Args, Clone)]
struct PlanArgs {
    /// Where to write the composed book plan (JSON)
    #[arg(long, default_value = "book.json")]
    output: PathBuf,
}

#[derive(Parser)]
#[command(name = "photobook")]
#[command(about = "Lays out five years of photos as a print-ready photo book")]
#[command(long_about = "\
Lays out five years of photos as a print-ready photo book

The book root holds one folder per school year. Photos are ordered by file
name, grouped one to three per page by orientation, and fitted into fixed
layouts with an alternating binding margin.

Book structure:

  book/
  ├── config.toml          # Book config (optional)
  ├── Infantil1/           # Year 1 (folder names are case-insensitive)
  │   ├── IMG_0001.jpg
  │   └── IMG_0002.jpg
  ├── Infantil2/
  ├── Infantil3/
  ├── Infantil4/
  └── Infantil5/

Layouts:
  L1   one photo                L2H  two side by side
  L2V  two stacked              L3A  two on top, one below
  L3B  one on top, two below

Run 'photobook gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Book root directory
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Directory for intermediate files (scan manifest)
    #[arg(long, default_value = ".photobook-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the book root into a manifest
    Scan,
    /// Compose pages from the scan manifest
    Compose(PlanArgs),
    /// Run the full pipeline: scan → compose
    Build(PlanArgs),
    /// Validate the book root without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = run_scan(&cli.source, false)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Compose(plan_args) => {
            let plan = compose::compose(&cli.temp_dir.join("manifest.json"))?;
            compose::write_plan(&plan, &plan_args.output)?;
            output::print_plan_output(&plan);
            println!("==> Plan written to {}", plan_args.output.display());
        }
        Command::Build(plan_args) => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = run_scan(&cli.source, true)?;
            write_manifest(&manifest, &cli.temp_dir)?;

            println!("==> Stage 2: Composing pages");
            let plan = compose::plan_manifest(&manifest)?;
            compose::write_plan(&plan, &plan_args.output)?;
            output::print_plan_output(&plan);

            println!("==> Build complete: {}", plan_args.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = run_scan(&cli.source, true)?;
            let plan = compose::plan_manifest(&manifest)?;
            println!(
                "==> Book is valid: {} photos on {} pages ({} printed)",
                plan.cover.photo_count,
                plan.pages.len(),
                plan.printed_page_count()
            );
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Scan, optionally printing folders and photos as they are identified.
///
/// The config is loaded up front so the thread pool is sized before any
/// parallel identification starts.
fn run_scan(source: &Path, progress: bool) -> Result<scan::Manifest, Box<dyn std::error::Error>> {
    let book_config = config::load_config(source)?;
    config::init_thread_pool(&book_config.processing);
    if !progress {
        return Ok(scan::scan(source, None)?);
    }

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_scan_event(&event) {
                println!("{}", line);
            }
        }
    });
    let result = scan::scan(source, Some(tx));
    printer.join().ok();
    Ok(result?)
}

fn write_manifest(manifest: &scan::Manifest, temp_dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(temp_dir)?;
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(temp_dir.join("manifest.json"), json)
}
