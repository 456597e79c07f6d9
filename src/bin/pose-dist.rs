use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use pose_dist::{BatchRunner, Catalog, ColorCode, DistConfig, EntryOutcome, ImageTrimmer};

#[derive(Parser, Debug)]
#[command(name = "pose-dist", version)]
struct Cli {
    /// Log per-frame details.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert every catalog entry whose output directory does not exist yet.
    Run(RunArgs),
    /// Trim the border off a single image file.
    Trim(TrimArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Catalog JSON mapping entry names to `{title, type}`.
    #[arg(long, default_value = "poses/poses.json")]
    catalog: PathBuf,

    /// Directory holding the capture archives.
    #[arg(long, default_value = "poses")]
    poses_dir: PathBuf,

    /// Output root.
    #[arg(long, default_value = "dist")]
    out: PathBuf,

    /// Only convert these entries (repeatable).
    #[arg(long)]
    only: Vec<String>,
}

#[derive(Parser, Debug)]
struct TrimArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output image; format follows the extension (`jpg`, `jpeg`, `png`).
    #[arg(long)]
    out: PathBuf,

    /// Border color as `#rrggbb`, or `auto` to use the top-left pixel.
    #[arg(long, default_value = "auto")]
    color: String,

    /// Fit width after trimming.
    #[arg(long)]
    max_width: Option<u32>,

    /// Fit height after trimming.
    #[arg(long)]
    max_height: Option<u32>,

    /// JPEG quality (1-100).
    #[arg(long)]
    quality: Option<u8>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Trim(args) => cmd_trim(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    tracing::info!(
        "distribution pose generator for {} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let config = DistConfig {
        catalog_path: args.catalog,
        poses_dir: args.poses_dir,
        out_dir: args.out,
    };
    let mut catalog = Catalog::from_path(&config.catalog_path)
        .with_context(|| format!("load catalog '{}'", config.catalog_path.display()))?;
    if !args.only.is_empty() {
        catalog.retain_names(&args.only);
        anyhow::ensure!(!catalog.is_empty(), "no catalog entry matches --only");
    }

    let runner = BatchRunner::new(config)?;
    let report = runner.run(&catalog);

    for (name, outcome) in &report.outcomes {
        match outcome {
            EntryOutcome::Converted(r) => eprintln!(
                "  {name}: saved {}/{} frames ({} trimmed, {} missing, {} failed, {} duplicate)",
                r.frames_saved,
                r.frames_attempted,
                r.frames_trimmed,
                r.frames_missing,
                r.frames_failed,
                r.frames_duplicate
            ),
            EntryOutcome::Skipped => eprintln!("  {name}: skipped"),
            EntryOutcome::Failed(msg) => eprintln!("  {name}: failed: {msg}"),
        }
    }
    eprintln!(
        "Processed {} / {} pose files ({} skipped, {} failed).",
        report.converted(),
        report.total(),
        report.skipped(),
        report.failed()
    );
    Ok(())
}

fn cmd_trim(args: TrimArgs) -> anyhow::Result<()> {
    let mut trimmer = ImageTrimmer::from_path(&args.in_path)?;

    let color = if args.color.eq_ignore_ascii_case("auto") {
        trimmer
            .detect_margin_color()
            .context("input image has no pixels")?
    } else {
        args.color.parse::<ColorCode>()?
    };

    let report = trimmer.trim_margin(color)?;
    tracing::info!(
        color = %color,
        margin_top = report.margin_top,
        margin_bottom = report.margin_bottom,
        height = report.height,
        "trimmed"
    );

    if args.max_width.is_some() || args.max_height.is_some() {
        let (w, h) = trimmer.resize_to_fit(args.max_width, args.max_height)?;
        tracing::info!(width = w, height = h, "resized");
    }

    trimmer.save_to_path(&args.out, args.quality)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
