use clap::{Args, Parser, Subcommand};
use imgseq::config::{RunConfig, Workflow};
use imgseq::imaging::RustBackend;
use imgseq::pipeline;
use imgseq::report::{Reporter, RunReport};
use std::path::PathBuf;
use std::process::ExitCode;

/// Shared flags for both workflows.
#[derive(Args, Clone)]
struct RunArgs {
    /// Folder containing the images to process
    #[arg(short, long)]
    folder: PathBuf,

    /// Prefix for derived filenames
    #[arg(short, long, default_value = "image")]
    prefix: String,

    /// First sequence number
    #[arg(short, long, default_value_t = 1)]
    start: u32,

    /// Zero-padding width for sequence numbers
    #[arg(short, long, default_value_t = 4)]
    leading: usize,

    /// Keep the backup directory after the run
    #[arg(short, long)]
    backups: bool,

    /// Extension to match (repeatable); defaults to jpg/webp for convert
    /// and png for rename
    #[arg(short = 'e', long = "ext")]
    extensions: Vec<String>,

    /// Write a JSON run report to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Parser)]
#[command(name = "imgseq")]
#[command(about = "Sequential batch image renamer and converter")]
#[command(long_about = "\
Sequential batch image renamer and converter

Processes a folder of images in one sorted pass, converting them to a
standard format/resolution and numbering them prefix-NNNN.png. Per-file
failures are counted and reported instead of aborting the run.

Workflows:

  convert   convert each match to the target resolution under its
            sequential name, then delete the original (or move it into
            backups/ with --backups). Partial failures never block the run.
  rename    copy every match into backups/ first, fix resolutions in
            place, then rename. Zero matches is fatal, and any failure
            keeps the backup directory around for manual recovery.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert matching images to the target format/resolution, numbered
    /// sequentially
    Convert(RunArgs),
    /// Back up, normalize resolution, and sequentially rename matching
    /// images
    Rename(RunArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let (workflow, args) = match cli.command {
        Command::Convert(args) => (Workflow::Convert, args),
        Command::Rename(args) => (Workflow::Rename, args),
    };

    match run(workflow, args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(workflow: Workflow, args: RunArgs) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = RunConfig::new(
        workflow,
        args.folder,
        args.extensions,
        args.prefix,
        args.start,
        args.leading,
        args.backups,
    )?;

    let backend = RustBackend::new();
    let mut reporter = Reporter::stdout();
    let result = pipeline::run(&config, &backend, &mut reporter)?;

    if let Some(path) = &args.report {
        let report = RunReport::from(&result);
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
    }

    // A rename run that recorded errors relied on its retained backups;
    // surface that through the exit code. Convert runs complete best-effort.
    let fatal = workflow == Workflow::Rename && result.error_count() > 0;
    Ok(if fatal {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
