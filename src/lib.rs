//! # imgseq
//!
//! Sequential batch image renaming and conversion. Point it at a folder of
//! images and it converts them to a standard format/resolution and renames
//! them to a `prefix-NNNN.ext` sequence, with per-file progress on the
//! console and per-file error accounting instead of all-or-nothing runs.
//!
//! # Architecture: One Sequential Pipeline
//!
//! ```text
//! enumerate   folder/    →  sorted candidate snapshot
//! backup      originals  →  folder/backups/        (copy or move)
//! transform   candidate  →  prefix-NNNN.png        (resize + reformat)
//! account     failures   →  RunResult              (counted, not fatal)
//! ```
//!
//! The pipeline is deliberately single-threaded and fully blocking: progress
//! output must match processing order, and the recovery story ("originals
//! are deleted only after a successful conversion, or staged into backups
//! first") depends on each step completing before the next begins. Killing
//! the process mid-run leaves a half-converted folder plus intact originals
//! or backups, which is the intended recovery state.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`enumerate`] | directory snapshot: extension filter + byte-order sort |
//! | [`backup`] | backup subdirectory lifecycle, no-overwrite guarantee |
//! | [`imaging`] | image operations behind a swappable [`ImageBackend`](imaging::ImageBackend) |
//! | [`pipeline`] | the orchestrator: both workflows, error accounting, cleanup |
//! | [`config`] | immutable per-run configuration built at the CLI boundary |
//! | [`naming`] | the `prefix-NNNN.ext` filename convention in one place |
//! | [`report`] | self-overwriting console status lines + JSON run report |
//!
//! # Workflows
//!
//! Two variants share the pipeline, selected by subcommand:
//!
//! - **convert** — convert each match to the target resolution under its
//!   sequential name, then delete the original (or move it into `backups/`
//!   with `--backups`). Partial failures never block the run.
//! - **rename** — copy every match into `backups/` first, fix resolutions
//!   in place, then rename. Zero matches is fatal, and any failure keeps
//!   the backup directory around for manual recovery.
//!
//! # Pure-Rust Imaging
//!
//! The [`imaging`] module uses the `image` crate (Lanczos3 resampling) for
//! decode, resize, and encode. No ImageMagick, no system dependencies; the
//! binary is fully self-contained. Resizing stretches to the exact target
//! resolution without preserving aspect ratio — wallpapers are expected to
//! fill the screen, matching the tool this replaces.

pub mod backup;
pub mod config;
pub mod enumerate;
pub mod imaging;
pub mod naming;
pub mod pipeline;
pub mod report;
