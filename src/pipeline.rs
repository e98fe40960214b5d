//! The batch-processing pipeline.
//!
//! One sequential pass over a snapshot of the source folder: enumerate →
//! (backup) → transform/rename each item → account for failures → clean up.
//! Per-item failures are reported, counted, and skipped — they never unwind
//! the loop. Only setup problems (unreadable folder, zero candidates in the
//! rename workflow, backup directory creation) abort before any mutation.
//!
//! ## Workflows
//!
//! - **Convert**: each candidate is converted to the target
//!   format/resolution under its derived sequential name, then the original
//!   is deleted — or moved into the backup directory when backups were
//!   requested. The original is only ever removed after a successful
//!   conversion.
//! - **Rename**: every candidate is first copied into the backup directory
//!   as a safety net; any staging failure aborts before a single rename.
//!   Each file is then checked against the target resolution (resized in
//!   place when it differs) and renamed to its derived name. When anything
//!   failed the backup directory is retained for manual recovery, otherwise
//!   it is purged unless backups were requested.

use crate::backup::{self, BackupError};
use crate::config::{RunConfig, Workflow};
use crate::enumerate::{self, Candidate, EnumerateError};
use crate::imaging::{BackendError, ImageBackend, convert_to, ensure_resolution};
use crate::naming::sequential_name;
use crate::report::{Reporter, format_error_summary, format_progress};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal setup failure: nothing was mutated.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Enumerate(#[from] EnumerateError),
    #[error("no matching files in {0}")]
    NoCandidates(PathBuf),
    #[error("backup setup failed: {0}")]
    BackupSetup(BackupError),
}

/// Why a single work item failed. Recorded and counted; the loop moves on
/// to the next item.
#[derive(Error, Debug)]
pub enum StepError {
    #[error(transparent)]
    Backup(#[from] BackupError),
    #[error(transparent)]
    Transform(#[from] BackendError),
    #[error("destination already exists: {0}")]
    Collision(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One recorded failure, in processing order.
#[derive(Debug)]
pub struct ItemFailure {
    pub file_name: String,
    pub error: StepError,
}

/// The observable outcome of a run.
#[derive(Debug, Default)]
pub struct RunResult {
    pub total: usize,
    pub processed: usize,
    pub failures: Vec<ItemFailure>,
}

impl RunResult {
    pub fn error_count(&self) -> usize {
        self.failures.len()
    }
}

/// A candidate paired with its sequence number and derived name.
#[derive(Debug)]
struct WorkItem {
    candidate: Candidate,
    seq: u32,
    derived_name: String,
}

/// Assign sequence numbers to the sorted candidate snapshot, starting at
/// `config.start`. Numbers increase by one per item and are never
/// reassigned, even when an earlier item fails.
fn work_items(candidates: Vec<Candidate>, config: &RunConfig) -> Vec<WorkItem> {
    candidates
        .into_iter()
        .enumerate()
        .map(|(i, candidate)| {
            let seq = config.start + i as u32;
            let derived_name =
                sequential_name(&config.prefix, seq, config.leading, &config.target_ext);
            WorkItem {
                candidate,
                seq,
                derived_name,
            }
        })
        .collect()
}

/// Run the configured workflow to completion and return its accounting.
pub fn run<W: Write>(
    config: &RunConfig,
    backend: &impl ImageBackend,
    reporter: &mut Reporter<W>,
) -> Result<RunResult, PipelineError> {
    match config.workflow {
        Workflow::Convert => run_convert(config, backend, reporter),
        Workflow::Rename => run_rename(config, backend, reporter),
    }
}

fn run_convert<W: Write>(
    config: &RunConfig,
    backend: &impl ImageBackend,
    reporter: &mut Reporter<W>,
) -> Result<RunResult, PipelineError> {
    let candidates = enumerate::collect(&config.folder, &config.extensions)?;
    if candidates.is_empty() {
        reporter.note(&format!(
            "nothing to convert in {}",
            config.folder.display()
        ));
        return Ok(RunResult::default());
    }

    if config.keep_backups {
        backup::ensure_dir(&config.folder, &config.backup_subdir)
            .map_err(PipelineError::BackupSetup)?;
    }

    let items = work_items(candidates, config);
    let mut result = RunResult {
        total: items.len(),
        ..RunResult::default()
    };

    reporter.banner(&format!(
        "Converting {} images in {}",
        result.total,
        config.folder.display()
    ));

    for item in &items {
        // 0-based progress; the filename carries the absolute number
        let counter = item.seq - config.start;
        reporter.status(&format_progress(
            counter,
            result.total,
            config.leading,
            &item.candidate.file_name,
            &item.derived_name,
        ));

        match convert_item(config, backend, item) {
            Ok(()) => result.processed += 1,
            Err(error) => {
                reporter.error(&error.to_string());
                result.failures.push(ItemFailure {
                    file_name: item.candidate.file_name.clone(),
                    error,
                });
            }
        }
    }

    if result.error_count() > 0 {
        reporter.error(&format_error_summary(result.error_count(), "conversion"));
    }
    Ok(result)
}

/// Convert one file. The original is removed (or moved to backup) only
/// after the conversion succeeded; a failed item leaves it untouched.
fn convert_item(
    config: &RunConfig,
    backend: &impl ImageBackend,
    item: &WorkItem,
) -> Result<(), StepError> {
    let source = config.folder.join(&item.candidate.file_name);
    let output = config.folder.join(&item.derived_name);

    convert_to(backend, &source, &output, config.target)?;

    // A source already bearing its derived name was converted in place.
    if source == output {
        return Ok(());
    }
    if config.keep_backups {
        backup::move_into(&config.folder, &config.backup_subdir, &item.candidate.file_name)?;
    } else {
        fs::remove_file(&source)?;
    }
    Ok(())
}

fn run_rename<W: Write>(
    config: &RunConfig,
    backend: &impl ImageBackend,
    reporter: &mut Reporter<W>,
) -> Result<RunResult, PipelineError> {
    let candidates = enumerate::collect(&config.folder, &config.extensions)?;
    if candidates.is_empty() {
        return Err(PipelineError::NoCandidates(config.folder.clone()));
    }

    let mut result = RunResult {
        total: candidates.len(),
        ..RunResult::default()
    };

    // Stage everything into the backup directory before touching anything.
    reporter.note(&format!("backing up {} files", result.total));
    backup::ensure_dir(&config.folder, &config.backup_subdir)
        .map_err(PipelineError::BackupSetup)?;

    for candidate in &candidates {
        if let Err(error) =
            backup::copy_into(&config.folder, &config.backup_subdir, &candidate.file_name)
        {
            reporter.error(&error.to_string());
            result.failures.push(ItemFailure {
                file_name: candidate.file_name.clone(),
                error: error.into(),
            });
        }
    }
    if result.error_count() > 0 {
        // Incomplete safety net: keep the staged copies, rename nothing.
        reporter.error(&format_error_summary(result.error_count(), "backup"));
        return Ok(result);
    }

    let items = work_items(candidates, config);
    reporter.banner(&format!(
        "Renaming {} files in {}",
        result.total,
        config.folder.display()
    ));

    for item in &items {
        reporter.status(&format_progress(
            item.seq,
            result.total,
            config.leading,
            &item.candidate.file_name,
            &item.derived_name,
        ));

        match rename_item(config, backend, item) {
            Ok(()) => result.processed += 1,
            Err(error) => {
                reporter.error(&error.to_string());
                result.failures.push(ItemFailure {
                    file_name: item.candidate.file_name.clone(),
                    error,
                });
            }
        }
    }

    if result.error_count() > 0 {
        // Backups are deliberately kept so the operator can recover.
        reporter.error(&format_error_summary(result.error_count(), "rename"));
        return Ok(result);
    }

    if !config.keep_backups {
        reporter.note("removing backups");
        if let Err(error) = backup::purge(&config.folder, &config.backup_subdir) {
            reporter.error(&error.to_string());
        }
    }
    reporter.note("done");
    Ok(result)
}

/// Fix one file's resolution in place, then move it to its derived name.
fn rename_item(
    config: &RunConfig,
    backend: &impl ImageBackend,
    item: &WorkItem,
) -> Result<(), StepError> {
    let source = config.folder.join(&item.candidate.file_name);
    let dest = config.folder.join(&item.derived_name);

    ensure_resolution(backend, &source, config.target)?;

    // Already named correctly; the resolution check above still applies.
    if dest == source {
        return Ok(());
    }
    if dest.exists() {
        return Err(StepError::Collision(dest));
    }
    fs::rename(&source, &dest)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Dimensions;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use std::path::Path;
    use tempfile::TempDir;

    const TARGET: Dimensions = Dimensions {
        width: 1920,
        height: 1080,
    };

    fn config(workflow: Workflow, folder: &Path, keep_backups: bool) -> RunConfig {
        RunConfig::new(
            workflow,
            folder.to_path_buf(),
            vec![],
            "img".to_string(),
            1,
            3,
            keep_backups,
        )
        .unwrap()
    }

    fn sink() -> Reporter<Vec<u8>> {
        Reporter::new(Vec::new(), false)
    }

    fn touch(folder: &Path, name: &str) {
        fs::write(folder.join(name), b"fake image").unwrap();
    }

    fn convert_outputs(backend: &MockBackend) -> Vec<String> {
        backend
            .operations()
            .into_iter()
            .filter_map(|op| match op {
                RecordedOp::Convert { output, .. } => Some(output),
                _ => None,
            })
            .collect()
    }

    // =========================================================================
    // Convert workflow
    // =========================================================================

    #[test]
    fn convert_processes_sorted_candidates_in_order() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "b.jpg");
        touch(tmp.path(), "a.jpg");
        touch(tmp.path(), "c.webp");

        let backend = MockBackend::new();
        let config = config(Workflow::Convert, tmp.path(), false);
        let mut reporter = sink();
        let result = run(&config, &backend, &mut reporter).unwrap();

        assert_eq!(result.total, 3);
        assert_eq!(result.processed, 3);
        assert_eq!(result.error_count(), 0);

        // derived names follow the sorted order: a, b, c
        let outputs = convert_outputs(&backend);
        assert!(outputs[0].ends_with("img-001.png"));
        assert!(outputs[1].ends_with("img-002.png"));
        assert!(outputs[2].ends_with("img-003.png"));

        // originals deleted after successful conversion
        assert!(!tmp.path().join("a.jpg").exists());
        assert!(!tmp.path().join("b.jpg").exists());
        assert!(!tmp.path().join("c.webp").exists());

        // progress counters are 0-based for the convert workflow
        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(out.contains("000/003: a.jpg -> img-001.png"));
        assert!(out.contains("002/003: c.webp -> img-003.png"));
    }

    #[test]
    fn convert_failure_leaves_source_and_keeps_numbering() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.jpg");
        touch(tmp.path(), "b.jpg");
        touch(tmp.path(), "c.jpg");

        let backend = MockBackend::failing_on(&["b.jpg"]);
        let config = config(Workflow::Convert, tmp.path(), false);
        let result = run(&config, &backend, &mut sink()).unwrap();

        assert_eq!(result.processed, 2);
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.failures[0].file_name, "b.jpg");

        // the failed source is untouched, the others are gone
        assert!(tmp.path().join("b.jpg").exists());
        assert!(!tmp.path().join("a.jpg").exists());
        assert!(!tmp.path().join("c.jpg").exists());

        // sequence numbers are not reassigned around the failure
        let outputs = convert_outputs(&backend);
        assert!(outputs[1].ends_with("img-002.png"));
        assert!(outputs[2].ends_with("img-003.png"));
    }

    #[test]
    fn convert_with_backups_moves_originals() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.jpg");

        let backend = MockBackend::new();
        let config = config(Workflow::Convert, tmp.path(), true);
        let result = run(&config, &backend, &mut sink()).unwrap();

        assert_eq!(result.processed, 1);
        assert!(!tmp.path().join("a.jpg").exists());
        assert!(tmp.path().join("backups/a.jpg").exists());
    }

    #[test]
    fn convert_empty_folder_is_a_noop() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "notes.txt");

        let backend = MockBackend::new();
        let config = config(Workflow::Convert, tmp.path(), true);
        let result = run(&config, &backend, &mut sink()).unwrap();

        assert_eq!(result.total, 0);
        assert!(backend.operations().is_empty());
        // not even the backup directory is created
        assert!(!tmp.path().join("backups").exists());
    }

    #[test]
    fn convert_start_offset_shifts_sequence_numbers() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.jpg");
        touch(tmp.path(), "b.jpg");

        let backend = MockBackend::new();
        let mut config = config(Workflow::Convert, tmp.path(), false);
        config.start = 7;
        run(&config, &backend, &mut sink()).unwrap();

        let outputs = convert_outputs(&backend);
        assert!(outputs[0].ends_with("img-007.png"));
        assert!(outputs[1].ends_with("img-008.png"));
    }

    // =========================================================================
    // Rename workflow
    // =========================================================================

    #[test]
    fn rename_aborts_on_zero_candidates() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "notes.txt");

        let backend = MockBackend::new();
        let config = config(Workflow::Rename, tmp.path(), false);
        let result = run(&config, &backend, &mut sink());

        assert!(matches!(result, Err(PipelineError::NoCandidates(_))));
        // aborts before any side effect
        assert!(!tmp.path().join("backups").exists());
        assert!(backend.operations().is_empty());
    }

    #[test]
    fn rename_stages_checks_resolution_and_renames() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "b.png");
        touch(tmp.path(), "a.png");

        let backend = MockBackend::with_dimensions(vec![TARGET, TARGET]);
        let config = config(Workflow::Rename, tmp.path(), false);
        let result = run(&config, &backend, &mut sink()).unwrap();

        assert_eq!(result.total, 2);
        assert_eq!(result.processed, 2);
        assert_eq!(result.error_count(), 0);

        assert!(tmp.path().join("img-001.png").exists());
        assert!(tmp.path().join("img-002.png").exists());
        assert!(!tmp.path().join("a.png").exists());
        assert!(!tmp.path().join("b.png").exists());

        // resolutions matched, so no convert ops — only identifies
        assert!(convert_outputs(&backend).is_empty());

        // clean run without --backups purges the staging directory
        assert!(!tmp.path().join("backups").exists());
    }

    #[test]
    fn rename_resizes_mismatched_files_in_place() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.png");

        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 800,
            height: 600,
        }]);
        let config = config(Workflow::Rename, tmp.path(), false);
        let result = run(&config, &backend, &mut sink()).unwrap();

        assert_eq!(result.processed, 1);
        let source = tmp.path().join("a.png").to_string_lossy().to_string();
        assert!(backend.operations().iter().any(|op| matches!(
            op,
            RecordedOp::Convert { source: s, output: o, width: 1920, height: 1080 }
                if *s == source && *o == source
        )));
        assert!(tmp.path().join("img-001.png").exists());
    }

    #[test]
    fn rename_keeps_backups_when_requested() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.png");

        let backend = MockBackend::with_dimensions(vec![TARGET]);
        let config = config(Workflow::Rename, tmp.path(), true);
        run(&config, &backend, &mut sink()).unwrap();

        assert!(tmp.path().join("backups/a.png").exists());
    }

    #[test]
    fn rename_staging_error_aborts_before_renaming() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.png");
        fs::create_dir(tmp.path().join("backups")).unwrap();
        fs::write(tmp.path().join("backups/a.png"), b"old backup").unwrap();

        let backend = MockBackend::with_dimensions(vec![TARGET]);
        let config = config(Workflow::Rename, tmp.path(), false);
        let result = run(&config, &backend, &mut sink()).unwrap();

        assert_eq!(result.processed, 0);
        assert_eq!(result.error_count(), 1);
        assert!(matches!(
            result.failures[0].error,
            StepError::Backup(BackupError::AlreadyExists(_))
        ));

        // nothing was renamed or resized, and the old backup is untouched
        assert!(tmp.path().join("a.png").exists());
        assert!(backend.operations().is_empty());
        assert_eq!(
            fs::read(tmp.path().join("backups/a.png")).unwrap(),
            b"old backup"
        );
    }

    #[test]
    fn rename_collision_is_counted_and_backups_survive() {
        let tmp = TempDir::new().unwrap();
        // sorted: a.png, b.png, img-002.png → derived img-001..003;
        // b.png collides with the pre-existing img-002.png
        touch(tmp.path(), "a.png");
        touch(tmp.path(), "b.png");
        touch(tmp.path(), "img-002.png");

        let backend = MockBackend::with_dimensions(vec![TARGET, TARGET, TARGET]);
        let config = config(Workflow::Rename, tmp.path(), false);
        let result = run(&config, &backend, &mut sink()).unwrap();

        assert_eq!(result.total, 3);
        assert_eq!(result.processed, 2);
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.failures[0].file_name, "b.png");
        assert!(matches!(result.failures[0].error, StepError::Collision(_)));

        // b.png was not renamed; the run kept the safety net around
        assert!(tmp.path().join("b.png").exists());
        assert!(tmp.path().join("backups").exists());
        assert!(tmp.path().join("backups/b.png").exists());
    }

    #[test]
    fn rename_unreadable_image_is_counted() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.png");
        touch(tmp.path(), "b.png");

        // one scripted result: a.png identifies, b.png runs the script dry
        let backend = MockBackend::with_dimensions(vec![TARGET]);
        let config = config(Workflow::Rename, tmp.path(), false);
        let result = run(&config, &backend, &mut sink()).unwrap();

        assert_eq!(result.processed, 1);
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.failures[0].file_name, "b.png");
        assert!(matches!(
            result.failures[0].error,
            StepError::Transform(BackendError::ImageRead { .. })
        ));
        assert!(tmp.path().join("img-001.png").exists());
        assert!(tmp.path().join("b.png").exists());
    }

    #[test]
    fn rename_onto_itself_is_a_noop() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "img-001.png");

        let backend = MockBackend::with_dimensions(vec![TARGET]);
        let config = config(Workflow::Rename, tmp.path(), false);
        let result = run(&config, &backend, &mut sink()).unwrap();

        assert_eq!(result.processed, 1);
        assert_eq!(result.error_count(), 0);
        assert!(tmp.path().join("img-001.png").exists());
    }

    #[test]
    fn rename_progress_uses_absolute_sequence_numbers() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.png");
        touch(tmp.path(), "b.png");

        let backend = MockBackend::with_dimensions(vec![TARGET, TARGET]);
        let mut config = config(Workflow::Rename, tmp.path(), false);
        config.start = 5;
        let mut reporter = sink();
        run(&config, &backend, &mut reporter).unwrap();

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(out.contains("005/002: a.png -> img-005.png"));
        assert!(out.contains("006/002: b.png -> img-006.png"));
    }

    // =========================================================================
    // Work item derivation
    // =========================================================================

    #[test]
    fn sequence_numbers_increase_from_start() {
        let candidates = vec![
            Candidate { file_name: "a.jpg".into(), extension: ".jpg".into() },
            Candidate { file_name: "b.jpg".into(), extension: ".jpg".into() },
            Candidate { file_name: "c.jpg".into(), extension: ".jpg".into() },
        ];
        let mut config = config(Workflow::Convert, Path::new("/pics"), false);
        config.start = 5;

        let items = work_items(candidates, &config);
        let seqs: Vec<u32> = items.iter().map(|i| i.seq).collect();
        assert_eq!(seqs, vec![5, 6, 7]);
        assert_eq!(items[2].derived_name, "img-007.png");
    }
}
