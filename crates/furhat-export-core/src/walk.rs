use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{
    convert::{ConversionReport, ExportOptions, convert_file},
    error::Result,
    log::DIALOG_LOG_FILE,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub converted: usize,
    pub failed: usize,
}

/// Find every `dialog.json` below `root`, in file name order
pub fn find_dialog_logs(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && entry.file_name() == DIALOG_LOG_FILE)
        .map(|entry| entry.into_path())
        .collect()
}

/// Convert each log in turn. A failing file is reported and the rest still run.
pub fn export_all(
    logs: &[PathBuf],
    options: &ExportOptions,
    mut on_file: impl FnMut(&Path, &Result<ConversionReport>),
) -> WalkSummary {
    let mut summary = WalkSummary::default();

    for log in logs {
        let result = convert_file(log, options);
        match &result {
            Ok(report) => {
                summary.converted += 1;
                tracing::debug!(
                    path = %log.display(),
                    rows = report.rows,
                    skipped = report.skipped.missing_fields,
                    responses = report.skipped.responses,
                    "Converted dialog log"
                );
            }
            Err(e) => {
                summary.failed += 1;
                tracing::debug!(path = %log.display(), error = %e, "Skipping dialog log");
            }
        }
        on_file(log, &result);
    }

    summary
}

/// Find and convert every dialog log below `root`
pub fn export_tree(
    root: &Path,
    options: &ExportOptions,
    on_file: impl FnMut(&Path, &Result<ConversionReport>),
) -> WalkSummary {
    export_all(&find_dialog_logs(root), options, on_file)
}
