//! `*_scans.tsv` filename column updates
//!
//! After field-map files are renamed, the per-session scans table still lists
//! the old names. Only the `filename` column is rewritten; every other cell,
//! the column order and the row order are kept as read.

use crate::error::Result;
use crate::rename::substitute_legacy_tokens;
use crate::report::PassReport;
use crate::tsv::Table;
use crate::RunOptions;
use bidsprep_common::fs_util::replace_file;
use bidsprep_common::layout::sorted_file_names;
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

/// Manifest file name suffix
pub const SCANS_SUFFIX: &str = "_scans.tsv";

/// Column holding the scan file paths
pub const FILENAME_COLUMN: &str = "filename";

/// Whether `name` is a per-session scans table (dot-prefixed names excluded)
pub fn is_scans_table(name: &str) -> bool {
    !name.starts_with('.') && name.ends_with(SCANS_SUFFIX)
}

/// Result of processing one scans table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableOutcome {
    /// No `filename` column; file left alone
    MissingColumn,
    /// Nothing to substitute; file left alone
    Unchanged,
    /// `rows` rows changed (written unless dry-run)
    Updated { rows: usize },
}

/// Substitute legacy tokens in the `filename` column in place
///
/// Returns the number of rows changed, or `None` when the column is missing.
pub fn rewrite_filenames(table: &mut Table) -> Option<usize> {
    let column = table.column_index(FILENAME_COLUMN)?;
    let mut changed = 0;
    for row in &mut table.rows {
        let updated = substitute_legacy_tokens(&row[column]);
        if updated != row[column] {
            row[column] = updated;
            changed += 1;
        }
    }
    Some(changed)
}

/// Load, update and (unless `dry_run`) rewrite one scans table
pub fn update_scans_file(path: &Path, dry_run: bool) -> bidsprep_common::Result<TableOutcome> {
    let text = fs::read_to_string(path)?;
    let mut table = Table::parse(&text)?;

    let outcome = match rewrite_filenames(&mut table) {
        None => TableOutcome::MissingColumn,
        Some(0) => TableOutcome::Unchanged,
        Some(rows) => TableOutcome::Updated { rows },
    };

    if let TableOutcome::Updated { .. } = outcome {
        if !dry_run {
            replace_file(path, table.to_tsv_string().as_bytes())?;
        }
    }
    Ok(outcome)
}

/// Update every session's scans tables
///
/// A table that cannot be read, parsed or written is reported and skipped.
pub fn update_scans_tsv(options: &RunOptions) -> Result<PassReport> {
    let mut report = PassReport::default();

    for (_, session) in options.session_units(&mut report)? {
        let tables = sorted_file_names(&session.path, is_scans_table)?;
        for name in tables {
            let path = session.path.join(name);
            match update_scans_file(&path, options.dry_run) {
                Ok(TableOutcome::MissingColumn) => {
                    warn!("'{}' column not found in: {}", FILENAME_COLUMN, path.display());
                    report.skipped += 1;
                }
                Ok(TableOutcome::Unchanged) => {
                    info!("No changes needed for: {}", path.display());
                    report.unchanged += 1;
                }
                Ok(TableOutcome::Updated { rows }) => {
                    if options.dry_run {
                        info!("Would update TSV ({} rows): {}", rows, path.display());
                    } else {
                        info!("Updated TSV ({} rows): {}", rows, path.display());
                    }
                    report.record_change(options.dry_run);
                }
                Err(e) => {
                    error!("Error processing {}: {}", path.display(), e);
                    report.failed += 1;
                }
            }
        }
    }

    Ok(report)
}
