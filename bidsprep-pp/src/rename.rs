//! Field-map file renaming
//!
//! The converter names the two field-map images `..._fieldmap1...` and
//! `..._fieldmap2...`. BIDS expects `magnitude` and `fieldmap`.

use crate::error::{PostProcessError, Result};
use crate::report::PassReport;
use crate::RunOptions;
use bidsprep_common::layout::sorted_file_names;
use std::fs;
use tracing::{info, warn};

/// Legacy token → BIDS suffix, in rule order
pub const FIELDMAP_TOKEN_RULES: [(&str, &str); 2] =
    [("fieldmap1", "magnitude"), ("fieldmap2", "fieldmap")];

/// New name for a field-map file, or `None` if it carries no legacy token
///
/// Only the first matching rule applies.
pub fn renamed_fieldmap(name: &str) -> Option<String> {
    FIELDMAP_TOKEN_RULES
        .iter()
        .find(|(legacy, _)| name.contains(*legacy))
        .map(|(legacy, bids)| name.replace(*legacy, bids))
}

/// Apply every legacy-token rule in sequence to a value
pub fn substitute_legacy_tokens(value: &str) -> String {
    FIELDMAP_TOKEN_RULES
        .iter()
        .fold(value.to_string(), |acc, (legacy, bids)| acc.replace(*legacy, bids))
}

/// Rename legacy field-map files in every `fmap/` directory
///
/// Existing destinations are never overwritten. A rename refused by the OS
/// aborts the run.
pub fn rename_fieldmap_files(options: &RunOptions) -> Result<PassReport> {
    let mut report = PassReport::default();

    for (_, session) in options.session_units(&mut report)? {
        let fmap_dir = session.fmap_dir();
        if !fmap_dir.is_dir() {
            continue;
        }

        let names = sorted_file_names(&fmap_dir, |name| renamed_fieldmap(name).is_some())?;
        for name in names {
            let Some(new_name) = renamed_fieldmap(&name) else {
                continue;
            };
            let src = fmap_dir.join(&name);
            let dst = fmap_dir.join(&new_name);

            if fs::symlink_metadata(&dst).is_ok() {
                warn!(
                    "Skip rename (target exists): {} -> {}",
                    src.display(),
                    dst.display()
                );
                report.skipped += 1;
                continue;
            }

            if options.dry_run {
                info!("Would rename: {} -> {}", src.display(), dst.display());
            } else {
                info!("Renaming: {} -> {}", src.display(), dst.display());
                fs::rename(&src, &dst).map_err(|source| PostProcessError::Rename {
                    from: src.clone(),
                    to: dst.clone(),
                    source,
                })?;
            }
            report.record_change(options.dry_run);
        }
    }

    Ok(report)
}
