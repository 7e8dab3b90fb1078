//! Field-map JSON sidecar updates
//!
//! Declares which functional runs a session's field map corrects
//! (`IntendedFor`) and the field's identifier (`B0FieldIdentifier`). The
//! sidecar is merged, not replaced: every other key keeps its value and
//! position.

use crate::error::Result;
use crate::report::PassReport;
use crate::RunOptions;
use bidsprep_common::layout::{bids_uri, sorted_file_names};
use bidsprep_common::fs_util::replace_file;
use bidsprep_common::{Error, SessionId, SubjectId};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

/// Functional run file name suffix
pub const BOLD_SUFFIX: &str = "_bold.nii.gz";

pub const INTENDED_FOR_KEY: &str = "IntendedFor";
pub const B0_FIELD_IDENTIFIER_KEY: &str = "B0FieldIdentifier";

/// Result of processing one sidecar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidecarOutcome {
    /// Both owned keys already hold the computed values
    Unchanged,
    /// Sidecar differs (written unless dry-run)
    Updated,
}

/// Expected sidecar file name after renaming: `<subject>_<session>_fieldmap.json`
pub fn sidecar_name(subject: &SubjectId, session: &SessionId) -> String {
    format!("{}_{}_fieldmap.json", subject, session)
}

/// Whether `name` is a functional run file
///
/// Dot-prefixed names (e.g. macOS `._` AppleDouble files) are not runs.
pub fn is_bold_run(name: &str) -> bool {
    !name.starts_with('.') && name.ends_with(BOLD_SUFFIX)
}

/// `bids::` references to every BOLD run in `func_dir`, sorted by name
pub fn intended_for(root: &Path, func_dir: &Path) -> bidsprep_common::Result<Vec<String>> {
    sorted_file_names(func_dir, is_bold_run)?
        .into_iter()
        .map(|name| bids_uri(root, &func_dir.join(name)))
        .collect()
}

/// Copy of `original` with the two owned keys set
///
/// Existing owned keys keep their position; new ones are appended.
pub fn merge_fieldmap_metadata(
    original: &Map<String, Value>,
    intended_for: &[String],
    b0_identifier: &str,
) -> Map<String, Value> {
    let mut merged = original.clone();
    merged.insert(
        INTENDED_FOR_KEY.to_string(),
        Value::Array(intended_for.iter().cloned().map(Value::String).collect()),
    );
    merged.insert(
        B0_FIELD_IDENTIFIER_KEY.to_string(),
        Value::String(b0_identifier.to_string()),
    );
    merged
}

/// Render a sidecar with 4-space indentation and a trailing newline
pub fn to_sidecar_json(document: &Map<String, Value>) -> bidsprep_common::Result<Vec<u8>> {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    document.serialize(&mut serializer)?;
    out.push(b'\n');
    Ok(out)
}

/// Load, merge and (unless `dry_run`) rewrite one sidecar
pub fn update_sidecar_file(
    path: &Path,
    intended_for: &[String],
    b0_identifier: &str,
    dry_run: bool,
) -> bidsprep_common::Result<SidecarOutcome> {
    let text = fs::read_to_string(path)?;
    let original = match serde_json::from_str::<Value>(&text)? {
        Value::Object(map) => map,
        _ => {
            return Err(Error::InvalidInput(
                "top-level JSON value is not an object".to_string(),
            ))
        }
    };

    let merged = merge_fieldmap_metadata(&original, intended_for, b0_identifier);
    if merged == original {
        return Ok(SidecarOutcome::Unchanged);
    }

    if !dry_run {
        replace_file(path, &to_sidecar_json(&merged)?)?;
    }
    Ok(SidecarOutcome::Updated)
}

/// Update the field-map sidecar of every session
///
/// Sessions without `func/` or `fmap/`, or without the expected sidecar, are
/// reported and skipped. A sidecar that cannot be read, parsed or written is
/// reported and the pass moves on.
pub fn update_fieldmap_json(options: &RunOptions, b0_identifier: &str) -> Result<PassReport> {
    let mut report = PassReport::default();

    for (subject, session) in options.session_units(&mut report)? {
        let func_dir = session.func_dir();
        let fmap_dir = session.fmap_dir();
        if !func_dir.is_dir() || !fmap_dir.is_dir() {
            warn!("Missing func or fmap directory in: {}", session.path.display());
            report.skipped += 1;
            continue;
        }

        let runs = match intended_for(&options.base_dir, &func_dir) {
            Ok(runs) => runs,
            Err(e) => {
                error!("Error listing {}: {}", func_dir.display(), e);
                report.failed += 1;
                continue;
            }
        };

        let path = fmap_dir.join(sidecar_name(subject, &session.id));
        if !path.is_file() {
            warn!("No fieldmap JSON found: {}", path.display());
            report.skipped += 1;
            continue;
        }

        match update_sidecar_file(&path, &runs, b0_identifier, options.dry_run) {
            Ok(SidecarOutcome::Unchanged) => {
                info!("No changes needed for: {}", path.display());
                report.unchanged += 1;
            }
            Ok(SidecarOutcome::Updated) => {
                if options.dry_run {
                    info!("Would update JSON ({} runs): {}", runs.len(), path.display());
                } else {
                    info!("Updated JSON ({} runs): {}", runs.len(), path.display());
                }
                report.record_change(options.dry_run);
            }
            Err(e) => {
                error!("Error updating {}: {}", path.display(), e);
                report.failed += 1;
            }
        }
    }

    Ok(report)
}
