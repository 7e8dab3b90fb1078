//! bidsprep-pp library - BIDS post-processing passes
//!
//! Three independent passes over a converted dataset:
//! - [`rename`]: `fieldmap1`/`fieldmap2` file names become `magnitude`/`fieldmap`
//! - [`scans`]: `*_scans.tsv` `filename` columns follow the rename
//! - [`sidecar`]: field-map JSON gains `IntendedFor` and `B0FieldIdentifier`
//!
//! Every pass is idempotent and honors dry-run.

pub mod elevate;
pub mod error;
pub mod rename;
pub mod report;
pub mod scans;
pub mod sidecar;
pub mod steps;
pub mod tsv;

pub use crate::error::{PostProcessError, Result};
pub use crate::report::PassReport;
pub use crate::steps::Steps;

use bidsprep_common::layout::{resolve_sessions, subject_dir};
use bidsprep_common::{SessionDir, SessionId, SubjectId};
use std::path::PathBuf;
use tracing::info;

/// Inputs shared by every pass
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Dataset root containing one folder per subject
    pub base_dir: PathBuf,
    /// Subjects, processed in the given order
    pub subjects: Vec<SubjectId>,
    /// Explicit sessions; `None` discovers every `ses-*` directory
    pub sessions: Option<Vec<SessionId>>,
    /// Report changes without writing
    pub dry_run: bool,
}

impl RunOptions {
    /// Every existing subject × session pair, in processing order
    ///
    /// Missing subjects and missing explicit sessions are reported, counted as
    /// skipped on `report`, and left out.
    pub(crate) fn session_units(
        &self,
        report: &mut PassReport,
    ) -> Result<Vec<(&SubjectId, SessionDir)>> {
        let mut units = Vec::new();
        for subject in &self.subjects {
            let Some(subject_path) = subject_dir(&self.base_dir, subject) else {
                report.skipped += 1;
                continue;
            };
            let sessions = resolve_sessions(&subject_path, self.sessions.as_deref())?;
            if let Some(requested) = self.sessions.as_deref().filter(|s| !s.is_empty()) {
                report.skipped += requested.len() - sessions.len();
            }
            units.extend(sessions.into_iter().map(|session| (subject, session)));
        }
        Ok(units)
    }
}

/// Reports of the passes that ran
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rename: Option<PassReport>,
    pub scans: Option<PassReport>,
    pub json: Option<PassReport>,
}

/// Run the selected passes in order: rename, scans, json
///
/// Stops at the first fatal error (a failed rename or an unreadable dataset
/// directory); everything else is reported and counted.
pub fn run(options: &RunOptions, steps: Steps, b0_identifier: &str) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    if steps.rename {
        let report = rename::rename_fieldmap_files(options)?;
        info!("Rename fieldmap files: {}", report);
        summary.rename = Some(report);
    }

    if steps.scans {
        let report = scans::update_scans_tsv(options)?;
        info!("Update scans.tsv: {}", report);
        summary.scans = Some(report);
    }

    if steps.json {
        let report = sidecar::update_fieldmap_json(options, b0_identifier)?;
        info!("Update fieldmap JSON: {}", report);
        summary.json = Some(report);
    }

    Ok(summary)
}
