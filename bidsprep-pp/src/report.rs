//! Per-pass outcome counters

use std::fmt;

/// Outcome tally for one post-processing pass
///
/// A "unit" is a file for the renamer and manifest updater and a session's
/// sidecar for the sidecar updater.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Units rewritten on disk
    pub changed: usize,
    /// Units that would be rewritten (dry run)
    pub would_change: usize,
    /// Units already up to date
    pub unchanged: usize,
    /// Units skipped for a structural reason (missing directory, column, collision)
    pub skipped: usize,
    /// Units that failed to read, parse or write
    pub failed: usize,
}

impl PassReport {
    /// Record a unit that needed changing, honoring dry-run
    pub fn record_change(&mut self, dry_run: bool) {
        if dry_run {
            self.would_change += 1;
        } else {
            self.changed += 1;
        }
    }

    /// True when nothing was written and nothing needs to be
    pub fn is_converged(&self) -> bool {
        self.changed == 0 && self.would_change == 0
    }
}

impl fmt::Display for PassReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} changed, {} would change, {} unchanged, {} skipped, {} failed",
            self.changed, self.would_change, self.unchanged, self.skipped, self.failed
        )
    }
}
