//! Pass selection

/// Which passes to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Steps {
    pub rename: bool,
    pub scans: bool,
    pub json: bool,
}

impl Steps {
    /// All three passes
    pub fn all() -> Self {
        Self {
            rename: true,
            scans: true,
            json: true,
        }
    }

    /// Resolve the step-selection flags: none set means run everything
    pub fn from_flags(rename: bool, scans: bool, json: bool) -> Self {
        if rename || scans || json {
            Self {
                rename,
                scans,
                json,
            }
        } else {
            Self::all()
        }
    }
}

impl Default for Steps {
    fn default() -> Self {
        Self::all()
    }
}
