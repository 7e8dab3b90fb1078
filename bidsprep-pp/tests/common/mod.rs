//! Dataset fixtures shared by the integration tests

#![allow(dead_code)]

use bidsprep_common::{SessionId, SubjectId};
use bidsprep_pp::RunOptions;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

pub const FIELDMAP_JSON: &str = r#"{
    "EchoTime1": 0.00492,
    "EchoTime2": 0.00738,
    "Units": "Hz"
}"#;

pub const SCANS_TSV: &str = "filename\tacq_time\n\
    anat/sub-01_ses-001_T1w.nii.gz\t2024-03-01T09:58:12\n\
    fmap/sub-01_ses-001_fieldmap1.nii.gz\t2024-03-01T10:02:40\n\
    fmap/sub-01_ses-001_fieldmap2.nii.gz\t2024-03-01T10:02:40\n\
    func/sub-01_ses-001_task-rest_run-01_bold.nii.gz\t2024-03-01T10:05:00\n";

/// Write `contents` to `root/relative`, creating parent directories
pub fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// One subject, one session, straight out of the converter
pub fn converted_dataset() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let ses = "sub-01/ses-001";

    write(root, &format!("{ses}/anat/sub-01_ses-001_T1w.nii.gz"), "t1");
    write(root, &format!("{ses}/fmap/sub-01_ses-001_fieldmap1.nii.gz"), "mag");
    write(root, &format!("{ses}/fmap/sub-01_ses-001_fieldmap1.json"), "{}");
    write(root, &format!("{ses}/fmap/sub-01_ses-001_fieldmap2.nii.gz"), "phase");
    write(root, &format!("{ses}/fmap/sub-01_ses-001_fieldmap2.json"), FIELDMAP_JSON);
    write(root, &format!("{ses}/func/sub-01_ses-001_task-rest_run-02_bold.nii.gz"), "b2");
    write(root, &format!("{ses}/func/sub-01_ses-001_task-rest_run-01_bold.nii.gz"), "b1");
    write(root, &format!("{ses}/func/sub-01_ses-001_task-rest_run-01_bold.json"), "{}");
    write(root, &format!("{ses}/func/sub-01_ses-001_task-rest_run-01_events.tsv"), "onset\n");
    write(root, &format!("{ses}/sub-01_ses-001_scans.tsv"), SCANS_TSV);

    temp_dir
}

pub fn options(root: &Path, subjects: &[&str], sessions: Option<&[&str]>, dry_run: bool) -> RunOptions {
    RunOptions {
        base_dir: root.to_path_buf(),
        subjects: subjects.iter().map(|s| SubjectId::new(s)).collect(),
        sessions: sessions.map(|ids| ids.iter().map(|s| SessionId::new(s)).collect()),
        dry_run,
    }
}

/// Relative path → contents for every file under `root`
pub fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .map(|entry| entry.unwrap())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let relative = entry.path().strip_prefix(root).unwrap().to_path_buf();
            (relative, fs::read(entry.path()).unwrap())
        })
        .collect()
}

pub fn fmap_names(root: &Path, subject: &str, session: &str) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(root.join(subject).join(session).join("fmap"))
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    names
}
