use crate::CopyError;
use fs_err as fs;
use std::path::Path;

// plain suffix check, so "notexe" matches too
fn is_interesting_filename(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    lower.ends_with("exe") || lower.ends_with("dll")
}

/// Names of the regular files in `dir` that look like executables or DLLs, sorted
pub fn discover_local_artifacts(dir: &Path) -> Result<Vec<String>, CopyError> {
    let mut found = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        // follows symlinks
        if !entry.path().is_file() {
            continue;
        }
        match entry.file_name().to_str() {
            Some(name) if is_interesting_filename(name) => found.push(name.to_owned()),
            Some(_) => {}
            None => log::warn!("skipping non UTF-8 file name {:?}", entry.file_name()),
        }
    }
    found.sort();
    Ok(found)
}

/// Whether a file with exactly this name already sits in `dir`
pub fn is_present_locally(dir: &Path, filename: &str) -> bool {
    dir.join(filename).is_file()
}
