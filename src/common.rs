use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CopyError {
    #[error("could not inspect {file}: {reason}")]
    InspectionFailed { file: String, reason: String },

    #[error("invalid target directory: {0}")]
    TargetDirError(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub fn path_to_string<P: AsRef<Path>>(p: P) -> String {
    p.as_ref().to_string_lossy().into_owned()
}

// true if the path text contains "windows" in any casing
pub(crate) fn mentions_windows(p: &Path) -> bool {
    path_to_string(p).to_lowercase().contains("windows")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_mention_is_case_insensitive() {
        assert!(mentions_windows(Path::new("C:\\Windows\\System32")));
        assert!(mentions_windows(Path::new("/mnt/c/WINDOWS")));
        assert!(mentions_windows(Path::new("/opt/mywindowsstuff")));
        assert!(!mentions_windows(Path::new("C:\\msys64\\mingw64\\bin")));
    }
}
