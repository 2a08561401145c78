use crate::common::mentions_windows;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Directory to be searched for a missing DLL
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum SearchPathEntry {
    /// Additional path entries specified by the user
    UserPath(PathBuf),
    /// PATH as seen by the process (value of the PATH variable)
    SystemPath(PathBuf),
}

impl SearchPathEntry {
    pub fn get_path(&self) -> &Path {
        match self {
            Self::UserPath(p) | Self::SystemPath(p) => p,
        }
    }
}

/// Sorted list of directories to be looked up when searching for a DLL
///
/// Entries mentioning "windows" (in any casing) are never part of it: the DLLs
/// shipped with the OS must not be copied into the build output.
///
/// Relative entries (such as `.` or `bin`) are kept as they are, so they resolve against the
/// working directory of the process and not against the target directory of a copy run.
#[derive(Debug, Clone, Default)]
pub struct SearchPath {
    entries: Vec<SearchPathEntry>,
}

impl SearchPath {
    /// Builds the search path from a PATH-like value, split per platform convention
    pub fn from_path_var(path_var: &OsStr) -> Self {
        Self {
            entries: filtered_entries(path_var)
                .map(SearchPathEntry::SystemPath)
                .collect(),
        }
    }

    /// Builds the search path from the PATH variable of the current process
    pub fn from_env() -> Self {
        std::env::var_os("PATH")
            .map(|p| Self::from_path_var(&p))
            .unwrap_or_default()
    }

    /// Puts the given directories in front of the current entries, keeping their order
    pub fn prepend_user_path(&mut self, user_path: &OsStr) {
        let mut entries: Vec<SearchPathEntry> = filtered_entries(user_path)
            .map(SearchPathEntry::UserPath)
            .collect();
        entries.append(&mut self.entries);
        self.entries = entries;
    }

    pub fn entries(&self) -> &[SearchPathEntry] {
        &self.entries
    }

    pub fn dirs(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|e| e.get_path())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the full path of the first directory containing a file with exactly this name
    pub fn search_file(&self, filename: &str) -> Option<PathBuf> {
        self.dirs().map(|d| d.join(filename)).find(|candidate| {
            log::trace!("probing {}", candidate.display());
            candidate.is_file()
        })
    }
}

fn filtered_entries(path_var: &OsStr) -> impl Iterator<Item = PathBuf> + '_ {
    std::env::split_paths(path_var).filter(|p| {
        if p.as_os_str().is_empty() {
            false
        } else if mentions_windows(p) {
            log::debug!("excluding {} from the search path", p.display());
            false
        } else {
            true
        }
    })
}
