//! Data structures that must be filled with the input and the parameters for the copy run

use crate::common::CopyError;
use crate::search_path::SearchPath;
use std::path::{Path, PathBuf};

/// What to do when the introspection tool fails on a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum InspectionFailurePolicy {
    /// Report the file, treat it as having no dependencies and go on
    #[default]
    Continue,
    /// Report the file and stop the run with an error
    Abort,
}

#[derive(Clone, Debug, Default)]
pub struct CopyParameters {
    pub on_inspection_failure: InspectionFailurePolicy,
}

/// Complete specification of a copy task
#[derive(Clone, Debug)]
pub struct CopyQuery {
    /// Build output directory: scanned for binaries, and destination of the copies
    pub target_dir: PathBuf,
    /// Where missing DLLs are looked for
    pub search_path: SearchPath,
    pub parameters: CopyParameters,
}

impl CopyQuery {
    pub fn new<P: AsRef<Path>>(target_dir: P, search_path: SearchPath) -> Result<Self, CopyError> {
        let target_dir = target_dir.as_ref();
        if !target_dir.is_dir() {
            return Err(CopyError::TargetDirError(target_dir.to_owned()));
        }
        Ok(Self {
            target_dir: target_dir.to_owned(),
            search_path,
            parameters: CopyParameters::default(),
        })
    }

    /// autodetects the settings: current working directory, PATH of the current process
    pub fn from_environment() -> Result<Self, CopyError> {
        Self::new(std::env::current_dir()?, SearchPath::from_env())
    }
}
