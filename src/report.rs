use serde::Serialize;
use std::path::PathBuf;

/// A DLL copied into the target directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopiedFile {
    /// Name as it appears in the import table
    pub dllname: String,
    /// Where it was found on the search path
    pub source: PathBuf,
    /// The local file whose import table mentioned it
    pub required_by: String,
}

/// A DLL that is neither in the target directory nor on the search path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedDependency {
    pub dllname: String,
    pub required_by: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectionFailure {
    pub file: String,
    pub reason: String,
}

/// Outcome of a copy run, in processing order
#[derive(Debug, Clone, Default, Serialize)]
pub struct CopyReport {
    /// Files whose dependencies were inspected
    pub checked: Vec<String>,
    pub copied: Vec<CopiedFile>,
    pub unresolved: Vec<UnresolvedDependency>,
    pub failed: Vec<InspectionFailure>,
}

impl CopyReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copied_names(&self) -> Vec<&str> {
        self.copied.iter().map(|c| c.dllname.as_str()).collect()
    }

    pub fn unresolved_names(&self) -> Vec<&str> {
        self.unresolved.iter().map(|u| u.dllname.as_str()).collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
