use crate::artifacts::{discover_local_artifacts, is_present_locally};
use crate::common::CopyError;
use crate::introspect::DependencyLister;
use crate::query::{CopyQuery, InspectionFailurePolicy};
use crate::report::{CopiedFile, CopyReport, InspectionFailure, UnresolvedDependency};
use fs_err as fs;
use std::collections::VecDeque;

/// Copies the missing dependencies of the binaries in the target directory
/// The dependencies are resolved recursively, in a breadth-first fashion: every copied DLL
/// is queued and inspected in turn.
pub(crate) struct Runner<'a> {
    query: &'a CopyQuery,
    lister: &'a dyn DependencyLister,
    files_to_check: VecDeque<String>,
    report: CopyReport,
}

impl<'a> Runner<'a> {
    pub(crate) fn new(query: &'a CopyQuery, lister: &'a dyn DependencyLister) -> Self {
        Self {
            query,
            lister,
            files_to_check: VecDeque::new(),
            report: CopyReport::new(),
        }
    }

    fn enqueue(&mut self, filename: String) {
        self.files_to_check.push_back(filename)
    }

    fn pop(&mut self) -> Option<String> {
        self.files_to_check.pop_front()
    }

    // an inspection failure yields no dependencies unless the policy says to stop
    fn dependencies_of(&mut self, filename: &str) -> Result<Vec<String>, CopyError> {
        match self
            .lister
            .list_dependencies(&self.query.target_dir, filename)
        {
            Ok(deps) => Ok(deps),
            Err(CopyError::InspectionFailed { file, reason }) => {
                println!("exception checking {}", filename);
                log::debug!("{}", reason);
                match self.query.parameters.on_inspection_failure {
                    InspectionFailurePolicy::Continue => {
                        self.report.failed.push(InspectionFailure { file, reason });
                        Ok(Vec::new())
                    }
                    InspectionFailurePolicy::Abort => {
                        Err(CopyError::InspectionFailed { file, reason })
                    }
                }
            }
            Err(e) => Err(e),
        }
    }

    fn copy_dependency(&mut self, dllname: String, required_by: &str) -> Result<(), CopyError> {
        let target_dir = &self.query.target_dir;
        if is_present_locally(target_dir, &dllname) {
            log::trace!("{} already present", dllname);
            return Ok(());
        }
        match self.query.search_path.search_file(&dllname) {
            Some(source) => {
                println!("copying from {}", source.display());
                fs::copy(&source, target_dir.join(&dllname))?;
                self.report.copied.push(CopiedFile {
                    dllname: dllname.clone(),
                    source,
                    required_by: required_by.to_owned(),
                });
                self.enqueue(dllname);
            }
            None => {
                log::debug!("{} (needed by {}) not found on the search path", dllname, required_by);
                self.report.unresolved.push(UnresolvedDependency {
                    dllname,
                    required_by: required_by.to_owned(),
                });
            }
        }
        Ok(())
    }

    pub(crate) fn run(mut self) -> Result<CopyReport, CopyError> {
        for filename in discover_local_artifacts(&self.query.target_dir)? {
            self.enqueue(filename);
        }

        while let Some(filename) = self.pop() {
            println!("checking {}", filename);
            for dllname in self.dependencies_of(&filename)? {
                self.copy_dependency(dllname, &filename)?;
            }
            self.report.checked.push(filename);
        }

        Ok(self.report)
    }
}
