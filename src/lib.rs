extern crate thiserror;

mod runner;

pub mod artifacts;
pub mod common;
pub mod introspect;
pub mod query;
pub mod report;
pub mod search_path;
pub use common::{path_to_string, CopyError};
pub use introspect::{DependencyLister, Objdump};
pub use query::{CopyParameters, CopyQuery, InspectionFailurePolicy};
pub use report::CopyReport;
pub use search_path::SearchPath;

/// Copy into the target directory every missing DLL its binaries depend on, transitively
pub fn copy_dependencies(
    query: &CopyQuery,
    lister: &dyn DependencyLister,
) -> Result<CopyReport, CopyError> {
    runner::Runner::new(query, lister).run()
}
