//! Extraction of the DLL names a binary imports, delegated to an external tool

use crate::CopyError;
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

const DLL_NAME_MARKER: &str = "DLL Name:";

/// Something able to tell which DLLs a binary file depends on
pub trait DependencyLister {
    /// Names of the DLLs imported by `file` (relative to `dir`), in import table order
    fn list_dependencies(&self, dir: &Path, file: &str) -> Result<Vec<String>, CopyError>;
}

/// Lists dependencies by running `objdump -p` on the file
#[derive(Debug, Clone)]
pub struct Objdump {
    program: OsString,
}

impl Objdump {
    pub fn new<S: Into<OsString>>(program: S) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for Objdump {
    fn default() -> Self {
        Self::new("objdump")
    }
}

impl DependencyLister for Objdump {
    fn list_dependencies(&self, dir: &Path, file: &str) -> Result<Vec<String>, CopyError> {
        // the program is resolved against our own working directory, not `dir`
        let target = dir.join(file);
        log::trace!("running {:?} -p {}", self.program, target.display());
        let output = Command::new(&self.program)
            .arg("-p")
            .arg(&target)
            .output()
            .map_err(|e| CopyError::InspectionFailed {
                file: file.to_owned(),
                reason: format!("could not run {:?}: {}", self.program, e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            let reason = if stderr.is_empty() {
                output.status.to_string()
            } else {
                format!("{} ({})", stderr, output.status)
            };
            return Err(CopyError::InspectionFailed {
                file: file.to_owned(),
                reason,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_objdump_output(&stdout).map(str::to_owned).collect())
    }
}

/// Parse `objdump -p` output, yielding the names listed in the import tables
///
/// Example objdump output:
/// ```text
/// The Import Tables (interpreted .idata section contents)
///  vma:            Hint    Time      Forward  DLL       First
///                  Table   Stamp     Chain    Name      Thunk
///  00009000       0000903c 00000000 00000000 00009a24 000091e4
///
///         DLL Name: KERNEL32.dll
///         vma:  Hint/Ord Member-Name Bound-To
/// ```
pub fn parse_objdump_output(output: &str) -> impl Iterator<Item = &str> {
    output.lines().filter_map(|line| {
        line.find(DLL_NAME_MARKER)
            .map(|start| line[start + DLL_NAME_MARKER.len()..].trim())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
app.exe:     file format pei-x86-64

The Import Tables (interpreted .idata section contents)
 vma:            Hint    Time      Forward  DLL       First
                 Table   Stamp     Chain    Name      Thunk
 00009000       0000903c 00000000 00000000 00009a24 000091e4

	DLL Name: KERNEL32.dll
	vma:  Hint/Ord Member-Name Bound-To
	9390	  283  DeleteCriticalSection

 00009014       0000911c 00000000 00000000 00009b40 000092c4

	DLL Name: libstdc++-6.dll
	vma:  Hint/Ord Member-Name Bound-To

	DLL Name: Qt5Core.dll
"#;

    #[test]
    fn extracts_dll_names_in_order() {
        let deps: Vec<&str> = parse_objdump_output(SAMPLE).collect();
        assert_eq!(deps, vec!["KERNEL32.dll", "libstdc++-6.dll", "Qt5Core.dll"]);
    }

    #[test]
    fn output_without_imports_yields_nothing() {
        let output = "foo.dll:     file format pei-i386\n\nThere is no import table\n";
        assert_eq!(parse_objdump_output(output).count(), 0);
    }

    #[test]
    fn missing_tool_is_an_inspection_failure() {
        let dir = tempfile::tempdir().unwrap();
        let lister = Objdump::new(dir.path().join("no-such-objdump"));
        match lister.list_dependencies(dir.path(), "app.exe") {
            Err(CopyError::InspectionFailed { file, .. }) => assert_eq!(file, "app.exe"),
            other => panic!("expected an inspection failure, got {:?}", other),
        }
    }

    // `sh -p <file>` runs the artifact itself as a script, standing in for objdump

    #[cfg(unix)]
    fn write_artifact(dir: &Path, name: &str, script: &str) {
        fs_err::write(dir.join(name), script).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn tool_output_is_parsed() -> Result<(), CopyError> {
        let dir = tempfile::tempdir()?;
        write_artifact(dir.path(), "app.exe", "printf '\\tDLL Name: foo.dll\\n'\n");

        let deps = Objdump::new("sh").list_dependencies(dir.path(), "app.exe")?;
        assert_eq!(deps, vec!["foo.dll"]);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_an_inspection_failure() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "corrupt.exe", "echo 'file format not recognized' >&2\nexit 1\n");
        write_artifact(dir.path(), "quiet.exe", "exit 2\n");

        match Objdump::new("sh").list_dependencies(dir.path(), "corrupt.exe") {
            Err(CopyError::InspectionFailed { file, reason }) => {
                assert_eq!(file, "corrupt.exe");
                assert!(reason.starts_with("file format not recognized ("), "{}", reason);
            }
            other => panic!("expected an inspection failure, got {:?}", other),
        }
        match Objdump::new("sh").list_dependencies(dir.path(), "quiet.exe") {
            Err(CopyError::InspectionFailed { reason, .. }) => {
                assert!(!reason.starts_with(' '), "{:?}", reason);
                assert!(reason.contains('2'), "{}", reason);
            }
            other => panic!("expected an inspection failure, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn relative_tool_path_is_resolved_from_our_working_directory() -> Result<(), CopyError> {
        let dir = tempfile::tempdir()?;
        write_artifact(dir.path(), "app.exe", "printf '\\tDLL Name: foo.dll\\n'\n");

        let cwd = std::env::current_dir()?;
        let ups = cwd.components().count() - 1;
        let relative_sh = format!("{}bin/sh", "../".repeat(ups));
        assert!(Path::new(&relative_sh).is_file(), "{} not found", relative_sh);

        let deps = Objdump::new(relative_sh).list_dependencies(dir.path(), "app.exe")?;
        assert_eq!(deps, vec!["foo.dll"]);
        Ok(())
    }
}
