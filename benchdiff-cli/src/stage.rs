//! Artifact Staging
//!
//! Copies discovered executables out of the live build-output directory
//! into a fresh, uniquely named staging directory under `target/`. A later
//! checkout of the other revision may overwrite or delete the original
//! build outputs; the staged copies survive it.
//!
//! The directory is created collision-free via `tempfile` and kept on
//! disk (the executables must outlive this function). Copy failures are
//! fatal — a partially staged suite would produce a partial report.

use benchdiff_core::Executable;
use std::fs;
use std::io;
use std::path::Path;

/// Copy every executable into a fresh staging directory, returning new
/// records pointing at the copies. The originals are not touched.
///
/// `std::fs::copy` carries the permission bits over, so the staged files
/// stay executable.
pub fn stage_executables(
    executables: &[Executable],
    cwd: Option<&Path>,
) -> io::Result<Vec<Executable>> {
    let target = cwd.unwrap_or_else(|| Path::new(".")).join("target");
    fs::create_dir_all(&target)?;

    let staging_dir = tempfile::Builder::new()
        .prefix("benchdiff-")
        .tempdir_in(&target)?
        .keep();
    tracing::debug!(dir = %staging_dir.display(), "staging executables");

    let mut staged = Vec::with_capacity(executables.len());
    for executable in executables {
        let file_name = executable.path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("executable path has no file name: {}", executable.path.display()),
            )
        })?;
        let staged_path = staging_dir.join(file_name);
        fs::copy(&executable.path, &staged_path)?;
        staged.push(Executable {
            path: staged_path,
            ..executable.clone()
        });
    }
    Ok(staged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchdiff_core::ExecutableKind;

    #[test]
    fn stages_copies_under_target_and_keeps_originals() {
        let workdir = tempfile::tempdir().unwrap();
        let original = workdir.path().join("suite-1234");
        fs::write(&original, b"#!/bin/sh\nexit 0\n").unwrap();

        let executables = vec![Executable {
            name: "suite".to_string(),
            kind: ExecutableKind::Bench,
            path: original.clone(),
        }];

        let staged = stage_executables(&executables, Some(workdir.path())).unwrap();
        assert_eq!(staged.len(), 1);
        assert_ne!(staged[0].path, original);
        assert!(staged[0].path.starts_with(workdir.path().join("target")));
        assert!(staged[0].path.ends_with("suite-1234"));
        assert!(staged[0].path.exists());
        assert!(original.exists());
        // Name and kind survive relocation.
        assert_eq!(staged[0].name, "suite");
        assert_eq!(staged[0].kind, ExecutableKind::Bench);
    }

    #[test]
    fn each_invocation_gets_a_fresh_directory() {
        let workdir = tempfile::tempdir().unwrap();
        let original = workdir.path().join("bin");
        fs::write(&original, b"x").unwrap();
        let executables = vec![Executable {
            name: "bin".to_string(),
            kind: ExecutableKind::Bin,
            path: original,
        }];

        let first = stage_executables(&executables, Some(workdir.path())).unwrap();
        let second = stage_executables(&executables, Some(workdir.path())).unwrap();
        assert_ne!(first[0].path, second[0].path);
    }

    #[test]
    fn missing_source_file_is_fatal() {
        let workdir = tempfile::tempdir().unwrap();
        let executables = vec![Executable {
            name: "ghost".to_string(),
            kind: ExecutableKind::Bench,
            path: workdir.path().join("does-not-exist"),
        }];
        assert!(stage_executables(&executables, Some(workdir.path())).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn permission_bits_survive_the_copy() {
        use std::os::unix::fs::PermissionsExt;

        let workdir = tempfile::tempdir().unwrap();
        let original = workdir.path().join("runnable");
        fs::write(&original, b"#!/bin/sh\n").unwrap();
        fs::set_permissions(&original, fs::Permissions::from_mode(0o755)).unwrap();

        let executables = vec![Executable {
            name: "runnable".to_string(),
            kind: ExecutableKind::Bench,
            path: original,
        }];
        let staged = stage_executables(&executables, Some(workdir.path())).unwrap();
        let mode = fs::metadata(&staged[0].path).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}
