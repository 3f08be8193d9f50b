//! Build Artifact Model
//!
//! Decodes cargo's machine-readable build log (`--message-format json`, one
//! JSON object per line) into the executables the comparison cares about.
//!
//! Each line is decoded independently. Lines that are not recognized
//! artifact records — malformed JSON, no `target` field, a library target,
//! or no concrete output path — decode to `None` and are skipped; they are
//! never a hard error.

use serde::Deserialize;
use std::path::PathBuf;

/// Kind of executable produced by the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutableKind {
    /// A benchmark harness that can list and run cases.
    Bench,
    /// A plain binary target, exposed to benchmark code via environment.
    Bin,
}

/// A single executable produced by one build of one revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Executable {
    /// Target name from the build manifest.
    pub name: String,
    /// Whether this is a benchmark harness or a plain binary.
    pub kind: ExecutableKind,
    /// Filesystem path of the produced file.
    pub path: PathBuf,
}

#[derive(Deserialize)]
struct BuildMessage {
    target: Option<Target>,
    executable: Option<PathBuf>,
}

#[derive(Deserialize)]
struct Target {
    name: String,
    kind: Vec<String>,
}

/// Decode one build-log line into an executable record.
///
/// Returns `None` for anything that is not a produced bench or bin
/// artifact with a concrete output path.
pub fn decode_build_line(line: &str) -> Option<Executable> {
    let message: BuildMessage = serde_json::from_str(line).ok()?;
    let target = message.target?;
    let kind = match target.kind.first().map(String::as_str) {
        Some("bench") => ExecutableKind::Bench,
        Some("bin") => ExecutableKind::Bin,
        _ => return None,
    };
    let path = message.executable?;
    Some(Executable {
        name: target.name,
        kind,
        path,
    })
}

/// Decode a whole captured build log, preserving emission order.
pub fn decode_build_log(log: &str) -> Vec<Executable> {
    log.lines()
        .filter(|line| !line.is_empty())
        .filter_map(decode_build_line)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact_line(name: &str, kind: &str, executable: Option<&str>) -> String {
        match executable {
            Some(path) => format!(
                r#"{{"reason":"compiler-artifact","target":{{"name":"{name}","kind":["{kind}"]}},"executable":"{path}"}}"#
            ),
            None => format!(
                r#"{{"reason":"compiler-artifact","target":{{"name":"{name}","kind":["{kind}"]}},"executable":null}}"#
            ),
        }
    }

    #[test]
    fn decodes_bench_artifact() {
        let line = artifact_line("my_bench", "bench", Some("/tmp/deps/my_bench-abc"));
        let exe = decode_build_line(&line).unwrap();
        assert_eq!(exe.name, "my_bench");
        assert_eq!(exe.kind, ExecutableKind::Bench);
        assert_eq!(exe.path, PathBuf::from("/tmp/deps/my_bench-abc"));
    }

    #[test]
    fn decodes_bin_artifact() {
        let line = artifact_line("helper", "bin", Some("/tmp/helper"));
        let exe = decode_build_line(&line).unwrap();
        assert_eq!(exe.kind, ExecutableKind::Bin);
    }

    #[test]
    fn skips_library_artifacts() {
        let line = artifact_line("mylib", "lib", Some("/tmp/libmylib.rlib"));
        assert!(decode_build_line(&line).is_none());
    }

    #[test]
    fn skips_artifacts_without_output_path() {
        let line = artifact_line("my_bench", "bench", None);
        assert!(decode_build_line(&line).is_none());
    }

    #[test]
    fn skips_lines_without_target() {
        assert!(decode_build_line(r#"{"reason":"build-finished","success":true}"#).is_none());
    }

    #[test]
    fn skips_malformed_lines() {
        assert!(decode_build_line("not json at all").is_none());
        assert!(decode_build_line("").is_none());
    }

    #[test]
    fn log_decoding_preserves_emission_order() {
        let log = [
            artifact_line("b", "bench", Some("/t/b")),
            r#"{"reason":"build-finished","success":true}"#.to_string(),
            artifact_line("a", "bin", Some("/t/a")),
        ]
        .join("\n");

        let executables = decode_build_log(&log);
        assert_eq!(executables.len(), 2);
        assert_eq!(executables[0].name, "b");
        assert_eq!(executables[1].name, "a");
    }
}
