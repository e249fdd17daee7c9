//! Local inputs: files named on the command line and timestamps.

use std::path::Path;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::shell::error::{CliError, CliResult};

/// Read a whole file as UTF-8.
pub async fn read_file(path: &Path) -> CliResult<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::InputFile {
            path: path.display().to_string(),
            source,
        })
}

/// Write `contents` to `path`, replacing any existing file.
pub async fn write_file(path: &Path, contents: &str) -> CliResult<()> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| CliError::OutputFile {
            path: path.display().to_string(),
            source,
        })
}

/// Validate an RFC 3339 timestamp and return it in canonical form.
pub fn parse_time(flag: &str, value: &str) -> CliResult<String> {
    let parsed = OffsetDateTime::parse(value, &Rfc3339)
        .map_err(|err| CliError::invalid(format!("--{flag}: {err}")))?;
    parsed
        .format(&Rfc3339)
        .map_err(|err| CliError::invalid(format!("--{flag}: {err}")))
}

pub fn parse_time_opt(flag: &str, value: Option<&str>) -> CliResult<Option<String>> {
    value.map(|value| parse_time(flag, value)).transpose()
}

/// Split a `name=value` flag value.
pub fn split_pair<'a>(flag: &str, raw: &'a str) -> CliResult<(&'a str, &'a str)> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() && !value.is_empty() => Ok((name, value)),
        _ => Err(CliError::invalid(format!(
            "--{flag} expects name=value, got '{raw}'"
        ))),
    }
}

/// `$VISUAL`, then `$EDITOR`, then `vi`.
pub fn editor_command() -> String {
    std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .ok()
        .filter(|editor| !editor.trim().is_empty())
        .unwrap_or_else(|| "vi".to_string())
}

/// Let the user edit `initial` in `editor` and return the saved text.
/// `editor` may carry arguments, e.g. `code --wait`.
pub async fn edit_text(editor: &str, initial: &str) -> CliResult<String> {
    let mut words = editor.split_whitespace();
    let program = words
        .next()
        .ok_or_else(|| CliError::invalid("no editor configured"))?;
    let scratch = tempfile::Builder::new()
        .prefix("cloudadm-")
        .suffix(".yaml")
        .tempfile()
        .map_err(|source| CliError::OutputFile {
            path: std::env::temp_dir().display().to_string(),
            source,
        })?;
    write_file(scratch.path(), initial).await?;

    let status = tokio::process::Command::new(program)
        .args(words)
        .arg(scratch.path())
        .status()
        .await
        .map_err(|err| CliError::invalid(format!("cannot start editor '{program}': {err}")))?;
    if !status.success() {
        return Err(CliError::invalid(format!(
            "editor '{program}' exited with {status}"
        )));
    }
    read_file(scratch.path()).await
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[tokio::test]
    async fn read_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().expect("tmp");
        write!(file, "hosts: all").expect("write");
        assert_eq!(read_file(file.path()).await.expect("read"), "hosts: all");

        let err = read_file(Path::new("/nonexistent/playbook.yaml"))
            .await
            .expect_err("missing");
        assert!(err.to_string().starts_with("input error: failed to read /nonexistent/playbook.yaml"));
    }

    #[tokio::test]
    async fn write_file_round_trips_and_reports_path() {
        let dir = tempfile::tempdir().expect("tmp");
        let target = dir.path().join("policy.yaml");
        write_file(&target, "scope: project\n").await.expect("write");
        assert_eq!(read_file(&target).await.expect("read"), "scope: project\n");

        let err = write_file(Path::new("/nonexistent/dir/policy.yaml"), "x")
            .await
            .expect_err("missing dir");
        assert!(err.to_string().starts_with("output error: failed to write"));
    }

    #[test]
    fn times_are_validated_and_normalized() {
        assert_eq!(
            parse_time("start-time", "2024-05-01T08:00:00+00:00").expect("time"),
            "2024-05-01T08:00:00Z"
        );
        let err = parse_time("start-time", "yesterday").expect_err("bad");
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("--start-time"));
        assert_eq!(parse_time_opt("end-time", None).expect("none"), None);
    }

    #[test]
    fn pairs_need_both_sides() {
        assert_eq!(split_pair("file", "a.yml=./a.yml").expect("pair"), ("a.yml", "./a.yml"));
        assert!(split_pair("file", "a.yml").is_err());
        assert!(split_pair("file", "=x").is_err());
    }

    #[tokio::test]
    async fn edit_text_returns_the_saved_file() {
        let kept = edit_text("true", "driver: ldap\n").await.expect("edit");
        assert_eq!(kept, "driver: ldap\n");

        let err = edit_text("false", "driver: ldap\n")
            .await
            .expect_err("editor failed");
        assert_eq!(err.exit_code(), 2);

        let err = edit_text("   ", "").await.expect_err("no editor");
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }
}
