//! Ansible playbooks, on the ansible service and on the devtool service.

mod playbooks;
mod playbooks_v2;

use std::path::Path;

use serde_json::{Map, Value};

use crate::commands::input::{read_file, split_pair};
use crate::shell::{CliResult, Registry, RegistryError};

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    playbooks::register(registry)?;
    playbooks_v2::register(registry)
}

/// Read every `--file name=path` into `{name: contents}`.
async fn read_named_files(raw: &[String]) -> CliResult<Map<String, Value>> {
    let mut files = Map::new();
    for entry in raw {
        let (name, path) = split_pair("file", entry)?;
        let contents = read_file(Path::new(path)).await?;
        files.insert(name.to_string(), Value::String(contents));
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::read_named_files;

    #[tokio::test]
    async fn named_files_are_read_by_name() {
        let mut file = tempfile::NamedTempFile::new().expect("tmp");
        write!(file, "[defaults]").expect("write");
        let spec = format!("ansible.cfg={}", file.path().display());

        let files = read_named_files(&[spec]).await.expect("read");
        assert_eq!(files["ansible.cfg"], "[defaults]");

        let err = read_named_files(&["no-path".to_string()])
            .await
            .expect_err("malformed");
        assert_eq!(err.exit_code(), 2);
    }
}
