use std::{
    env,
    ffi::OsString,
    fmt::Display,
    fs::OpenOptions,
    io::Write,
    path::PathBuf,
};

use anyhow::Context;

/// Key/value sink for the workflow output file of the hosting CI system.
///
/// Resolved once at startup; every `append` adds a single `key=value` line
/// to the file named by `GITHUB_OUTPUT`.
#[derive(Debug)]
pub struct GithubOutput {
    path: PathBuf,
}

impl GithubOutput {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_var(env::var_os("GITHUB_OUTPUT"))
    }

    fn from_var(value: Option<OsString>) -> anyhow::Result<Self> {
        let path = value.context("GITHUB_OUTPUT environment variable not found")?;
        Ok(Self {
            path: PathBuf::from(path),
        })
    }

    pub fn append(&self, key: &str, value: impl Display) -> anyhow::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open output file {}", self.path.display()))?;

        writeln!(file, "{}={}", key, value)
            .with_context(|| format!("Failed to append to output file {}", self.path.display()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_variable_is_a_config_error() {
        let error = GithubOutput::from_var(None).unwrap_err();

        assert!(error.to_string().contains("GITHUB_OUTPUT"));
    }

    #[test]
    fn append_adds_one_line_per_call() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let sink = GithubOutput::from_var(Some(file.path().as_os_str().to_owned())).unwrap();

        sink.append("available-space", 512u64).unwrap();
        sink.append("available-space", 1024u64).unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(contents, "available-space=512\navailable-space=1024\n");
    }

    #[test]
    fn append_creates_a_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.txt");
        let sink = GithubOutput::from_var(Some(path.clone().into_os_string())).unwrap();

        sink.append("available-space", 7u64).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "available-space=7\n"
        );
    }
}
