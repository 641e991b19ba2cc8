//! Common testing utilities for mi-agent integration tests.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test context that manages temporary files and directories.
pub struct TestContext {
    /// Path to temporary directory
    pub temp_path: PathBuf,
    /// The temporary directory (kept to prevent early deletion)
    _temp_dir: TempDir,
}

impl TestContext {
    /// Create a new test context with a temporary directory.
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = TempDir::new()?;
        let temp_path = temp_dir.path().to_path_buf();

        Ok(Self {
            temp_path,
            _temp_dir: temp_dir,
        })
    }

    /// Create a test file with content.
    pub fn create_file(&self, name: &str, content: &str) -> anyhow::Result<PathBuf> {
        let file_path = self.temp_path.join(name);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(&file_path)?;
        file.write_all(content.as_bytes())?;
        Ok(file_path)
    }

    /// Create a secrets file from `(key, value)` pairs.
    #[allow(dead_code)]
    pub fn create_env_file(
        &self,
        name: &str,
        secrets: &[(impl AsRef<str>, impl AsRef<str>)],
    ) -> anyhow::Result<PathBuf> {
        let content = secrets
            .iter()
            .map(|(k, v)| format!("{}={}\n", k.as_ref(), v.as_ref()))
            .collect::<String>();

        self.create_file(name, &content)
    }

    /// Create a directory (and parents) inside the temp directory.
    #[allow(dead_code)]
    pub fn create_dir(&self, name: &str) -> anyhow::Result<PathBuf> {
        let dir = self.temp_path.join(name);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Get the path to a file in the temp directory.
    #[allow(dead_code)]
    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_path.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_context_create_file() {
        let ctx = TestContext::new().unwrap();
        let file_path = ctx.create_file("nested/test.txt", "Hello, World!").unwrap();

        assert!(file_path.exists());
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "Hello, World!");
    }

    #[test]
    fn test_create_env_file() {
        let ctx = TestContext::new().unwrap();
        let path = ctx
            .create_env_file(".env", &[("KEY1", "value1"), ("KEY2", "value2")])
            .unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert_eq!(content, "KEY1=value1\nKEY2=value2\n");
    }
}
