//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// A scratch release directory with manifest, artifact, changelog, template
pub struct TestRelease {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestRelease {
  /// Create an empty release directory
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    Ok(Self { _root: root, path })
  }

  /// Write the build output manifest
  pub fn write_manifest(&self, json: &str) -> Result<()> {
    std::fs::write(self.path.join("output.json"), json)?;
    Ok(())
  }

  /// Write the changelog file, returning its path
  pub fn write_changelog(&self, content: &str) -> Result<PathBuf> {
    let path = self.path.join("CHANGELOG.md");
    std::fs::write(&path, content)?;
    Ok(path)
  }

  /// Write the announcement template, returning its path
  pub fn write_template(&self, content: &str) -> Result<PathBuf> {
    let path = self.path.join("template.txt");
    std::fs::write(&path, content)?;
    Ok(path)
  }

  /// Full flag set for a deploy run against this release directory
  pub fn deploy_args(&self) -> Vec<String> {
    vec![
      "--release.dir".to_string(),
      self.path.display().to_string(),
      "--app.name".to_string(),
      "WowApp".to_string(),
      "--changelog.file".to_string(),
      self.path.join("CHANGELOG.md").display().to_string(),
      "--template.file".to_string(),
      self.path.join("template.txt").display().to_string(),
      "--dropbox.token".to_string(),
      "test-token".to_string(),
      "--dropbox.folder".to_string(),
      "builds".to_string(),
      "--bot.code".to_string(),
      "test-bot".to_string(),
      "--bot.chat_id".to_string(),
      "42".to_string(),
    ]
  }
}

/// Run the courier binary; callers inspect the exit status themselves
pub fn run_courier(args: &[String]) -> Result<Output> {
  let courier_bin = env!("CARGO_BIN_EXE_courier");

  Command::new(courier_bin)
    .args(args)
    .output()
    .context("Failed to run courier")
}
