//! CLI behavior: flag validation and pre-network failure exit codes

use crate::helpers::{TestRelease, run_courier};
use anyhow::Result;

#[test]
fn test_missing_manifest_exits_with_manifest_code() -> Result<()> {
  let release = TestRelease::new()?;
  release.write_changelog("Fix A\n##\nOld\n")?;
  release.write_template("{app_name} {app_version}")?;

  let output = run_courier(&release.deploy_args())?;

  assert_eq!(output.status.code(), Some(4));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("output.json"), "stderr should name the manifest, got: {}", stderr);
  Ok(())
}

#[test]
fn test_garbage_manifest_exits_with_manifest_code() -> Result<()> {
  let release = TestRelease::new()?;
  release.write_manifest("{ not json")?;
  release.write_changelog("Fix A\n##\nOld\n")?;
  release.write_template("{app_name}")?;

  let output = run_courier(&release.deploy_args())?;

  assert_eq!(output.status.code(), Some(4));
  Ok(())
}

#[test]
fn test_unrecognized_schema_exits_with_manifest_code() -> Result<()> {
  let release = TestRelease::new()?;
  release.write_manifest(r#"{"artifacts": [{"file": "app.apk"}]}"#)?;
  release.write_changelog("Fix A\n##\nOld\n")?;
  release.write_template("{app_name}")?;

  let output = run_courier(&release.deploy_args())?;

  assert_eq!(output.status.code(), Some(4));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(
    stderr.contains("Unrecognized"),
    "stderr should report the schema mismatch, got: {}",
    stderr
  );
  Ok(())
}

#[test]
fn test_all_flags_are_required() -> Result<()> {
  let output = run_courier(&[])?;

  assert!(!output.status.success());
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("--release.dir"), "stderr should name missing flags, got: {}", stderr);
  Ok(())
}

#[test]
fn test_help_lists_every_flag() -> Result<()> {
  let output = run_courier(&["--help".to_string()])?;

  assert!(output.status.success());
  let stdout = String::from_utf8_lossy(&output.stdout);
  for flag in [
    "--release.dir",
    "--app.name",
    "--changelog.file",
    "--template.file",
    "--dropbox.token",
    "--dropbox.folder",
    "--bot.code",
    "--bot.chat_id",
  ] {
    assert!(stdout.contains(flag), "help should list {}", flag);
  }
  Ok(())
}
