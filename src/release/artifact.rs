//! Canonical naming for the uploaded artifact

use std::path::PathBuf;

/// An artifact renamed for upload, still at its original on-disk path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedArtifact {
  /// Name the artifact gets in remote storage
  pub file_name: String,
  /// Where the built artifact actually lives
  pub source_path: PathBuf,
}

impl RenamedArtifact {
  pub fn new(app_name: &str, version: &str, source_path: PathBuf) -> Self {
    Self {
      file_name: upload_file_name(app_name, version),
      source_path,
    }
  }
}

/// Derive the upload file name from app name and version
///
/// `("WowApp", "1.0.0")` becomes `wowapp_1_0_0.apk`. Total function: the
/// name is lower-cased, dots in the version become underscores, and all
/// whitespace is stripped.
pub fn upload_file_name(app_name: &str, version: &str) -> String {
  let mut file_name = format!("{}_{}.apk", app_name.to_lowercase(), version.replace('.', "_"));
  file_name.retain(|c| !c.is_whitespace());
  file_name
}
