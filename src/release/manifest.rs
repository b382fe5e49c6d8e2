//! Build-output manifest parsing
//!
//! The Android Gradle plugin has shipped (at least) three shapes of
//! `output.json` over the years. Each shape gets its own descriptor variant;
//! anything else is an explicit `UnrecognizedSchema` error, never a guess.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::core::error::ManifestError;

/// File name of the build output manifest inside the release directory
pub const OUTPUT_MANIFEST: &str = "output.json";

/// A parsed build-output manifest, tagged by schema shape
///
/// Probing order is fixed: `elements` first, then `apkInfo`, then `apkData`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildDescriptor {
  /// Top-level `elements` list; the version is embedded in the output file name
  Elements { output_file: String },

  /// List whose first item carries an `apkInfo` object
  ApkInfo { version_name: String, output_file: String },

  /// List whose first item carries an `apkData` object
  ApkData { version_name: String, output_file: String },
}

/// Version and artifact path extracted from a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedArtifact {
  pub version: String,
  pub path: PathBuf,
}

/// Read `output.json` from the release directory and locate the artifact
pub fn locate(release_dir: &Path) -> Result<LocatedArtifact, ManifestError> {
  let manifest_path = release_dir.join(OUTPUT_MANIFEST);

  let raw = fs::read_to_string(&manifest_path).map_err(|source| ManifestError::Unreadable {
    path: manifest_path.clone(),
    source,
  })?;

  let json: Value = serde_json::from_str(&raw).map_err(|source| ManifestError::Parse {
    path: manifest_path.clone(),
    source,
  })?;

  let descriptor = BuildDescriptor::parse(&json).ok_or(ManifestError::UnrecognizedSchema { path: manifest_path })?;

  descriptor.resolve(release_dir)
}

impl BuildDescriptor {
  /// Match the manifest JSON against the known schema shapes
  ///
  /// Returns `None` when no shape matches; the caller maps that to
  /// `ManifestError::UnrecognizedSchema`.
  pub fn parse(json: &Value) -> Option<Self> {
    if let Some(elements) = json.get("elements").and_then(Value::as_array) {
      let output_file = elements.first()?.get("outputFile")?.as_str()?;
      return Some(BuildDescriptor::Elements {
        output_file: output_file.to_string(),
      });
    }

    let first = json.as_array()?.first()?;

    if let Some(details) = first.get("apkInfo") {
      let (version_name, output_file) = apk_details(details)?;
      return Some(BuildDescriptor::ApkInfo {
        version_name,
        output_file,
      });
    }

    if let Some(details) = first.get("apkData") {
      let (version_name, output_file) = apk_details(details)?;
      return Some(BuildDescriptor::ApkData {
        version_name,
        output_file,
      });
    }

    None
  }

  /// Resolve the descriptor into a version string and an on-disk artifact path
  pub fn resolve(&self, release_dir: &Path) -> Result<LocatedArtifact, ManifestError> {
    match self {
      BuildDescriptor::Elements { output_file } => {
        // versionName is absent in this shape; the file name carries the
        // version as its second underscore token, dashes standing in for dots
        let token = output_file
          .split('_')
          .nth(1)
          .filter(|t| !t.is_empty())
          .ok_or_else(|| ManifestError::MalformedOutputFile {
            output_file: output_file.clone(),
          })?;

        Ok(LocatedArtifact {
          version: token.replace('-', "."),
          path: release_dir.join(output_file),
        })
      }
      BuildDescriptor::ApkInfo {
        version_name,
        output_file,
      }
      | BuildDescriptor::ApkData {
        version_name,
        output_file,
      } => Ok(LocatedArtifact {
        version: version_name.clone(),
        path: release_dir.join(output_file),
      }),
    }
  }
}

fn apk_details(details: &Value) -> Option<(String, String)> {
  let version_name = details.get("versionName")?.as_str()?.to_string();
  let output_file = details.get("outputFile")?.as_str()?.to_string();
  Some((version_name, output_file))
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_parse_elements_shape() {
    let json = json!({
      "elements": [{"outputFile": "app_1.2.3-beta_release.apk", "versionCode": 42}]
    });

    let descriptor = BuildDescriptor::parse(&json).expect("elements shape should parse");
    let located = descriptor.resolve(Path::new("/release")).expect("should resolve");

    assert_eq!(located.version, "1.2.3.beta");
    assert_eq!(located.path, PathBuf::from("/release/app_1.2.3-beta_release.apk"));
  }

  #[test]
  fn test_parse_apk_info_shape() {
    let json = json!([
      {"apkInfo": {"versionName": "2.0.1", "outputFile": "app-release.apk"}}
    ]);

    let descriptor = BuildDescriptor::parse(&json).expect("apkInfo shape should parse");
    assert_eq!(
      descriptor,
      BuildDescriptor::ApkInfo {
        version_name: "2.0.1".to_string(),
        output_file: "app-release.apk".to_string(),
      }
    );

    let located = descriptor.resolve(Path::new("out")).expect("should resolve");
    assert_eq!(located.version, "2.0.1");
    assert_eq!(located.path, PathBuf::from("out/app-release.apk"));
  }

  #[test]
  fn test_parse_apk_data_shape() {
    let json = json!([
      {"apkData": {"versionName": "0.9.0", "outputFile": "app.apk"}}
    ]);

    let descriptor = BuildDescriptor::parse(&json).expect("apkData shape should parse");
    assert!(matches!(descriptor, BuildDescriptor::ApkData { .. }));
  }

  #[test]
  fn test_elements_wins_over_other_shapes() {
    // probing order is fixed, an object with `elements` never falls through
    let json = json!({
      "elements": [{"outputFile": "app_1.0.0_release.apk"}]
    });

    assert!(matches!(
      BuildDescriptor::parse(&json),
      Some(BuildDescriptor::Elements { .. })
    ));
  }

  #[test]
  fn test_unrecognized_shapes_do_not_parse() {
    assert_eq!(BuildDescriptor::parse(&json!({"outputs": []})), None);
    assert_eq!(BuildDescriptor::parse(&json!([{"bundleInfo": {}}])), None);
    assert_eq!(BuildDescriptor::parse(&json!([])), None);
    assert_eq!(BuildDescriptor::parse(&json!("just a string")), None);
  }

  #[test]
  fn test_elements_without_version_token_is_malformed() {
    let descriptor = BuildDescriptor::Elements {
      output_file: "noversion.apk".to_string(),
    };

    let err = descriptor.resolve(Path::new(".")).expect_err("should fail");
    assert!(matches!(err, ManifestError::MalformedOutputFile { .. }));
  }

  #[test]
  fn test_locate_reads_output_json() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(
      dir.path().join(OUTPUT_MANIFEST),
      r#"[{"apkInfo": {"versionName": "1.4.0", "outputFile": "wow.apk"}}]"#,
    )?;

    let located = locate(dir.path())?;
    assert_eq!(located.version, "1.4.0");
    assert_eq!(located.path, dir.path().join("wow.apk"));
    Ok(())
  }

  #[test]
  fn test_locate_missing_manifest() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = locate(dir.path()).expect_err("should fail");
    assert!(matches!(err, ManifestError::Unreadable { .. }));
  }

  #[test]
  fn test_locate_invalid_json() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join(OUTPUT_MANIFEST), "not json at all {")?;

    let err = locate(dir.path()).expect_err("should fail");
    assert!(matches!(err, ManifestError::Parse { .. }));
    Ok(())
  }
}
