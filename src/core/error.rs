//! Error types for courier with contextual messages and exit codes
//!
//! Every pipeline stage has its own error category, and every category maps
//! to a distinct process exit code so CI scripts can tell apart a bad build
//! manifest from a rejected upload or an undeliverable announcement.

use std::fmt;
use std::io;
use std::path::PathBuf;

use reqwest::StatusCode;

/// Exit codes for courier, one per pipeline stage that can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// Dropbox delete/upload/share failure
  Storage = 1,
  /// Template rendering failure
  Template = 2,
  /// Changelog extraction failure
  Changelog = 3,
  /// Build manifest parsing failure
  Manifest = 4,
  /// Telegram delivery failure
  Notification = 5,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for courier
#[derive(Debug)]
pub enum CourierError {
  /// Build-output manifest errors
  Manifest(ManifestError),

  /// Dropbox storage errors
  Storage(StorageError),

  /// Changelog extraction errors
  Changelog(ChangelogError),

  /// Message template errors
  Template(TemplateError),

  /// Telegram notification errors
  Notification(NotifyError),
}

impl CourierError {
  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      CourierError::Manifest(_) => ExitCode::Manifest,
      CourierError::Storage(_) => ExitCode::Storage,
      CourierError::Changelog(_) => ExitCode::Changelog,
      CourierError::Template(_) => ExitCode::Template,
      CourierError::Notification(_) => ExitCode::Notification,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      CourierError::Manifest(e) => e.help_message(),
      CourierError::Storage(e) => e.help_message(),
      CourierError::Changelog(e) => e.help_message(),
      CourierError::Template(e) => e.help_message(),
      CourierError::Notification(e) => e.help_message(),
    }
  }
}

impl fmt::Display for CourierError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CourierError::Manifest(e) => write!(f, "{}", e),
      CourierError::Storage(e) => write!(f, "{}", e),
      CourierError::Changelog(e) => write!(f, "{}", e),
      CourierError::Template(e) => write!(f, "{}", e),
      CourierError::Notification(e) => write!(f, "{}", e),
    }
  }
}

impl std::error::Error for CourierError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      CourierError::Manifest(ManifestError::Unreadable { source, .. }) => Some(source),
      CourierError::Manifest(ManifestError::Parse { source, .. }) => Some(source),
      CourierError::Storage(StorageError::ReadArtifact { source, .. }) => Some(source),
      CourierError::Storage(StorageError::Transport { source }) => Some(source),
      CourierError::Changelog(ChangelogError::Read { source, .. }) => Some(source),
      CourierError::Template(TemplateError::Read { source, .. }) => Some(source),
      CourierError::Notification(NotifyError::Transport { source }) => Some(source),
      _ => None,
    }
  }
}

impl std::error::Error for ManifestError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ManifestError::Unreadable { source, .. } => Some(source),
      ManifestError::Parse { source, .. } => Some(source),
      _ => None,
    }
  }
}

impl std::error::Error for StorageError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      StorageError::ReadArtifact { source, .. } => Some(source),
      StorageError::Transport { source } => Some(source),
      _ => None,
    }
  }
}

impl std::error::Error for ChangelogError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ChangelogError::Read { source, .. } => Some(source),
    }
  }
}

impl std::error::Error for TemplateError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      TemplateError::Read { source, .. } => Some(source),
      _ => None,
    }
  }
}

impl std::error::Error for NotifyError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      NotifyError::Transport { source } => Some(source),
      _ => None,
    }
  }
}

impl From<ManifestError> for CourierError {
  fn from(err: ManifestError) -> Self {
    CourierError::Manifest(err)
  }
}

impl From<StorageError> for CourierError {
  fn from(err: StorageError) -> Self {
    CourierError::Storage(err)
  }
}

impl From<ChangelogError> for CourierError {
  fn from(err: ChangelogError) -> Self {
    CourierError::Changelog(err)
  }
}

impl From<TemplateError> for CourierError {
  fn from(err: TemplateError) -> Self {
    CourierError::Template(err)
  }
}

impl From<NotifyError> for CourierError {
  fn from(err: NotifyError) -> Self {
    CourierError::Notification(err)
  }
}

/// Build-output manifest errors
#[derive(Debug)]
pub enum ManifestError {
  /// output.json missing or unreadable
  Unreadable { path: PathBuf, source: io::Error },

  /// output.json is not valid JSON
  Parse { path: PathBuf, source: serde_json::Error },

  /// None of the known manifest shapes matched
  UnrecognizedSchema { path: PathBuf },

  /// An elements-style outputFile name has no version token
  MalformedOutputFile { output_file: String },
}

impl ManifestError {
  fn help_message(&self) -> Option<String> {
    match self {
      ManifestError::Unreadable { .. } => Some(
        "Pass the directory that contains the build output manifest, e.g. app/build/outputs/apk/release.".to_string(),
      ),
      ManifestError::UnrecognizedSchema { .. } => Some(
        "Supported manifest shapes: an `elements` list, or a list whose first item carries `apkInfo` or `apkData`."
          .to_string(),
      ),
      _ => None,
    }
  }
}

impl fmt::Display for ManifestError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ManifestError::Unreadable { path, source } => {
        write!(f, "Failed to read build manifest {}: {}", path.display(), source)
      }
      ManifestError::Parse { path, source } => {
        write!(f, "Failed to parse build manifest {}: {}", path.display(), source)
      }
      ManifestError::UnrecognizedSchema { path } => {
        write!(f, "Unrecognized build manifest schema in {}", path.display())
      }
      ManifestError::MalformedOutputFile { output_file } => {
        write!(f, "Cannot extract a version from output file name '{}'", output_file)
      }
    }
  }
}

/// Dropbox storage errors
#[derive(Debug)]
pub enum StorageError {
  /// Local artifact could not be opened for upload
  ReadArtifact { path: PathBuf, source: io::Error },

  /// Delete endpoint returned a non-success status (non-fatal by policy)
  Delete { status: StatusCode, body: String },

  /// Upload endpoint returned a non-success status
  Upload { status: StatusCode, body: String },

  /// Share-link endpoint returned a non-success status
  Share { status: StatusCode, body: String },

  /// Request could not be sent or its response decoded
  Transport { source: reqwest::Error },
}

impl StorageError {
  fn help_message(&self) -> Option<String> {
    match self {
      StorageError::Upload { status, .. } | StorageError::Share { status, .. } => {
        if *status == StatusCode::UNAUTHORIZED {
          Some("Check that the Dropbox access token is valid and has files.content.write scope.".to_string())
        } else {
          None
        }
      }
      StorageError::ReadArtifact { .. } => {
        Some("The artifact path comes from the build manifest; re-run the build if the file is gone.".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for StorageError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StorageError::ReadArtifact { path, source } => {
        write!(f, "Failed to open artifact {}: {}", path.display(), source)
      }
      StorageError::Delete { status, body } => {
        write!(f, "Dropbox delete failed, code: {}\nContent: {}", status.as_u16(), body)
      }
      StorageError::Upload { status, body } => {
        write!(f, "Dropbox upload failed, code: {}\nContent: {}", status.as_u16(), body)
      }
      StorageError::Share { status, body } => {
        write!(f, "Dropbox share-link request failed, code: {}\nContent: {}", status.as_u16(), body)
      }
      StorageError::Transport { source } => {
        write!(f, "Dropbox request failed: {}", source)
      }
    }
  }
}

impl From<reqwest::Error> for StorageError {
  fn from(err: reqwest::Error) -> Self {
    StorageError::Transport { source: err }
  }
}

/// Changelog extraction errors
#[derive(Debug)]
pub enum ChangelogError {
  /// Changelog file missing or unreadable
  Read { path: PathBuf, source: io::Error },
}

impl ChangelogError {
  fn help_message(&self) -> Option<String> {
    match self {
      ChangelogError::Read { .. } => Some("Pass the changelog path with --changelog.file.".to_string()),
    }
  }
}

impl fmt::Display for ChangelogError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ChangelogError::Read { path, source } => {
        write!(f, "Failed to read changelog {}: {}", path.display(), source)
      }
    }
  }
}

/// Message template errors
#[derive(Debug)]
pub enum TemplateError {
  /// Template file missing or unreadable
  Read { path: PathBuf, source: io::Error },

  /// Template references a placeholder the pipeline does not provide
  UnknownPlaceholder { name: String },

  /// A `{` placeholder opening was never closed
  UnclosedPlaceholder,
}

impl TemplateError {
  fn help_message(&self) -> Option<String> {
    match self {
      TemplateError::UnknownPlaceholder { .. } => Some(
        "Available placeholders: {app_name}, {app_version}, {app_download_url}, {change_log}. Use {{ and }} for literal braces.".to_string(),
      ),
      _ => None,
    }
  }
}

impl fmt::Display for TemplateError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TemplateError::Read { path, source } => {
        write!(f, "Failed to read template {}: {}", path.display(), source)
      }
      TemplateError::UnknownPlaceholder { name } => {
        write!(f, "Template references unknown placeholder '{{{}}}'", name)
      }
      TemplateError::UnclosedPlaceholder => {
        write!(f, "Template has an unclosed '{{' placeholder")
      }
    }
  }
}

/// Telegram notification errors
#[derive(Debug)]
pub enum NotifyError {
  /// Bot endpoint returned a non-success status
  Rejected { status: StatusCode, body: String },

  /// Request could not be sent
  Transport { source: reqwest::Error },
}

impl NotifyError {
  fn help_message(&self) -> Option<String> {
    match self {
      NotifyError::Rejected { .. } => {
        Some("Verify the bot token and that the bot is a member of the target chat.".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for NotifyError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      NotifyError::Rejected { status, body } => {
        write!(f, "Telegram rejected the message, code: {}\nContent: {}", status.as_u16(), body)
      }
      NotifyError::Transport { source } => {
        write!(f, "Telegram request failed: {}", source)
      }
    }
  }
}

impl From<reqwest::Error> for NotifyError {
  fn from(err: reqwest::Error) -> Self {
    NotifyError::Transport { source: err }
  }
}

/// Result type alias for courier
pub type CourierResult<T> = Result<T, CourierError>;

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &CourierError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn io_err() -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, "missing")
  }

  #[test]
  fn test_exit_codes_match_stage_contract() {
    let storage = CourierError::Storage(StorageError::Upload {
      status: StatusCode::INTERNAL_SERVER_ERROR,
      body: String::new(),
    });
    let template = CourierError::Template(TemplateError::UnknownPlaceholder { name: "nope".into() });
    let changelog = CourierError::Changelog(ChangelogError::Read {
      path: "CHANGELOG.md".into(),
      source: io_err(),
    });
    let manifest = CourierError::Manifest(ManifestError::UnrecognizedSchema {
      path: "output.json".into(),
    });
    let notify = CourierError::Notification(NotifyError::Rejected {
      status: StatusCode::BAD_REQUEST,
      body: String::new(),
    });

    assert_eq!(storage.exit_code().as_i32(), 1);
    assert_eq!(template.exit_code().as_i32(), 2);
    assert_eq!(changelog.exit_code().as_i32(), 3);
    assert_eq!(manifest.exit_code().as_i32(), 4);
    assert_eq!(notify.exit_code().as_i32(), 5);
  }

  #[test]
  fn test_display_includes_status_and_body() {
    let err = StorageError::Upload {
      status: StatusCode::CONFLICT,
      body: "{\"error_summary\": \"path/conflict\"}".to_string(),
    };
    let rendered = err.to_string();
    assert!(rendered.contains("409"));
    assert!(rendered.contains("path/conflict"));
  }

  #[test]
  fn test_unknown_placeholder_help_lists_placeholders() {
    let err = CourierError::Template(TemplateError::UnknownPlaceholder { name: "app_url".into() });
    let help = err.help_message().expect("should have help");
    assert!(help.contains("{app_download_url}"));
  }
}
