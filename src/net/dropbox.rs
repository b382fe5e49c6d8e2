//! Dropbox storage client
//!
//! Synchronizes one remote object per run: delete any stale copy, upload
//! the renamed artifact, then request a public share link. All three calls
//! are blocking with explicit timeouts; request bodies are built per call.

use std::fs::File;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::error::StorageError;
use crate::release::artifact::RenamedArtifact;

const API_BASE: &str = "https://api.dropboxapi.com";
const CONTENT_BASE: &str = "https://content.dropboxapi.com";

/// Timeout for the JSON API calls (delete, share)
const API_TIMEOUT: Duration = Duration::from_secs(30);
/// Timeout for the artifact upload, sized for multi-megabyte APKs
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// Stale-object deletion never aborts a deployment: the upload overwrites
/// the remote path anyway, so a failed delete is logged and ignored.
pub const BEST_EFFORT_DELETE: bool = true;

#[derive(Debug, Clone, Serialize)]
struct PathArg<'a> {
  path: &'a str,
}

#[derive(Debug, Clone, Serialize)]
struct ShareArg<'a> {
  path: &'a str,
  settings: ShareSettings<'a>,
}

#[derive(Debug, Clone, Serialize)]
struct ShareSettings<'a> {
  requested_visibility: &'a str,
}

#[derive(Debug, Deserialize)]
struct SharedLink {
  url: String,
}

/// Client for the three Dropbox endpoints the pipeline touches
pub struct DropboxClient {
  api: Client,
  content: Client,
  token: String,
  folder: String,
  api_base: String,
  content_base: String,
}

impl DropboxClient {
  pub fn new(token: String, folder: String) -> Result<Self, StorageError> {
    Self::with_bases(token, folder, API_BASE.to_string(), CONTENT_BASE.to_string())
  }

  fn with_bases(token: String, folder: String, api_base: String, content_base: String) -> Result<Self, StorageError> {
    let api = Client::builder().timeout(API_TIMEOUT).build()?;
    let content = Client::builder().timeout(UPLOAD_TIMEOUT).build()?;

    Ok(Self {
      api,
      content,
      token,
      folder,
      api_base,
      content_base,
    })
  }

  /// Test constructor pointing both endpoint families at a mock server
  #[cfg(test)]
  pub(crate) fn with_mock_base(token: &str, folder: &str, base: &str) -> Result<Self, StorageError> {
    Self::with_bases(token.to_string(), folder.to_string(), base.to_string(), base.to_string())
  }

  /// Upload the artifact and return its direct-download share link
  ///
  /// Runs the full delete → upload → share sequence against
  /// `/<folder>/<file_name>`. Any upload or share failure aborts the run;
  /// nothing already uploaded is rolled back.
  pub fn upload_and_share(&self, artifact: &RenamedArtifact) -> Result<String, StorageError> {
    let remote_path = format!("/{}/{}", self.folder, artifact.file_name);

    if let Err(err) = self.delete_stale(&remote_path) {
      if !BEST_EFFORT_DELETE {
        return Err(err);
      }
      warn!(path = remote_path, error = %err, "stale delete failed, continuing");
    }

    self.upload(&remote_path, &artifact.source_path)?;
    let url = self.share(&remote_path)?;

    Ok(direct_download_url(url))
  }

  /// Delete any previous object at the remote path
  fn delete_stale(&self, remote_path: &str) -> Result<(), StorageError> {
    let response = self
      .api
      .post(format!("{}/2/files/delete_v2", self.api_base))
      .bearer_auth(&self.token)
      .json(&PathArg { path: remote_path })
      .send()?;

    if !response.status().is_success() {
      let status = response.status();
      let body = response.text().unwrap_or_default();
      return Err(StorageError::Delete { status, body });
    }

    debug!(path = remote_path, "deleted stale artifact");
    Ok(())
  }

  fn upload(&self, remote_path: &str, source: &Path) -> Result<(), StorageError> {
    let api_arg = serde_json::json!({
      "path": remote_path,
      "mode": "overwrite",
      "autorename": true,
      "strict_conflict": true,
    })
    .to_string();

    let file = File::open(source).map_err(|source_err| StorageError::ReadArtifact {
      path: source.to_path_buf(),
      source: source_err,
    })?;

    let response = self
      .content
      .post(format!("{}/2/files/upload", self.content_base))
      .bearer_auth(&self.token)
      .header("Dropbox-API-Arg", api_arg)
      .header(CONTENT_TYPE, "application/octet-stream")
      .body(file)
      .send()?;

    if !response.status().is_success() {
      let status = response.status();
      let body = response.text().unwrap_or_default();
      return Err(StorageError::Upload { status, body });
    }

    debug!(path = remote_path, "artifact uploaded");
    Ok(())
  }

  fn share(&self, remote_path: &str) -> Result<String, StorageError> {
    let response = self
      .api
      .post(format!("{}/2/sharing/create_shared_link_with_settings", self.api_base))
      .bearer_auth(&self.token)
      .json(&ShareArg {
        path: remote_path,
        settings: ShareSettings {
          requested_visibility: "public",
        },
      })
      .send()?;

    if !response.status().is_success() {
      let status = response.status();
      let body = response.text().unwrap_or_default();
      return Err(StorageError::Share { status, body });
    }

    let link: SharedLink = response.json()?;
    Ok(link.url)
  }
}

/// Rewrite a share link's `dl=` query tail to `raw=1`
///
/// Dropbox share links end in `?dl=0` and serve a preview page; Telegram
/// clients need the raw bytes. Everything from the first `dl=` to the end
/// of the URL is replaced; links without a `dl=` tail pass through.
pub fn direct_download_url(mut url: String) -> String {
  if let Some(idx) = url.find("dl=") {
    url.truncate(idx);
    url.push_str("raw=1");
  }
  url
}
