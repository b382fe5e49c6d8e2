//! The deployment pipeline
//!
//! Strictly sequential: locate the artifact, derive its upload name, push
//! it to Dropbox, extract the latest changelog entry, render the
//! announcement, deliver it to Telegram. The first failing stage aborts the
//! run; completed remote side effects are not rolled back, so an uploaded
//! but unannounced artifact stays uploaded.

use std::path::PathBuf;

use crate::core::error::CourierResult;
use crate::net::dropbox::DropboxClient;
use crate::net::telegram::TelegramBot;
use crate::release::artifact::RenamedArtifact;
use crate::release::template::MessageContext;
use crate::release::{changelog, manifest, template};

/// Local inputs for one deployment run
#[derive(Debug, Clone)]
pub struct DeployRequest {
  pub release_dir: PathBuf,
  pub app_name: String,
  pub changelog_file: PathBuf,
  pub template_file: PathBuf,
}

/// Run the whole pipeline once
///
/// Clients are passed in so callers control endpoints and credentials.
/// The upload intentionally happens before changelog extraction, matching
/// the release flow this tool automates.
pub fn run(request: &DeployRequest, storage: &DropboxClient, notifier: &TelegramBot) -> CourierResult<()> {
  let located = manifest::locate(&request.release_dir)?;
  let artifact = RenamedArtifact::new(&request.app_name, &located.version, located.path.clone());
  println!("📦 {} {} → {}", request.app_name, located.version, artifact.file_name);

  let download_url = storage.upload_and_share(&artifact)?;
  println!("   Uploaded: {}", download_url);

  let change_log = changelog::latest_entry(&request.changelog_file)?;
  println!("   Extracted latest changelog entry");

  let message = template::render_file(
    &request.template_file,
    &MessageContext {
      app_name: &request.app_name,
      app_version: &located.version,
      app_download_url: &download_url,
      change_log: &change_log,
    },
  )?;

  notifier.send_message(&message)?;
  println!("✅ Release {} announced", located.version);

  Ok(())
}
