mod core;
mod net;
mod pipeline;
mod release;

use std::path::PathBuf;

use clap::Parser;

use crate::core::error::{CourierError, CourierResult, print_error};
use crate::net::dropbox::DropboxClient;
use crate::net::telegram::TelegramBot;
use crate::pipeline::DeployRequest;

/// Upload a freshly built APK to Dropbox and announce it on Telegram
#[derive(Parser)]
#[command(name = "courier")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Path to the release folder containing the build output manifest
  #[arg(long = "release.dir", value_name = "DIR")]
  release_dir: PathBuf,

  /// App name used to derive the uploaded file name
  #[arg(long = "app.name", value_name = "NAME")]
  app_name: String,

  /// Path to the changelog file
  #[arg(long = "changelog.file", value_name = "FILE")]
  changelog_file: PathBuf,

  /// Path to the announcement template file
  #[arg(long = "template.file", value_name = "FILE")]
  template_file: PathBuf,

  /// Dropbox access token
  #[arg(long = "dropbox.token", value_name = "TOKEN")]
  dropbox_token: String,

  /// Dropbox folder receiving the artifact
  #[arg(long = "dropbox.folder", value_name = "FOLDER")]
  dropbox_folder: String,

  /// Telegram bot token
  #[arg(long = "bot.code", value_name = "TOKEN")]
  bot_code: String,

  /// Telegram chat id receiving the announcement
  #[arg(long = "bot.chat_id", value_name = "ID")]
  chat_id: String,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .without_time()
    .init();

  let cli = Cli::parse();

  if let Err(err) = run(cli) {
    handle_error(err);
  }
}

fn run(cli: Cli) -> CourierResult<()> {
  let storage = DropboxClient::new(cli.dropbox_token, cli.dropbox_folder)?;
  let notifier = TelegramBot::new(cli.bot_code, cli.chat_id)?;

  let request = DeployRequest {
    release_dir: cli.release_dir,
    app_name: cli.app_name,
    changelog_file: cli.changelog_file,
    template_file: cli.template_file,
  };

  pipeline::run(&request, &storage, &notifier)
}

fn handle_error(err: CourierError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
