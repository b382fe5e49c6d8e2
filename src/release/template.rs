//! Announcement message rendering
//!
//! Substitution is all-or-nothing: any placeholder the pipeline does not
//! provide fails the render, there is no partial output.

use std::fs;
use std::path::Path;

use crate::core::error::TemplateError;

/// Values available to the template
#[derive(Debug, Clone, Copy)]
pub struct MessageContext<'a> {
  pub app_name: &'a str,
  pub app_version: &'a str,
  pub app_download_url: &'a str,
  pub change_log: &'a str,
}

impl MessageContext<'_> {
  fn lookup(&self, name: &str) -> Option<&str> {
    match name {
      "app_name" => Some(self.app_name),
      "app_version" => Some(self.app_version),
      "app_download_url" => Some(self.app_download_url),
      "change_log" => Some(self.change_log),
      _ => None,
    }
  }
}

/// Load the template file and render the announcement message
///
/// The rendered text is re-joined line by line with a trailing newline per
/// line, so mixed line endings in the template come out normalized.
pub fn render_file(path: &Path, context: &MessageContext<'_>) -> Result<String, TemplateError> {
  let template = fs::read_to_string(path).map_err(|source| TemplateError::Read {
    path: path.to_path_buf(),
    source,
  })?;

  let filled = substitute(&template, context)?;

  Ok(filled.lines().map(|line| format!("{}\n", line)).collect())
}

/// Replace `{placeholder}` tokens; `{{` and `}}` escape to literal braces
fn substitute(template: &str, context: &MessageContext<'_>) -> Result<String, TemplateError> {
  let mut output = String::with_capacity(template.len());
  let mut chars = template.chars().peekable();

  while let Some(c) = chars.next() {
    match c {
      '{' => {
        if chars.peek() == Some(&'{') {
          chars.next();
          output.push('{');
          continue;
        }

        let mut name = String::new();
        loop {
          match chars.next() {
            Some('}') => break,
            Some(ch) => name.push(ch),
            None => return Err(TemplateError::UnclosedPlaceholder),
          }
        }

        match context.lookup(&name) {
          Some(value) => output.push_str(value),
          None => return Err(TemplateError::UnknownPlaceholder { name }),
        }
      }
      '}' => {
        if chars.peek() == Some(&'}') {
          chars.next();
        }
        output.push('}');
      }
      _ => output.push(c),
    }
  }

  Ok(output)
}
