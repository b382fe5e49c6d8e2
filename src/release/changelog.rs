//! Latest-entry extraction from a lightly marked-up changelog
//!
//! Entries are separated by lines starting with `##`; a `#` title line may
//! appear anywhere and is never part of an entry. Two layouts are accepted:
//! the newest changes either sit above the first `##` separator, or under
//! the first `##` heading when the document keeps a heading per entry.

use std::fs;
use std::path::Path;

use crate::core::error::ChangelogError;

/// Read the changelog file and return the latest entry's text
///
/// Each returned line ends with a newline. A document without any `##`
/// line yields the whole document with heading lines stripped.
pub fn latest_entry(path: &Path) -> Result<String, ChangelogError> {
  let document = fs::read_to_string(path).map_err(|source| ChangelogError::Read {
    path: path.to_path_buf(),
    source,
  })?;

  Ok(extract(&document))
}

fn extract(document: &str) -> String {
  let lines: Vec<&str> = document.lines().collect();

  let mut separators = lines
    .iter()
    .enumerate()
    .filter(|(_, line)| line.starts_with("##"))
    .map(|(idx, _)| idx);
  let first = separators.next();
  let second = separators.next();

  // newest-on-top layout: content above the first separator
  let head = render(&lines[..first.unwrap_or(lines.len())]);
  if !head.trim().is_empty() {
    return head;
  }

  // heading-per-entry layout: content between the first two ## lines
  match first {
    Some(open) => render(&lines[open + 1..second.unwrap_or(lines.len())]),
    None => head,
  }
}

fn render(lines: &[&str]) -> String {
  lines
    .iter()
    .filter(|line| !line.starts_with('#'))
    .map(|line| format!("{}\n", line))
    .collect()
}
