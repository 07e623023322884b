use crate::config::ParserConfig;
use crate::error::{Result, UnfollowError};
use std::path::Path;

/// A profile handle as it appears in the export. Compared case-sensitively.
pub type Username = String;

/// Pulls usernames out of an exported list page by substring scanning.
///
/// Every username in the export is written as part of a profile link, e.g.
/// `href="https://www.instagram.com/alice"`. The parser splits the page on
/// the marker (`instagram.com/` by default) and takes each fragment's text up
/// to the first `"`. The page is never parsed as HTML.
#[derive(Debug, Clone)]
pub struct UsernameParser {
    marker: String,
}

impl UsernameParser {
    pub fn new<S: Into<String>>(marker: S) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn from_config(config: &ParserConfig) -> Self {
        Self::new(config.marker.clone())
    }

    /// Usernames in order of appearance. Duplicates are kept.
    pub fn parse(&self, text: &str) -> Vec<Username> {
        if self.marker.is_empty() {
            return Vec::new();
        }

        text.split(self.marker.as_str())
            .skip(1) // text before the first marker is page chrome
            .filter_map(|fragment| {
                let end = fragment.find('"')?;
                let candidate = &fragment[..end];
                // A '<' means the marker matched inside markup, not a profile link
                if candidate.contains('<') {
                    None
                } else {
                    Some(candidate.to_string())
                }
            })
            .collect()
    }

    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Username>> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| UnfollowError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let usernames = self.parse(&content);
        log::debug!("Parsed {} usernames from {}", usernames.len(), path.display());
        Ok(usernames)
    }
}

impl Default for UsernameParser {
    fn default() -> Self {
        Self::from_config(&ParserConfig::default())
    }
}
