use crate::config::OutputConfig;
use crate::error::Result;
use crate::parser::Username;
use crate::sink::list_file::write_list;
use std::fs;
use std::path::{Path, PathBuf};

/// Persists the three lists of a run into the results directory.
pub struct ResultsWriter {
    config: OutputConfig,
}

impl ResultsWriter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    pub fn results_dir(&self) -> &Path {
        &self.config.results_dir
    }

    pub fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.config.results_dir)?;
        Ok(())
    }

    /// Writes unfollowers, following and followers (in that order) and
    /// returns the paths written.
    pub fn save_lists(
        &self,
        following: &[Username],
        followers: &[Username],
        unfollowers: &[Username],
    ) -> Result<Vec<PathBuf>> {
        self.initialize()?;

        let targets = [
            (self.config.unfollowers_path(), unfollowers),
            (self.config.following_path(), following),
            (self.config.followers_path(), followers),
        ];

        let mut written = Vec::with_capacity(targets.len());
        for (path, list) in targets {
            write_list(&path, list)?;
            log::info!("Saved {} usernames to {}", list.len(), path.display());
            written.push(path);
        }

        Ok(written)
    }
}
