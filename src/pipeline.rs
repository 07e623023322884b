use crate::archive::{ArchiveExtractor, ArchiveSummary};
use crate::config::Config;
use crate::diff::{self, DiffOutcome};
use crate::error::Result;
use crate::parser::{Username, UsernameParser};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Following,
    Followers,
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListKind::Following => write!(f, "following"),
            ListKind::Followers => write!(f, "followers"),
        }
    }
}

/// Progress events emitted while a check runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    Extracting,
    Parsing(ListKind),
    Comparing,
    Done { unfollowers: usize },
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Extracting => write!(f, "Extracting archive..."),
            Stage::Parsing(kind) => write!(f, "Reading {} list...", kind),
            Stage::Comparing => write!(f, "Comparing lists..."),
            Stage::Done { unfollowers } => write!(f, "Found {} unfollowers", unfollowers),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub archive: ArchiveSummary,
    pub following: Vec<Username>,
    pub followers: Vec<Username>,
    pub diff: DiffOutcome,
}

/// Extract, parse both lists, diff. Blocking; every failure aborts the run.
#[derive(Debug, Clone)]
pub struct Pipeline {
    extractor: ArchiveExtractor,
    parser: UsernameParser,
    following_file: std::path::PathBuf,
    followers_file: std::path::PathBuf,
}

impl Pipeline {
    pub fn from_config(config: &Config) -> Self {
        Self {
            extractor: ArchiveExtractor::new(&config.archive.extract_dir),
            parser: UsernameParser::from_config(&config.parser),
            following_file: config.archive.following_file(),
            followers_file: config.archive.followers_file(),
        }
    }

    pub fn run<F>(&self, archive_path: &Path, on_stage: F) -> Result<PipelineOutput>
    where
        F: Fn(&Stage),
    {
        on_stage(&Stage::Extracting);
        let archive = self.extractor.extract(archive_path)?;

        on_stage(&Stage::Parsing(ListKind::Following));
        let following = self.parser.parse_file(&self.following_file)?;

        on_stage(&Stage::Parsing(ListKind::Followers));
        let followers = self.parser.parse_file(&self.followers_file)?;

        on_stage(&Stage::Comparing);
        let diff = diff::unfollowers(&following, &followers);
        log::info!(
            "{} following, {} followers, {} not following back",
            following.len(),
            followers.len(),
            diff.count
        );

        on_stage(&Stage::Done {
            unfollowers: diff.count,
        });

        Ok(PipelineOutput {
            archive,
            following,
            followers,
            diff,
        })
    }
}
