pub mod archive;
pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod sink;
pub mod ui;
pub mod viewer;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{ArchiveConfig, CliOverrides, Config, OutputConfig, ParserConfig, ProfileConfig};
pub use error::{Result, UnfollowError, UserFriendlyError};

// Core functionality re-exports
pub use archive::{ArchiveExtractor, ArchiveSummary};
pub use diff::{is_following, unfollowers, DiffOutcome, SearchOutcome};
pub use parser::{Username, UsernameParser};
pub use pipeline::{ListKind, Pipeline, PipelineOutput, Stage};
pub use report::CheckReport;
pub use sink::ResultsWriter;
pub use ui::{OutputFormatter, OutputMode, ProgressManager};
pub use viewer::{ProfileLauncher, SystemBrowser, UnfollowerListModel, ViewerSession};

use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::task;

/// What to do with the lists once they are computed.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    pub search_name: Option<String>,
    pub case_insensitive: bool,
    pub save: bool,
}

impl CheckOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            search_name: cli.search_username.clone(),
            case_insensitive: cli.case_insensitive,
            save: cli.outfile,
        }
    }
}

/// Main library interface
pub struct UnfollowChecker {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl UnfollowChecker {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        // Progress is part of the verbose output, never mixed into machine-readable modes
        let show_progress = verbose > 0 && !quiet && output_mode == OutputMode::Human;
        let progress_manager = ProgressManager::new(show_progress);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Build a checker from parsed CLI arguments.
    ///
    /// Option combinations are validated first, so a rejected invocation
    /// never creates directories or files.
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        cli_args.validate()?;
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbosity_level(),
            cli_args.quiet,
        ))
    }

    /// Extract the archive, diff the lists and apply `options`.
    ///
    /// The blocking pipeline runs on tokio's blocking pool; this future
    /// resolves once, with the finished report.
    pub async fn check(&self, archive_path: &Path, options: &CheckOptions) -> Result<CheckReport> {
        let start = Instant::now();
        self.output_formatter
            .start_operation(&format!("Checking {}", archive_path.display()));

        let spinner = self.progress_manager.create_spinner("Starting...");
        let on_stage = {
            let pb = spinner.clone();
            move |stage: &Stage| {
                ui::progress::update_stage_progress(&pb, stage);
            }
        };

        let pipeline = Pipeline::from_config(&self.config);
        let archive = archive_path.to_path_buf();
        let output = task::spawn_blocking(move || pipeline.run(&archive, on_stage))
            .await
            .map_err(|e| {
                UnfollowError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("Check task failed: {}", e),
                ))
            });

        let output = match output.and_then(|result| result) {
            Ok(output) => output,
            Err(e) => {
                spinner.abandon_with_message("Check failed");
                return Err(e);
            }
        };

        ui::progress::finish_progress_with_summary(
            &spinner,
            &format!("Found {} unfollowers", output.diff.count),
            start.elapsed(),
        );

        self.output_formatter.info(&format!(
            "Extracted {} files ({} bytes) to {}",
            output.archive.files_extracted,
            output.archive.bytes_extracted,
            output.archive.target_dir.display()
        ));
        for skipped in &output.archive.skipped_entries {
            self.output_formatter
                .warning(&format!("Skipped unsafe archive entry: {}", skipped));
        }
        self.output_formatter.debug(&format!(
            "{} following, {} followers",
            output.following.len(),
            output.followers.len()
        ));

        let search = options.search_name.as_deref().map(|name| {
            SearchOutcome::lookup(name, &output.followers, options.case_insensitive)
        });

        let saved_files = if options.save {
            self.save_results(&output)?
        } else {
            Vec::new()
        };

        Ok(CheckReport {
            archive: archive_path.to_path_buf(),
            following: output.following,
            followers: output.followers,
            unfollowers: output.diff.unfollowers,
            count: output.diff.count,
            search,
            files_extracted: output.archive.files_extracted,
            saved_files,
            checked_at: chrono::Utc::now(),
        })
    }

    fn save_results(&self, output: &PipelineOutput) -> Result<Vec<PathBuf>> {
        let writer = ResultsWriter::new(self.config.output.clone());
        let written = writer.save_lists(
            &output.following,
            &output.followers,
            &output.diff.unfollowers,
        )?;

        self.output_formatter.success(&format!(
            "Saved {} lists to {}",
            written.len(),
            writer.results_dir().display()
        ));
        Ok(written)
    }

    /// Entries of the archive that would be read, without extracting.
    pub fn plan(&self, archive_path: &Path) -> Result<DryRunPlan> {
        let entries = ArchiveExtractor::list_entries(archive_path)?;
        let has = |wanted: &Path| entries.iter().any(|e| Path::new(e) == wanted);

        Ok(DryRunPlan {
            entry_count: entries.len(),
            extract_dir: self.config.archive.extract_dir.clone(),
            following_present: has(self.config.archive.following_path.as_path()),
            followers_present: has(self.config.archive.followers_path.as_path()),
        })
    }

    /// Open the interactive viewer on `report.unfollowers`.
    pub fn browse<L: ProfileLauncher>(&self, report: &CheckReport, launcher: L) -> Result<UnfollowerListModel> {
        let model = UnfollowerListModel::new(report.unfollowers.clone());
        let mut session = ViewerSession::new(
            model,
            self.config.profile.base_url.clone(),
            self.config.output.unfollowers_path(),
            launcher,
        );

        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        session.run(stdin.lock(), stdout.lock())?;
        Ok(session.into_model())
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config()?;
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &UnfollowError) {
        self.progress_manager
            .suspend(|| self.output_formatter.print_user_friendly_error(error));
    }
}

/// What `--dry-run` found in the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DryRunPlan {
    pub entry_count: usize,
    pub extract_dir: PathBuf,
    pub following_present: bool,
    pub followers_present: bool,
}

impl DryRunPlan {
    pub fn is_complete(&self) -> bool {
        self.following_present && self.followers_present
    }
}
