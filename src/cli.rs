use crate::config::{CliOverrides, Config};
use crate::error::{Result, UnfollowError};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "unfollowcheck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Return a list of usernames that are not following you back")]
#[command(
    long_about = "unfollowcheck reads the ZIP archive from Instagram's \"Download your information\" \
                  export, compares your following and followers lists, and prints the accounts \
                  that don't follow you back. Nothing is sent over the network."
)]
#[command(after_help = "EXAMPLES:\n  \
    unfollowcheck instagram-export.zip\n  \
    unfollowcheck instagram-export.zip --verbose --outfile\n  \
    unfollowcheck instagram-export.zip -s some.friend -i\n  \
    unfollowcheck instagram-export.zip --browse")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// The zip file to process
    #[arg(required_unless_present = "generate_config")]
    pub archive: Option<PathBuf>,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Save the followers/following/unfollowers lists in .txt files
    #[arg(short = 'o', long)]
    pub outfile: bool,

    /// Check whether a single username follows you
    #[arg(short = 's', long, value_name = "USERNAME")]
    pub search_username: Option<String>,

    /// Compare the searched username case-insensitively
    #[arg(short = 'i', long)]
    pub case_insensitive: bool,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Directory the archive is extracted into
    #[arg(long, value_name = "DIR")]
    pub extract_dir: Option<PathBuf>,

    /// Directory the .txt lists are saved into
    #[arg(long, value_name = "DIR")]
    pub results_dir: Option<PathBuf>,

    /// Text that precedes every username in the exported pages
    #[arg(long, value_name = "TEXT")]
    pub marker: Option<String>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Browse, prune and save the unfollowers list interactively
    #[arg(long, conflicts_with = "search_username")]
    pub browse: bool,

    /// Show what would be read from the archive without extracting it
    #[arg(long)]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    /// Rejects option combinations that make no sense together.
    ///
    /// Runs before anything touches the filesystem.
    pub fn validate(&self) -> Result<()> {
        if self.case_insensitive && self.search_username.is_none() {
            return Err(UnfollowError::configuration(
                "-i/--case-insensitive option can only be used with -s/--search-username.",
            ));
        }

        if let Some(ref name) = self.search_username {
            if name.trim().is_empty() {
                return Err(UnfollowError::configuration(
                    "-s/--search-username needs a non-empty username",
                ));
            }
        }

        Ok(())
    }

    pub fn archive_path(&self) -> Result<&PathBuf> {
        self.archive
            .as_ref()
            .ok_or_else(|| UnfollowError::configuration("No archive given"))
    }

    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::default()
            .with_extract_dir(self.extract_dir.clone())
            .with_results_dir(self.results_dir.clone())
            .with_marker(self.marker.clone())
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["unfollowcheck"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_basic_arguments() {
        let cli = parse(&["export.zip", "-v", "-o"]);
        assert_eq!(cli.archive, Some(PathBuf::from("export.zip")));
        assert!(cli.outfile);
        assert_eq!(cli.verbosity_level(), 1);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_case_insensitive_requires_search() {
        let cli = parse(&["export.zip", "-i"]);
        assert!(matches!(
            cli.validate(),
            Err(UnfollowError::Configuration { .. })
        ));

        let cli = parse(&["export.zip", "-i", "-s", "Bob"]);
        assert!(cli.validate().is_ok());
        assert_eq!(cli.search_username.as_deref(), Some("Bob"));
    }

    #[test]
    fn test_empty_search_name_rejected() {
        let cli = parse(&["export.zip", "-s", " "]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["unfollowcheck", "export.zip", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_browse_conflicts_with_search() {
        assert!(Cli::try_parse_from(["unfollowcheck", "export.zip", "--browse", "-s", "x"]).is_err());
    }

    #[test]
    fn test_generate_config_needs_no_archive() {
        let cli = parse(&["--generate-config"]);
        assert!(cli.generate_config);
        assert!(cli.archive_path().is_err());
    }

    #[test]
    fn test_overrides_reach_config() {
        let cli = parse(&["export.zip", "--results-dir", "out", "--marker", "example.org/"]);
        let mut config = Config::default();
        config.merge_with_cli_args(&cli.create_cli_overrides());
        assert_eq!(config.output.results_dir, PathBuf::from("out"));
        assert_eq!(config.parser.marker, "example.org/");
    }
}
