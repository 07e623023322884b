use crate::error::{Result, UnfollowError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub archive: ArchiveConfig,
    pub parser: ParserConfig,
    pub output: OutputConfig,
    pub profile: ProfileConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Directory the archive is unpacked into
    pub extract_dir: PathBuf,
    /// Location of the "following" list, relative to `extract_dir`
    pub following_path: PathBuf,
    /// Location of the "followers" list, relative to `extract_dir`
    pub followers_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ParserConfig {
    pub marker: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub results_dir: PathBuf,
    pub unfollowers_file: String,
    pub following_file: String,
    pub followers_file: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub base_url: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        let lists = PathBuf::from("connections").join("followers_and_following");
        Self {
            extract_dir: PathBuf::from("tmp"),
            following_path: lists.join("following.html"),
            followers_path: lists.join("followers_1.html"),
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            marker: "instagram.com/".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("results"),
            unfollowers_file: "unfollowers.txt".to_string(),
            following_file: "following.txt".to_string(),
            followers_file: "followers.txt".to_string(),
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.instagram.com".to_string(),
        }
    }
}

impl ArchiveConfig {
    pub fn following_file(&self) -> PathBuf {
        self.extract_dir.join(&self.following_path)
    }

    pub fn followers_file(&self) -> PathBuf {
        self.extract_dir.join(&self.followers_path)
    }
}

impl OutputConfig {
    pub fn unfollowers_path(&self) -> PathBuf {
        self.results_dir.join(&self.unfollowers_file)
    }

    pub fn following_path(&self) -> PathBuf {
        self.results_dir.join(&self.following_file)
    }

    pub fn followers_path(&self) -> PathBuf {
        self.results_dir.join(&self.followers_file)
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(UnfollowError::configuration(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            UnfollowError::configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            UnfollowError::configuration(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;

        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["unfollowcheck.toml", ".unfollowcheck.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref extract_dir) = cli_args.extract_dir {
            self.archive.extract_dir = extract_dir.clone();
        }

        if let Some(ref results_dir) = cli_args.results_dir {
            self.output.results_dir = results_dir.clone();
        }

        if let Some(ref marker) = cli_args.marker {
            self.parser.marker = marker.clone();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.parser.marker.is_empty() {
            return Err(UnfollowError::configuration(
                "The username marker must not be empty",
            ));
        }

        if self.archive.following_path.as_os_str().is_empty()
            || self.archive.followers_path.as_os_str().is_empty()
        {
            return Err(UnfollowError::configuration(
                "Both following_path and followers_path must be set",
            ));
        }

        for name in [
            &self.output.unfollowers_file,
            &self.output.following_file,
            &self.output.followers_file,
        ] {
            if name.is_empty() || name.contains('/') || name.contains('\\') {
                return Err(UnfollowError::configuration(format!(
                    "Result file names must be plain file names, got '{}'",
                    name
                )));
            }
        }

        let base = Url::parse(&self.profile.base_url)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(UnfollowError::configuration(format!(
                "Profile base URL must use http or https: {}",
                self.profile.base_url
            )));
        }

        Ok(())
    }

    pub fn create_sample_config() -> Result<String> {
        toml::to_string_pretty(&Self::default()).map_err(|e| {
            UnfollowError::configuration(format!("Failed to serialize sample config: {}", e))
        })
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub extract_dir: Option<PathBuf>,
    pub results_dir: Option<PathBuf>,
    pub marker: Option<String>,
}

impl CliOverrides {
    pub fn with_extract_dir(mut self, extract_dir: Option<PathBuf>) -> Self {
        self.extract_dir = extract_dir;
        self
    }

    pub fn with_results_dir(mut self, results_dir: Option<PathBuf>) -> Self {
        self.results_dir = results_dir;
        self
    }

    pub fn with_marker(mut self, marker: Option<String>) -> Self {
        self.marker = marker;
        self
    }
}
