use crate::error::{ArchiveFailure, Result, UnfollowError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// What an extraction pass wrote to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub target_dir: PathBuf,
    pub files_extracted: usize,
    pub bytes_extracted: u64,
    pub skipped_entries: Vec<String>,
}

/// Unpacks a data-export ZIP into a working directory.
#[derive(Debug, Clone)]
pub struct ArchiveExtractor {
    target_dir: PathBuf,
}

impl ArchiveExtractor {
    pub fn new<P: Into<PathBuf>>(target_dir: P) -> Self {
        Self {
            target_dir: target_dir.into(),
        }
    }

    /// Extract every entry of `archive_path` into the target directory.
    ///
    /// The target directory is created if needed and existing files are
    /// overwritten, so extracting the same archive twice is harmless. Any
    /// failure aborts the whole extraction; files already written are left
    /// in place.
    pub fn extract<P: AsRef<Path>>(&self, archive_path: P) -> Result<ArchiveSummary> {
        let archive_path = archive_path.as_ref();
        let fail = |source: ArchiveFailure| UnfollowError::Extraction {
            path: archive_path.to_path_buf(),
            source,
        };

        fs::create_dir_all(&self.target_dir).map_err(|e| fail(e.into()))?;

        let file = fs::File::open(archive_path).map_err(|e| fail(e.into()))?;
        let mut archive = zip::ZipArchive::new(file).map_err(|e| fail(e.into()))?;

        let mut summary = ArchiveSummary {
            target_dir: self.target_dir.clone(),
            files_extracted: 0,
            bytes_extracted: 0,
            skipped_entries: Vec::new(),
        };

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i).map_err(|e| fail(e.into()))?;

            let entry_path = match entry.enclosed_name() {
                Some(p) => p.to_path_buf(),
                None => {
                    log::debug!("Skipping archive entry outside target directory: {}", entry.name());
                    summary.skipped_entries.push(entry.name().to_string());
                    continue;
                }
            };

            let output_path = self.target_dir.join(&entry_path);

            if entry.is_dir() {
                fs::create_dir_all(&output_path).map_err(|e| fail(e.into()))?;
                continue;
            }

            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent).map_err(|e| fail(e.into()))?;
            }

            let mut outfile = fs::File::create(&output_path).map_err(|e| fail(e.into()))?;
            let written = io::copy(&mut entry, &mut outfile).map_err(|e| fail(e.into()))?;

            log::debug!("Extracted {} ({} bytes)", entry_path.display(), written);
            summary.files_extracted += 1;
            summary.bytes_extracted += written;
        }

        log::info!(
            "Extracted {} files from {} into {}",
            summary.files_extracted,
            archive_path.display(),
            self.target_dir.display()
        );

        Ok(summary)
    }

    /// Names of all entries in the archive, without extracting anything.
    pub fn list_entries<P: AsRef<Path>>(archive_path: P) -> Result<Vec<String>> {
        let archive_path = archive_path.as_ref();
        let fail = |source: ArchiveFailure| UnfollowError::Extraction {
            path: archive_path.to_path_buf(),
            source,
        };

        let file = fs::File::open(archive_path).map_err(|e| fail(e.into()))?;
        let archive = zip::ZipArchive::new(file).map_err(|e| fail(e.into()))?;

        Ok(archive.file_names().map(str::to_string).collect())
    }
}
