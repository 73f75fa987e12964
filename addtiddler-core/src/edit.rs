//! File-level editing with atomic replacement
//!
//! The rebuilt document is always written to a temporary file in the
//! destination's directory and only renamed over the destination after it
//! is complete and synced. The input is read through its own handle, which
//! is closed before the rename. An edit that fails or is abandoned before
//! [`StagedEdit::commit`] leaves every existing file untouched.

use crate::error::{Result, TiddlerError};
use crate::paths;
use crate::rebuild::{DocumentRebuilder, RebuildReport};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Where the rebuilt document goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    /// Replace the input file
    InPlace,
    /// Write a separate file, leaving the input unchanged
    Separate(PathBuf),
}

/// An edit of one wiki file
#[derive(Debug, Clone)]
pub struct DocumentEdit {
    input: PathBuf,
    target: EditTarget,
}

impl DocumentEdit {
    /// Edit `input`, writing to `output` or back to `input` when `output` is `None`
    ///
    /// An `output` naming the same file as `input` is treated as in-place.
    pub fn new(input: impl Into<PathBuf>, output: Option<PathBuf>) -> Self {
        let input = input.into();
        let target = match output {
            None => EditTarget::InPlace,
            Some(output) => {
                if same_file::is_same_file(&input, &output).unwrap_or(false) {
                    log::debug!("{} is the input file, editing in place", output.display());
                    EditTarget::InPlace
                } else {
                    EditTarget::Separate(output)
                }
            }
        };
        Self { input, target }
    }

    /// Edit `input` in place
    pub fn in_place(input: impl Into<PathBuf>) -> Self {
        Self::new(input, None)
    }

    /// The file being read
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// How the result is delivered
    pub fn target(&self) -> &EditTarget {
        &self.target
    }

    /// The file that will hold the result
    pub fn destination(&self) -> &Path {
        match &self.target {
            EditTarget::InPlace => &self.input,
            EditTarget::Separate(path) => path,
        }
    }

    /// Rebuild into a temporary file next to the destination without replacing anything
    pub fn stage(&self, rebuilder: &mut DocumentRebuilder) -> Result<StagedEdit> {
        let destination = paths::absolutize(self.destination())?;
        let dir = paths::document_dir(&destination)?;

        let input = File::open(&self.input).map_err(|e| TiddlerError::io(&self.input, e))?;
        let mut temp = NamedTempFile::new_in(&dir).map_err(|e| TiddlerError::io(&dir, e))?;
        log::debug!(
            "staging {} -> {}",
            self.input.display(),
            temp.path().display()
        );

        let report = {
            let mut writer = BufWriter::new(temp.as_file_mut());
            let report = rebuilder.rebuild(BufReader::new(input), &mut writer)?;
            writer.flush().map_err(TiddlerError::Write)?;
            report
        };
        temp.as_file()
            .sync_all()
            .map_err(|e| TiddlerError::io(temp.path(), e))?;

        Ok(StagedEdit {
            temp,
            destination,
            report,
        })
    }

    /// Stage and commit in one step
    pub fn apply(&self, rebuilder: &mut DocumentRebuilder) -> Result<RebuildReport> {
        self.stage(rebuilder)?.commit()
    }
}

/// A fully written rebuild waiting to replace its destination
///
/// Dropping it without committing deletes the temporary file.
#[derive(Debug)]
pub struct StagedEdit {
    temp: NamedTempFile,
    destination: PathBuf,
    report: RebuildReport,
}

impl StagedEdit {
    /// Report from the rebuild pass
    pub fn report(&self) -> &RebuildReport {
        &self.report
    }

    /// Location of the staged content
    pub fn temp_path(&self) -> &Path {
        self.temp.path()
    }

    /// Atomically move the staged content over the destination
    pub fn commit(self) -> Result<RebuildReport> {
        if let Ok(metadata) = fs::metadata(&self.destination) {
            fs::set_permissions(self.temp.path(), metadata.permissions())
                .map_err(|e| TiddlerError::io(self.temp.path(), e))?;
        }

        self.temp
            .persist(&self.destination)
            .map_err(|e| TiddlerError::Persist {
                path: self.destination.clone(),
                source: e.error,
            })?;
        log::info!("wrote {}", self.destination.display());
        Ok(self.report)
    }
}
