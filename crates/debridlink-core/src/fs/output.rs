//! Append-only output file of resolved links.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::domain::ResolvedDownloadLink;
use crate::ports::{LinkSink, StoreError};

/// Newline-delimited list of direct download links.
///
/// The file is opened, appended to and closed for every link, so nothing is
/// held open between links and earlier content is never truncated.
#[derive(Debug, Clone)]
pub struct OutputFile {
    path: PathBuf,
}

impl OutputFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LinkSink for OutputFile {
    fn append(&self, link: &ResolvedDownloadLink) -> Result<(), StoreError> {
        let output_error = |e: std::io::Error| StoreError::Output {
            path: self.path.clone(),
            reason: e.to_string(),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(output_error)?;
        writeln!(file, "{link}").map_err(output_error)?;
        Ok(())
    }
}
