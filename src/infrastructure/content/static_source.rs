//! Redirect source backed by a JSON file or a fixed list.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::entities::RedirectRecord;
use crate::domain::repositories::{ContentError, RedirectSource};

/// Accepted file layouts: a bare array, or the query API envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum RedirectFile {
    List(Vec<RedirectRecord>),
    Envelope { result: Option<Vec<RedirectRecord>> },
}

#[derive(Debug, Clone)]
enum Backing {
    Records(Vec<RedirectRecord>),
    File(PathBuf),
}

/// Redirect source for local development, exports and tests.
///
/// A file-backed source re-reads the file on every fetch, so edits are
/// picked up on the next cache refresh.
#[derive(Debug, Clone)]
pub struct StaticRedirectSource {
    backing: Backing,
}

impl StaticRedirectSource {
    /// Source that always returns `records`.
    pub fn from_records(records: Vec<RedirectRecord>) -> Self {
        Self {
            backing: Backing::Records(records),
        }
    }

    /// Source with no redirects at all.
    pub fn empty() -> Self {
        Self::from_records(Vec::new())
    }

    /// Source reading a JSON export from `path`.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            backing: Backing::File(path.into()),
        }
    }
}

#[async_trait]
impl RedirectSource for StaticRedirectSource {
    async fn fetch_redirects(&self) -> Result<Vec<RedirectRecord>, ContentError> {
        match &self.backing {
            Backing::Records(records) => Ok(records.clone()),
            Backing::File(path) => {
                let raw = tokio::fs::read(path)
                    .await
                    .map_err(|e| ContentError::Io(format!("{}: {}", path.display(), e)))?;

                let parsed: RedirectFile = serde_json::from_slice(&raw)
                    .map_err(|e| ContentError::Decode(format!("{}: {}", path.display(), e)))?;

                Ok(match parsed {
                    RedirectFile::List(records) => records,
                    RedirectFile::Envelope { result } => result.unwrap_or_default(),
                })
            }
        }
    }

    fn describe(&self) -> String {
        match &self.backing {
            Backing::Records(records) => format!("static list ({} records)", records.len()),
            Backing::File(path) => format!("file {}", path.display()),
        }
    }
}
