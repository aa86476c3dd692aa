//! Regenerates the selector list from an EasyList-format filter list.
//!
//! The list is downloaded once, every generic element-hiding rule (`##...`)
//! is classified, and the id and class buckets are written as the JSON
//! artifact read by `selector_list::ForbiddenSelectorSet`.

use camino::{Utf8Path, Utf8PathBuf};
use selector_list::{SelectorBuckets, SelectorListError};
use thiserror::Error;

/// The filter list fetched by default.
pub const DEFAULT_URL: &str = "https://easylist.to/easylist/easylist.txt";

/// Where the artifact is written by default, relative to the repository root.
pub const DEFAULT_OUTPUT: &str = "crates/selector-list/data/easylist-css-selectors.json";

/// Generation errors.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The filter list could not be downloaded.
    #[error("failed to fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The artifact could not be written.
    #[error("failed to write {path}")]
    Persistence {
        path: Utf8PathBuf,
        #[source]
        source: SelectorListError,
    },
}

/// Downloads the filter list body.
///
/// A non-success status is a transport error. There are no retries.
pub async fn fetch_filter_list(url: &str) -> Result<String, GenerateError> {
    let transport = |source| GenerateError::Transport {
        url: url.to_string(),
        source,
    };

    let response = reqwest::get(url).await.map_err(transport)?;
    let response = response.error_for_status().map_err(transport)?;
    response.text().await.map_err(transport)
}

/// Writes the id and class buckets to `path`, replacing any previous list.
pub async fn write_artifact(
    buckets: SelectorBuckets,
    path: &Utf8Path,
) -> Result<(), GenerateError> {
    let persistence = |source| GenerateError::Persistence {
        path: path.to_path_buf(),
        source,
    };

    let json = buckets.into_artifact().to_json().map_err(persistence)?;
    tokio::fs::write(path, json).await.map_err(|source| {
        persistence(SelectorListError::Io {
            path: path.to_path_buf(),
            source,
        })
    })
}

/// Fetches `url`, classifies its element-hiding rules and writes the artifact
/// to `output`. Returns every bucket, including the ones not persisted.
pub async fn generate(url: &str, output: &Utf8Path) -> Result<SelectorBuckets, GenerateError> {
    let text = fetch_filter_list(url).await?;
    let buckets = SelectorBuckets::from_filter_list(&text);

    tracing::info!(
        ids = buckets.ids.len(),
        classes = buckets.classes.len(),
        simple_attributes = buckets.simple_attributes.len(),
        complex_attributes = buckets.complex_attributes.len(),
        elements = buckets.elements.len(),
        "classified element-hiding rules"
    );

    write_artifact(buckets.clone(), output).await?;
    Ok(buckets)
}
