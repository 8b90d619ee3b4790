//! Error types.
//!
//! User-input problems never show up here: bad altitudes, stale ids and
//! out-of-range reorders are silent no-ops in the store. These errors cover
//! the two outer boundaries, the map capability and export delivery.

use std::io;

/// Map capability could not be brought up.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("map access token is not set (export {0} to enable the map)")]
    MissingAccessToken(&'static str),

    #[error("map surface failed to initialize: {0}")]
    Surface(String),
}

/// Export could not be produced or delivered.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to serialize mission: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to deliver {name}: {source}")]
    Deliver {
        name: String,
        #[source]
        source: io::Error,
    },
}
