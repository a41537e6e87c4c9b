pub mod firestore;

pub use firestore::FirestoreClient;

use thiserror::Error;

use crate::bridge::data::StallStatus;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid service account key: {0}")]
    Key(#[from] serde_json::Error),

    #[error("token error: {0}")]
    Token(String),

    #[error("request failed: {0}")]
    Http(#[from] ureq::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Where parsed stall records end up. Firestore in production; tests use
/// an in-memory sink with the same merge-upsert shape.
pub trait DocumentSink {
    fn write_status(&mut self, status: &StallStatus) -> Result<()>;
}
