//! Object storage for uploaded project documents.
//!
//! Objects are keyed `"<project_id>/<file_name>"` inside one bucket, and an
//! upload to an existing key replaces it.

pub mod memory;
pub mod supabase;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::MemoryStorage;
pub use supabase::SupabaseStorage;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid storage URL: {0}")]
    InvalidUrl(String),

    #[error("Storage request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Storage rejected upload ({status}): {message}")]
    Rejected { status: u16, message: String },
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` under `path`, overwriting any existing object
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError>;
}

/// Last path component of a client-supplied filename, or `None` if nothing is left
pub fn sanitize_file_name(original: &str) -> Option<String> {
    let name = original
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name.to_string())
    }
}

pub fn object_path(project_id: i64, file_name: &str) -> String {
    format!("{}/{}", project_id, file_name)
}
