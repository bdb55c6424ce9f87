//! Storage seam for catalog uploads, downloads and saves.

use async_trait::async_trait;

use crate::domain::{CsvDocument, Dataset, SavePayload, UploadKind, UploadPayload};
use crate::error::AppError;

/// Where catalog data lives.
///
/// Handlers only talk to this trait; the adapter behind it is chosen at
/// startup and shared across workers.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Accept an uploaded catalog file.
    async fn upload(&self, payload: UploadPayload) -> Result<(), AppError>;

    /// Produce the catalog of `kind` as CSV.
    async fn download(&self, kind: UploadKind) -> Result<CsvDocument, AppError>;

    /// Persist a full catalog snapshot.
    async fn save_all(&self, payload: SavePayload) -> Result<(), AppError>;

    async fn fetch_data(&self) -> Result<Dataset, AppError>;
}
