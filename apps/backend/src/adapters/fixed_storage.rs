//! In-memory storage adapter serving a fixed data set.

use async_trait::async_trait;
use tracing::info;

use crate::domain::{CsvDocument, Dataset, SavePayload, UploadKind, UploadPayload};
use crate::error::AppError;
use crate::repos::storage::Storage;
use crate::services::csv_export;

/// Acknowledges writes without keeping them and always serves the same data.
#[derive(Debug, Clone)]
pub struct FixedStorage {
    dataset: Dataset,
}

impl FixedStorage {
    pub fn new() -> Self {
        Self::with_dataset(Dataset::fixed())
    }

    pub fn with_dataset(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

impl Default for FixedStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for FixedStorage {
    async fn upload(&self, payload: UploadPayload) -> Result<(), AppError> {
        info!(
            kind = %payload.kind,
            filename = %payload.filename,
            size_bytes = payload.len(),
            "upload received"
        );
        Ok(())
    }

    async fn download(&self, kind: UploadKind) -> Result<CsvDocument, AppError> {
        csv_export::export(&self.dataset, kind)
    }

    async fn save_all(&self, payload: SavePayload) -> Result<(), AppError> {
        info!(
            suppliers_count = payload.suppliers_count(),
            products_count = payload.products_count(),
            "save all received"
        );
        Ok(())
    }

    async fn fetch_data(&self) -> Result<Dataset, AppError> {
        Ok(self.dataset.clone())
    }
}
