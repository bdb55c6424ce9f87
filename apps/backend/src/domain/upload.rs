//! Upload, download and save payloads.

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which catalog an upload or download concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadKind {
    Suppliers,
    Products,
}

impl UploadKind {
    pub const ALL: [UploadKind; 2] = [UploadKind::Suppliers, UploadKind::Products];

    pub fn as_str(self) -> &'static str {
        match self {
            UploadKind::Suppliers => "suppliers",
            UploadKind::Products => "products",
        }
    }

    /// Download file name, e.g. `suppliers.csv`.
    pub fn csv_filename(self) -> String {
        format!("{}.csv", self.as_str())
    }
}

impl fmt::Display for UploadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A received file, held in memory for the duration of one request.
#[derive(Debug, Clone)]
pub struct UploadPayload {
    pub kind: UploadKind,
    pub filename: String,
    pub bytes: Bytes,
}

impl UploadPayload {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadReceipt {
    pub status: &'static str,
    #[serde(rename = "type")]
    pub kind: UploadKind,
}

impl UploadReceipt {
    pub fn accepted(kind: UploadKind) -> Self {
        Self { status: "ok", kind }
    }
}

/// A CSV document ready to be sent as an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDocument {
    pub filename: String,
    pub body: String,
}

/// Arbitrary JSON body posted to `/save-all`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct SavePayload(pub Value);

impl Default for SavePayload {
    /// An empty object, what a save with no body records.
    fn default() -> Self {
        Self(Value::Object(Default::default()))
    }
}

impl SavePayload {
    pub fn suppliers_count(&self) -> usize {
        self.array_len("suppliers")
    }

    pub fn products_count(&self) -> usize {
        self.array_len("products")
    }

    fn array_len(&self, field: &str) -> usize {
        self.0
            .get(field)
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveReceipt {
    pub status: &'static str,
}

impl SaveReceipt {
    pub fn saved() -> Self {
        Self { status: "saved" }
    }
}
