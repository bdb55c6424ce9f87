//! Domain types shared by handlers and storage.

pub mod catalog;
pub mod upload;

pub use catalog::{Dataset, Product, Supplier};
pub use upload::{
    CsvDocument, SavePayload, SaveReceipt, UploadKind, UploadPayload, UploadReceipt,
};
