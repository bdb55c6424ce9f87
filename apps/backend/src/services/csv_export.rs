//! CSV rendering for catalog downloads.
//!
//! Documents have a header row, `\n` line endings, and no trailing newline.

use csv::Writer;

use crate::domain::{CsvDocument, Dataset, Product, Supplier, UploadKind};
use crate::error::AppError;

pub fn suppliers_csv(suppliers: &[Supplier]) -> Result<String, AppError> {
    render(
        ["name", "email"],
        suppliers.iter().map(|s| [s.name.clone(), s.email.clone()]),
    )
}

pub fn products_csv(products: &[Product]) -> Result<String, AppError> {
    render(
        ["name", "price"],
        products.iter().map(|p| [p.name.clone(), p.price.to_string()]),
    )
}

/// Render the `kind` half of `dataset` as a downloadable document.
pub fn export(dataset: &Dataset, kind: UploadKind) -> Result<CsvDocument, AppError> {
    let body = match kind {
        UploadKind::Suppliers => suppliers_csv(&dataset.suppliers)?,
        UploadKind::Products => products_csv(&dataset.products)?,
    };
    Ok(CsvDocument {
        filename: kind.csv_filename(),
        body,
    })
}

fn render<I>(header: [&str; 2], rows: I) -> Result<String, AppError>
where
    I: IntoIterator<Item = [String; 2]>,
{
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(header).map_err(csv_error)?;
    for row in rows {
        writer.write_record(&row).map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::internal(format!("flushing CSV: {e}")))?;
    let mut body = String::from_utf8(bytes)
        .map_err(|e| AppError::internal(format!("CSV is not UTF-8: {e}")))?;

    if body.ends_with('\n') {
        body.pop();
    }
    Ok(body)
}

fn csv_error(e: csv::Error) -> AppError {
    AppError::internal(format!("writing CSV: {e}"))
}
