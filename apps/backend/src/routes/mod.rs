//! Route table.
//!
//! Every endpoint is declared once in [`ROUTES`] and registered under each
//! of [`MOUNT_PREFIXES`], so `/x` and `/api/x` are the same handler behind
//! the same middleware. The `/` banner is registered once, at the root.

use actix_web::http::Method;
use actix_web::{web, HttpRequest};

use crate::domain::UploadKind;
use crate::error::AppError;
use crate::middleware::RequireIdentity;

pub mod data;
pub mod downloads;
pub mod health;
pub mod save;
pub mod uploads;

pub const API_PREFIX: &str = "/api";
pub const MOUNT_PREFIXES: [&str; 2] = ["", API_PREFIX];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Health,
    FetchData,
    Upload(UploadKind),
    Download(UploadKind),
    SaveAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Wrapped in [`RequireIdentity`]
    Authenticated,
}

impl Endpoint {
    pub fn access(self) -> Access {
        match self {
            Endpoint::Health => Access::Public,
            _ => Access::Authenticated,
        }
    }

    pub fn method(self) -> Method {
        match self {
            Endpoint::Health | Endpoint::FetchData | Endpoint::Download(_) => Method::GET,
            Endpoint::Upload(_) | Endpoint::SaveAll => Method::POST,
        }
    }

    fn route(self) -> actix_web::Route {
        let route = web::method(self.method());
        match self {
            Endpoint::Health => route.to(health::health),
            Endpoint::FetchData => route.to(data::fetch_data),
            Endpoint::Upload(UploadKind::Suppliers) => route.to(uploads::upload_suppliers),
            Endpoint::Upload(UploadKind::Products) => route.to(uploads::upload_products),
            Endpoint::Download(UploadKind::Suppliers) => route.to(downloads::download_suppliers),
            Endpoint::Download(UploadKind::Products) => route.to(downloads::download_products),
            Endpoint::SaveAll => route.to(save::save_all),
        }
    }
}

pub const ROUTES: &[(&str, Endpoint)] = &[
    ("/health", Endpoint::Health),
    ("/fetch-data", Endpoint::FetchData),
    ("/upload-suppliers", Endpoint::Upload(UploadKind::Suppliers)),
    ("/upload-products", Endpoint::Upload(UploadKind::Products)),
    ("/download-suppliers", Endpoint::Download(UploadKind::Suppliers)),
    ("/download-products", Endpoint::Download(UploadKind::Products)),
    ("/save-all", Endpoint::SaveAll),
];

/// Register the root banner and the route table under every prefix.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(health::root)));

    for prefix in MOUNT_PREFIXES {
        for (path, endpoint) in ROUTES {
            register(cfg, prefix, path, *endpoint);
        }
    }
}

fn register(cfg: &mut web::ServiceConfig, prefix: &str, path: &str, endpoint: Endpoint) {
    let resource = web::resource(format!("{prefix}{path}")).route(endpoint.route());
    match endpoint.access() {
        Access::Public => cfg.service(resource),
        Access::Authenticated => cfg.service(resource.wrap(RequireIdentity)),
    };
}

/// Fallback for unmatched paths; install with `App::default_service`.
pub async fn not_found(req: HttpRequest) -> Result<&'static str, AppError> {
    Err(AppError::not_found(format!(
        "No route for {} {}",
        req.method(),
        req.path()
    )))
}
