//! Cross-origin policy middleware.
//!
//! Every response carries `Vary: Origin` and the allowed methods, headers,
//! and credentials flag. `Access-Control-Allow-Origin` is added only when the
//! request's `Origin` is on the allow-list; other origins get no allow-origin
//! header and the browser blocks the response.
//!
//! `OPTIONS` requests are answered here with 204 and an empty body, before
//! authentication or any handler runs.

use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderMap, HeaderValue};
use actix_web::http::Method;
use actix_web::{Error, HttpResponse};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::debug;

use crate::config::OriginAllowlist;

pub const ALLOWED_METHODS: &str = "GET,POST,OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

pub struct OriginPolicy {
    allowlist: Arc<OriginAllowlist>,
}

impl OriginPolicy {
    pub fn new(allowlist: OriginAllowlist) -> Self {
        Self {
            allowlist: Arc::new(allowlist),
        }
    }

    pub fn shared(allowlist: Arc<OriginAllowlist>) -> Self {
        Self { allowlist }
    }
}

impl<S, B> Transform<S, ServiceRequest> for OriginPolicy
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = OriginPolicyMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(OriginPolicyMiddleware {
            service,
            allowlist: Arc::clone(&self.allowlist),
        }))
    }
}

pub struct OriginPolicyMiddleware<S> {
    service: S,
    allowlist: Arc<OriginAllowlist>,
}

impl<S> OriginPolicyMiddleware<S> {
    /// The origin to echo back, if the request carries an allowed one.
    fn allowed_origin(&self, req: &ServiceRequest) -> Option<HeaderValue> {
        let origin = req.headers().get(header::ORIGIN)?;
        let allowed = origin
            .to_str()
            .map(|o| self.allowlist.is_allowed(o))
            .unwrap_or(false);
        if !allowed {
            debug!(origin = ?origin, "origin not allowed");
            return None;
        }
        Some(origin.clone())
    }
}

/// Attach the cross-origin headers. `origin` is set only for allowed callers.
pub fn apply_cors_headers(headers: &mut HeaderMap, origin: Option<HeaderValue>) {
    headers.append(header::VARY, HeaderValue::from_static("Origin"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    if let Some(origin) = origin {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    }
}

impl<S, B> Service<ServiceRequest> for OriginPolicyMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let origin = self.allowed_origin(&req);

        if req.method() == Method::OPTIONS {
            let mut res = req.into_response(HttpResponse::NoContent().finish());
            apply_cors_headers(res.headers_mut(), origin);
            return Box::pin(ready(Ok(res.map_into_right_body())));
        }

        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;
            apply_cors_headers(res.headers_mut(), origin);
            Ok(res.map_into_left_body())
        })
    }
}
