//! Bearer-token authentication middleware.
//!
//! Wraps protected resources. Verifies the `Authorization: Bearer` token with
//! the configured [`TokenVerifier`](crate::auth::TokenVerifier) and stores the
//! resulting [`Identity`] in request extensions for handlers to read.
//! Rejections are rendered here as Problem Details, so they pass back through
//! the outer middleware like any other response.

use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::debug;

use crate::auth::{bearer_token, Identity};
use crate::error::AppError;
use crate::state::app_state::AppState;

pub struct RequireIdentity;

impl<S, B> Transform<S, ServiceRequest> for RequireIdentity
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireIdentityMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireIdentityMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireIdentityMiddleware<S> {
    service: Rc<S>,
}

/// Missing or malformed credentials are rejected before the verifier is
/// consulted, so an unconfigured server still reports a missing token first.
async fn authenticate(req: &ServiceRequest) -> Result<Identity, AppError> {
    let token = bearer_token(req.headers())?;

    let verifier = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not available"))?
        .verifier()
        .cloned()
        .ok_or_else(AppError::auth_unavailable)?;

    verifier.verify(&token).await.inspect_err(|e| {
        debug!(provider = verifier.provider(), code = %e.code(), "token rejected");
    })
}

impl<S, B> Service<ServiceRequest> for RequireIdentityMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let outcome = authenticate(&req).await;
            match outcome {
                Ok(identity) => {
                    req.extensions_mut().insert(identity);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => Ok(req.error_response(err).map_into_right_body()),
            }
        })
    }
}
