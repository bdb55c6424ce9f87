use std::future::{ready, Ready};
use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::auth::Identity;
use crate::error::AppError;

/// The authenticated caller, as stored by the `RequireIdentity` middleware.
///
/// Extracting this on a route that is not wrapped in `RequireIdentity`
/// fails with 401 missing-bearer.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl CurrentIdentity {
    pub fn into_inner(self) -> Identity {
        self.0
    }
}

impl Deref for CurrentIdentity {
    type Target = Identity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for CurrentIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Identity>()
                .cloned()
                .map(CurrentIdentity)
                .ok_or_else(AppError::unauthorized_missing_bearer),
        )
    }
}
