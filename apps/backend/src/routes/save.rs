use actix_web::{web, HttpResponse};

use crate::domain::{SavePayload, SaveReceipt};
use crate::error::AppError;
use crate::extractors::JsonOrDefault;
use crate::state::app_state::AppState;

/// Acknowledges any save. A missing or non-JSON body is saved as `{}`.
pub async fn save_all(
    state: web::Data<AppState>,
    payload: JsonOrDefault<SavePayload>,
) -> Result<HttpResponse, AppError> {
    state.storage.save_all(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(SaveReceipt::saved()))
}
