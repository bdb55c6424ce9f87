use actix_web::{web, HttpResponse};
use tracing::info;

use crate::error::AppError;
use crate::extractors::CurrentIdentity;
use crate::logging::pii::Redacted;
use crate::state::app_state::AppState;

pub async fn fetch_data(
    identity: CurrentIdentity,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!(email = %Redacted(identity.email_or_dash()), "fetch data");
    let dataset = state.storage.fetch_data().await?;
    Ok(HttpResponse::Ok().json(dataset))
}
