use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use backend::auth::build_verifier;
use backend::config::AppConfig;
use backend::infra::state::build_state;
use backend::middleware::{
    OriginPolicy, RequestTrace, SecurityHeaders, StructuredLogger, TraceSpan,
};
use backend::routes;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    // Missing credentials are not fatal: protected routes answer 401.
    let verifier = build_verifier(&config.identity);

    let app_state = build_state()
        .with_verifier(verifier)
        .with_version(config.version.clone())
        .with_body_limit(config.body_limit)
        .build();

    info!(
        host = %config.host,
        port = config.port,
        version = %config.version,
        auth = app_state.verifier().map(|v| v.provider()).unwrap_or("disabled"),
        allowed_origins = config.allowed_origins.len(),
        "starting Order Helper backend"
    );

    let data = web::Data::new(app_state);
    let origins = Arc::new(config.allowed_origins);

    HttpServer::new(move || {
        App::new()
            .wrap(OriginPolicy::shared(Arc::clone(&origins)))
            .wrap(SecurityHeaders)
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
            .default_service(web::to(routes::not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
