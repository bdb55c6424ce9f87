use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use backend::config::OriginAllowlist;
use backend::middleware::{
    OriginPolicy, RequestTrace, SecurityHeaders, StructuredLogger, TraceSpan,
};
use backend::routes;
use backend::state::app_state::AppState;

/// Builds the production middleware stack and route table around a test
/// `AppState`.
pub struct TestAppBuilder {
    state: AppState,
    origins: OriginAllowlist,
}

impl TestAppBuilder {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            origins: OriginAllowlist::defaults(),
        }
    }

    pub fn with_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.origins = OriginAllowlist::new(origins);
        self
    }

    pub async fn build(
        self,
    ) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
        backend_test_support::logging::init();

        let data = web::Data::new(self.state);

        test::init_service(
            App::new()
                .wrap(OriginPolicy::new(self.origins))
                .wrap(SecurityHeaders)
                .wrap(StructuredLogger)
                .wrap(TraceSpan)
                .wrap(RequestTrace)
                .app_data(data)
                .configure(routes::configure)
                .default_service(web::to(routes::not_found)),
        )
        .await
    }
}

pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder::new(state)
}
