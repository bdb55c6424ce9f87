pub mod cors;
pub mod request_trace;
pub mod require_identity;
pub mod security_headers;
pub mod structured_logger;
pub mod trace_span;

pub use cors::OriginPolicy;
pub use request_trace::RequestTrace;
pub use require_identity::RequireIdentity;
pub use security_headers::SecurityHeaders;
pub use structured_logger::StructuredLogger;
pub use trace_span::TraceSpan;
