pub mod current_identity;
pub mod json_body;

pub use current_identity::CurrentIdentity;
pub use json_body::JsonOrDefault;
