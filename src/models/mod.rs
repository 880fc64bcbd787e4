pub mod route;
pub mod registration;
pub mod project;
pub mod support;

pub use route::{LinkTarget, Route};
pub use registration::RegistrationRecord;
pub use project::Project;
pub use support::SupportRecord;
