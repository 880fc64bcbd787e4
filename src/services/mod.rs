pub mod registration_service;
pub mod favorites_service;
pub mod support_service;
pub mod newsletter_service;
pub mod preferences_service;

pub use registration_service::RegistrationService;
pub use favorites_service::FavoritesService;
pub use support_service::SupportService;
pub use newsletter_service::{NewsletterService, SubscribeOutcome};
pub use preferences_service::{PreferencesService, Theme};
