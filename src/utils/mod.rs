// Utils compartidos

pub mod constants;
pub mod i18n;
pub mod sanitize;
pub mod storage;
pub mod validator;

pub use constants::*;
pub use i18n::*;
pub use sanitize::escape_html;
