pub mod admin_helpers;
pub mod db_helpers;
pub mod form_helpers;
pub mod i18n_helpers;
pub mod public_helpers;
pub mod sanitization_helpers;
pub mod site_helpers;
