pub mod admin;
pub mod admin_api;
pub mod leads;
pub mod public;
pub mod site;
