//! HTTP request handlers for the auth service.

pub mod auth_handler;
pub mod health;
pub mod home;

pub use auth_handler::handle_login;
pub use health::health_check;
pub use home::get_home;
