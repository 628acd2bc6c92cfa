pub mod geolocation_service;
pub mod mail_service;

pub use geolocation_service::*;
pub use mail_service::*;
