mod auth_service;
mod cart_service;
mod catalog_service;
mod checkout_service;

pub use auth_service::*;
pub use cart_service::*;
pub use catalog_service::*;
pub use checkout_service::*;
