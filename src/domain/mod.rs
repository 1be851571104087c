mod auth_service_impl;
mod cart_service_impl;
mod catalog_service_impl;
mod checkout_service_impl;

pub use auth_service_impl::*;
pub use cart_service_impl::*;
pub use catalog_service_impl::*;
pub use checkout_service_impl::*;
