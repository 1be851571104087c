mod gateway_http;
mod gateway_static;

pub use gateway_http::*;
pub use gateway_static::*;
