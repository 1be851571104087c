//! DashMap-backed stores, selected with `storage.backend = "memory"`.
//! They double as the injectable fakes for the unit tests.

mod cart_repo_memory;
mod order_repo_memory;
mod product_repo_memory;
mod user_repo_memory;

pub use cart_repo_memory::*;
pub use order_repo_memory::*;
pub use product_repo_memory::*;
pub use user_repo_memory::*;
