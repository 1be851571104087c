// stores

mod cart_repo;
mod order_repo;
mod product_repo;
mod user_repo;

pub use cart_repo::*;
pub use order_repo::*;
pub use product_repo::*;
pub use user_repo::*;

// external collaborators

mod payment_gateway;

pub use payment_gateway::*;
