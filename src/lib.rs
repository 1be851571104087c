pub mod api;
pub mod logger;
pub mod settings;

pub mod server;

pub mod application_port;
pub mod domain;
pub mod domain_model;
pub mod domain_port;
pub mod infra_gateway;
pub mod infra_memory;
pub mod infra_mysql;
