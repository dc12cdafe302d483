pub mod client;
pub mod config;
pub mod models;
pub mod server;
pub mod service;
pub mod sources;
