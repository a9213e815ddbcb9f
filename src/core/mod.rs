//! Core model provisioning and translation pipeline

pub mod cache;
pub mod config;
pub mod engine;
pub mod errors;
pub mod models;
pub mod registry;
pub mod store;
pub mod translator;
