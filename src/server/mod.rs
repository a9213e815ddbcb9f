//! HTTP API server

pub mod api;
