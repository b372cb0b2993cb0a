pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod mcp;
pub mod ports;
pub mod services;

#[cfg(test)]
pub mod test_helpers;
