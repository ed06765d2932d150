//! Filterable employment dataset exposed as chart-ready aggregate views.

pub mod config;
pub mod data;
pub mod response;
pub mod server;
pub mod state;
pub mod views;

#[cfg(test)]
mod test_support;
