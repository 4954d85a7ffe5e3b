pub mod config;
pub mod console;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod queries;
pub mod services;
pub mod telemetry;
pub mod validation;
pub mod views;

#[cfg(test)]
mod test_support;
