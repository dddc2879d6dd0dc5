pub mod catalog;
pub mod config;
pub mod error;
pub mod intake;
pub mod notification;
pub mod telemetry;
