pub mod api;
pub mod auth;
pub mod config;
pub mod email;
pub mod entities;
pub mod error;
pub mod metrics;
pub mod migrator;
pub mod pdf;
pub mod services;
pub mod storage;
pub mod telemetry;

pub use sea_orm;
