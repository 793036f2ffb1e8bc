pub mod api;
pub mod classifier;
pub mod config;
pub mod db;
pub mod diagnosis;
pub mod entities;
pub mod error;
pub mod metrics;
pub mod migrator;
pub mod storage;
pub mod telemetry;

pub use sea_orm;
