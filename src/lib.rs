pub mod api;
pub mod configuration;
pub mod db;
pub mod entity;
pub mod migration;
pub mod model;
pub mod query;
pub mod repository;
pub mod startup;
pub mod storage;
pub mod telemetry;
