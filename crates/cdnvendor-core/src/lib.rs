pub mod config;
pub mod logging;

pub mod cache;
pub mod control;
pub mod error;
pub mod fetch;
pub mod integrity;
pub mod registry;
pub mod storage;
