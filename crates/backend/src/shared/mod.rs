pub mod config;
pub mod format;
pub mod metadata;
pub mod ports;
pub mod power_bi;
pub mod services;
