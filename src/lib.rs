pub mod api;
pub mod cli;
pub mod config;
pub mod data_paths;
pub mod logging;
pub mod portfolio;
