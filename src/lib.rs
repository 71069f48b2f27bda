pub mod client;
pub mod commands;
pub mod config;
pub mod domain;
pub mod output;
pub mod params;
