// Core Logic
pub mod actions;
pub mod config;
pub mod status_parser;
