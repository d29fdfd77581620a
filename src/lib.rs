pub mod config;
pub mod constants;
pub mod dao;
pub mod models;
pub mod services;
pub mod shell;
pub mod utils;
