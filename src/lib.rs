// src/lib.rs

//! Job posting extraction and visa-sponsorship checks.

pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod report;
pub mod services;
pub mod utils;
