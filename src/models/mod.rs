// src/models/mod.rs

//! Domain models for the job scraper.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod analysis;
mod config;
mod job;
mod sponsorship;
mod structured;

// Re-export all public types
pub use analysis::{AnalysisResponse, HealthStatus, JobMetadata, TextAnalysisRequest};
pub use config::{BackendConfig, Config, ExtractionConfig, LoggingConfig};
pub use job::{ExtractionResult, JobRecord, NOT_FOUND};
pub(crate) use job::RawFields;
pub use sponsorship::{SponsorshipQuery, SponsorshipResponse};
pub use structured::StructuredJobData;
