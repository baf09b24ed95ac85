//! Core library for insurance policy financial extraction.
//!
//! This crate provides:
//! - Financial field data models (fields, categories, currencies, results)
//! - Rule tables for labelled policy amounts
//! - Layered extraction: pattern matching, keyword context scanning, exhaustive amount scanning
//! - Confidence scoring, cross-strategy deduplication and summary statistics

pub mod error;
pub mod models;
pub mod policy;

pub use error::{InsurefinError, Result};
pub use models::config::{ExtractionConfig, InsurefinConfig, OutputConfig};
pub use models::field::{Currency, ExtractionMethod, FieldCategory, FinancialField};
pub use models::result::{ExtractionMetadata, ExtractionResult, ExtractionSummary};
pub use policy::{parse_document, InsuranceParser, PolicyDocument};
