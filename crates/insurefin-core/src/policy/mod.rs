//! Insurance policy field extraction module.

mod document;
mod parser;
pub mod rules;

pub use document::PolicyDocument;
pub use parser::InsuranceParser;

use crate::models::result::ExtractionResult;

/// Parse a document in one call with default settings.
pub fn parse_document(text: &str, include_all_amounts: bool) -> ExtractionResult {
    InsuranceParser::new(text).parse(include_all_amounts)
}
