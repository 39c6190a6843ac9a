//! JSON request documents: parsing, answering and response encoding.
//!
//! A document carries routing settings, base requests that declare stops and
//! buses, and stat requests answered against the network they describe.

mod dto;
mod error;
mod process;

pub use dto::*;
pub use error::RequestError;
pub use process::{
    answer, answer_stat_requests, apply_base_requests, load_document, load_document_file,
    process_document, validate_document, write_responses,
};
