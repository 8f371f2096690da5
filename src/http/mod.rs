//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from the
//! file cache and request dispatch logic.

pub mod etag;
pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used types
pub use range::{parse_range, RangeOutcome};
pub use response::{
    build_304_response, build_403_response, build_404_response, build_405_response,
    build_416_response, build_500_response, build_file_response, build_partial_response, http_date,
};
