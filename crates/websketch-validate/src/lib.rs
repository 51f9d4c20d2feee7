//! Strict validation and parsing of serialized WebSketch IR captures.
//!
//! Two entry points with deliberately different contracts:
//!
//! - [`validate_capture`] never fails: it returns every schema issue found
//!   while walking the parsed JSON, within resource limits.
//! - [`parse_capture`] is strict: it runs the validator and classifies any
//!   failure into the most specific stable error code
//!   (version > limit > general).

pub mod parse;
pub mod validator;

pub use parse::parse_capture;
pub use validator::{is_limit_issue, validate_capture, MAX_ISSUES};
