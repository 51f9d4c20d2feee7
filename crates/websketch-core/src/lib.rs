//! Core grammar, text signals, hashing primitives, and error types for the
//! WebSketch IR library.
//!
//! This crate defines the data model every other websketch crate agrees on
//! (roles, bounding boxes, nodes, captures), the text-normalization and
//! short-digest primitives all hashing is built on, the unified
//! [`SketchError`] taxonomy, and the capture schema version policy.
//!
//! It has minimal external dependencies and is intended to be depended on
//! by every other crate in the workspace.

pub mod error;
pub mod grammar;
pub mod issue;
pub mod schema;
pub mod text;
pub mod tracing_config;

pub use error::{ErrorEnvelope, SketchError, SketchResult};
pub use grammar::{
    BBox01, Capture, CompilerInfo, Node, NodeFlags, Role, Viewport, BBOX_QUANT_STEP,
    CAPTURE_MAX_CHILDREN, CAPTURE_MAX_DEPTH, COLLAPSE_TOLERANCE, COMPILER_NAME,
};
pub use issue::{Issue, ValidationLimits};
pub use schema::{
    is_supported_schema_version, CURRENT_SCHEMA_VERSION, SUPPORTED_SCHEMA_VERSIONS,
};
pub use text::{
    classify_text, normalize_text, sha256_hex, short_hash, utf16_len, TextKind, TextSignal,
    SENTENCE_MAX_LEN, SHORT_MAX_LEN,
};
