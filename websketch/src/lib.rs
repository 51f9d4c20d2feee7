//! # websketch
//!
//! A compact, viewport-normalized intermediate representation of web UI —
//! a tree of semantic primitives (navigation bars, forms, inputs, buttons,
//! text blocks, ...) annotated with bounding boxes in the unit square —
//! plus the three operations that make it useful to downstream tools:
//!
//! 1. **Fingerprinting:** a stable 8-hex structural digest answering "is
//!    this page the same?", with a layout-only variant that ignores copy
//!    edits ([`fingerprint_capture`], [`fingerprint_layout`]).
//! 2. **Diffing:** an explainable list of added/removed/moved/resized/
//!    text/structural changes between two captures, ranked by affected
//!    area ([`diff`]).
//! 3. **Strict validation and parsing** of the serialized JSON form, with
//!    path-qualified issues and stable `WS_*` error codes
//!    ([`parse_capture`], [`validate_capture`]).
//!
//! An ASCII renderer ([`render_ascii`]) is included for human inspection.
//!
//! The library is pure and in-memory: no I/O, no shared state, no
//! concurrency. Every operation is a deterministic function of its inputs;
//! the only in-place mutation is the opt-in [`assign_node_ids`] walk.
//!
//! # Quick start
//!
//! ```rust
//! use websketch::prelude::*;
//!
//! let text = r#"{
//!     "version": "0.1",
//!     "url": "https://example.com",
//!     "timestamp_ms": 1700000000000,
//!     "viewport": { "w_px": 1920, "h_px": 1080, "aspect": 1.7777777777777777 },
//!     "compiler": { "name": "websketch-ir", "version": "0.2.1", "options_hash": "test" },
//!     "root": {
//!         "id": "", "role": "PAGE", "bbox": [0, 0, 1, 1],
//!         "interactive": false, "visible": true
//!     }
//! }"#;
//!
//! let capture = parse_capture(text, &ValidationLimits::default()).expect("valid capture");
//! assert_eq!(fingerprint_capture(&capture), "29338a9f");
//!
//! let result = diff(&capture, &capture, &DiffOptions::default());
//! assert!(result.summary.identical);
//! ```

pub use websketch_core::{
    classify_text, is_supported_schema_version, normalize_text, sha256_hex, short_hash, BBox01,
    Capture, CompilerInfo, ErrorEnvelope, Issue, Node, NodeFlags, Role, SketchError, SketchResult,
    TextKind, TextSignal, ValidationLimits, Viewport, BBOX_QUANT_STEP, CAPTURE_MAX_CHILDREN,
    CAPTURE_MAX_DEPTH, COLLAPSE_TOLERANCE, COMPILER_NAME, CURRENT_SCHEMA_VERSION,
    SUPPORTED_SCHEMA_VERSIONS,
};

pub use websketch_diff::{
    diff, Change, ChangeCounts, ChangeKind, DiffMetadata, DiffOptions, DiffResult, DiffSummary,
    NodeSummary,
};
pub use websketch_fingerprint::{
    assign_node_ids, bbox_iou, bbox_string, deep_hash, fingerprint_capture, fingerprint_layout,
    generate_node_id, node_similarity, quantize, shallow_hash, HashOptions,
};
pub use websketch_render::{render_ascii, RenderOptions};
pub use websketch_validate::{parse_capture, validate_capture};

/// Modules re-exported for consumers that prefer qualified paths.
pub mod core {
    pub use websketch_core::*;
}

/// The handful of names almost every consumer needs.
pub mod prelude {
    pub use websketch_core::{
        BBox01, Capture, Node, Role, SketchError, SketchResult, TextSignal, ValidationLimits,
    };
    pub use websketch_diff::{diff, DiffOptions, DiffResult};
    pub use websketch_fingerprint::{fingerprint_capture, fingerprint_layout, HashOptions};
    pub use websketch_render::{render_ascii, RenderOptions};
    pub use websketch_validate::{parse_capture, validate_capture};
}
