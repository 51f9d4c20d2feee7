//! Node hashing and structural fingerprinting for WebSketch IR.
//!
//! This crate turns IR trees into short stable digests: quantized
//! bounding-box records, shallow and deep (order-canonicalized) node
//! hashes, capture-level full and layout fingerprints, content-addressed
//! node IDs, and the pairwise similarity score the diff engine matches on.
//!
//! Everything here is a pure function of its input except
//! [`assign_node_ids`], which writes IDs in place.

pub mod bbox;
pub mod fingerprint;
pub mod node_hash;
pub mod node_id;
pub mod similarity;

pub use bbox::{bbox_iou, bbox_string, quantize, quantize_default, HASH_PRECISION};
pub use fingerprint::{fingerprint_capture, fingerprint_layout};
pub use node_hash::{deep_hash, shallow_hash, HashOptions};
pub use node_id::{assign_node_ids, generate_node_id};
pub use similarity::node_similarity;
