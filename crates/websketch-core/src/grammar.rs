//! The WebSketch IR grammar: semantic roles, viewport-normalized bounding
//! boxes, text signals, nodes, and captures.
//!
//! These types define shape only. All behavior (hashing, validation,
//! diffing, rendering) lives in the sibling crates; the grammar is what
//! they agree on.

use serde::{Deserialize, Serialize};

use crate::text::TextSignal;

// ---------------------------------------------------------------------------
// Capture-time constants
// ---------------------------------------------------------------------------

/// Grid step applied to bounding-box components before hashing and sibling
/// ordering. Suppresses sub-pixel jitter between captures of the same page.
pub const BBOX_QUANT_STEP: f64 = 0.001;

/// Tolerance under which capture tools may collapse near-identical sibling
/// boxes into one node.
pub const COLLAPSE_TOLERANCE: f64 = 0.002;

/// Recommended maximum tree depth for capture tools. The validator enforces
/// its own, larger ceiling (`ValidationLimits::max_depth`) at parse time.
pub const CAPTURE_MAX_DEPTH: usize = 8;

/// Recommended maximum children per node for capture tools.
pub const CAPTURE_MAX_CHILDREN: usize = 200;

/// Compiler name stamped into captures produced by the reference toolchain.
pub const COMPILER_NAME: &str = "websketch-ir";

// ---------------------------------------------------------------------------
// Role vocabulary
// ---------------------------------------------------------------------------

/// Closed vocabulary of semantic UI roles.
///
/// Serialized as the UPPERCASE tag (`"PAGE"`, `"NAV"`, ...). Unknown strings
/// are validation errors, not an extension point; capture tools that cannot
/// classify an element emit [`Role::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Page,
    Nav,
    Header,
    Footer,
    Section,
    Card,
    List,
    Table,
    Modal,
    Toast,
    Dropdown,
    Form,
    Input,
    Button,
    Link,
    Checkbox,
    Radio,
    Icon,
    Image,
    Text,
    Pagination,
    Unknown,
}

impl Role {
    /// Every member of the vocabulary, in declaration order.
    pub const ALL: [Role; 22] = [
        Role::Page,
        Role::Nav,
        Role::Header,
        Role::Footer,
        Role::Section,
        Role::Card,
        Role::List,
        Role::Table,
        Role::Modal,
        Role::Toast,
        Role::Dropdown,
        Role::Form,
        Role::Input,
        Role::Button,
        Role::Link,
        Role::Checkbox,
        Role::Radio,
        Role::Icon,
        Role::Image,
        Role::Text,
        Role::Pagination,
        Role::Unknown,
    ];

    /// The serialized tag for this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Page => "PAGE",
            Role::Nav => "NAV",
            Role::Header => "HEADER",
            Role::Footer => "FOOTER",
            Role::Section => "SECTION",
            Role::Card => "CARD",
            Role::List => "LIST",
            Role::Table => "TABLE",
            Role::Modal => "MODAL",
            Role::Toast => "TOAST",
            Role::Dropdown => "DROPDOWN",
            Role::Form => "FORM",
            Role::Input => "INPUT",
            Role::Button => "BUTTON",
            Role::Link => "LINK",
            Role::Checkbox => "CHECKBOX",
            Role::Radio => "RADIO",
            Role::Icon => "ICON",
            Role::Image => "IMAGE",
            Role::Text => "TEXT",
            Role::Pagination => "PAGINATION",
            Role::Unknown => "UNKNOWN",
        }
    }

    /// Parse a serialized tag. Returns `None` for anything outside the
    /// closed vocabulary (case-sensitive, matching the wire format).
    #[must_use]
    pub fn parse(tag: &str) -> Option<Role> {
        Role::ALL.iter().copied().find(|r| r.as_str() == tag)
    }

    /// Whether this role is a layout container or overlay — the roles the
    /// renderer draws as bordered boxes.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(
            self,
            Role::Page
                | Role::Nav
                | Role::Header
                | Role::Footer
                | Role::Section
                | Role::Card
                | Role::List
                | Role::Table
                | Role::Modal
                | Role::Toast
                | Role::Dropdown
                | Role::Form
        )
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Bounding boxes
// ---------------------------------------------------------------------------

/// A rectangle in viewport-normalized coordinates: `(x, y, w, h)`, each in
/// `[0, 1]`, origin at the top-left.
///
/// Serializes as a bare 4-element array. Zero width or height is legal (a
/// zero-area affordance such as a collapsed drawer). Components outside
/// `[0, 1]` are not rejected, but behavior is defined only within the unit
/// square.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox01(pub [f64; 4]);

impl BBox01 {
    #[must_use]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        BBox01([x, y, w, h])
    }

    #[must_use]
    pub const fn x(&self) -> f64 {
        self.0[0]
    }

    #[must_use]
    pub const fn y(&self) -> f64 {
        self.0[1]
    }

    #[must_use]
    pub const fn w(&self) -> f64 {
        self.0[2]
    }

    #[must_use]
    pub const fn h(&self) -> f64 {
        self.0[3]
    }

    /// Area in viewport units. Used for ranking diff changes.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.w() * self.h()
    }
}

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// Behavior flags a capture tool may attach to a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFlags {
    /// Element is position-sticky or fixed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticky: Option<bool>,
    /// Element owns a scrollable overflow region.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrollable: Option<bool>,
    /// Element is one instance of a repeated template (list rows, cards).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeated: Option<bool>,
}

/// One node of the IR tree: a semantic primitive with a normalized
/// bounding box.
///
/// `id` may be empty until [`assign_node_ids`] has run; every other
/// required field is meaningful from construction. Optional fields are
/// modeled as `Option` so hashing is a deterministic function of presence,
/// never of sentinel values.
///
/// [`assign_node_ids`]: https://docs.rs/websketch-fingerprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Content-addressed identifier. Empty string before assignment.
    #[serde(default)]
    pub id: String,
    pub role: Role,
    pub bbox: BBox01,
    pub interactive: bool,
    pub visible: bool,
    /// Short free-form intent tag, e.g. `"primary_cta"`, `"login"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic: Option<String>,
    /// Digest of the accessibility name or DOM id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextSignal>,
    /// Coarse z-bucket, 0–10.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focusable: Option<bool>,
    /// Ordered children. Absent and empty are equivalent.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<NodeFlags>,
}

impl Node {
    /// Create a non-interactive, visible node with no optional fields.
    #[must_use]
    pub fn new(role: Role, bbox: BBox01) -> Self {
        Node {
            id: String::new(),
            role,
            bbox,
            interactive: false,
            visible: true,
            semantic: None,
            name_hash: None,
            text: None,
            z: None,
            enabled: None,
            focusable: None,
            children: Vec::new(),
            flags: None,
        }
    }

    #[must_use]
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    #[must_use]
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    #[must_use]
    pub fn with_semantic(mut self, semantic: impl Into<String>) -> Self {
        self.semantic = Some(semantic.into());
        self
    }

    #[must_use]
    pub fn with_name_hash(mut self, name_hash: impl Into<String>) -> Self {
        self.name_hash = Some(name_hash.into());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextSignal) -> Self {
        self.text = Some(text);
        self
    }

    #[must_use]
    pub fn with_z(mut self, z: u8) -> Self {
        self.z = Some(z);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Total node count of the subtree rooted here, including `self`.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(Node::subtree_len)
            .sum::<usize>()
    }
}

// ---------------------------------------------------------------------------
// Captures
// ---------------------------------------------------------------------------

/// Viewport geometry at capture time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub w_px: f64,
    pub h_px: f64,
    /// `w_px / h_px`, recorded by the capture tool. Fingerprints round this
    /// to two decimals so minor viewport-size noise does not perturb them.
    pub aspect: f64,
    /// Vertical scroll position normalized to document height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_y01: Option<f64>,
}

/// Provenance of the tool that produced a capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerInfo {
    pub name: String,
    pub version: String,
    /// Digest of the capture options in effect, for reproducibility checks.
    pub options_hash: String,
}

/// A full serialized snapshot of a web page as IR.
///
/// `root.role` is conventionally [`Role::Page`] but this is not enforced.
/// Captures are immutable values; the only in-place mutation in the core is
/// node-ID assignment, which callers opt into explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capture {
    /// Schema version string. See [`crate::schema`].
    pub version: String,
    pub url: String,
    pub timestamp_ms: f64,
    pub viewport: Viewport,
    pub compiler: CompilerInfo,
    pub root: Node,
}
