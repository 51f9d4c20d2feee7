//! Cross-crate fingerprint contract tests.
//!
//! These pin the wire-level behavior other implementations of the IR rely
//! on: golden digests, digest format, canonical sibling ordering, and the
//! split between the full and layout fingerprints.

use proptest::prelude::*;
use websketch::{
    deep_hash, fingerprint_capture, fingerprint_layout, parse_capture, shallow_hash, short_hash,
    BBox01, Capture, CompilerInfo, HashOptions, Node, Role, TextSignal, ValidationLimits, Viewport,
};

fn minimal_capture() -> Capture {
    Capture {
        version: "0.1".to_owned(),
        url: "https://example.com".to_owned(),
        timestamp_ms: 1_700_000_000_000.0,
        viewport: Viewport {
            w_px: 1920.0,
            h_px: 1080.0,
            aspect: 1920.0 / 1080.0,
            scroll_y01: None,
        },
        compiler: CompilerInfo {
            name: "websketch-ir".to_owned(),
            version: "0.2.1".to_owned(),
            options_hash: "test".to_owned(),
        },
        root: Node::new(Role::Page, BBox01::new(0.0, 0.0, 1.0, 1.0)),
    }
}

fn card_row(xs: &[f64]) -> Capture {
    let mut capture = minimal_capture();
    capture.root.children = xs
        .iter()
        .map(|&x| Node::new(Role::Card, BBox01::new(x, 0.5, 0.15, 0.2)))
        .collect();
    capture
}

#[test]
fn golden_short_hash() {
    assert_eq!(short_hash("hello"), "0a9cede7");
}

#[test]
fn golden_minimal_capture_fingerprint() {
    assert_eq!(fingerprint_capture(&minimal_capture()), "29338a9f");
}

#[test]
fn every_digest_is_eight_lowercase_hex() {
    let capture = card_row(&[0.0, 0.2, 0.4]);
    let digests = [
        short_hash("anything"),
        shallow_hash(&capture.root, &HashOptions::default()),
        deep_hash(&capture.root, &HashOptions::layout()),
        fingerprint_capture(&capture),
        fingerprint_layout(&capture),
    ];
    for digest in digests {
        assert_eq!(digest.len(), 8);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}

#[test]
fn fingerprints_are_idempotent() {
    let capture = card_row(&[0.0, 0.2, 0.4, 0.6, 0.8]);
    assert_eq!(fingerprint_capture(&capture), fingerprint_capture(&capture));
    assert_eq!(fingerprint_layout(&capture), fingerprint_layout(&capture));
}

#[test]
fn leaf_deep_hash_equals_shallow_hash() {
    let leaf = Node::new(Role::Button, BBox01::new(0.4, 0.5, 0.2, 0.06)).interactive(true);
    let opts = HashOptions::default();
    assert_eq!(deep_hash(&leaf, &opts), shallow_hash(&leaf, &opts));
}

#[test]
fn metadata_is_invisible_to_fingerprints() {
    let base = minimal_capture();
    let mut other = base.clone();
    other.url = "https://example.org/elsewhere".to_owned();
    other.timestamp_ms = 1.0;
    other.compiler = CompilerInfo {
        name: "websketch-ir".to_owned(),
        version: "99.0.0".to_owned(),
        options_hash: "different".to_owned(),
    };
    assert_eq!(fingerprint_capture(&base), fingerprint_capture(&other));
    assert_eq!(fingerprint_layout(&base), fingerprint_layout(&other));
}

#[test]
fn structural_edits_are_visible_to_fingerprints() {
    let base = card_row(&[0.0, 0.2, 0.4]);

    let mut role_changed = base.clone();
    role_changed.root.children[0].role = Role::Section;
    assert_ne!(fingerprint_capture(&base), fingerprint_capture(&role_changed));

    let mut shifted = base.clone();
    shifted.root.children[0].bbox = BBox01::new(0.005, 0.5, 0.15, 0.2);
    assert_ne!(fingerprint_capture(&base), fingerprint_capture(&shifted));

    let mut flipped = base.clone();
    flipped.root.children[0].interactive = true;
    assert_ne!(fingerprint_capture(&base), fingerprint_capture(&flipped));

    let mut retexted = base.clone();
    retexted.root.children[0].text = Some(TextSignal::from_raw("New copy"));
    assert_ne!(fingerprint_capture(&base), fingerprint_capture(&retexted));
}

#[test]
fn text_and_name_split_full_from_layout() {
    let mut a = minimal_capture();
    a.root.children = vec![
        Node::new(Role::Text, BBox01::new(0.1, 0.1, 0.8, 0.1))
            .with_text(TextSignal::from_raw("Sign in to continue"))
            .with_name_hash("aaaa1111"),
    ];
    let mut b = a.clone();
    b.root.children[0].text = Some(TextSignal::from_raw("Welcome back, friend"));
    b.root.children[0].name_hash = Some("bbbb2222".to_owned());

    assert_ne!(fingerprint_capture(&a), fingerprint_capture(&b));
    assert_eq!(fingerprint_layout(&a), fingerprint_layout(&b));
}

#[test]
fn serialized_round_trip_preserves_fingerprint() {
    let mut capture = card_row(&[0.0, 0.25, 0.5]);
    capture.root.children[1] = capture.root.children[1]
        .clone()
        .with_text(TextSignal::from_raw("Card two"))
        .with_semantic("feature_card");

    let fingerprint = fingerprint_capture(&capture);
    let json = serde_json::to_string(&capture).expect("serialize capture");
    let reparsed = parse_capture(&json, &ValidationLimits::default()).expect("reparse capture");
    assert_eq!(reparsed, capture);
    assert_eq!(fingerprint_capture(&reparsed), fingerprint);
}

proptest! {
    /// Same-row siblings may arrive in any input order without moving the
    /// fingerprint: deep hashing canonicalizes sibling order.
    #[test]
    fn sibling_order_is_canonicalized(
        permutation in Just(vec![0.0_f64, 0.2, 0.4, 0.6, 0.8]).prop_shuffle()
    ) {
        let reference = card_row(&[0.0, 0.2, 0.4, 0.6, 0.8]);
        let shuffled = card_row(&permutation);
        prop_assert_eq!(
            fingerprint_capture(&reference),
            fingerprint_capture(&shuffled)
        );
    }
}
