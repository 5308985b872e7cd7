//! Deep merge algorithm for configuration trees.
//!
//! Environments and settings files are layered: a child layer is merged on
//! top of everything beneath it. This module implements the merge semantics.
//!
//! # Merge Rules
//!
//! - Mappings are merged recursively, key by key
//! - Sequences are replaced entirely (not merged)
//! - A [`Node::NoOverride`] in the overlay keeps the base value
//! - Any other overlay value replaces the base value
//! - Keys present on only one side pass through unchanged

use super::node::Node;

/// Deep merge two configuration trees.
///
/// The overlay takes precedence at every leaf, except where it holds the
/// [`Node::NoOverride`] marker. Neither input is modified.
///
/// # Arguments
///
/// * `base` - The lower layer (e.g. the resolved parent environment)
/// * `overlay` - The upper layer (takes precedence)
///
/// # Returns
///
/// A new Node with merged contents
pub fn deep_merge(base: &Node, overlay: &Node) -> Node {
    match (base, overlay) {
        (Node::Mapping(base_map), Node::Mapping(overlay_map)) => {
            let mut result = base_map.clone();

            for (key, overlay_value) in overlay_map {
                let merged = match base_map.get(key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value.clone(),
                };
                result.insert(key.clone(), merged);
            }

            Node::Mapping(result)
        }

        (base, Node::NoOverride) => base.clone(),

        (_, overlay) => overlay.clone(),
    }
}

/// Merge multiple layers in order (later overrides earlier).
///
/// # Arguments
///
/// * `layers` - Slice of layers in merge order (first is base, last has highest priority)
pub fn merge_all(layers: &[Node]) -> Node {
    layers
        .iter()
        .fold(Node::empty_mapping(), |acc, layer| deep_merge(&acc, layer))
}
