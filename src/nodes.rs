//! Single-node insertion, removal and replacement.

use crate::children::{append_children, Child};
use tracing::{instrument, trace};
use wasm_bindgen::JsValue;

/// Resolves `child` against `parent` and appends it, exactly like [`append_children`].
///
/// # Errors
///
/// As [`append_children`].
pub async fn append_node(child: impl Into<Child>, parent: &web_sys::Node) -> Result<(), JsValue> {
	append_children(child.into(), parent).await
}

/// Detaches `node` from its parent. Parentless nodes are left alone.
///
/// # Errors
///
/// Iff the host rejects the removal.
#[instrument]
pub fn remove_node(node: &web_sys::Node) -> Result<(), JsValue> {
	match node.parent_node() {
		Some(parent) => parent.remove_child(node).map(drop),
		None => {
			trace!("Node has no parent. Nothing to remove.");
			Ok(())
		}
	}
}

/// Puts `new` where `old` is. Parentless `old` nodes are left alone.
///
/// # Errors
///
/// Iff the host rejects the replacement, e.g. because `new` is an ancestor of `old`'s parent.
#[instrument]
pub fn replace_node(old: &web_sys::Node, new: &web_sys::Node) -> Result<(), JsValue> {
	match old.parent_node() {
		Some(parent) => parent.replace_child(new, old).map(drop),
		None => {
			trace!("Node has no parent. Nothing to replace.");
			Ok(())
		}
	}
}
