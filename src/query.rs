//! Selector lookups, scoped to an element, document or fragment, or else the current window's document.

use crate::{attributes::hyphenate, compose::global_document, map::Map};
use tracing::trace;
use wasm_bindgen::{JsCast, JsValue};

/// A node that selectors can be matched within.
enum Scope {
	Element(web_sys::Element),
	Document(web_sys::Document),
	Fragment(web_sys::DocumentFragment),
}

impl Scope {
	fn new(scope: Option<&web_sys::Node>) -> Result<Self, JsValue> {
		let scope = match scope {
			None => return global_document().map(Scope::Document),
			Some(scope) => scope,
		};
		if let Some(element) = scope.dyn_ref::<web_sys::Element>() {
			Ok(Scope::Element(element.clone()))
		} else if let Some(document) = scope.dyn_ref::<web_sys::Document>() {
			Ok(Scope::Document(document.clone()))
		} else if let Some(fragment) = scope.dyn_ref::<web_sys::DocumentFragment>() {
			Ok(Scope::Fragment(fragment.clone()))
		} else {
			Err(JsValue::from_str("dom-compose: Queries can only be scoped to elements, documents or document fragments."))
		}
	}

	fn query_selector(&self, selector: &str) -> Result<Option<web_sys::Element>, JsValue> {
		match self {
			Scope::Element(element) => element.query_selector(selector),
			Scope::Document(document) => document.query_selector(selector),
			Scope::Fragment(fragment) => fragment.query_selector(selector),
		}
	}

	fn query_selector_all(&self, selector: &str) -> Result<web_sys::NodeList, JsValue> {
		match self {
			Scope::Element(element) => element.query_selector_all(selector),
			Scope::Document(document) => document.query_selector_all(selector),
			Scope::Fragment(fragment) => fragment.query_selector_all(selector),
		}
	}
}

/// `scope` may be an element, document or document fragment.
///
/// # Errors
///
/// Iff `selector` is invalid, `scope` is another kind of node or, without `scope`, there is no global document.
pub fn find(selector: &str, scope: Option<&web_sys::Node>) -> Result<Option<web_sys::Element>, JsValue> {
	trace!(selector, "find");
	Scope::new(scope)?.query_selector(selector)
}

/// All matches, in document order.
///
/// # Errors
///
/// As [`find`].
pub fn find_all(selector: &str, scope: Option<&web_sys::Node>) -> Result<Vec<web_sys::Element>, JsValue> {
	trace!(selector, "find_all");
	let nodes = Scope::new(scope)?.query_selector_all(selector)?;
	Ok((0..nodes.length())
		.filter_map(|i| nodes.get(i))
		.filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
		.collect())
}

/// Like [`find`], matching each `data-` attribute in `data` exactly.
///
/// # Errors
///
/// As [`find`]. Values are inlined without quoting, so they must be valid unquoted selector values.
pub fn find_by_data<V: AsRef<str>>(data: &Map<V>, scope: Option<&web_sys::Node>) -> Result<Option<web_sys::Element>, JsValue> {
	find(&data_query(data), scope)
}

/// Like [`find_all`], matching each `data-` attribute in `data` exactly.
///
/// # Errors
///
/// As [`find_all`]. Values are inlined without quoting, so they must be valid unquoted selector values.
pub fn find_all_by_data<V: AsRef<str>>(data: &Map<V>, scope: Option<&web_sys::Node>) -> Result<Vec<web_sys::Element>, JsValue> {
	find_all(&data_query(data), scope)
}

/// Builds a compound attribute selector like `[data-user-id=42][data-role=admin]`.
#[must_use]
pub fn data_query<V: AsRef<str>>(data: &Map<V>) -> String {
	data.iter()
		.map(|(key, value)| format!("[data-{}={}]", hyphenate(key), value.as_ref()))
		.collect()
}
