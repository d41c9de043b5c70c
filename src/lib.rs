//! Declarative, async-aware construction of live DOM trees.
//!
//! [`compose`] takes a [`Tag`], [`Attributes`] and a [`Child`] tree.
//! Each may be concrete, [`Deferred`] (a future) or [`Lazy`](`Value::Lazy`) (a function of the element, entry name or parent),
//! at any depth. Everything is resolved and applied strictly in the given order, one entry at a time,
//! even where some entries suspend and others don't.
//!
//! Failures are [`JsValue`](`wasm_bindgen::JsValue`)s, passed through unchanged from the host or from deferred values.
//! Mutations made before a failure are not rolled back.

#![doc(html_root_url = "https://docs.rs/dom-compose/0.1.0")]
#![warn(clippy::pedantic)]

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod attributes;
pub mod children;
mod compose;
mod listeners;
mod map;
pub mod nodes;
pub mod query;
mod value;

pub use attributes::{apply_attributes, classes, hyphenate, AttributeMap, AttributeValue, Attributes, ClassList, Entries, Listeners};
pub use children::{append_children, Child, Content};
pub use compose::{compose, compose_node, Composer, Tag, SVG_NAMESPACE, SVG_PREFIX};
pub use listeners::{listen, retained_handler_count, unlisten, EventHandler, Listener};
pub use map::Map;
pub use nodes::{append_node, remove_node, replace_node};
pub use query::{data_query, find, find_all, find_all_by_data, find_by_data};
pub use value::{Deferred, Named, Value};
