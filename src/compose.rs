use crate::{
	attributes::{apply_attributes, Attributes},
	children::{append_children, Child},
	value::Value,
};
use tracing::{error, instrument, trace};
use wasm_bindgen::{JsCast, JsValue};

/// Tag names with this prefix are created in the [`SVG_NAMESPACE`], without the prefix.
pub const SVG_PREFIX: &str = "svg:";
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// What to compose into: an existing node, reused in place, or the tag name of a new element.
#[derive(Debug, Clone)]
pub enum Tag {
	Element(web_sys::Element),
	/// Any other node, like a [`web_sys::DocumentFragment`]. Only [`Composer::compose_node`] accepts non-elements.
	Node(web_sys::Node),
	Name(String),
}

impl Default for Tag {
	fn default() -> Self {
		Tag::Name("div".to_owned())
	}
}

impl From<web_sys::Element> for Tag {
	fn from(element: web_sys::Element) -> Self {
		Tag::Element(element)
	}
}

impl From<&web_sys::Element> for Tag {
	fn from(element: &web_sys::Element) -> Self {
		Tag::Element(element.clone())
	}
}

impl From<web_sys::Node> for Tag {
	fn from(node: web_sys::Node) -> Self {
		Tag::Node(node)
	}
}

impl From<&web_sys::Node> for Tag {
	fn from(node: &web_sys::Node) -> Self {
		Tag::Node(node.clone())
	}
}

impl From<web_sys::DocumentFragment> for Tag {
	fn from(fragment: web_sys::DocumentFragment) -> Self {
		Tag::Node(fragment.into())
	}
}

impl From<&web_sys::DocumentFragment> for Tag {
	fn from(fragment: &web_sys::DocumentFragment) -> Self {
		Tag::Node(fragment.clone().into())
	}
}

impl From<String> for Tag {
	fn from(name: String) -> Self {
		Tag::Name(name)
	}
}

impl From<&str> for Tag {
	fn from(name: &str) -> Self {
		Tag::Name(name.to_owned())
	}
}

/// Composes elements in one specific [`web_sys::Document`].
#[derive(Debug, Clone)]
pub struct Composer {
	document: web_sys::Document,
}

impl Composer {
	#[must_use]
	pub fn new(document: web_sys::Document) -> Self {
		Self { document }
	}

	/// Binds to the current window's document.
	///
	/// # Errors
	///
	/// Iff there is no window or it has no document.
	pub fn global() -> Result<Self, JsValue> {
		global_document().map(Self::new)
	}

	#[must_use]
	pub fn document(&self) -> &web_sys::Document {
		&self.document
	}

	/// Creates or reuses the element for `tag`, applies `attributes` to it completely and only then appends `children`.
	///
	/// Event listeners from `attributes` are therefore in place before any child is inserted.
	///
	/// # Errors
	///
	/// Iff element creation fails or `tag` is a [`Tag::Node`] that isn't an element,
	/// or with the first error of [`apply_attributes`] or [`append_children`].
	#[instrument(skip(tag, attributes, children))]
	pub async fn compose(
		&self,
		tag: impl Into<Tag>,
		attributes: impl Into<Attributes>,
		children: impl Into<Child>,
	) -> Result<web_sys::Element, JsValue> {
		let element = match tag.into() {
			Tag::Element(element) => {
				trace!(?element, "Reusing element.");
				element
			}
			Tag::Node(node) => node.dyn_into::<web_sys::Element>().map_err(|node| {
				error!(?node, "Tried to compose a non-element node as element.");
				JsValue::from_str("dom-compose: Only elements can be composed as element. Use `compose_node` for other nodes.")
			})?,
			Tag::Name(name) => self.create_element(&name)?,
		};
		apply_attributes(&element, attributes.into()).await?;
		append_children(children.into(), &element).await?;
		Ok(element)
	}

	/// Like [`compose`](`Composer::compose`), but also reuses nodes that aren't elements, like document fragments.
	///
	/// Such nodes can't carry attributes, so `attributes` must then be a concrete empty map (or `()`).
	///
	/// # Errors
	///
	/// Iff attributes are given for a node that isn't an element, or as [`compose`](`Composer::compose`).
	#[instrument(skip(tag, attributes, children))]
	pub async fn compose_node(
		&self,
		tag: impl Into<Tag>,
		attributes: impl Into<Attributes>,
		children: impl Into<Child>,
	) -> Result<web_sys::Node, JsValue> {
		match tag.into() {
			Tag::Node(node) if !node.is_instance_of::<web_sys::Element>() => {
				trace!(?node, "Reusing node.");
				match attributes.into() {
					Value::Concrete(attributes) if attributes.is_empty() => (),
					attributes => {
						error!(?node, ?attributes, "Tried to apply attributes to a non-element node.");
						return Err(JsValue::from_str("dom-compose: Attributes can only be applied to elements."));
					}
				}
				append_children(children.into(), &node).await?;
				Ok(node)
			}
			tag => self.compose(tag, attributes, children).await.map(Into::into),
		}
	}

	/// Creates an element without attaching it, in the SVG namespace if `name` has the [`SVG_PREFIX`].
	///
	/// # Errors
	///
	/// Iff the host rejects the name.
	pub fn create_element(&self, name: &str) -> Result<web_sys::Element, JsValue> {
		match name.strip_prefix(SVG_PREFIX) {
			Some(local_name) => {
				trace!(local_name, "Creating SVG element.");
				self.document.create_element_ns(Some(SVG_NAMESPACE), local_name)
			}
			None => {
				trace!(name, "Creating element.");
				self.document.create_element(name)
			}
		}
	}
}

/// [`Composer::compose`] in the current window's document.
///
/// # Errors
///
/// Iff there is no such document, or as [`Composer::compose`].
pub async fn compose(
	tag: impl Into<Tag>,
	attributes: impl Into<Attributes>,
	children: impl Into<Child>,
) -> Result<web_sys::Element, JsValue> {
	Composer::global()?.compose(tag, attributes, children).await
}

/// [`Composer::compose_node`] in the current window's document.
///
/// # Errors
///
/// Iff there is no such document, or as [`Composer::compose_node`].
pub async fn compose_node(
	tag: impl Into<Tag>,
	attributes: impl Into<Attributes>,
	children: impl Into<Child>,
) -> Result<web_sys::Node, JsValue> {
	Composer::global()?.compose_node(tag, attributes, children).await
}

pub(crate) fn global_document() -> Result<web_sys::Document, JsValue> {
	web_sys::window()
		.and_then(|window| window.document())
		.ok_or_else(|| JsValue::from_str("dom-compose: No global document available."))
}
