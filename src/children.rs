use crate::value::Value;
use core::fmt;
use futures_util::future::{FutureExt, LocalBoxFuture};
use tracing::{instrument, trace};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// Children to append. Lazy forms receive the parent node.
pub type Child = Value<Content, web_sys::Node>;

/// What a [`Child`] resolves to.
pub enum Content {
	Empty,
	/// Appended in order, each item completely before the next.
	Sequence(Vec<Child>),
	Node(web_sys::Node),
	/// Appended as a new text node.
	Text(String),
}

impl Default for Content {
	fn default() -> Self {
		Content::Empty
	}
}

impl fmt::Debug for Content {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Content::Empty => f.write_str("Empty"),
			Content::Sequence(children) => f.debug_tuple("Sequence").field(children).finish(),
			Content::Node(node) => f.debug_tuple("Node").field(node).finish(),
			Content::Text(text) if cfg!(feature = "dangerous-logging") => f.debug_tuple("Text").field(text).finish(),
			Content::Text(text) => write!(f, "Text(<{} bytes>)", text.len()),
		}
	}
}

impl Value<Content, web_sys::Node> {
	/// Collects a sequence of children.
	pub fn sequence<T: Into<Child>>(children: impl IntoIterator<Item = T>) -> Self {
		Value::Concrete(Content::Sequence(children.into_iter().map(Into::into).collect()))
	}

	/// Adapts a [`js_sys::Promise`] that fulfills with a [`web_sys::Node`] or a string.
	///
	/// Any other fulfillment value makes resolution fail.
	#[must_use]
	pub fn promise(promise: js_sys::Promise) -> Self {
		Self::deferred(async move {
			let fulfilled = JsFuture::from(promise).await?;
			if let Some(text) = fulfilled.as_string() {
				Ok(Content::Text(text))
			} else {
				fulfilled
					.dyn_into::<web_sys::Node>()
					.map(Content::Node)
					.map_err(|_| JsValue::from_str("dom-compose: Expected the promise to fulfill with a node or a string."))
			}
		})
	}
}

impl From<Content> for Child {
	fn from(content: Content) -> Self {
		Value::Concrete(content)
	}
}

impl From<()> for Child {
	fn from((): ()) -> Self {
		Value::Concrete(Content::Empty)
	}
}

impl From<Vec<Child>> for Child {
	fn from(children: Vec<Child>) -> Self {
		Value::Concrete(Content::Sequence(children))
	}
}

impl From<web_sys::Node> for Child {
	fn from(node: web_sys::Node) -> Self {
		Value::Concrete(Content::Node(node))
	}
}

impl From<&web_sys::Node> for Child {
	fn from(node: &web_sys::Node) -> Self {
		Value::Concrete(Content::Node(node.clone()))
	}
}

impl From<web_sys::Element> for Child {
	fn from(element: web_sys::Element) -> Self {
		Value::Concrete(Content::Node(element.into()))
	}
}

impl From<&web_sys::Element> for Child {
	fn from(element: &web_sys::Element) -> Self {
		Value::Concrete(Content::Node(element.clone().into()))
	}
}

impl From<web_sys::Text> for Child {
	fn from(text: web_sys::Text) -> Self {
		Value::Concrete(Content::Node(text.into()))
	}
}

impl From<String> for Child {
	fn from(text: String) -> Self {
		Value::Concrete(Content::Text(text))
	}
}

impl From<&str> for Child {
	fn from(text: &str) -> Self {
		Value::Concrete(Content::Text(text.to_owned()))
	}
}

/// Implements text conversions for plain scalars.
macro_rules! scalar_text {
	($($scalar:ty),*$(,)?) => {$(
		impl From<$scalar> for Child {
			fn from(scalar: $scalar) -> Self {
				Value::Concrete(Content::Text(scalar.to_string()))
			}
		}
	)*};
}
scalar_text!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// Resolves `children` and appends the result to `parent`, preserving their given order exactly.
///
/// # Errors
///
/// On the first failed deferred value or host rejection. Children appended before that stay appended.
#[instrument(skip(children))]
pub async fn append_children(children: Child, parent: &web_sys::Node) -> Result<(), JsValue> {
	append(children, parent).await
}

fn append<'a>(child: Child, parent: &'a web_sys::Node) -> LocalBoxFuture<'a, Result<(), JsValue>> {
	async move {
		match child.resolve(parent).await? {
			Content::Empty => trace!("Skipping empty child."),
			Content::Sequence(children) => {
				trace!(len = children.len(), "Appending sequence.");
				for child in children {
					append(child, parent).await?;
				}
			}
			Content::Node(node) => {
				trace!(?node, "Appending node.");
				parent.append_child(&node)?;
			}
			Content::Text(text) => {
				if cfg!(feature = "dangerous-logging") {
					trace!(text = text.as_str(), "Appending text.");
				} else {
					trace!("Appending text.");
				}
				let text = owner_document(parent)?.create_text_node(&text);
				parent.append_child(&text)?;
			}
		}
		Ok(())
	}
	.boxed_local()
}

/// The document that creates nodes for `node`.
pub(crate) fn owner_document(node: &web_sys::Node) -> Result<web_sys::Document, JsValue> {
	match node.owner_document() {
		Some(document) => Ok(document),
		None => node
			.dyn_ref::<web_sys::Document>()
			.cloned()
			.ok_or_else(|| JsValue::from_str("dom-compose: No owner document found for parent node.")),
	}
}
