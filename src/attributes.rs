//! Attribute maps and the engine that applies them to an element.
//!
//! Attribute names are dispatched on before anything else is resolved:
//!
//! | name            | payload                                 | effect                                           |
//! |-----------------|-----------------------------------------|--------------------------------------------------|
//! | `dataSet`       | [`Entries`]                             | [***dataset***] entries, keys verbatim           |
//! | `ariaSet`       | [`Entries`]                             | `aria-<lowercased key>` attributes               |
//! | `classList`     | [`ClassList`]                           | class tokens added                               |
//! | `style`         | [`Entries`]                             | style properties, names verbatim                 |
//! | `on`            | [`Listeners`]                           | event listeners via [`listen`](`crate::listen`)  |
//! | `$name`         | scalar                                  | attribute `name`, verbatim                       |
//! | anything else   | scalar                                  | attribute [`hyphenate`]`(name)`                  |
//!
//! [***dataset***]: https://developer.mozilla.org/en-US/docs/Web/API/HTMLElement/dataset

use crate::{
	listeners::{listen, Listener},
	map::Map,
	value::{Named, Value},
};
use core::fmt;
use tracing::{error, instrument, trace};
use wasm_bindgen::{JsCast, JsValue};

/// Prefix of attribute names that are set verbatim.
pub const RAW_PREFIX: char = '$';

pub const DATA_SET: &str = "dataSet";
pub const ARIA_SET: &str = "ariaSet";
pub const CLASS_LIST: &str = "classList";
pub const STYLE: &str = "style";
pub const ON: &str = "on";

/// A scalar attribute value. Lazy forms receive the element and the attribute's name.
pub type Scalar = Value<String, Named>;
/// Keyed scalars for `dataSet`, `ariaSet` and `style`.
pub type Entries = Map<Scalar>;
/// Class names for `classList`. Lazy forms receive only the element.
pub type ClassList = Vec<Value<String, web_sys::Element>>;
/// Event name to handler for `on`.
pub type Listeners = Map<Listener>;

/// The ordered attribute map. See the [module documentation](`self`) for how names are interpreted.
pub type AttributeMap = Map<AttributeValue>;
/// Attributes to apply. Lazy forms receive the element.
pub type Attributes = Value<AttributeMap, web_sys::Element>;

/// The value of one entry of an [`AttributeMap`].
///
/// Which variant is expected depends on the entry's name.
pub enum AttributeValue {
	Scalar(Scalar),
	Entries(Value<Entries, web_sys::Element>),
	Classes(Value<ClassList, web_sys::Element>),
	Listeners(Value<Listeners, web_sys::Element>),
}

impl AttributeValue {
	fn kind(&self) -> &'static str {
		match self {
			AttributeValue::Scalar(_) => "a scalar",
			AttributeValue::Entries(_) => "entries",
			AttributeValue::Classes(_) => "a class list",
			AttributeValue::Listeners(_) => "listeners",
		}
	}
}

impl fmt::Debug for AttributeValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			AttributeValue::Scalar(scalar) => f.debug_tuple("Scalar").field(scalar).finish(),
			AttributeValue::Entries(entries) => f.debug_tuple("Entries").field(entries).finish(),
			AttributeValue::Classes(classes) => f.debug_tuple("Classes").field(classes).finish(),
			AttributeValue::Listeners(listeners) => f.debug_tuple("Listeners").field(listeners).finish(),
		}
	}
}

impl<T: Into<Scalar>> From<T> for AttributeValue {
	fn from(scalar: T) -> Self {
		AttributeValue::Scalar(scalar.into())
	}
}

impl Map<AttributeValue> {
	/// Sets `dataSet` entries.
	#[must_use]
	pub fn data_set(self, entries: impl Into<Value<Entries, web_sys::Element>>) -> Self {
		self.with(DATA_SET, AttributeValue::Entries(entries.into()))
	}

	/// Sets `ariaSet` entries.
	#[must_use]
	pub fn aria_set(self, entries: impl Into<Value<Entries, web_sys::Element>>) -> Self {
		self.with(ARIA_SET, AttributeValue::Entries(entries.into()))
	}

	/// Sets the `classList` entry.
	#[must_use]
	pub fn class_list(self, classes: impl Into<Value<ClassList, web_sys::Element>>) -> Self {
		self.with(CLASS_LIST, AttributeValue::Classes(classes.into()))
	}

	/// Sets `style` properties.
	#[must_use]
	pub fn style(self, properties: impl Into<Value<Entries, web_sys::Element>>) -> Self {
		self.with(STYLE, AttributeValue::Entries(properties.into()))
	}

	/// Sets the `on` entry.
	#[must_use]
	pub fn on(self, listeners: impl Into<Value<Listeners, web_sys::Element>>) -> Self {
		self.with(ON, AttributeValue::Listeners(listeners.into()))
	}
}

/// Collects class names for [`AttributeMap::class_list`].
pub fn classes<T: Into<Value<String, web_sys::Element>>>(classes: impl IntoIterator<Item = T>) -> ClassList {
	classes.into_iter().map(Into::into).collect()
}

impl<C: ?Sized> From<()> for Value<AttributeMap, C> {
	fn from((): ()) -> Self {
		Value::Concrete(AttributeMap::new())
	}
}

impl<V, C: ?Sized> From<Map<V>> for Value<Map<V>, C> {
	fn from(concrete: Map<V>) -> Self {
		Value::Concrete(concrete)
	}
}

/// Converts medial capitals to hyphen-lowercase, like `backgroundColor` to `background-color`.
///
/// A hyphen is inserted only where an ASCII uppercase letter directly follows an ASCII lowercase one.
#[must_use]
pub fn hyphenate(name: &str) -> String {
	let mut hyphenated = String::with_capacity(name.len() + name.len() / 4);
	let mut previous_lowercase = false;
	for c in name.chars() {
		if previous_lowercase && c.is_ascii_uppercase() {
			hyphenated.push('-');
		}
		previous_lowercase = c.is_ascii_lowercase();
		hyphenated.extend(c.to_lowercase());
	}
	hyphenated
}

/// Resolves `attributes` and applies each entry to `element`, in order and one at a time.
///
/// # Errors
///
/// On the first failed deferred value, host rejection or payload that doesn't fit its name.
/// Entries applied before the failure stay applied.
#[instrument(skip(attributes))]
pub async fn apply_attributes(element: &web_sys::Element, attributes: Attributes) -> Result<(), JsValue> {
	for (name, value) in attributes.resolve(element).await? {
		apply_attribute(element, &name, value).await?;
	}
	Ok(())
}

async fn apply_attribute(element: &web_sys::Element, name: &str, value: AttributeValue) -> Result<(), JsValue> {
	match (name, value) {
		(DATA_SET, AttributeValue::Entries(entries)) => {
			let dataset = dataset(element)?;
			for_each_entry(element, entries, |key, value| {
				trace_entry(DATA_SET, key, value);
				dataset.set(key, value)
			})
			.await
		}
		(ARIA_SET, AttributeValue::Entries(entries)) => {
			for_each_entry(element, entries, |key, value| {
				trace_entry(ARIA_SET, key, value);
				element.set_attribute(&format!("aria-{}", key.to_lowercase()), value)
			})
			.await
		}
		(CLASS_LIST, AttributeValue::Classes(classes)) => {
			let class_list = element.class_list();
			for class in classes.resolve(element).await? {
				let class = class.resolve(element).await?;
				trace_entry(CLASS_LIST, "", &class);
				class_list.add_1(&class)?;
			}
			Ok(())
		}
		(STYLE, AttributeValue::Entries(properties)) => {
			let style = style(element)?;
			for_each_entry(element, properties, |property, value| {
				trace_entry(STYLE, property, value);
				style.set_property(property, value)
			})
			.await
		}
		(ON, AttributeValue::Listeners(listeners)) => {
			for (event, listener) in listeners.resolve(element).await? {
				let handler = listener.resolve().await?;
				trace!(event = event.as_str(), "Applying `on` entry.");
				listen(element, &event, &handler)?;
			}
			Ok(())
		}
		(DATA_SET, value) | (ARIA_SET, value) | (STYLE, value) | (CLASS_LIST, value) | (ON, value) => mismatch(name, &value),
		(name, AttributeValue::Scalar(scalar)) => match name.strip_prefix(RAW_PREFIX) {
			Some(raw) => {
				let value = scalar.resolve(&Named::new(element, raw)).await?;
				trace_entry("raw attribute", raw, &value);
				element.set_attribute(raw, &value)
			}
			None => {
				let value = scalar.resolve(&Named::new(element, name)).await?;
				let name = hyphenate(name);
				trace_entry("attribute", &name, &value);
				element.set_attribute(&name, &value)
			}
		},
		(name, value) => mismatch(name, &value),
	}
}

/// Resolves a nested map and then each of its values in order, handing them to `apply` one at a time.
async fn for_each_entry(
	element: &web_sys::Element,
	entries: Value<Entries, web_sys::Element>,
	mut apply: impl FnMut(&str, &str) -> Result<(), JsValue>,
) -> Result<(), JsValue> {
	for (key, value) in entries.resolve(element).await? {
		let value = value.resolve(&Named::new(element, &key)).await?;
		apply(&key, &value)?;
	}
	Ok(())
}

fn mismatch(name: &str, value: &AttributeValue) -> Result<(), JsValue> {
	error!(name, kind = value.kind(), "Attribute payload doesn't fit its name.");
	Err(JsValue::from_str(&format!(
		"dom-compose: Attribute {:?} can't be set from {}.",
		name,
		value.kind()
	)))
}

fn dataset(element: &web_sys::Element) -> Result<web_sys::DomStringMap, JsValue> {
	if let Some(html_element) = element.dyn_ref::<web_sys::HtmlElement>() {
		Ok(html_element.dataset())
	} else if let Some(svg_element) = element.dyn_ref::<web_sys::SvgElement>() {
		Ok(svg_element.dataset())
	} else {
		Err(JsValue::from_str("dom-compose: `dataSet` requires an HTML or SVG element."))
	}
}

fn style(element: &web_sys::Element) -> Result<web_sys::CssStyleDeclaration, JsValue> {
	if let Some(html_element) = element.dyn_ref::<web_sys::HtmlElement>() {
		Ok(html_element.style())
	} else if let Some(svg_element) = element.dyn_ref::<web_sys::SvgElement>() {
		Ok(svg_element.style())
	} else {
		Err(JsValue::from_str("dom-compose: `style` requires an HTML or SVG element."))
	}
}

fn trace_entry(kind: &str, name: &str, value: &str) {
	if cfg!(feature = "dangerous-logging") {
		trace!(kind, name, value, "Applying entry.");
	} else {
		trace!(kind, name, "Applying entry.");
	}
}
