//! The resolvable value shape that tags, attributes and children are built from.

use core::{fmt, future::Future};
use futures_util::future::{FutureExt, LocalBoxFuture};
use tracing::debug;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

/// A value that becomes available once the wrapped future settles.
///
/// A rejected or failed future aborts the resolution that awaits it and is passed through unchanged.
pub type Deferred<T> = LocalBoxFuture<'static, Result<T, JsValue>>;

/// A value that is either already [`Concrete`](`Value::Concrete`), will be produced by a [`Deferred`] future
/// or is computed [`Lazy`](`Value::Lazy`)ily from a context of type `C` when it is resolved.
///
/// Any chain of deferred and lazy steps must end in a concrete value.
/// There is no cycle detection.
pub enum Value<T, C: ?Sized> {
	Concrete(T),
	Deferred(Deferred<Value<T, C>>),
	Lazy(Box<dyn FnOnce(&C) -> Value<T, C>>),
}

impl<T, C: ?Sized> Value<T, C> {
	/// Unwraps `self` until it is concrete.
	///
	/// Each lazy step is invoked exactly once with `context` and each deferred step is awaited in turn.
	/// Nothing is cached.
	///
	/// # Errors
	///
	/// Iff a deferred step fails, with that failure.
	pub async fn resolve(self, context: &C) -> Result<T, JsValue> {
		let mut value = self;
		loop {
			value = match value {
				Value::Concrete(concrete) => break Ok(concrete),
				Value::Deferred(deferred) => {
					debug!("Suspending on deferred value.");
					deferred.await?
				}
				Value::Lazy(lazy) => lazy(context),
			}
		}
	}

	#[must_use]
	pub fn is_concrete(&self) -> bool {
		matches!(self, Value::Concrete(_))
	}
}

impl<T: 'static, C: ?Sized + 'static> Value<T, C> {
	/// Wraps a future that produces (something convertible into) the value.
	pub fn deferred<V: Into<Self>>(future: impl 'static + Future<Output = Result<V, JsValue>>) -> Self {
		Value::Deferred(future.map(|result| result.map(Into::into)).boxed_local())
	}

	/// Wraps a function that is called with the resolution context to produce the value.
	pub fn lazy<V: Into<Self>>(lazy: impl 'static + FnOnce(&C) -> V) -> Self {
		Value::Lazy(Box::new(move |context| lazy(context).into()))
	}
}

impl<C: ?Sized + 'static> Value<String, C> {
	/// Adapts a [`js_sys::Promise`] that fulfills with a string.
	///
	/// Any other fulfillment value makes resolution fail.
	#[must_use]
	pub fn promise(promise: js_sys::Promise) -> Self {
		Self::deferred(async move {
			let fulfilled = JsFuture::from(promise).await?;
			fulfilled
				.as_string()
				.ok_or_else(|| JsValue::from_str("dom-compose: Expected the promise to fulfill with a string."))
		})
	}
}

impl<T: Default, C: ?Sized> Default for Value<T, C> {
	fn default() -> Self {
		Value::Concrete(T::default())
	}
}

impl<T: fmt::Debug, C: ?Sized> fmt::Debug for Value<T, C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Concrete(concrete) => f.debug_tuple("Concrete").field(concrete).finish(),
			Value::Deferred(_) => f.write_str("Deferred(..)"),
			Value::Lazy(_) => f.write_str("Lazy(..)"),
		}
	}
}

/// Context of lazy values that stand for one named entry of an element,
/// like an attribute or a `dataSet` key.
#[derive(Debug, Clone)]
pub struct Named {
	pub element: web_sys::Element,
	pub name: String,
}

impl Named {
	#[must_use]
	pub fn new(element: &web_sys::Element, name: &str) -> Self {
		Self {
			element: element.clone(),
			name: name.to_owned(),
		}
	}
}

impl<C: ?Sized> From<String> for Value<String, C> {
	fn from(concrete: String) -> Self {
		Value::Concrete(concrete)
	}
}

impl<C: ?Sized> From<&str> for Value<String, C> {
	fn from(concrete: &str) -> Self {
		Value::Concrete(concrete.to_owned())
	}
}

impl<C: ?Sized> From<&String> for Value<String, C> {
	fn from(concrete: &String) -> Self {
		Value::Concrete(concrete.clone())
	}
}

impl<T, C: ?Sized> From<Vec<T>> for Value<Vec<T>, C> {
	fn from(concrete: Vec<T>) -> Self {
		Value::Concrete(concrete)
	}
}

/// Implements string-form conversions for plain scalars.
macro_rules! scalars {
	($($scalar:ty),*$(,)?) => {$(
		impl<C: ?Sized> From<$scalar> for Value<String, C> {
			fn from(scalar: $scalar) -> Self {
				Value::Concrete(scalar.to_string())
			}
		}
	)*};
}
scalars!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
