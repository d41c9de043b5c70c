//! Event handlers and the registry that keeps their [`Closure`]s alive while they are subscribed.

use crate::value::Deferred;
use core::{cell::RefCell, fmt, future::Future};
use futures_util::future::FutureExt;
use hashbrown::{hash_map::Entry, HashMap};
use std::rc::Rc;
use tracing::{debug, error, instrument, trace};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

/// A Rust callback exposed to the host as a single, shared ***JavaScript*** function.
///
/// Clones share the same function, so subscribing a clone and unsubscribing the original works.
#[derive(Clone)]
pub struct EventHandler(Rc<Closure<dyn FnMut(web_sys::Event)>>);

impl EventHandler {
	pub fn new(handler: impl 'static + FnMut(web_sys::Event)) -> Self {
		Self(Rc::new(Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>)))
	}

	#[must_use]
	pub fn function(&self) -> &js_sys::Function {
		(*self.0).as_ref().unchecked_ref()
	}

	fn key(&self) -> usize {
		Rc::as_ptr(&self.0) as usize
	}
}

impl fmt::Debug for EventHandler {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("EventHandler").field(&format_args!("{:#x}", self.key())).finish()
	}
}

/// An entry of an `on` map.
///
/// Unlike other values this one has no lazy form: the handler itself is the function.
pub enum Listener {
	Handler(EventHandler),
	Deferred(Deferred<Listener>),
}

impl Listener {
	pub fn deferred<V: Into<Self>>(future: impl 'static + Future<Output = Result<V, JsValue>>) -> Self {
		Listener::Deferred(future.map(|result| result.map(Into::into)).boxed_local())
	}

	/// Awaits deferred steps until a handler is available.
	///
	/// # Errors
	///
	/// Iff a deferred step fails, with that failure.
	pub async fn resolve(self) -> Result<EventHandler, JsValue> {
		let mut listener = self;
		loop {
			listener = match listener {
				Listener::Handler(handler) => break Ok(handler),
				Listener::Deferred(deferred) => {
					debug!("Suspending on deferred event handler.");
					deferred.await?
				}
			}
		}
	}
}

impl From<EventHandler> for Listener {
	fn from(handler: EventHandler) -> Self {
		Listener::Handler(handler)
	}
}

impl fmt::Debug for Listener {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Listener::Handler(handler) => f.debug_tuple("Handler").field(handler).finish(),
			Listener::Deferred(_) => f.write_str("Deferred(..)"),
		}
	}
}

/// Subscription counts per handler identity. Entries are dropped once their count reaches zero.
struct Registry<V>(HashMap<usize, (u32, V)>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RegistryError {
	/// A count would exceed [`u32::MAX`].
	Saturated,
	/// The key has no retention left to release.
	NotRetained,
}

impl From<RegistryError> for JsValue {
	fn from(error: RegistryError) -> Self {
		JsValue::from_str(match error {
			RegistryError::Saturated => "dom-compose: Too many active subscriptions of the same `EventHandler`.",
			RegistryError::NotRetained => "dom-compose: `EventHandler` released more often than retained.",
		})
	}
}

impl<V> Default for Registry<V> {
	fn default() -> Self {
		Self(HashMap::new())
	}
}

impl<V> Registry<V> {
	fn retain(&mut self, key: usize, value: impl FnOnce() -> V) -> Result<(), RegistryError> {
		match self.0.entry(key) {
			Entry::Occupied(occupied) => {
				let (count, _) = occupied.into_mut();
				*count = count.checked_add(1).ok_or(RegistryError::Saturated)?;
			}
			Entry::Vacant(vacant) => {
				vacant.insert((1, value()));
			}
		}
		Ok(())
	}

	/// Retains `key`, then runs `attach`. The retention is rolled back iff `attach` fails.
	///
	/// `attach` isn't called at all if `key` can't be retained.
	fn retain_while<E: From<RegistryError>>(
		&mut self,
		key: usize,
		value: impl FnOnce() -> V,
		attach: impl FnOnce() -> Result<(), E>,
	) -> Result<(), E> {
		self.retain(key, value)?;
		attach().map_err(|error| {
			drop(self.release(key));
			error
		})
	}

	/// Returns the value once its last retention is released.
	fn release(&mut self, key: usize) -> Result<Option<V>, RegistryError> {
		let (count, _) = self.0.get_mut(&key).ok_or(RegistryError::NotRetained)?;
		*count -= 1;
		if *count == 0 {
			Ok(self.0.remove(&key).map(|(_, value)| value))
		} else {
			Ok(None)
		}
	}

	fn len(&self) -> usize {
		self.0.len()
	}
}

thread_local! {
	static RETAINED: RefCell<Registry<EventHandler>> = RefCell::default();
}

/// Subscribes `handler` to `event` on `target` and retains it until a matching [`unlisten`].
///
/// # Errors
///
/// Iff the host rejects the subscription or the handler was retained more than [`u32::MAX`] times.
#[instrument]
pub fn listen(target: &web_sys::EventTarget, event: &str, handler: &EventHandler) -> Result<(), JsValue> {
	RETAINED.with(|retained| {
		retained.borrow_mut().retain_while(
			handler.key(),
			|| handler.clone(),
			|| target.add_event_listener_with_callback(event, handler.function()),
		)
	})?;
	trace!("Subscribed event listener.");
	Ok(())
}

/// Unsubscribes `handler` from `event` on `target` and releases one retention acquired through [`listen`].
///
/// The handler's [`Closure`] is freed once it is neither retained nor referenced elsewhere.
///
/// # Errors
///
/// Iff the host rejects the removal or `handler` is released more often than it was retained.
#[instrument]
pub fn unlisten(target: &web_sys::EventTarget, event: &str, handler: &EventHandler) -> Result<(), JsValue> {
	target.remove_event_listener_with_callback(event, handler.function())?;
	match RETAINED.with(|retained| retained.borrow_mut().release(handler.key())) {
		Ok(released) => {
			trace!(released = released.is_some(), "Unsubscribed event listener.");
			Ok(())
		}
		Err(error) => {
			error!(?error, "Tried to release an event handler more often than it was retained.");
			Err(error.into())
		}
	}
}

/// The number of distinct handlers currently kept alive by [`listen`].
#[must_use]
pub fn retained_handler_count() -> usize {
	RETAINED.with(|retained| retained.borrow().len())
}
