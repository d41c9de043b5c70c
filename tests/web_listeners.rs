#![cfg(target_arch = "wasm32")]

use core::cell::Cell;
use dom_compose::{listen, retained_handler_count, unlisten, EventHandler};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

use web_support_::{document, init_logging};

#[wasm_bindgen_test]
fn handlers_outlive_their_handles_until_unlistened() {
	init_logging();

	let button: HtmlElement = document().create_element("button").unwrap().dyn_into().unwrap();
	let clicks = Rc::new(Cell::new(0));
	let handler = EventHandler::new({
		let clicks = Rc::clone(&clicks);
		move |_| clicks.set(clicks.get() + 1)
	});

	let retained = retained_handler_count();
	listen(&button, "click", &handler).unwrap();
	listen(&button, "dblclick", &handler.clone()).unwrap();
	assert_eq!(retained_handler_count(), retained + 1);

	drop(handler);

	button.click();
	assert_eq!(clicks.get(), 1);

	let unrelated = EventHandler::new(|_| ());
	assert!(unlisten(&button, "click", &unrelated).is_err());
	button.click();
	assert_eq!(clicks.get(), 2);
}

#[wasm_bindgen_test]
fn unlisten_releases_the_closure() {
	init_logging();

	let button: HtmlElement = document().create_element("button").unwrap().dyn_into().unwrap();
	let clicks = Rc::new(Cell::new(0));
	let handler = EventHandler::new({
		let clicks = Rc::clone(&clicks);
		move |_| clicks.set(clicks.get() + 1)
	});

	let retained = retained_handler_count();
	listen(&button, "click", &handler).unwrap();
	assert_eq!(retained_handler_count(), retained + 1);

	unlisten(&button, "click", &handler).unwrap();
	assert_eq!(retained_handler_count(), retained);

	button.click();
	assert_eq!(clicks.get(), 0);

	assert!(unlisten(&button, "click", &handler).is_err());
}
