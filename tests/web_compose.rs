#![cfg(target_arch = "wasm32")]

use core::cell::Cell;
use dom_compose::{compose, compose_node, AttributeMap, Attributes, Child, Composer, EventHandler, Listeners, Tag, SVG_NAMESPACE};
use std::rc::Rc;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Element, Event, Node};

wasm_bindgen_test_configure!(run_in_browser);

use web_support_::{body, document, init_logging};

#[wasm_bindgen_test]
async fn html_tag() {
	init_logging();

	let element = compose("section", (), ()).await.unwrap();
	assert_eq!(element.tag_name(), "SECTION");
	assert_eq!(element.namespace_uri().as_deref(), Some("http://www.w3.org/1999/xhtml"));
	assert!(element.parent_node().is_none());
}

#[wasm_bindgen_test]
async fn svg_tag() {
	init_logging();

	let element = compose("svg:circle", AttributeMap::new().with("$r", 4), ()).await.unwrap();
	assert_eq!(element.local_name(), "circle");
	assert_eq!(element.namespace_uri().as_deref(), Some(SVG_NAMESPACE));
	assert_eq!(element.get_attribute("r").as_deref(), Some("4"));
}

#[wasm_bindgen_test]
async fn default_tag_is_div() {
	init_logging();

	let element = Composer::new(document()).compose(Tag::default(), (), ()).await.unwrap();
	assert_eq!(element.tag_name(), "DIV");
}

#[wasm_bindgen_test]
async fn existing_element_is_reused() {
	init_logging();

	let existing = document().create_element("p").unwrap();
	existing.set_attribute("id", "kept").unwrap();
	body().append_child(&existing).unwrap();

	let composed = compose(&existing, AttributeMap::new().with("title", "updated"), "text").await.unwrap();
	assert_eq!(composed, existing);
	assert_eq!(composed.id(), "kept");
	assert_eq!(composed.get_attribute("title").as_deref(), Some("updated"));
	assert_eq!(composed.text_content().as_deref(), Some("text"));
	assert!(composed.parent_node().is_some());

	body().remove_child(&existing).unwrap();
}

#[wasm_bindgen_test]
async fn listeners_are_installed_before_children() {
	init_logging();

	let pings = Rc::new(Cell::new(0));
	let on_ping = EventHandler::new({
		let pings = Rc::clone(&pings);
		move |_| pings.set(pings.get() + 1)
	});

	let element = compose(
		"div",
		AttributeMap::new().on(Listeners::new().with("ping", on_ping)),
		Child::lazy({
			let pings = Rc::clone(&pings);
			move |parent: &Node| {
				parent.dispatch_event(&Event::new("ping").unwrap()).unwrap();
				pings.get().to_string()
			}
		}),
	)
	.await
	.unwrap();

	assert_eq!(pings.get(), 1);
	assert_eq!(element.text_content().as_deref(), Some("1"));
}

#[wasm_bindgen_test]
async fn invalid_tag_names_fail_at_the_host() {
	init_logging();

	assert!(compose("not a tag", (), ()).await.is_err());
}

#[wasm_bindgen_test]
async fn fragments_receive_children_directly() {
	init_logging();

	let fragment = document().create_document_fragment();
	let span = document().create_element("span").unwrap();
	let composed = compose_node(&fragment, (), vec![Child::from("a"), Child::from(&span), Child::from(1)]).await.unwrap();

	assert_eq!(composed, Node::from(fragment.clone()));
	assert_eq!(fragment.child_nodes().length(), 3);
	assert_eq!(fragment.text_content().as_deref(), Some("a1"));
	assert_eq!(span.parent_node(), Some(Node::from(fragment)));
}

#[wasm_bindgen_test]
async fn non_element_nodes_reject_attributes() {
	init_logging();

	let fragment = document().create_document_fragment();
	let error = compose_node(&fragment, AttributeMap::new().with("title", "x"), "child").await.unwrap_err();
	assert!(error.as_string().unwrap().starts_with("dom-compose:"));
	assert_eq!(fragment.child_nodes().length(), 0);

	let lazy = Attributes::lazy(|_: &Element| AttributeMap::new());
	assert!(compose_node(&fragment, lazy, ()).await.is_err());

	assert!(compose(&fragment, (), ()).await.is_err());
}

#[wasm_bindgen_test]
async fn element_nodes_compose_as_elements() {
	init_logging();

	let node: Node = document().create_element("p").unwrap().into();
	let composed = compose(node.clone(), AttributeMap::new().with("title", "x"), ()).await.unwrap();
	assert_eq!(Node::from(composed.clone()), node);
	assert_eq!(composed.get_attribute("title").as_deref(), Some("x"));

	let composed = compose_node(&node, AttributeMap::new().with("title", "y"), "text").await.unwrap();
	assert_eq!(composed, node);
	assert_eq!(composed.text_content().as_deref(), Some("text"));
}
