#![cfg(target_arch = "wasm32")]

use dom_compose::{append_node, compose, compose_node, find, find_all, find_all_by_data, find_by_data, remove_node, replace_node, AttributeMap, Child, Entries, Map};
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::Node;

wasm_bindgen_test_configure!(run_in_browser);

use web_support_::{body, document, init_logging};

#[wasm_bindgen_test]
async fn finds_by_selector_and_data() {
	init_logging();

	let list = compose(
		"ul",
		AttributeMap::new().with("id", "query-list"),
		vec![
			Child::from(compose("li", AttributeMap::new().data_set(Entries::new().with("userId", "1").with("role", "admin")), "first").await.unwrap()),
			Child::from(compose("li", AttributeMap::new().data_set(Entries::new().with("userId", "2").with("role", "admin")), "second").await.unwrap()),
			Child::from(compose("li", AttributeMap::new().data_set(Entries::new().with("userId", "3")), "third").await.unwrap()),
		],
	)
	.await
	.unwrap();
	body().append_child(&list).unwrap();
	let scope: &Node = &list;

	let found = find("#query-list", None).unwrap().unwrap();
	assert_eq!(found, list);
	assert!(find("#query-missing", None).unwrap().is_none());
	assert_eq!(find_all("li", Some(scope)).unwrap().len(), 3);

	let admins = find_all_by_data(&Map::<&str>::new().with("role", "admin"), Some(scope)).unwrap();
	assert_eq!(admins.iter().map(|li| li.text_content().unwrap()).collect::<Vec<_>>(), ["first", "second"]);

	let second = find_by_data(&Map::<&str>::new().with("userId", "2").with("role", "admin"), None).unwrap().unwrap();
	assert_eq!(second.text_content().as_deref(), Some("second"));

	assert!(find("[", None).is_err());

	remove_node(&list).unwrap();
	assert!(find("#query-list", None).unwrap().is_none());
}

#[wasm_bindgen_test]
async fn node_wrappers() {
	init_logging();

	let parent = document().create_element("div").unwrap();
	append_node("a", &parent).await.unwrap();
	let old = document().create_element("span").unwrap();
	append_node(&old, &parent).await.unwrap();
	assert_eq!(parent.inner_html(), "a<span></span>");

	let new = document().create_element("em").unwrap();
	replace_node(&old, &new).unwrap();
	assert_eq!(parent.inner_html(), "a<em></em>");

	remove_node(&new).unwrap();
	assert_eq!(parent.inner_html(), "a");

	// Detached nodes are left alone.
	remove_node(&new).unwrap();
	replace_node(&new, &old).unwrap();
	assert!(old.parent_node().is_none());
}

#[wasm_bindgen_test]
async fn queries_accept_fragments_and_documents() {
	init_logging();

	let fragment = compose_node(
		&document().create_document_fragment(),
		(),
		vec![
			Child::from(compose("p", AttributeMap::new().data_set(Entries::new().with("slot", "head")), "in fragment").await.unwrap()),
			Child::from(compose("p", (), "other").await.unwrap()),
		],
	)
	.await
	.unwrap();

	assert_eq!(find_all("p", Some(&fragment)).unwrap().len(), 2);
	let head = find_by_data(&Map::<&str>::new().with("slot", "head"), Some(&fragment)).unwrap().unwrap();
	assert_eq!(head.text_content().as_deref(), Some("in fragment"));

	let document: Node = document().into();
	assert!(find("body", Some(&document)).unwrap().is_some());

	let text: Node = web_support_::document().create_text_node("not a scope").into();
	assert!(find("p", Some(&text)).is_err());
}
