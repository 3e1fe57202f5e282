use std::rc::Rc;

use vbind::dom::memory::{MemoryDocument, MemoryNode};
use vbind::dom::Node;
use vbind::{object, watch, Error, Instance, Options, Value};


use mock::Spy;

fn mount(root: &Rc<MemoryNode>, options: Options) -> Instance {
	let document = MemoryDocument::new(root.clone());
	Instance::new(options.el("#app"), &document).unwrap()
}

fn app() -> Rc<MemoryNode> {
	MemoryNode::element("div").with_attr("id", "app")
}

#[test]
fn interpolation_follows_the_data() {
	let text = MemoryNode::text("{{ msg }}");
	let root = app().with_child(text.clone());

	let vm = mount(&root, Options::new().data(object! { "msg" => "hello" }));
	assert_eq!(text.text_content(), "hello");

	vm.set("msg", "world");
	assert_eq!(text.text_content(), "world");
}

#[test]
fn each_write_only_touches_its_own_bindings() {
	let text = MemoryNode::text("{{ msg }}");
	let counter = MemoryNode::element("span").with_attr("v-text", "count");
	let root = app()
		.with_child(MemoryNode::element("p").with_child(text.clone()))
		.with_child(counter.clone());

	let vm = mount(
		&root,
		Options::new().data(object! { "msg" => "Hello", "count" => 0 }),
	);
	assert_eq!(text.text_content(), "Hello");
	assert_eq!(counter.text_content(), "0");

	vm.set("msg", "Bye");
	assert_eq!(text.text_content(), "Bye");
	assert_eq!(counter.text_content(), "0");

	vm.set("count", 1);
	assert_eq!(text.text_content(), "Bye");
	assert_eq!(counter.text_content(), "1");
}

#[test]
fn interpolation_replaces_the_whole_text() {
	let text = MemoryNode::text("Count: {{ count }} and {{ other }}");
	let root = app().with_child(text.clone());

	let vm = mount(&root, Options::new().data(object! { "count" => 3, "other" => 4 }));
	assert_eq!(text.text_content(), "3");

	vm.set("other", 5);
	assert_eq!(text.text_content(), "3");
}

#[test]
fn model_binds_both_ways() {
	let input = MemoryNode::element("input").with_attr("v-model", "count");
	let root = app().with_child(input.clone());

	let vm = mount(&root, Options::new().data(object! { "count" => 1 }));
	assert_eq!(input.value(), "1");

	let mock = mock::SharedMock::new();
	let _watcher = watch!((mock) vm.data(), "count", value => {
		mock.get().trigger(value.to_string());
	});

	mock.get()
		.expect_trigger()
		.withf(|value| value == "2")
		.times(1)
		.return_const(());

	assert_eq!(input.input("2"), 1);
	assert_eq!(vm.get("count"), Value::from("2"));

	input.input("2");
	mock.get().checkpoint();

	mock.get()
		.expect_trigger()
		.withf(|value| value == "7")
		.times(1)
		.return_const(());

	vm.set("count", 7);
	assert_eq!(input.value(), "7");
	mock.get().checkpoint();
}

#[test]
fn model_skips_writing_the_value_the_element_shows() {
	let input = MemoryNode::element("input").with_attr("v-model", "count");
	let root = app().with_child(input.clone());

	let vm = mount(&root, Options::new().data(object! { "count" => 1 }));
	assert_eq!(input.value_writes(), 1);

	input.input("2");
	assert_eq!(vm.get("count"), Value::from("2"));
	assert_eq!(input.value_writes(), 1);

	vm.set("count", 3);
	assert_eq!(input.value(), "3");
	assert_eq!(input.value_writes(), 2);

	vm.set("count", "3");
	assert_eq!(input.value_writes(), 2);
}

#[test]
fn padded_model_keys_read_and_write_the_same_field() {
	let input = MemoryNode::element("input").with_attr("v-model", " count ");
	let label = MemoryNode::element("span").with_attr("v-text", "count");
	let root = app().with_child(input.clone()).with_child(label.clone());

	let vm = mount(&root, Options::new().data(object! { "count" => 1 }));
	assert_eq!(input.value(), "1");

	input.input("2");
	assert_eq!(vm.get("count"), Value::from("2"));
	assert_eq!(label.text_content(), "2");
	assert_eq!(vm.data().keys().len(), 1);
}

#[test]
fn click_runs_the_method_on_the_instance() {
	let button = MemoryNode::element("button").with_attr("v-on:click", "increase");
	let counter = MemoryNode::element("span").with_attr("v-text", "count");
	let root = app().with_child(button.clone()).with_child(counter.clone());

	let vm = mount(
		&root,
		Options::new()
			.data(object! { "count" => 0 })
			.method("increase", |vm| {
				vm.set("count", vm.get("count").to_number() + 1.0);
			}),
	);

	button.click();
	assert_eq!(vm.get("count"), Value::from(1));
	assert_eq!(counter.text_content(), "1");

	vm.call("increase").unwrap();
	assert_eq!(counter.text_content(), "2");
}

#[test]
fn missing_methods_fail_at_dispatch() {
	let button = MemoryNode::element("button").with_attr("v-on:click", "nope");
	let root = app().with_child(button.clone());

	let vm = mount(&root, Options::new());
	assert_eq!(button.listener_count("click"), 1);

	button.click();
	assert_eq!(vm.call("nope"), Err(Error::MissingMethod("nope".into())));
}

#[test]
fn unknown_directives_are_ignored() {
	let node = MemoryNode::element("p")
		.with_attr("v-html", "msg")
		.with_attr("v-on:input", "msg")
		.with_attr("v-bind:title", "msg")
		.with_attr("class", "msg");
	let root = app()
		.with_child(node.clone())
		.with_child(MemoryNode::comment("{{ msg }}"));

	let vm = mount(&root, Options::new().data(object! { "msg" => "hi" }));
	assert_eq!(vm.binding_count(), 0);
	assert_eq!(node.listener_count("input"), 0);
	assert_eq!(node.text_content(), "");
}

#[test]
fn selectors_must_resolve() {
	let document = MemoryDocument::new(app());

	let missing = Instance::new(Options::new().el("#other"), &document);
	assert_eq!(missing.unwrap_err(), Error::RootNotFound("#other".into()));

	let unset = Instance::new(Options::new(), &document);
	assert_eq!(unset.unwrap_err(), Error::MissingRoot);

	let detached = Instance::mount(Options::new().el("#app"));
	assert_eq!(detached.unwrap_err(), Error::RootNotFound("#app".into()));
}

#[test]
fn roots_can_be_passed_directly() {
	let text = MemoryNode::text("{{ msg }}");
	let root = MemoryNode::element("div").with_child(text.clone());

	let vm = Instance::mount(
		Options::new()
			.el(root)
			.data(object! { "msg" => "direct" }),
	)
	.unwrap();

	assert_eq!(text.text_content(), "direct");
	assert_eq!(vm.keys().len(), 1);
}

#[test]
fn missing_keys_render_undefined() {
	let text = MemoryNode::text("{{ nothing }}");
	let root = app().with_child(text.clone());

	let _vm = mount(&root, Options::new());
	assert_eq!(text.text_content(), "undefined");
}

#[test]
fn nothing_renders_when_a_nan_is_written_over_nan() {
	let text = MemoryNode::text("{{ ratio }}");
	let root = app().with_child(text.clone());

	let vm = mount(&root, Options::new().data(object! { "ratio" => f64::NAN }));
	assert_eq!(text.text_content(), "NaN");

	let mock = mock::SharedMock::new();
	let _watcher = watch!((mock) vm.data(), "ratio", value => {
		mock.get().trigger(value.to_string());
	});
	mock.get().expect_trigger().times(0).return_const(());

	vm.set("ratio", f64::NAN);
	mock.get().checkpoint();
}

#[test]
fn nested_paths_bind() {
	let text = MemoryNode::text("{{ user.name }}");
	let root = app().with_child(text.clone());

	let vm = mount(
		&root,
		Options::new().data(object! { "user" => object! { "name" => "ann" } }),
	);
	assert_eq!(text.text_content(), "ann");

	vm.set("user", object! { "name" => "bob" });
	assert_eq!(text.text_content(), "bob");

	vm.set("user.name", "cid");
	assert_eq!(text.text_content(), "cid");
}

#[test]
fn unmount_detaches_everything() {
	let text = MemoryNode::text("{{ msg }}");
	let input = MemoryNode::element("input").with_attr("v-model", "msg");
	let root = app().with_child(text.clone()).with_child(input.clone());

	let vm = mount(&root, Options::new().data(object! { "msg" => "a" }));
	assert_eq!(vm.binding_count(), 2);
	assert_eq!(input.listener_count("input"), 1);

	vm.unmount();
	vm.unmount();

	assert_eq!(vm.binding_count(), 0);
	assert_eq!(input.listener_count("input"), 0);
	assert!(vm.data().dependency_set("msg").unwrap().is_empty());

	vm.set("msg", "b");
	assert_eq!(text.text_content(), "a");
}

#[test]
fn dropping_the_instance_detaches_listeners() {
	let button = MemoryNode::element("button").with_attr("v-on:click", "noop");
	let root = app().with_child(button.clone());

	let vm = mount(&root, Options::new().method("noop", |_| {}));
	assert_eq!(button.listener_count("click"), 1);

	drop(vm);
	assert_eq!(button.listener_count("click"), 0);
}
