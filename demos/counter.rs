use vbind::dom::memory::{MemoryDocument, MemoryNode};
use vbind::dom::Node;
use vbind::{object, Instance, Options};
use tracing_subscriber::EnvFilter;

fn main() -> vbind::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.init();

	let message = MemoryNode::text("{{ msg }}");
	let count = MemoryNode::element("p").with_attr("v-text", "count");
	let input = MemoryNode::element("input").with_attr("v-model", "msg");
	let increase = MemoryNode::element("button").with_attr("v-on:click", "increase");
	let change = MemoryNode::element("button").with_attr("v-on:click", "changeMessage");
	let recover = MemoryNode::element("button").with_attr("v-on:click", "recoverMessage");

	let root = MemoryNode::element("div")
		.with_attr("id", "app")
		.with_child(MemoryNode::element("h1").with_child(message.clone()))
		.with_child(count.clone())
		.with_child(input.clone())
		.with_child(increase.clone())
		.with_child(change.clone())
		.with_child(recover.clone());
	let document = MemoryDocument::new(root);

	let app = Instance::new(
		Options::new()
			.el("#app")
			.data(object! {
				"msg" => "Hello, vbind",
				"count" => 666,
			})
			.method("increase", |vm| {
				vm.set("count", vm.get("count").to_number() + 1.0);
			})
			.method("changeMessage", |vm| vm.set("msg", "Hello, world!"))
			.method("recoverMessage", |vm| vm.set("msg", "Hello, vbind")),
		&document,
	)?;

	let show = |step: &str| {
		println!(
			"{:<16} msg={:?} count={:?} input={:?}",
			step,
			message.text_content(),
			count.text_content(),
			input.value()
		);
	};

	show("mounted");

	increase.click();
	increase.click();
	show("increase x2");

	change.click();
	show("changeMessage");

	input.input("typed by hand");
	show("input");

	recover.click();
	show("recoverMessage");

	app.unmount();
	Ok(())
}
