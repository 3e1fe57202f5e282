use std::sync::OnceLock;

use regex::Regex;

pub const PREFIX: &str = "v-";
pub const EVENT_PREFIX: &str = "v-on:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
	/// `v-text`
	Text,
	/// `v-model`
	Model,
	/// `v-on:<event>`
	On(String),
}

/// Classifies an attribute name. Returns `None` for plain attributes and
/// for directives this crate does not know.
pub fn parse_directive(name: &str) -> Option<Directive> {
	let suffix = name.strip_prefix(PREFIX)?;

	if name.contains(':') {
		return match name.strip_prefix(EVENT_PREFIX) {
			Some(event) if !event.is_empty() => Some(Directive::On(event.to_owned())),
			_ => None,
		};
	}

	match suffix {
		"text" => Some(Directive::Text),
		"model" => Some(Directive::Model),
		_ => None,
	}
}

fn interpolation() -> &'static Regex {
	static INTERPOLATION: OnceLock<Regex> = OnceLock::new();
	INTERPOLATION.get_or_init(|| Regex::new(r"\{\{(.+?)\}\}").expect("valid interpolation pattern"))
}

/// Key of the first `{{ key }}` in `text`, trimmed.
pub fn interpolation_key(text: &str) -> Option<&str> {
	let captures = interpolation().captures(text)?;
	captures.get(1).map(|m| m.as_str().trim())
}
