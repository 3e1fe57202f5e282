use std::fmt::{self, Display};
use std::rc::Rc;

use crate::Object;

/// A dynamically typed data value as stored in an [`Object`].
#[derive(Clone, Debug, Default)]
pub enum Value {
	#[default]
	Undefined,
	Null,
	Bool(bool),
	Number(f64),
	String(String),
	/// Stored as-is, element changes are not observed.
	Array(Rc<[Value]>),
	Object(Object),
}

/// Strict equality that treats two NaNs as the same value.
///
/// Arrays and objects compare by identity.
pub fn same_value(a: &Value, b: &Value) -> bool {
	match (a, b) {
		(Value::Undefined, Value::Undefined) => true,
		(Value::Null, Value::Null) => true,
		(Value::Bool(a), Value::Bool(b)) => a == b,
		(Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
		(Value::String(a), Value::String(b)) => a == b,
		(Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
		(Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
		_ => false,
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		same_value(self, other)
	}
}

impl Value {
	pub fn is_undefined(&self) -> bool {
		matches!(self, Value::Undefined)
	}

	pub fn as_object(&self) -> Option<&Object> {
		match self {
			Value::Object(object) => Some(object),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(s) => Some(s),
			_ => None,
		}
	}

	/// Numeric coercion, used by handlers that do arithmetic on values
	/// written back from form inputs.
	pub fn to_number(&self) -> f64 {
		match self {
			Value::Undefined => f64::NAN,
			Value::Null => 0.0,
			Value::Bool(b) => *b as u8 as f64,
			Value::Number(n) => *n,
			Value::String(s) => parse_number(s),
			Value::Array(items) => match &items[..] {
				[] => 0.0,
				[single] => single.to_number(),
				_ => f64::NAN,
			},
			Value::Object(_) => f64::NAN,
		}
	}
}

fn parse_number(s: &str) -> f64 {
	let s = s.trim();
	match s {
		"" => 0.0,
		"Infinity" | "+Infinity" => f64::INFINITY,
		"-Infinity" => f64::NEG_INFINITY,
		_ => {
			let lower = s.to_ascii_lowercase();
			// `str::parse` accepts spellings like "inf" and "nan".
			if lower.contains("inf") || lower.contains("nan") {
				return f64::NAN;
			}
			s.parse().unwrap_or(f64::NAN)
		}
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Undefined => f.write_str("undefined"),
			Value::Null => f.write_str("null"),
			Value::Bool(b) => write!(f, "{}", b),
			Value::Number(n) => fmt_number(*n, f),
			Value::String(s) => f.write_str(s),
			Value::Array(items) => {
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						f.write_str(",")?;
					}
					match item {
						Value::Undefined | Value::Null => {}
						item => Display::fmt(item, f)?,
					}
				}
				Ok(())
			}
			Value::Object(_) => f.write_str("[object Object]"),
		}
	}
}

fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
	if n.is_nan() {
		f.write_str("NaN")
	} else if n.is_infinite() {
		f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
	} else if n == 0.0 {
		f.write_str("0")
	} else if n.abs() >= 1e21 || n.abs() < 1e-6 {
		// Exponent form with an explicit sign, `1e+21`.
		let exp = format!("{:e}", n);
		match exp.split_once('e') {
			Some((mantissa, power)) if !power.starts_with('-') => {
				write!(f, "{}e+{}", mantissa, power)
			}
			_ => f.write_str(&exp),
		}
	} else {
		write!(f, "{}", n)
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Number(value)
	}
}

macro_rules! from_number {
	($($t:ty),*) => {
		$(impl From<$t> for Value {
			fn from(value: $t) -> Self {
				Value::Number(value as f64)
			}
		})*
	};
}

from_number!(f32, i32, i64, u32, usize);

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::String(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::String(value)
	}
}

impl From<Object> for Value {
	fn from(value: Object) -> Self {
		Value::Object(value)
	}
}

impl From<Vec<Value>> for Value {
	fn from(value: Vec<Value>) -> Self {
		Value::Array(value.into())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn nan_is_the_same_value_as_nan() {
		assert!(same_value(&f64::NAN.into(), &f64::NAN.into()));
		assert!(!same_value(&f64::NAN.into(), &1.into()));
		assert!(same_value(&0.0.into(), &(-0.0).into()));
		assert!(!same_value(&"1".into(), &1.into()));
	}

	#[test]
	fn arrays_compare_by_identity() {
		let a = Value::from(vec![Value::from(1)]);
		let b = Value::from(vec![Value::from(1)]);
		assert!(same_value(&a, &a.clone()));
		assert!(!same_value(&a, &b));
	}

	#[test]
	fn renders_like_host_text() {
		assert_eq!(Value::from(1).to_string(), "1");
		assert_eq!(Value::from(1.5).to_string(), "1.5");
		assert_eq!(Value::from(-0.0).to_string(), "0");
		assert_eq!(Value::from(f64::NAN).to_string(), "NaN");
		assert_eq!(Value::from(f64::NEG_INFINITY).to_string(), "-Infinity");
		assert_eq!(Value::Undefined.to_string(), "undefined");
		assert_eq!(Value::Null.to_string(), "null");
		assert_eq!(Value::from(1e21).to_string(), "1e+21");
		assert_eq!(Value::from(1.5e300).to_string(), "1.5e+300");
		assert_eq!(Value::from(1e-7).to_string(), "1e-7");
		assert_eq!(Value::from(0.000001).to_string(), "0.000001");
		assert_eq!(Value::from(123456789.0).to_string(), "123456789");
		assert_eq!(
			Value::from(vec![1.into(), Value::Null, "a".into()]).to_string(),
			"1,,a"
		);
		assert_eq!(Value::Object(Object::new()).to_string(), "[object Object]");
	}

	#[test]
	fn coerces_to_number() {
		assert_eq!(Value::from("2").to_number(), 2.0);
		assert_eq!(Value::from(" 2.5 ").to_number(), 2.5);
		assert_eq!(Value::from("").to_number(), 0.0);
		assert_eq!(Value::from(true).to_number(), 1.0);
		assert_eq!(Value::Null.to_number(), 0.0);
		assert!(Value::from("abc").to_number().is_nan());
		assert!(Value::from("nan").to_number().is_nan());
		assert!(Value::Undefined.to_number().is_nan());
	}
}
