/*!
# Pennant: Map Values
*/

use crate::{
	utility::{
		read_csv,
		write_csv,
	},
	ValueError,
};
use std::{
	any::Any,
	collections::BTreeMap,
	fmt,
};
use super::{
	Codec,
	Slot,
	Value,
};



/// # Map.
///
/// String keys mapped to `C::Target` values, set from text like `a=1,b=2`.
///
/// Text with a single `=` is taken as one pair, verbatim, minus any
/// surrounding double quotes, unless it opens with a quote and reads as a
/// valid CSV field; otherwise the usual CSV rules apply. Empty text is an
/// empty map. The first
/// successful [`Value::set`] replaces the default; later ones merge in,
/// overwriting keys that already exist.
///
/// Entries are kept (and rendered) in key order.
pub struct Map<C: Codec> {
	/// # Storage.
	value: Slot<BTreeMap<String, C::Target>>,

	/// # Set Yet?
	changed: bool,
}

impl<C: Codec> fmt::Debug for Map<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Map")
			.field(&C::MAP_KIND)
			.field(&self.render())
			.finish()
	}
}

impl<C: Codec> Map<C> {
	#[must_use]
	/// # New.
	pub fn new(value: BTreeMap<String, C::Target>) -> Self { Self::from_slot(Slot::new(value)) }

	#[must_use]
	/// # From Slot.
	pub const fn from_slot(value: Slot<BTreeMap<String, C::Target>>) -> Self {
		Self { value, changed: false }
	}

	#[must_use]
	/// # Slot.
	pub fn slot(&self) -> Slot<BTreeMap<String, C::Target>> { self.value.clone() }
}

impl<C: Codec> Value for Map<C> {
	fn render(&self) -> String {
		let records: Vec<String> = self.value.with(|v|
			v.iter().map(|(k, v)| format!("{k}={}", C::render(v))).collect()
		);
		format!("[{}]", write_csv(&records))
	}

	fn set(&mut self, raw: &str) -> Result<(), ValueError> {
		let pairs = match raw.matches('=').count() {
			0 if raw.is_empty() => Vec::new(),
			0 => return Err(ValueError::KeyValue(raw.to_owned())),
			1 if raw.starts_with('"') => read_csv(raw)
				.unwrap_or_else(|_| vec![raw.trim_matches('"').to_owned()]),
			1 => vec![raw.trim_matches('"').to_owned()],
			_ => read_csv(raw)?,
		};

		let mut next = BTreeMap::new();
		for pair in pairs {
			let (k, v) = pair.split_once('=').ok_or_else(|| ValueError::KeyValue(pair.clone()))?;
			next.insert(k.to_owned(), C::parse(v)?);
		}

		if self.changed { self.value.with_mut(|v| v.extend(next)); }
		else {
			self.value.replace(next);
			self.changed = true;
		}

		Ok(())
	}

	fn kind(&self) -> &'static str { C::MAP_KIND }

	fn native(&self) -> Option<Box<dyn Any>> { Some(Box::new(self.value.get())) }
}



#[cfg(test)]
mod tests {
	use super::*;
	use crate::value::codec;

	#[test]
	fn t_map_merge() {
		let mut v = Map::<codec::Int>::new(BTreeMap::from([("z".to_owned(), 0)]));
		assert_eq!(v.render(), "[z=0]");
		assert_eq!(v.kind(), "stringToInt");

		assert!(v.set("b=2,a=1").is_ok());
		assert_eq!(v.render(), "[a=1,b=2]");

		assert!(v.set("b=3").is_ok());
		assert!(v.set("c=4").is_ok());
		assert_eq!(v.render(), "[a=1,b=3,c=4]");

		assert!(v.set("d=x").is_err());
		assert_eq!(v.render(), "[a=1,b=3,c=4]");
	}

	#[test]
	fn t_map_strings() {
		let mut v = Map::<codec::Text>::new(BTreeMap::new());
		assert_eq!(v.render(), "[]");

		// One pair is taken verbatim, commas and all.
		assert!(v.set(r#""k=x,y""#).is_ok());
		assert_eq!(v.slot().get().get("k").map(String::as_str), Some("x,y"));

		assert!(v.set(r#"a=1,"b=2,3""#).is_ok());
		assert_eq!(v.slot().get().get("b").map(String::as_str), Some("2,3"));
		assert_eq!(v.render(), r#"[a=1,"b=2,3","k=x,y"]"#);

		assert_eq!(v.set("nope"), Err(ValueError::KeyValue("nope".to_owned())));
		assert_eq!(v.set("a=1,b=2,c"), Err(ValueError::KeyValue("c".to_owned())));
	}

	#[test]
	fn t_map_quoted_pair() {
		let mut v = Map::<codec::Text>::new(BTreeMap::new());
		assert!(v.set(r#"k=a"b"#).is_ok());
		assert_eq!(v.slot().get().get("k").map(String::as_str), Some(r#"a"b"#));
		assert_eq!(v.render(), r#"["k=a""b"]"#);

		// The quoted rendering reads back the same.
		let mut w = Map::<codec::Text>::new(BTreeMap::new());
		assert!(w.set(r#""k=a""b""#).is_ok());
		assert_eq!(w.slot().get(), v.slot().get());

		// Unbalanced quotes are just trimmed.
		assert!(w.set(r#""k=x"#).is_ok());
		assert_eq!(w.slot().get().get("k").map(String::as_str), Some("x"));

		// Empty text clears on the first set and is a no-op after.
		let mut e = Map::<codec::Int>::new(BTreeMap::from([("z".to_owned(), 1)]));
		assert!(e.set("").is_ok());
		assert_eq!(e.render(), "[]");
		assert!(e.set("a=1").is_ok());
		assert!(e.set("").is_ok());
		assert_eq!(e.render(), "[a=1]");
	}
}
