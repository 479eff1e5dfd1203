/*!
# Pennant: List Values
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
	fmt,
};
use super::{
	Codec,
	ListValue,
	Slot,
	Value,
};



/// # List.
///
/// A list of `C::Target`, set from comma-separated text. Quoting follows the
/// usual CSV rules, so `--tag='"a,b",c'` yields two items.
///
/// The first successful [`Value::set`] replaces the default; every one after
/// that appends, so `--n=1,2 --n=3` yields `[1, 2, 3]`.
pub struct List<C: Codec> {
	/// # Storage.
	value: Slot<Vec<C::Target>>,

	/// # Set Yet?
	changed: bool,
}

impl<C: Codec> fmt::Debug for List<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("List")
			.field(&C::LIST_KIND)
			.field(&self.render())
			.finish()
	}
}

impl<C: Codec> List<C> {
	#[must_use]
	/// # New.
	pub fn new(value: Vec<C::Target>) -> Self { Self::from_slot(Slot::new(value)) }

	#[must_use]
	/// # From Slot.
	pub const fn from_slot(value: Slot<Vec<C::Target>>) -> Self {
		Self { value, changed: false }
	}

	#[must_use]
	/// # Slot.
	pub fn slot(&self) -> Slot<Vec<C::Target>> { self.value.clone() }

	/// # Parse Item.
	fn parse_one(raw: &str) -> Result<C::Target, ValueError> {
		if C::TRIM { C::parse(raw.trim()) }
		else { C::parse(raw) }
	}
}

impl<C: Codec> Value for List<C> {
	fn render(&self) -> String {
		let items = self.items();
		format!("[{}]", write_csv(&items))
	}

	fn set(&mut self, raw: &str) -> Result<(), ValueError> {
		let fields =
			if C::UNQUOTE { read_csv(&raw.replace(['"', '\'', '`'], ""))? }
			else { read_csv(raw)? };
		let next = fields.iter()
			.map(|f| Self::parse_one(f))
			.collect::<Result<Vec<_>, _>>()?;

		if self.changed { self.value.with_mut(|v| v.extend(next)); }
		else {
			self.value.replace(next);
			self.changed = true;
		}

		Ok(())
	}

	fn kind(&self) -> &'static str { C::LIST_KIND }

	fn native(&self) -> Option<Box<dyn Any>> { Some(Box::new(self.value.get())) }

	fn as_list(&self) -> Option<&dyn ListValue> { Some(self) }

	fn as_list_mut(&mut self) -> Option<&mut dyn ListValue> { Some(self) }
}

impl<C: Codec> ListValue for List<C> {
	fn append(&mut self, raw: &str) -> Result<(), ValueError> {
		let next = Self::parse_one(raw)?;
		self.value.with_mut(|v| v.push(next));
		Ok(())
	}

	fn replace(&mut self, raw: &[String]) -> Result<(), ValueError> {
		let next = raw.iter()
			.map(|f| Self::parse_one(f))
			.collect::<Result<Vec<_>, _>>()?;
		self.value.replace(next);
		Ok(())
	}

	fn items(&self) -> Vec<String> {
		self.value.with(|v| v.iter().map(C::render).collect())
	}
}



#[derive(Debug)]
/// # String Array.
///
/// Like a string [`List`], but without any comma splitting: each
/// [`Value::set`] contributes exactly one item, verbatim. Empty text is
/// ignored.
pub struct StringArray {
	/// # Storage.
	value: Slot<Vec<String>>,

	/// # Set Yet?
	changed: bool,
}

impl StringArray {
	#[must_use]
	/// # New.
	pub fn new(value: Vec<String>) -> Self { Self::from_slot(Slot::new(value)) }

	#[must_use]
	/// # From Slot.
	pub const fn from_slot(value: Slot<Vec<String>>) -> Self {
		Self { value, changed: false }
	}

	#[must_use]
	/// # Slot.
	pub fn slot(&self) -> Slot<Vec<String>> { self.value.clone() }
}

impl Value for StringArray {
	fn render(&self) -> String {
		self.value.with(|v| format!("[{}]", write_csv(v)))
	}

	fn set(&mut self, raw: &str) -> Result<(), ValueError> {
		if raw.is_empty() { return Ok(()); }

		if self.changed { self.value.with_mut(|v| v.push(raw.to_owned())); }
		else {
			self.value.replace(vec![raw.to_owned()]);
			self.changed = true;
		}

		Ok(())
	}

	fn kind(&self) -> &'static str { "stringArray" }

	fn native(&self) -> Option<Box<dyn Any>> { Some(Box::new(self.value.get())) }

	fn as_list(&self) -> Option<&dyn ListValue> { Some(self) }

	fn as_list_mut(&mut self) -> Option<&mut dyn ListValue> { Some(self) }
}

impl ListValue for StringArray {
	fn append(&mut self, raw: &str) -> Result<(), ValueError> {
		self.value.with_mut(|v| v.push(raw.to_owned()));
		Ok(())
	}

	fn replace(&mut self, raw: &[String]) -> Result<(), ValueError> {
		self.value.replace(raw.to_vec());
		Ok(())
	}

	fn items(&self) -> Vec<String> { self.value.get() }
}



#[cfg(test)]
mod tests {
	use super::*;
	use crate::value::codec;
	use std::time::Duration;

	#[test]
	fn t_list_append() {
		let mut v = List::<codec::Int>::new(vec![9, 9]);
		assert_eq!(v.render(), "[9,9]");

		// The first set replaces the default.
		assert!(v.set("1,2").is_ok());
		assert_eq!(v.render(), "[1,2]");

		// Subsequent ones append.
		assert!(v.set(" 3 ").is_ok());
		assert_eq!(v.slot().get(), vec![1, 2, 3]);

		// Failures change nothing.
		assert!(v.set("4,x").is_err());
		assert_eq!(v.slot().get(), vec![1, 2, 3]);
	}

	#[test]
	fn t_list_strings() {
		let mut v = List::<codec::Text>::new(Vec::new());
		assert_eq!(v.render(), "[]");
		assert_eq!(v.kind(), "stringSlice");

		assert!(v.set(r#"one,"two, three", four"#).is_ok());
		assert_eq!(v.items(), vec!["one", "two, three", " four"]);
		assert_eq!(v.render(), r#"[one,"two, three"," four"]"#);

		assert!(v.set(r#"a"b"#).is_err());
	}

	#[test]
	fn t_list_unquote() {
		let mut v = List::<codec::Bool>::new(Vec::new());
		assert!(v.set(r#""true",'false',`t`"#).is_ok());
		assert_eq!(v.slot().get(), vec![true, false, true]);
		assert_eq!(v.render(), "[true,false,true]");

		let mut v = List::<codec::Duration>::new(Vec::new());
		assert!(v.set("1s, 2m").is_ok());
		assert_eq!(v.slot().get(), vec![Duration::from_secs(1), Duration::from_secs(120)]);
		assert_eq!(v.render(), "[1s,2m0s]");
	}

	#[test]
	fn t_list_value() {
		let mut v = List::<codec::Uint8>::new(vec![1]);
		let list = v.as_list_mut().expect("Missing list.");
		assert!(list.append("2").is_ok());
		assert!(list.append("256").is_err());
		assert_eq!(list.items(), vec!["1", "2"]);

		assert!(list.replace(&["7".to_owned(), "8".to_owned()]).is_ok());
		assert!(list.replace(&["9".to_owned(), "x".to_owned()]).is_err());
		assert_eq!(list.items(), vec!["7", "8"]);
	}

	#[test]
	fn t_string_array() {
		let mut v = StringArray::new(vec!["default".to_owned()]);
		assert!(v.set("").is_ok());
		assert_eq!(v.items(), vec!["default"]);

		assert!(v.set("a,b").is_ok());
		assert!(v.set("c").is_ok());
		assert_eq!(v.items(), vec!["a,b", "c"]);
		assert_eq!(v.render(), r#"["a,b",c]"#);
		assert_eq!(v.kind(), "stringArray");
	}
}
