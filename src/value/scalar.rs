/*!
# Pennant: Scalar Values
*/

use crate::ValueError;
use std::{
	any::Any,
	fmt,
};
use super::{
	codec,
	Codec,
	Slot,
	Value,
};



/// # Scalar.
///
/// A single value of type `C::Target`. Each successful [`Value::set`]
/// overwrites the last.
pub struct Scalar<C: Codec> {
	/// # Storage.
	value: Slot<C::Target>,
}

impl<C: Codec> fmt::Debug for Scalar<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Scalar")
			.field(&C::KIND)
			.field(&self.render())
			.finish()
	}
}

impl<C: Codec> Scalar<C> {
	#[must_use]
	/// # New.
	pub fn new(value: C::Target) -> Self { Self { value: Slot::new(value) } }

	#[must_use]
	/// # From Slot.
	///
	/// Wrap an existing slot, keeping whatever it currently holds.
	pub const fn from_slot(value: Slot<C::Target>) -> Self { Self { value } }

	#[must_use]
	/// # Slot.
	///
	/// Return a handle to the underlying storage.
	pub fn slot(&self) -> Slot<C::Target> { self.value.clone() }
}

impl<C: Codec> Value for Scalar<C> {
	fn render(&self) -> String { self.value.with(C::render) }

	fn set(&mut self, raw: &str) -> Result<(), ValueError> {
		let next = C::parse(raw)?;
		self.value.replace(next);
		Ok(())
	}

	fn kind(&self) -> &'static str { C::KIND }

	fn native(&self) -> Option<Box<dyn Any>> { Some(Box::new(self.value.get())) }

	fn is_bool_flag(&self) -> bool { C::BOOL }
}



#[derive(Debug)]
/// # Count.
///
/// An integer that goes up by one each time the flag is given without a
/// value (e.g. `-vvv`). An explicit value, like `--verbose=5`, sets it
/// outright.
pub struct Count {
	/// # Storage.
	value: Slot<isize>,
}

impl Count {
	/// # Increment Marker.
	pub const INCREMENT: &'static str = "+1";

	#[must_use]
	/// # New.
	pub fn new(value: isize) -> Self { Self { value: Slot::new(value) } }

	#[must_use]
	/// # From Slot.
	pub const fn from_slot(value: Slot<isize>) -> Self { Self { value } }

	#[must_use]
	/// # Slot.
	pub fn slot(&self) -> Slot<isize> { self.value.clone() }
}

impl Value for Count {
	fn render(&self) -> String { self.value.get().to_string() }

	fn set(&mut self, raw: &str) -> Result<(), ValueError> {
		if raw == Self::INCREMENT {
			self.value.with_mut(|v| *v = v.saturating_add(1));
		}
		else {
			let next = codec::Int::parse(raw)?;
			self.value.replace(next);
		}
		Ok(())
	}

	fn kind(&self) -> &'static str { "count" }

	fn native(&self) -> Option<Box<dyn Any>> { Some(Box::new(self.value.get())) }
}
