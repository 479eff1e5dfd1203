/*!
# Pennant: Values

Every flag owns exactly one [`Value`]. The trait only requires two things:
render the current state to text, and update the state from text. Type tags,
native retrieval, and list handling are optional extras with sensible
defaults.

The built-in catalog is generated from the generic [`Scalar`], [`List`], and
[`Map`] wrappers, parameterized over a [`Codec`] that knows how to convert a
single item to and from text. [`Count`] and [`StringArray`] are the
odd ones out and get their own types.
*/

pub mod codec;
mod duration;
mod list;
mod map;
mod net;
mod scalar;

pub use codec::Codec;
pub use list::{
	List,
	StringArray,
};
pub use map::Map;
pub use net::{
	IpMask,
	IpNet,
};
pub use scalar::{
	Count,
	Scalar,
};

use crate::ValueError;
use parking_lot::Mutex;
use std::{
	any::Any,
	fmt,
	sync::Arc,
};



/// # Value.
///
/// This is the contract every flag type satisfies.
///
/// The only hard requirement is that [`Value::render`] produces text that
/// [`Value::set`] would accept, so `set(render())` leaves the value unchanged.
/// (List and map types wrap their rendering in `[…]` for display; that
/// wrapper is cosmetic and never fed back in.)
///
/// ## Examples
///
/// ```
/// use pennant::{FlagSet, Value, ValueError};
///
/// #[derive(Debug, Default)]
/// struct Theme(bool);
///
/// impl Value for Theme {
///     fn render(&self) -> String {
///         if self.0 { "dark".to_owned() } else { "light".to_owned() }
///     }
///
///     fn set(&mut self, raw: &str) -> Result<(), ValueError> {
///         match raw {
///             "dark" => { self.0 = true; Ok(()) },
///             "light" => { self.0 = false; Ok(()) },
///             _ => Err(ValueError::Custom(format!("invalid theme: {raw}"))),
///         }
///     }
/// }
///
/// let mut flags = FlagSet::default();
/// flags.var(Theme::default(), "theme", "color `scheme`", []);
/// flags.parse(["--theme", "dark"]).unwrap();
/// assert_eq!(flags.lookup("theme").unwrap().value().render(), "dark");
/// ```
pub trait Value: Send {
	/// # Render.
	///
	/// Return the current value as text.
	fn render(&self) -> String;

	/// # Set.
	///
	/// Update the value from text.
	///
	/// ## Errors
	///
	/// Return an error if the text is not valid for the type. The value
	/// should be left untouched in that case.
	fn set(&mut self, raw: &str) -> Result<(), ValueError>;

	/// # Type Tag.
	///
	/// A short, stable identifier like `"int"` or `"stringSlice"`, used to
	/// type-check the typed getters and to label the type in usage output.
	/// An empty string means "untyped".
	fn kind(&self) -> &'static str { "" }

	/// # Native Value.
	///
	/// Return a copy of the underlying typed value, if the type supports it.
	fn native(&self) -> Option<Box<dyn Any>> { None }

	/// # Is Boolean?
	///
	/// Boolean-ish values can appear on the command line without a value,
	/// e.g. `--verbose` rather than `--verbose=true`. When this returns
	/// `true`, registration defaults the flag's no-option value to `"true"`.
	fn is_bool_flag(&self) -> bool { false }

	/// # As List.
	fn as_list(&self) -> Option<&dyn ListValue> { None }

	/// # As List (Mutable).
	fn as_list_mut(&mut self) -> Option<&mut dyn ListValue> { None }
}

impl fmt::Debug for dyn Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Value")
			.field("kind", &self.kind())
			.field("value", &self.render())
			.finish()
	}
}



/// # List Value.
///
/// Multi-valued types expose these for direct manipulation, bypassing the
/// CSV handling of [`Value::set`].
pub trait ListValue {
	/// # Append.
	///
	/// Parse a single item and push it onto the end.
	///
	/// ## Errors
	///
	/// Return an error if the item is invalid.
	fn append(&mut self, raw: &str) -> Result<(), ValueError>;

	/// # Replace.
	///
	/// Parse every item and overwrite the current contents with them.
	///
	/// ## Errors
	///
	/// Return an error if any item is invalid, in which case nothing is
	/// changed.
	fn replace(&mut self, raw: &[String]) -> Result<(), ValueError>;

	/// # Items.
	///
	/// Return each item rendered as text.
	fn items(&self) -> Vec<String>;
}



/// # Output Slot.
///
/// The typed constructors on [`FlagSet`](crate::FlagSet) hand one of these
/// back so the caller can read the value after parsing without going through
/// the getters. Clones share the same underlying storage.
///
/// ## Examples
///
/// ```
/// use pennant::FlagSet;
///
/// let mut flags = FlagSet::default();
/// let port = flags.uint16("port", 8080, "listen `port`", []);
/// assert_eq!(port.get(), 8080);
///
/// flags.parse(["--port=9000"]).unwrap();
/// assert_eq!(port.get(), 9000);
/// ```
pub struct Slot<T>(Arc<Mutex<T>>);

impl<T> Clone for Slot<T> {
	#[inline]
	fn clone(&self) -> Self { Self(Arc::clone(&self.0)) }
}

impl<T: fmt::Debug> fmt::Debug for Slot<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Slot").field(&*self.0.lock()).finish()
	}
}

impl<T: Default> Default for Slot<T> {
	#[inline]
	fn default() -> Self { Self::new(T::default()) }
}

impl<T> Slot<T> {
	#[must_use]
	/// # New.
	pub fn new(value: T) -> Self { Self(Arc::new(Mutex::new(value))) }

	/// # With.
	///
	/// Run a callback against a reference to the current value.
	pub fn with<F, R>(&self, cb: F) -> R
	where F: FnOnce(&T) -> R { cb(&self.0.lock()) }

	/// # With (Mutable).
	pub fn with_mut<F, R>(&self, cb: F) -> R
	where F: FnOnce(&mut T) -> R { cb(&mut self.0.lock()) }

	/// # Replace.
	///
	/// Swap in a new value, returning the old one.
	pub fn replace(&self, value: T) -> T {
		std::mem::replace(&mut *self.0.lock(), value)
	}
}

impl<T: Clone> Slot<T> {
	#[must_use]
	/// # Get.
	///
	/// Return a copy of the current value.
	pub fn get(&self) -> T { self.0.lock().clone() }
}
