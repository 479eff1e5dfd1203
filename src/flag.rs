/*!
# Pennant: Flags
*/

use crate::{
	DefinitionError,
	Value,
};
use std::collections::BTreeMap;



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Flag Option.
///
/// These tweak a flag's behavior at registration time. Pass any number of
/// them to [`FlagSet::var`](crate::FlagSet::var) or one of the typed
/// constructors.
///
/// ## Examples
///
/// ```
/// use pennant::{FlagSet, Opt};
///
/// let mut flags = FlagSet::default();
/// let level = flags.string(
///     "level",
///     "info",
///     "log `level`",
///     [Opt::Shorthand('l'), Opt::NoOptDefault("debug".to_owned())],
/// );
///
/// flags.parse(["-l"]).unwrap();
/// assert_eq!(level.get(), "debug");
/// ```
pub enum Opt {
	/// # Shorthand.
	///
	/// A one-character alias, usable as `-x`.
	Shorthand(char),

	/// # Shorthand Only.
	///
	/// The flag may only be referenced by its shorthand; `--name` is treated
	/// as unknown.
	ShorthandOnly,

	/// # Usage Type.
	///
	/// The variable name shown in help output, e.g. `--out path`.
	UsageType(String),

	/// # Disable Unquote Usage.
	///
	/// Leave back-quotes in the usage text alone.
	DisableUnquoteUsage,

	/// # Disable Print Default.
	///
	/// Never show `(default …)` in help output.
	DisablePrintDefault,

	/// # Default Value Text.
	///
	/// Override the default shown in help output.
	DefaultValue(String),

	/// # No-Option Default.
	///
	/// The value to use when the flag appears without one, e.g. `--color`
	/// rather than `--color=always`.
	///
	/// Boolean flags start out with `"true"` here, but this option replaces
	/// it like any other, so `--plain` could just as well mean `false`.
	/// Counters are the exception: they always increment.
	NoOptDefault(String),

	/// # Deprecated.
	///
	/// The flag keeps working, but is hidden from help output, and using it
	/// prints this message. The message must not be empty.
	Deprecated(String),

	/// # Shorthand Deprecated.
	///
	/// The shorthand keeps working, but is hidden from help output, and
	/// using it prints this message. The message must not be empty.
	ShorthandDeprecated(String),

	/// # Hidden.
	Hidden,

	/// # Group.
	///
	/// Help output is partitioned by group.
	Group(String),

	/// # Annotation.
	///
	/// Arbitrary key/values for use by external tooling.
	Annotation(String, Vec<String>),
}

impl From<char> for Opt {
	#[inline]
	fn from(src: char) -> Self { Self::Shorthand(src) }
}



#[derive(Debug)]
/// # Flag.
///
/// A single named option: its [`Value`] plus everything needed to parse and
/// document it.
///
/// Flags are usually created implicitly by the [`FlagSet`](crate::FlagSet)
/// registration methods, but can also be built by hand and added with
/// [`FlagSet::add_flag`](crate::FlagSet::add_flag).
pub struct Flag {
	/// # Name.
	name: String,

	/// # Shorthand.
	shorthand: Option<char>,

	/// # Shorthand Only?
	shorthand_only: bool,

	/// # Usage.
	usage: String,

	/// # Usage Type.
	usage_type: String,

	/// # Leave Back-Quotes Alone?
	disable_unquote_usage: bool,

	/// # Never Print Default?
	disable_print_default: bool,

	/// # Value.
	value: Box<dyn Value>,

	/// # Default (Text).
	default_value: String,

	/// # Set During Parsing?
	changed: bool,

	/// # No-Option Default.
	no_opt_default: String,

	/// # Deprecation Message.
	deprecated: String,

	/// # Shorthand Deprecation Message.
	shorthand_deprecated: String,

	/// # Hidden?
	hidden: bool,

	/// # Group.
	group: String,

	/// # Annotations.
	annotations: BTreeMap<String, Vec<String>>,
}

impl Flag {
	#[must_use]
	/// # New.
	///
	/// Create a new flag, snapshotting the value's current rendering as the
	/// default.
	///
	/// Boolean-ish values (see [`Value::is_bool_flag`]) start with a
	/// no-option default of `"true"`.
	pub fn new<V: Value + 'static>(value: V, name: &str, usage: &str) -> Self {
		Self::from_boxed(Box::new(value), name, usage)
	}

	#[must_use]
	/// # New (Boxed).
	pub fn from_boxed(value: Box<dyn Value>, name: &str, usage: &str) -> Self {
		let default_value = value.render();
		let no_opt_default =
			if value.is_bool_flag() { "true".to_owned() }
			else { String::new() };

		Self {
			name: name.to_owned(),
			shorthand: None,
			shorthand_only: false,
			usage: usage.to_owned(),
			usage_type: String::new(),
			disable_unquote_usage: false,
			disable_print_default: false,
			value,
			default_value,
			changed: false,
			no_opt_default,
			deprecated: String::new(),
			shorthand_deprecated: String::new(),
			hidden: false,
			group: String::new(),
			annotations: BTreeMap::new(),
		}
	}

	/// # With Options.
	///
	/// Apply each option in order.
	///
	/// ## Errors
	///
	/// Deprecation options require a non-empty message.
	pub fn with_opts<I>(mut self, opts: I) -> Result<Self, DefinitionError>
	where I: IntoIterator<Item = Opt> {
		for opt in opts { self.apply(opt)?; }
		Ok(self)
	}

	/// # Apply Option.
	///
	/// ## Errors
	///
	/// Deprecation options require a non-empty message.
	pub fn apply(&mut self, opt: Opt) -> Result<(), DefinitionError> {
		match opt {
			Opt::Shorthand(c) => { self.shorthand = Some(c); },
			Opt::ShorthandOnly => { self.shorthand_only = true; },
			Opt::UsageType(s) => { self.usage_type = s; },
			Opt::DisableUnquoteUsage => { self.disable_unquote_usage = true; },
			Opt::DisablePrintDefault => { self.disable_print_default = true; },
			Opt::DefaultValue(s) => { self.default_value = s; },
			Opt::NoOptDefault(s) => { self.no_opt_default = s; },
			Opt::Deprecated(s) => {
				if s.is_empty() {
					return Err(DefinitionError::EmptyDeprecation(self.name.clone()));
				}
				self.deprecated = s;
				self.hidden = true;
			},
			Opt::ShorthandDeprecated(s) => {
				if s.is_empty() {
					return Err(DefinitionError::EmptyShorthandDeprecation(self.name.clone()));
				}
				self.shorthand_deprecated = s;
			},
			Opt::Hidden => { self.hidden = true; },
			Opt::Group(s) => { self.group = s; },
			Opt::Annotation(k, v) => { self.annotations.insert(k, v); },
		}

		Ok(())
	}

	/// # Set Annotation.
	///
	/// Add or replace an annotation.
	pub fn set_annotation(&mut self, key: &str, values: Vec<String>) {
		self.annotations.insert(key.to_owned(), values);
	}
}

impl Flag {
	#[must_use]
	/// # Name.
	pub fn name(&self) -> &str { &self.name }

	#[must_use]
	/// # Shorthand.
	pub const fn shorthand(&self) -> Option<char> { self.shorthand }

	#[must_use]
	/// # Shorthand Only?
	pub const fn shorthand_only(&self) -> bool { self.shorthand_only }

	#[must_use]
	/// # Usage.
	pub fn usage(&self) -> &str { &self.usage }

	#[must_use]
	/// # Usage Type.
	pub fn usage_type(&self) -> &str { &self.usage_type }

	#[must_use]
	/// # Unquote Usage Disabled?
	pub const fn disable_unquote_usage(&self) -> bool { self.disable_unquote_usage }

	#[must_use]
	/// # Print Default Disabled?
	pub const fn disable_print_default(&self) -> bool { self.disable_print_default }

	#[must_use]
	/// # Value.
	pub fn value(&self) -> &dyn Value { &*self.value }

	#[must_use]
	/// # Value (Mutable).
	///
	/// Note that changes made this way bypass the
	/// [`FlagSet`](crate::FlagSet)'s bookkeeping; the flag will not be marked
	/// as changed.
	pub fn value_mut(&mut self) -> &mut dyn Value { &mut *self.value }

	#[must_use]
	/// # Default Value (Text).
	///
	/// This is the value's rendering at registration time, unless overridden
	/// with [`Opt::DefaultValue`].
	pub fn default_value(&self) -> &str { &self.default_value }

	#[must_use]
	/// # Changed?
	///
	/// Returns `true` if the flag was set (successfully) via its
	/// [`FlagSet`](crate::FlagSet).
	pub const fn changed(&self) -> bool { self.changed }

	#[must_use]
	/// # No-Option Default.
	///
	/// An empty string means the flag requires a value.
	pub fn no_opt_default(&self) -> &str { &self.no_opt_default }

	#[must_use]
	/// # Deprecation Message.
	pub fn deprecated(&self) -> Option<&str> {
		if self.deprecated.is_empty() { None }
		else { Some(&self.deprecated) }
	}

	#[must_use]
	/// # Shorthand Deprecation Message.
	pub fn shorthand_deprecated(&self) -> Option<&str> {
		if self.shorthand_deprecated.is_empty() { None }
		else { Some(&self.shorthand_deprecated) }
	}

	#[must_use]
	/// # Hidden?
	pub const fn hidden(&self) -> bool { self.hidden }

	#[must_use]
	/// # Group.
	pub fn group(&self) -> &str { &self.group }

	#[must_use]
	/// # Annotations.
	pub const fn annotations(&self) -> &BTreeMap<String, Vec<String>> { &self.annotations }

	#[must_use]
	/// # Annotation.
	pub fn annotation(&self, key: &str) -> Option<&[String]> {
		self.annotations.get(key).map(Vec::as_slice)
	}
}

impl Flag {
	/// # Display Name.
	///
	/// This is how the flag is referred to in error messages: `-n, --num`,
	/// `-n` if shorthand-only, or `--num` if there is no usable shorthand.
	pub(crate) fn display_name(&self) -> String {
		match self.shorthand {
			Some(c) if self.shorthand_deprecated.is_empty() =>
				if self.shorthand_only { format!("-{c}") }
				else { format!("-{c}, --{}", self.name) },
			_ => format!("--{}", self.name),
		}
	}

	/// # Rename.
	pub(crate) fn set_name(&mut self, name: String) { self.name = name; }

	/// # Mark Changed.
	///
	/// Returns `true` if this is the first time.
	pub(crate) fn mark_changed(&mut self) -> bool {
		! std::mem::replace(&mut self.changed, true)
	}

	/// # Set Deprecated.
	pub(crate) fn set_deprecated(&mut self, msg: &str) -> Result<(), DefinitionError> {
		self.apply(Opt::Deprecated(msg.to_owned()))
	}

	/// # Set Shorthand Deprecated.
	pub(crate) fn set_shorthand_deprecated(&mut self, msg: &str) -> Result<(), DefinitionError> {
		self.apply(Opt::ShorthandDeprecated(msg.to_owned()))
	}

	/// # Hide.
	pub(crate) fn set_hidden(&mut self) { self.hidden = true; }
}



#[cfg(test)]
mod tests {
	use super::*;
	use crate::value::{
		codec,
		Scalar,
	};

	#[test]
	fn t_new() {
		let flag = Flag::new(Scalar::<codec::Int>::new(3), "num", "a number");
		assert_eq!(flag.name(), "num");
		assert_eq!(flag.default_value(), "3");
		assert_eq!(flag.no_opt_default(), "");
		assert!(! flag.changed());
		assert_eq!(flag.display_name(), "--num");

		// Booleans get a no-opt default.
		let flag = Flag::new(Scalar::<codec::Bool>::new(false), "debug", "");
		assert_eq!(flag.no_opt_default(), "true");
		assert_eq!(flag.default_value(), "false");
	}

	#[test]
	fn t_opts() {
		let flag = Flag::new(Scalar::<codec::Int>::new(3), "num", "a number")
			.with_opts([
				Opt::from('n'),
				Opt::DefaultValue("three".to_owned()),
				Opt::Group("math".to_owned()),
				Opt::Annotation("k".to_owned(), vec!["v".to_owned()]),
			])
			.expect("Options failed.");
		assert_eq!(flag.shorthand(), Some('n'));
		assert_eq!(flag.default_value(), "three");
		assert_eq!(flag.group(), "math");
		assert_eq!(flag.annotation("k"), Some(&["v".to_owned()][..]));
		assert_eq!(flag.display_name(), "-n, --num");

		let flag = flag.with_opts([Opt::ShorthandOnly]).expect("Options failed.");
		assert_eq!(flag.display_name(), "-n");

		let flag = flag.with_opts([Opt::ShorthandDeprecated("use --num".to_owned())])
			.expect("Options failed.");
		assert_eq!(flag.display_name(), "--num");
		assert_eq!(flag.shorthand_deprecated(), Some("use --num"));
	}

	#[test]
	fn t_deprecated() {
		let flag = Flag::new(Scalar::<codec::Int>::new(3), "num", "")
			.with_opts([Opt::Deprecated("gone".to_owned())])
			.expect("Options failed.");
		assert_eq!(flag.deprecated(), Some("gone"));
		assert!(flag.hidden());

		let err = Flag::new(Scalar::<codec::Int>::new(3), "num", "")
			.with_opts([Opt::Deprecated(String::new())])
			.expect_err("Empty deprecation should fail.");
		assert_eq!(err, DefinitionError::EmptyDeprecation("num".to_owned()));

		let err = Flag::new(Scalar::<codec::Int>::new(3), "num", "")
			.with_opts([Opt::ShorthandDeprecated(String::new())])
			.expect_err("Empty deprecation should fail.");
		assert_eq!(err, DefinitionError::EmptyShorthandDeprecation("num".to_owned()));
	}

	#[test]
	fn t_mark_changed() {
		let mut flag = Flag::new(Scalar::<codec::Int>::new(3), "num", "");
		assert!(flag.mark_changed());
		assert!(! flag.mark_changed());
		assert!(flag.changed());
	}
}
