/*!
# Pennant: Flag Sets
*/

mod parse;
mod typed;

use crate::{
	DefaultUsageFormatter,
	DefinitionError,
	Flag,
	FlagError,
	Opt,
	UsageFormatter,
	Value,
};
use indexmap::IndexMap;
use std::{
	any::Any,
	borrow::Cow,
	collections::HashMap,
	fmt,
	io::{
		self,
		Write,
	},
};



/// # Name Normalizer.
type NormalizeFn = Box<dyn Fn(&str) -> String + Send + Sync>;

/// # Custom Usage.
type UsageFn = Box<dyn Fn(&FlagSet) -> String + Send + Sync>;



#[derive(Debug, Clone, Copy, Default, Eq, Hash, PartialEq)]
/// # Error Handling.
///
/// What [`FlagSet::parse`] should do when something goes wrong. This is fixed
/// when the set is created.
pub enum ErrorHandling {
	#[default]
	/// # Return the Error.
	ContinueOnError,

	/// # Print Usage and Exit.
	///
	/// The process exits with [`FlagError::exit_code`].
	ExitOnError,

	/// # Print Usage and Panic.
	PanicOnError,
}



#[derive(Debug, Clone, Copy, Default, Eq, Hash, PartialEq)]
/// # Parse Errors Allowlist.
///
/// Parsing errors that should be tolerated rather than raised.
pub struct ParseErrorsAllowlist {
	/// # Unknown Flags.
	///
	/// Record unknown flags (see [`FlagSet::unknown_flags`]) and keep going.
	pub unknown_flags: bool,
}



/// # Flag Set.
///
/// This is the registry of defined flags, and the parser that fills them in.
///
/// ## Examples
///
/// ```
/// use pennant::{ErrorHandling, FlagSet, Opt};
///
/// let mut flags = FlagSet::new("app", ErrorHandling::ContinueOnError);
/// let verbose = flags.bool("verbose", false, "chatty output", [Opt::Shorthand('v')]);
/// let jobs = flags.uint("jobs", 1, "number of `workers`", [Opt::Shorthand('j')]);
///
/// flags.parse(["-vj4", "input.txt"]).unwrap();
///
/// assert!(verbose.get());
/// assert_eq!(jobs.get(), 4);
/// assert_eq!(flags.args(), ["input.txt"]);
/// assert!(flags.changed("jobs"));
/// ```
pub struct FlagSet {
	/// # Name.
	name: String,

	/// # Parsed?
	parsed: bool,

	/// # Defined Flags (Insertion Order).
	formal: IndexMap<String, Flag>,

	/// # Set Flags (Indexes Into `formal`).
	actual: Vec<usize>,

	/// # Shorthand Index.
	shorthands: HashMap<char, usize>,

	/// # Positional Arguments.
	args: Vec<String>,

	/// # Positional Count at `--`.
	args_len_at_dash: Option<usize>,

	/// # Error Handling.
	error_handling: ErrorHandling,

	/// # Output Sink.
	output: Box<dyn Write + Send>,

	/// # Allow Interspersed Positionals?
	interspersed: bool,

	/// # Name Normalizer.
	normalize: Option<NormalizeFn>,

	/// # Unknown Flags.
	unknown_flags: Vec<String>,

	/// # Custom Usage.
	usage: Option<UsageFn>,

	/// # Usage Formatter.
	formatter: Box<dyn UsageFormatter + Send + Sync>,

	/// # Sort Flags?
	sort_flags: bool,

	/// # Error Allowlist.
	allowlist: ParseErrorsAllowlist,

	/// # No Built-in Help?
	disable_builtin_help: bool,
}

impl Default for FlagSet {
	#[inline]
	fn default() -> Self { Self::new("", ErrorHandling::ContinueOnError) }
}

impl fmt::Debug for FlagSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FlagSet")
			.field("name", &self.name)
			.field("parsed", &self.parsed)
			.field("flags", &self.formal)
			.field("args", &self.args)
			.field("args_len_at_dash", &self.args_len_at_dash)
			.field("unknown_flags", &self.unknown_flags)
			.field("error_handling", &self.error_handling)
			.finish_non_exhaustive()
	}
}

/// # Construction and Configuration.
impl FlagSet {
	#[must_use]
	/// # New.
	///
	/// Create an empty set. Output goes to STDERR until
	/// [`FlagSet::set_output`] says otherwise.
	pub fn new(name: &str, error_handling: ErrorHandling) -> Self {
		Self {
			name: name.to_owned(),
			parsed: false,
			formal: IndexMap::new(),
			actual: Vec::new(),
			shorthands: HashMap::new(),
			args: Vec::new(),
			args_len_at_dash: None,
			error_handling,
			output: Box::new(io::stderr()),
			interspersed: true,
			normalize: None,
			unknown_flags: Vec::new(),
			usage: None,
			formatter: Box::new(DefaultUsageFormatter),
			sort_flags: true,
			allowlist: ParseErrorsAllowlist::default(),
			disable_builtin_help: false,
		}
	}

	#[must_use]
	/// # Name.
	pub fn name(&self) -> &str { &self.name }

	#[must_use]
	/// # Error Handling.
	pub const fn error_handling(&self) -> ErrorHandling { self.error_handling }

	/// # Set Output.
	///
	/// Redirect usage, deprecation, and error messages.
	pub fn set_output<W: Write + Send + 'static>(&mut self, output: W) {
		self.output = Box::new(output);
	}

	/// # Output.
	pub fn output(&mut self) -> &mut (dyn Write + Send) { &mut *self.output }

	/// # Set Interspersed.
	///
	/// When `true` (the default), flags and positional arguments may be
	/// mixed freely. When `false`, the first positional argument ends flag
	/// parsing.
	pub fn set_interspersed(&mut self, interspersed: bool) { self.interspersed = interspersed; }

	#[must_use]
	/// # Interspersed?
	pub const fn interspersed(&self) -> bool { self.interspersed }

	/// # Set Sort Flags.
	///
	/// When `true` (the default), iteration and help output are sorted by
	/// name. When `false`, registration order is used instead.
	pub fn set_sort_flags(&mut self, sort: bool) { self.sort_flags = sort; }

	#[must_use]
	/// # Sort Flags?
	pub const fn sort_flags(&self) -> bool { self.sort_flags }

	/// # Set Allowlist.
	pub fn set_allowlist(&mut self, allowlist: ParseErrorsAllowlist) { self.allowlist = allowlist; }

	#[must_use]
	/// # Allowlist.
	pub const fn allowlist(&self) -> ParseErrorsAllowlist { self.allowlist }

	/// # Disable Built-in Help.
	///
	/// By default, an undefined `-h` or `--help` prints the usage and returns
	/// [`FlagError::HelpRequested`]. Disabling this treats them like any
	/// other unknown flag.
	pub fn set_disable_builtin_help(&mut self, disable: bool) { self.disable_builtin_help = disable; }

	#[must_use]
	/// # Built-in Help Disabled?
	pub const fn disable_builtin_help(&self) -> bool { self.disable_builtin_help }

	/// # Set Usage.
	///
	/// Replace the full usage text (header and all) with the output of a
	/// callback.
	pub fn set_usage<F>(&mut self, cb: F)
	where F: Fn(&Self) -> String + Send + Sync + 'static {
		self.usage = Some(Box::new(cb));
	}

	/// # Set Usage Formatter.
	///
	/// Replace the per-flag rendering used by [`FlagSet::flag_usages`] and
	/// friends.
	pub fn set_formatter<F>(&mut self, formatter: F)
	where F: UsageFormatter + Send + Sync + 'static {
		self.formatter = Box::new(formatter);
	}

	#[must_use]
	/// # Usage Formatter.
	pub fn formatter(&self) -> &dyn UsageFormatter { &*self.formatter }

	/// # Set Normalizer.
	///
	/// Install a function to rewrite flag names before they are stored or
	/// looked up, e.g. to treat `-` and `_` as equivalent.
	///
	/// Flags already registered are renamed immediately. If two of them
	/// collapse to the same name, the later one replaces the earlier.
	///
	/// ## Examples
	///
	/// ```
	/// use pennant::FlagSet;
	///
	/// let mut flags = FlagSet::default();
	/// let dry = flags.bool("dry_run", false, "", []);
	/// flags.set_normalize(|name| name.replace('_', "-"));
	///
	/// flags.parse(["--dry_run"]).unwrap();
	/// assert!(dry.get());
	/// assert!(flags.lookup("dry-run").is_some());
	/// ```
	pub fn set_normalize<F>(&mut self, cb: F)
	where F: Fn(&str) -> String + Send + Sync + 'static {
		self.normalize = Some(Box::new(cb));

		let actual: Vec<String> = self.actual.iter()
			.filter_map(|&idx| self.formal.get_index(idx).map(|(k, _)| k.clone()))
			.collect();

		let old = std::mem::take(&mut self.formal);
		for (name, mut flag) in old {
			let name = self.normalize_name(&name).into_owned();
			flag.set_name(name.clone());
			self.formal.insert(name, flag);
		}

		self.actual.clear();
		for name in actual {
			let name = self.normalize_name(&name).into_owned();
			if let Some(idx) = self.formal.get_index_of(&name) {
				if ! self.actual.contains(&idx) { self.actual.push(idx); }
			}
		}

		self.shorthands.clear();
		for (idx, flag) in self.formal.values().enumerate() {
			if let Some(c) = flag.shorthand() { self.shorthands.insert(c, idx); }
		}
	}

	#[must_use]
	/// # Normalize Name.
	pub fn normalize_name<'a>(&self, name: &'a str) -> Cow<'a, str> {
		match &self.normalize {
			Some(cb) => Cow::Owned(cb(name)),
			None => Cow::Borrowed(name),
		}
	}
}

/// # Registration.
impl FlagSet {
	/// # Define Flag.
	///
	/// Register a flag backed by an arbitrary [`Value`]. The typed
	/// constructors (e.g. [`FlagSet::int`]) are thin wrappers around this.
	///
	/// ## Panics
	///
	/// Definition mistakes are programming errors; this will panic if the
	/// name or shorthand is already taken, or a deprecation option has an
	/// empty message. Use [`FlagSet::try_var`] to handle these gracefully.
	pub fn var<V, I>(&mut self, value: V, name: &str, usage: &str, opts: I) -> &mut Flag
	where V: Value + 'static, I: IntoIterator<Item = Opt> {
		let idx = match Flag::new(value, name, usage).with_opts(opts).and_then(|f| self.register(f)) {
			Ok(idx) => idx,
			Err(e) => self.definition_panic(&e),
		};
		&mut self.formal[idx]
	}

	/// # Define Flag (Fallible).
	///
	/// ## Errors
	///
	/// Returns an error if the name or shorthand is already taken, or a
	/// deprecation option has an empty message.
	pub fn try_var<V, I>(&mut self, value: V, name: &str, usage: &str, opts: I)
	-> Result<&mut Flag, DefinitionError>
	where V: Value + 'static, I: IntoIterator<Item = Opt> {
		let flag = Flag::new(value, name, usage).with_opts(opts)?;
		let idx = self.register(flag)?;
		Ok(&mut self.formal[idx])
	}

	/// # Add Flag.
	///
	/// ## Panics
	///
	/// This will panic if the name or shorthand is already taken.
	pub fn add_flag(&mut self, flag: Flag) -> &mut Flag {
		let idx = match self.register(flag) {
			Ok(idx) => idx,
			Err(e) => self.definition_panic(&e),
		};
		&mut self.formal[idx]
	}

	/// # Add Flag (Fallible).
	///
	/// ## Errors
	///
	/// Returns an error if the name or shorthand is already taken.
	pub fn try_add_flag(&mut self, flag: Flag) -> Result<&mut Flag, DefinitionError> {
		let idx = self.register(flag)?;
		Ok(&mut self.formal[idx])
	}

	/// # Add Flag Set.
	///
	/// Move every flag from `other` whose name is not already defined here.
	///
	/// ## Panics
	///
	/// This will panic if an incoming flag's shorthand is already taken.
	pub fn add_flag_set(&mut self, other: Self) {
		let sort = other.sort_flags;
		let mut flags: Vec<Flag> = other.formal.into_values().collect();
		if sort { flags.sort_by(|a, b| a.name().cmp(b.name())); }

		for flag in flags {
			if self.lookup(flag.name()).is_none() { self.add_flag(flag); }
		}
	}

	/// # Register.
	fn register(&mut self, mut flag: Flag) -> Result<usize, DefinitionError> {
		let name = self.normalize_name(flag.name()).into_owned();
		if self.formal.contains_key(&name) {
			return Err(DefinitionError::Redefined {
				set: self.name.clone(),
				name: flag.name().to_owned(),
			});
		}

		if let Some(short) = flag.shorthand() {
			if let Some(&used) = self.shorthands.get(&short) {
				let used = self.formal.get_index(used)
					.map_or_else(String::new, |(k, _)| k.clone());
				return Err(DefinitionError::ShorthandRedefined {
					set: self.name.clone(),
					short,
					used,
				});
			}
		}

		flag.set_name(name.clone());
		let short = flag.shorthand();
		let (idx, _) = self.formal.insert_full(name, flag);
		if let Some(short) = short { self.shorthands.insert(short, idx); }
		Ok(idx)
	}

	/// # Definition Panic.
	fn definition_panic(&mut self, err: &DefinitionError) -> ! {
		let _res = writeln!(self.output, "{err}");
		panic!("{err}");
	}

	/// # Mark Deprecated.
	///
	/// Hide a flag from help output, and print a message whenever it is used.
	///
	/// ## Errors
	///
	/// The flag must exist, and the message must not be empty.
	pub fn mark_deprecated(&mut self, name: &str, msg: &str) -> Result<(), DefinitionError> {
		self.lookup_mut(name)
			.ok_or_else(|| DefinitionError::Undefined(name.to_owned()))?
			.set_deprecated(msg)
	}

	/// # Mark Shorthand Deprecated.
	///
	/// Hide a flag's shorthand from help output, and print a message whenever
	/// it is used.
	///
	/// ## Errors
	///
	/// The flag must exist, and the message must not be empty.
	pub fn mark_shorthand_deprecated(&mut self, name: &str, msg: &str) -> Result<(), DefinitionError> {
		self.lookup_mut(name)
			.ok_or_else(|| DefinitionError::Undefined(name.to_owned()))?
			.set_shorthand_deprecated(msg)
	}

	/// # Mark Hidden.
	///
	/// ## Errors
	///
	/// The flag must exist.
	pub fn mark_hidden(&mut self, name: &str) -> Result<(), DefinitionError> {
		self.lookup_mut(name)
			.ok_or_else(|| DefinitionError::Undefined(name.to_owned()))?
			.set_hidden();
		Ok(())
	}

	/// # Set Annotation.
	///
	/// ## Errors
	///
	/// The flag must exist.
	pub fn set_annotation(&mut self, name: &str, key: &str, values: Vec<String>)
	-> Result<(), FlagError> {
		self.lookup_mut(name)
			.ok_or_else(|| FlagError::UnknownFlag(name.to_owned()))?
			.set_annotation(key, values);
		Ok(())
	}
}

/// # Lookup and Assignment.
impl FlagSet {
	#[must_use]
	/// # Lookup.
	pub fn lookup(&self, name: &str) -> Option<&Flag> {
		self.formal.get(&*self.normalize_name(name))
	}

	#[must_use]
	/// # Lookup (Mutable).
	pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Flag> {
		let name = self.normalize_name(name).into_owned();
		self.formal.get_mut(&name)
	}

	#[must_use]
	/// # Shorthand Lookup.
	pub fn shorthand_lookup(&self, short: char) -> Option<&Flag> {
		self.shorthands.get(&short).and_then(|&idx| self.flag_at(idx))
	}

	/// # Set.
	///
	/// Assign a value to a flag by name, exactly as if it had been passed on
	/// the command line.
	///
	/// ## Errors
	///
	/// Returns an error if the flag is not defined, or the value is invalid.
	pub fn set(&mut self, name: &str, value: &str) -> Result<(), FlagError> {
		let idx = self.index_of(name)
			.ok_or_else(|| FlagError::UnknownFlag(name.to_owned()))?;
		self.set_index(idx, value)
	}

	/// # Set by Index.
	fn set_index(&mut self, idx: usize, value: &str) -> Result<(), FlagError> {
		let Some((_, flag)) = self.formal.get_index_mut(idx) else {
			return Err(FlagError::NotDefined(idx.to_string()));
		};

		if let Err(source) = flag.value_mut().set(value) {
			return Err(FlagError::InvalidArgument {
				value: value.to_owned(),
				flag: flag.display_name(),
				source,
			});
		}

		tracing::debug!(flag = flag.name(), value, "flag set");
		if flag.mark_changed() { self.actual.push(idx); }

		if let Some(msg) = flag.deprecated() {
			tracing::warn!(flag = flag.name(), "deprecated flag used");
			let _res = writeln!(self.output, "Flag --{} has been deprecated, {msg}", flag.name());
		}

		Ok(())
	}

	#[must_use]
	/// # Changed?
	///
	/// Returns `true` if the flag exists and was set.
	pub fn changed(&self, name: &str) -> bool {
		self.lookup(name).is_some_and(Flag::changed)
	}

	/// # Get.
	///
	/// Return a flag's native value, whatever type that happens to be.
	///
	/// ## Errors
	///
	/// Returns an error if the flag is not defined, or its value does not
	/// expose a native form.
	pub fn get(&self, name: &str) -> Result<Box<dyn Any>, FlagError> {
		self.lookup(name)
			.ok_or_else(|| FlagError::NotDefined(name.to_owned()))?
			.value()
			.native()
			.ok_or_else(|| FlagError::NoGetter(name.to_owned()))
	}

	/// # Get Typed.
	///
	/// Return a flag's native value as `T`, provided its type tag matches
	/// `kind`. The typed getters (e.g. [`FlagSet::get_int`]) are thin
	/// wrappers around this.
	///
	/// ## Errors
	///
	/// Returns an error if the flag is not defined, is of a different type,
	/// or does not expose a native `T`.
	pub fn get_typed<T: 'static>(&self, name: &str, kind: &'static str) -> Result<T, FlagError> {
		let flag = self.lookup(name)
			.ok_or_else(|| FlagError::NotDefined(name.to_owned()))?;

		let actual = flag.value().kind();
		if actual != kind {
			return Err(FlagError::TypeMismatch { requested: kind, actual });
		}

		flag.value()
			.native()
			.and_then(|v| v.downcast::<T>().ok())
			.map(|v| *v)
			.ok_or_else(|| FlagError::NoGetter(name.to_owned()))
	}

	/// # Index Of.
	fn index_of(&self, name: &str) -> Option<usize> {
		self.formal.get_index_of(&*self.normalize_name(name))
	}

	/// # Flag At.
	fn flag_at(&self, idx: usize) -> Option<&Flag> {
		self.formal.get_index(idx).map(|(_, f)| f)
	}
}

/// # Queries.
impl FlagSet {
	#[must_use]
	/// # Parsed?
	pub const fn parsed(&self) -> bool { self.parsed }

	#[must_use]
	/// # Positional Arguments.
	pub fn args(&self) -> &[String] { &self.args }

	#[must_use]
	/// # Positional Argument.
	pub fn arg(&self, idx: usize) -> Option<&str> { self.args.get(idx).map(String::as_str) }

	#[must_use]
	/// # Number of Positional Arguments.
	pub fn n_arg(&self) -> usize { self.args.len() }

	#[must_use]
	/// # Number of Set Flags.
	pub fn n_flag(&self) -> usize { self.actual.len() }

	#[must_use]
	/// # Positional Count at `--`.
	///
	/// If a `--` terminator was found, return the number of positional
	/// arguments that came before it.
	pub const fn args_len_at_dash(&self) -> Option<usize> { self.args_len_at_dash }

	#[must_use]
	/// # Has Flags?
	pub fn has_flags(&self) -> bool { ! self.formal.is_empty() }

	#[must_use]
	/// # Has Visible Flags?
	pub fn has_available_flags(&self) -> bool {
		self.formal.values().any(|f| ! f.hidden())
	}

	#[must_use]
	/// # Unknown Flags.
	///
	/// Return the unknown flags (and any values consumed with them) in the
	/// order they were found. This is only populated when
	/// [`ParseErrorsAllowlist::unknown_flags`] is enabled, or a
	/// shorthand-only flag was referenced by name.
	pub fn unknown_flags(&self) -> &[String] { &self.unknown_flags }

	#[must_use]
	/// # Set Flags.
	///
	/// Return the flags that were set, sorted by name, or in the order they
	/// were first set if sorting is disabled.
	pub fn flags(&self) -> Vec<&Flag> {
		let mut out: Vec<&Flag> = self.actual.iter().filter_map(|&idx| self.flag_at(idx)).collect();
		if self.sort_flags { out.sort_unstable_by(|a, b| a.name().cmp(b.name())); }
		out
	}

	#[must_use]
	/// # All Flags.
	///
	/// Return every defined flag, sorted by name, or in registration order if
	/// sorting is disabled.
	pub fn all_flags(&self) -> Vec<&Flag> {
		let mut out: Vec<&Flag> = self.formal.values().collect();
		if self.sort_flags { out.sort_unstable_by(|a, b| a.name().cmp(b.name())); }
		out
	}

	/// # Visit.
	///
	/// Run a callback against each flag that was set, in
	/// [`FlagSet::flags`] order.
	pub fn visit<F: FnMut(&Flag)>(&self, cb: F) { self.flags().into_iter().for_each(cb); }

	/// # Visit All.
	///
	/// Run a callback against every flag, in [`FlagSet::all_flags`] order.
	pub fn visit_all<F: FnMut(&Flag)>(&self, cb: F) { self.all_flags().into_iter().for_each(cb); }

	#[must_use]
	/// # Usage Text.
	///
	/// Return the output of the custom usage callback, if any, or the default
	/// usage: a header followed by the help for each group.
	pub fn usage_string(&self) -> String {
		match &self.usage {
			Some(cb) => cb(self),
			None => self.default_usage(),
		}
	}

	/// # Print Usage.
	///
	/// Write [`FlagSet::usage_string`] to the output.
	pub fn print_usage(&mut self) {
		let usage = self.usage_string();
		let _res = self.output.write_all(usage.as_bytes());
	}

	/// # Print Defaults.
	///
	/// Write [`FlagSet::flag_usages`] to the output.
	pub fn print_defaults(&mut self) {
		let usage = self.flag_usages();
		let _res = self.output.write_all(usage.as_bytes());
	}
}



#[cfg(test)]
#[derive(Debug, Clone, Default)]
/// # Test Output.
///
/// A cloneable in-memory sink, so tests can inspect what a set wrote.
pub(crate) struct Sink(crate::Slot<Vec<u8>>);

#[cfg(test)]
impl Sink {
	/// # Text.
	pub(crate) fn text(&self) -> String {
		self.0.with(|v| String::from_utf8_lossy(v).into_owned())
	}
}

#[cfg(test)]
impl Write for Sink {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.0.with_mut(|v| v.extend_from_slice(buf));
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> { Ok(()) }
}



#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		Count,
		value::{
			codec,
			Scalar,
		},
	};

	/// # Quiet Set.
	fn quiet(name: &str) -> (FlagSet, Sink) {
		let sink = Sink::default();
		let mut set = FlagSet::new(name, ErrorHandling::ContinueOnError);
		set.set_output(sink.clone());
		(set, sink)
	}

	#[test]
	#[should_panic(expected = "test flag redefined: foo")]
	fn t_redefined() {
		let (mut set, _) = quiet("test");
		set.int("foo", 0, "", []);
		set.string("foo", "", "", []);
	}

	#[test]
	#[should_panic(expected = "it's already used for \"foo\" flag")]
	fn t_shorthand_redefined() {
		let (mut set, _) = quiet("test");
		set.int("foo", 0, "", [Opt::Shorthand('f')]);
		set.int("fizz", 0, "", [Opt::Shorthand('f')]);
	}

	#[test]
	fn t_try_var() {
		let (mut set, sink) = quiet("test");
		assert!(set.try_var(Scalar::<codec::Int>::new(0), "foo", "", [Opt::Shorthand('f')]).is_ok());

		assert_eq!(
			set.try_var(Scalar::<codec::Int>::new(0), "foo", "", []).err(),
			Some(DefinitionError::Redefined { set: "test".to_owned(), name: "foo".to_owned() }),
		);
		assert_eq!(
			set.try_var(Scalar::<codec::Int>::new(0), "bar", "", [Opt::Shorthand('f')]).err(),
			Some(DefinitionError::ShorthandRedefined {
				set: "test".to_owned(),
				short: 'f',
				used: "foo".to_owned(),
			}),
		);
		assert_eq!(
			set.try_var(Scalar::<codec::Int>::new(0), "baz", "", [Opt::Deprecated(String::new())]).err(),
			Some(DefinitionError::EmptyDeprecation("baz".to_owned())),
		);

		// Failures leave no trace.
		assert!(set.lookup("bar").is_none());
		assert!(set.lookup("baz").is_none());
		assert_eq!(set.all_flags().len(), 1);
		assert!(sink.text().is_empty());
	}

	#[test]
	fn t_lookup() {
		let (mut set, _) = quiet("test");
		assert!(! set.has_flags());
		assert!(! set.has_available_flags());

		set.bool("verbose", false, "", [Opt::Shorthand('v'), Opt::Hidden]);
		assert!(set.has_flags());
		assert!(! set.has_available_flags());

		set.int("num", 0, "", []);
		assert!(set.has_available_flags());

		assert_eq!(set.lookup("verbose").map(Flag::name), Some("verbose"));
		assert_eq!(set.shorthand_lookup('v').map(Flag::name), Some("verbose"));
		assert!(set.shorthand_lookup('n').is_none());
		assert!(set.lookup("nope").is_none());
	}

	#[test]
	fn t_set() {
		let (mut set, _) = quiet("test");
		let num = set.int("num", 1, "", [Opt::Shorthand('n')]);
		let name = set.string("name", "", "", []);

		assert!(! set.changed("num"));
		assert!(set.set("num", "5").is_ok());
		assert_eq!(num.get(), 5);
		assert!(set.changed("num"));
		assert!(! set.changed("name"));
		assert!(! set.changed("nope"));

		// Setting again keeps a single entry.
		assert!(set.set("name", "x").is_ok());
		assert!(set.set("num", "6").is_ok());
		assert_eq!(set.n_flag(), 2);
		assert_eq!(name.get(), "x");

		let err = set.set("num", "six").expect_err("Bad value should fail.");
		assert_eq!(
			err.to_string(),
			r#"invalid argument "six" for "-n, --num" flag: parsing "six": invalid syntax"#,
		);
		assert_eq!(num.get(), 6);

		let err = set.set("nope", "1").expect_err("Unknown flag should fail.");
		assert_eq!(err.to_string(), "unknown flag: --nope");
	}

	#[test]
	fn t_set_deprecated() {
		let (mut set, sink) = quiet("test");
		set.bool("old", false, "", [Opt::Deprecated("use --new instead".to_owned())]);
		assert!(set.lookup("old").is_some_and(Flag::hidden));

		assert!(set.set("old", "true").is_ok());
		assert_eq!(sink.text(), "Flag --old has been deprecated, use --new instead\n");
	}

	#[test]
	fn t_get() {
		let (mut set, _) = quiet("test");
		set.string("name", "bob", "", []);
		set.int("num", 3, "", []);
		set.count("verbose", "", [Opt::Shorthand('v')]);

		assert_eq!(set.get_string("name").ok().as_deref(), Some("bob"));
		assert_eq!(set.get_int("num").ok(), Some(3));
		assert_eq!(set.get_count("verbose").ok(), Some(0));

		// The generic getter works too.
		let any = set.get("num").expect("Get failed.");
		assert_eq!(any.downcast_ref::<isize>(), Some(&3));

		// Asking for the wrong type is an error, not a zero.
		assert!(matches!(
			set.get_int("name"),
			Err(FlagError::TypeMismatch { requested: "int", actual: "string" }),
		));
		assert!(matches!(
			set.get_int64("num"),
			Err(FlagError::TypeMismatch { requested: "int64", actual: "int" }),
		));
		assert!(matches!(set.get_int("nope"), Err(FlagError::NotDefined(_))));
		assert!(matches!(set.get("nope"), Err(FlagError::NotDefined(_))));
	}

	#[test]
	fn t_get_untyped() {
		/// # Opaque Value.
		struct Opaque;
		impl Value for Opaque {
			fn render(&self) -> String { String::new() }
			fn set(&mut self, _raw: &str) -> Result<(), crate::ValueError> { Ok(()) }
		}

		let (mut set, _) = quiet("test");
		set.var(Opaque, "opaque", "", []);
		assert!(matches!(set.get("opaque"), Err(FlagError::NoGetter(_))));
		assert!(matches!(set.get_string("opaque"), Err(FlagError::TypeMismatch { .. })));
	}

	#[test]
	fn t_sorting() {
		let (mut set, _) = quiet("test");
		set.int("zed", 0, "", []);
		set.int("alpha", 0, "", []);
		set.int("mid", 0, "", []);

		let names = |set: &FlagSet| set.all_flags().into_iter().map(Flag::name).collect::<Vec<_>>().join(",");
		assert_eq!(names(&set), "alpha,mid,zed");

		set.set_sort_flags(false);
		assert_eq!(names(&set), "zed,alpha,mid");

		// Flags added later are picked up.
		set.int("beta", 0, "", []);
		set.set_sort_flags(true);
		assert_eq!(names(&set), "alpha,beta,mid,zed");

		assert!(set.set("mid", "1").is_ok());
		assert!(set.set("alpha", "1").is_ok());
		let mut seen = Vec::new();
		set.visit(|f| seen.push(f.name().to_owned()));
		assert_eq!(seen, ["alpha", "mid"]);

		set.set_sort_flags(false);
		seen.clear();
		set.visit(|f| seen.push(f.name().to_owned()));
		assert_eq!(seen, ["mid", "alpha"]);

		let mut all = 0;
		set.visit_all(|_| all += 1);
		assert_eq!(all, 4);
	}

	#[test]
	fn t_normalize() {
		let (mut set, _) = quiet("test");
		let a = set.bool("dry_run", false, "", [Opt::Shorthand('d')]);
		set.int("Max_Jobs", 0, "", []);
		assert!(set.set("dry_run", "true").is_ok());

		set.set_normalize(|name| name.to_ascii_lowercase().replace('_', "-"));

		// Everything was re-keyed.
		assert_eq!(set.lookup("dry-run").map(Flag::name), Some("dry-run"));
		assert_eq!(set.lookup("DRY_RUN").map(Flag::name), Some("dry-run"));
		assert_eq!(set.lookup("max-jobs").map(Flag::name), Some("max-jobs"));
		assert_eq!(set.shorthand_lookup('d').map(Flag::name), Some("dry-run"));
		assert!(set.changed("dry_run"));
		assert_eq!(set.flags().len(), 1);

		// New flags are normalized on the way in.
		set.int("New_Thing", 0, "", []);
		assert!(set.lookup("new-thing").is_some());
		assert!(set.try_var(Scalar::<codec::Int>::new(0), "new_thing", "", []).is_err());

		assert!(set.set("Max_Jobs", "4").is_ok());
		assert_eq!(set.get_int("max-jobs").ok(), Some(4));
		assert!(a.get());
	}

	#[test]
	fn t_add_flag_set() {
		let (mut set, _) = quiet("test");
		let keep = set.int("shared", 1, "", []);

		let mut other = FlagSet::new("other", ErrorHandling::ContinueOnError);
		let moved = other.string("extra", "x", "", [Opt::Shorthand('e')]);
		other.int("shared", 2, "", []);

		set.add_flag_set(other);
		assert_eq!(set.all_flags().len(), 2);
		assert!(set.shorthand_lookup('e').is_some());

		assert!(set.set("extra", "y").is_ok());
		assert_eq!(moved.get(), "y");
		assert!(set.set("shared", "3").is_ok());
		assert_eq!(keep.get(), 3);
	}

	#[test]
	fn t_add_flag() {
		let (mut set, _) = quiet("test");
		let slot = crate::Slot::new(0);
		let flag = Flag::new(Count::from_slot(slot.clone()), "v", "")
			.with_opts([Opt::NoOptDefault(Count::INCREMENT.to_owned())])
			.expect("Options failed.");
		set.add_flag(flag);

		assert!(set.set("v", Count::INCREMENT).is_ok());
		assert_eq!(slot.get(), 1);
		assert!(set.try_add_flag(Flag::new(Count::new(0), "v", "")).is_err());
	}

	#[test]
	fn t_marks() {
		let (mut set, _) = quiet("test");
		set.int("num", 0, "", [Opt::Shorthand('n')]);

		assert!(set.mark_hidden("num").is_ok());
		assert!(set.lookup("num").is_some_and(Flag::hidden));

		assert_eq!(
			set.mark_deprecated("num", ""),
			Err(DefinitionError::EmptyDeprecation("num".to_owned())),
		);
		assert!(set.mark_deprecated("num", "soon").is_ok());
		assert_eq!(set.lookup("num").and_then(Flag::deprecated), Some("soon"));

		assert!(set.mark_shorthand_deprecated("num", "use --num").is_ok());
		assert_eq!(set.lookup("num").and_then(Flag::shorthand_deprecated), Some("use --num"));

		assert_eq!(set.mark_hidden("nope"), Err(DefinitionError::Undefined("nope".to_owned())));

		assert!(set.set_annotation("num", "k", vec!["a".to_owned()]).is_ok());
		assert_eq!(
			set.lookup("num").and_then(|f| f.annotation("k")),
			Some(&["a".to_owned()][..]),
		);
		assert!(set.set_annotation("nope", "k", Vec::new()).is_err());
	}
}
