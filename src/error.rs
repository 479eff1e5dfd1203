/*!
# Pennant: Errors

Failures come in three flavors, kept deliberately apart:

* [`ValueError`]: a [`Value`](crate::Value) could not make sense of some text.
* [`FlagError`]: something went wrong while parsing or querying a
  [`FlagSet`](crate::FlagSet). These are the user's fault, and are always
  recoverable.
* [`DefinitionError`]: the flags themselves were declared wrong. These are
  the programmer's fault; registration panics with them.
*/

use thiserror::Error;



#[derive(Debug, Clone, Eq, PartialEq, Error)]
/// # Value Error.
///
/// This is returned by [`Value::set`](crate::Value::set) and friends when the
/// text cannot be coerced into the underlying type.
pub enum ValueError {
	#[error("parsing {0:?}: invalid syntax")]
	/// # Invalid Syntax.
	Syntax(String),

	#[error("parsing {0:?}: value out of range")]
	/// # Out of Range.
	Range(String),

	#[error("bare \" in non-quoted field")]
	/// # CSV: Stray Quote.
	BareQuote,

	#[error("extraneous or missing \" in quoted field")]
	/// # CSV: Unbalanced Quote.
	Quote,

	#[error("{0} must be formatted as key=value")]
	/// # Missing `key=value`.
	KeyValue(String),

	#[error("time: invalid duration {0:?}")]
	/// # Invalid Duration.
	Duration(String),

	#[error("time: missing unit in duration {0:?}")]
	/// # Duration Without Unit.
	DurationUnit(String),

	#[error("time: unknown unit {unit:?} in duration {raw:?}")]
	/// # Duration With Unknown Unit.
	DurationUnknownUnit {
		/// # The Unit.
		unit: String,
		/// # The Full Text.
		raw: String,
	},

	#[error("failed to parse IP: {0:?}")]
	/// # Invalid IP Address.
	Ip(String),

	#[error("failed to parse IP mask: {0:?}")]
	/// # Invalid IP Mask.
	IpMask(String),

	#[error("invalid CIDR address: {0}")]
	/// # Invalid IP Network.
	IpNet(String),

	#[error("encoding/hex: {0}")]
	/// # Invalid Hex.
	Hex(&'static str),

	#[error("illegal base64 data: {0}")]
	/// # Invalid Base64.
	Base64(String),

	#[error("{0}")]
	/// # Custom.
	///
	/// This is a catch-all for third-party [`Value`](crate::Value)
	/// implementations.
	Custom(String),
}



#[derive(Debug, Error)]
/// # Flag Error.
///
/// This covers everything that can go wrong once the flags have been defined:
/// parsing an argument vector, as well as getting and setting values by name.
///
/// Note that [`FlagError::HelpRequested`] is not really a failure; it is
/// returned when `-h`/`--help` was passed but not defined, after the usage
/// has already been printed. Most programs will want to treat it as a clean
/// exit (see [`FlagError::exit_code`]).
pub enum FlagError {
	#[error("pennant: help requested")]
	/// # Help Requested.
	HelpRequested,

	#[error("unknown flag: {}", dashed(.0))]
	/// # Unknown Flag.
	UnknownFlag(String),

	#[error("unknown shorthand flag: {short:?} in -{cluster}")]
	/// # Unknown Shorthand.
	UnknownShorthand {
		/// # The Shorthand.
		short: char,
		/// # The Cluster It Came From.
		cluster: String,
	},

	#[error("flag needs an argument: {0}")]
	/// # Missing Value.
	///
	/// The inner string is the flag as the user wrote it.
	NeedsArgument(String),

	#[error("bad flag syntax: {0}")]
	/// # Bad Syntax.
	BadSyntax(String),

	#[error("invalid argument {value:?} for {flag:?} flag: {source}")]
	/// # Invalid Argument.
	InvalidArgument {
		/// # The Rejected Text.
		value: String,
		/// # The Flag, e.g. `-n, --num`.
		flag: String,
		#[source]
		/// # Why.
		source: ValueError,
	},

	#[error("flag accessed but not defined: {0}")]
	/// # Undefined Flag.
	NotDefined(String),

	#[error("trying to get {requested:?} value of flag of type {actual:?}")]
	/// # Type Mismatch.
	TypeMismatch {
		/// # What the Caller Asked For.
		requested: &'static str,
		/// # What the Flag Actually Is.
		actual: &'static str,
	},

	#[error("flag {0:?} does not expose its native value")]
	/// # No Getter.
	NoGetter(String),
}

impl FlagError {
	#[must_use]
	/// # Exit Code.
	///
	/// Return the status code a program should exit with: `0` for
	/// [`FlagError::HelpRequested`], `2` for everything else.
	pub const fn exit_code(&self) -> i32 {
		match self {
			Self::HelpRequested => 0,
			_ => 2,
		}
	}

	#[must_use]
	/// # Is Help?
	pub const fn is_help(&self) -> bool { matches!(self, Self::HelpRequested) }
}



#[derive(Debug, Clone, Eq, PartialEq, Error)]
/// # Definition Error.
///
/// These are programming mistakes caught while registering flags. The
/// registration methods panic with them; the `try_*` variants return them.
pub enum DefinitionError {
	#[error("{set} flag redefined: {name}")]
	/// # Duplicate Name.
	Redefined {
		/// # The Set.
		set: String,
		/// # The Flag.
		name: String,
	},

	#[error("unable to redefine {short:?} shorthand in {set:?} flagset: it's already used for {used:?} flag")]
	/// # Duplicate Shorthand.
	ShorthandRedefined {
		/// # The Set.
		set: String,
		/// # The Shorthand.
		short: char,
		/// # The Flag Already Holding It.
		used: String,
	},

	#[error("deprecated message for flag {0:?} must be set")]
	/// # Empty Deprecation Message.
	EmptyDeprecation(String),

	#[error("shorthand deprecated message for flag {0:?} must be set")]
	/// # Empty Shorthand Deprecation Message.
	EmptyShorthandDeprecation(String),

	#[error("flag {0:?} does not exist")]
	/// # No Such Flag.
	///
	/// Returned when marking a flag that was never registered.
	Undefined(String),
}



/// # Dashed Name.
///
/// Single-character names get one dash, everything else two.
fn dashed(name: &str) -> String {
	let mut chars = name.chars();
	if chars.next().is_some() && chars.next().is_none() { format!("-{name}") }
	else { format!("--{name}") }
}
