/*!
# Pennant: Key Kind

**Note:** This is not intended for external use and is subject to change.
*/



#[doc(hidden)]
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
/// # Key Kind.
///
/// This is a first-pass classification of a single command-line token, used
/// by the parser to decide what to do with it:
/// * `--` on its own ends flag parsing.
/// * Anything else beginning with `--` is a long flag; the body is everything after the dashes, including any `=value`.
/// * Anything else beginning with a single `-`, besides `-` itself, is a shorthand cluster; the body is everything after the dash.
/// * Everything else, including empty strings and a lone `-`, is positional.
///
/// No further validation is done here; a body like `-x` (from `---x`) or
/// `=x` is the parser's problem.
pub enum KeyKind<'a> {
	/// # Positional.
	Positional,

	/// # End of Flags (`--`).
	Terminator,

	/// # Long Flag.
	Long(&'a str),

	/// # Shorthand Cluster.
	Short(&'a str),
}

impl<'a> From<&'a str> for KeyKind<'a> {
	fn from(txt: &'a str) -> Self {
		match txt.as_bytes() {
			[b'-', b'-'] => Self::Terminator,
			[b'-', b'-', ..] => Self::Long(&txt[2..]),
			[b'-', _, ..] => Self::Short(&txt[1..]),
			_ => Self::Positional,
		}
	}
}
