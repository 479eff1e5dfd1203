/*!
# Pennant: Parsing
*/

use crate::{
	ErrorHandling,
	FlagError,
	FlagSet,
	KeyKind,
};
use std::{
	io::Write,
	iter::Peekable,
	vec::IntoIter,
};



/// # Remaining Tokens.
type Tokens = Peekable<IntoIter<String>>;



impl FlagSet {
	/// # Parse.
	///
	/// Parse an argument vector (without the program name), assigning values
	/// to flags and collecting positional arguments.
	///
	/// A long flag takes its value from `--name=value`, its no-option
	/// default, or the next token, in that order. A shorthand takes its value
	/// from `-n=value`, its no-option default, the rest of its cluster, or
	/// the next token, in that order. Flags with no-option defaults can be
	/// clustered, as in `-vvv`.
	///
	/// A `--` ends flag parsing; everything after it is positional.
	///
	/// ## Errors
	///
	/// Returns an error for unknown flags (unless allowlisted), missing or
	/// invalid values, and malformed tokens. If help was requested, the usage
	/// is printed and [`FlagError::HelpRequested`] is returned.
	///
	/// Depending on the set's [`ErrorHandling`], errors may instead end the
	/// process or panic.
	pub fn parse<I, S>(&mut self, args: I) -> Result<(), FlagError>
	where I: IntoIterator<Item = S>, S: AsRef<str> {
		self.parse_all(args, |set, name, value| set.set(name, value))
	}

	/// # Parse With Callback.
	///
	/// This works just like [`FlagSet::parse`], except each flag assignment
	/// is handed to the callback instead. The callback receives the flag's
	/// canonical name and the raw value; call [`FlagSet::set`] from within to
	/// keep the default behavior.
	///
	/// ## Errors
	///
	/// Same as [`FlagSet::parse`], plus anything the callback returns.
	pub fn parse_all<I, S, F>(&mut self, args: I, mut cb: F) -> Result<(), FlagError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
		F: FnMut(&mut Self, &str, &str) -> Result<(), FlagError>,
	{
		self.parsed = true;
		let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_owned()).collect();
		if args.is_empty() { return Ok(()); }

		self.args = Vec::with_capacity(args.len());
		self.args_len_at_dash = None;

		match self.parse_args(args, &mut cb) {
			Ok(()) => Ok(()),
			Err(e) => self.fail(e),
		}
	}

	/// # Parse Environment.
	///
	/// Parse [`std::env::args_os`], minus the program name. Invalid UTF-8 is
	/// replaced rather than rejected.
	///
	/// ## Errors
	///
	/// Same as [`FlagSet::parse`].
	pub fn parse_env(&mut self) -> Result<(), FlagError> {
		self.parse(std::env::args_os().skip(1).map(|a| a.to_string_lossy().into_owned()))
	}

	/// # Parse Arguments.
	fn parse_args<F>(&mut self, args: Vec<String>, cb: &mut F) -> Result<(), FlagError>
	where F: FnMut(&mut Self, &str, &str) -> Result<(), FlagError> {
		let mut args = args.into_iter().peekable();
		while let Some(token) = args.next() {
			match KeyKind::from(token.as_str()) {
				KeyKind::Long(body) => {
					self.parse_long(&token, body, &mut args, cb)?;
					continue;
				},
				KeyKind::Short(cluster) => {
					let mut rest = cluster;
					while ! rest.is_empty() {
						rest = self.parse_short(rest, &mut args, cb)?;
					}
					continue;
				},
				KeyKind::Terminator => {
					tracing::debug!(positionals = self.args.len(), "flag terminator");
					self.args_len_at_dash = Some(self.args.len());
					self.args.extend(args);
					return Ok(());
				},
				KeyKind::Positional => {},
			}

			self.args.push(token);
			if ! self.interspersed {
				self.args.extend(args);
				return Ok(());
			}
		}

		Ok(())
	}

	/// # Parse Long Flag.
	///
	/// The body is the token minus its leading `--`.
	fn parse_long<F>(&mut self, token: &str, body: &str, args: &mut Tokens, cb: &mut F)
	-> Result<(), FlagError>
	where F: FnMut(&mut Self, &str, &str) -> Result<(), FlagError> {
		if body.is_empty() || body.starts_with(['-', '=']) {
			return Err(FlagError::BadSyntax(token.to_owned()));
		}

		let (name, inline) = match body.split_once('=') {
			Some((name, value)) => (name, Some(value)),
			None => (body, None),
		};

		let found = self.index_of(name);
		let Some(idx) = found.filter(|&idx| self.flag_at(idx).is_some_and(|f| ! f.shorthand_only())) else {
			if found.is_none() && name == "help" && ! self.disable_builtin_help {
				return Err(self.help());
			}

			// Shorthand-only flags referenced by name are always let through
			// as unknowns.
			if self.allowlist.unknown_flags || found.is_some() {
				self.add_unknown(token.to_owned());
				if inline.is_none() { self.strip_unknown_value(args); }
				return Ok(());
			}

			return Err(FlagError::UnknownFlag(name.to_owned()));
		};

		let Some(flag) = self.flag_at(idx) else {
			return Err(FlagError::NotDefined(name.to_owned()));
		};
		let canonical = flag.name().to_owned();
		let no_opt = flag.no_opt_default();

		let value =
			if let Some(v) = inline { v.to_owned() }
			else if ! no_opt.is_empty() { no_opt.to_owned() }
			else if let Some(next) = args.next() { next }
			else { return Err(FlagError::NeedsArgument(token.to_owned())); };

		cb(self, &canonical, &value)
	}

	/// # Parse Shorthand.
	///
	/// Handle the first character of a shorthand cluster, returning whatever
	/// is left of the cluster for the next pass.
	fn parse_short<'a, F>(&mut self, cluster: &'a str, args: &mut Tokens, cb: &mut F)
	-> Result<&'a str, FlagError>
	where F: FnMut(&mut Self, &str, &str) -> Result<(), FlagError> {
		let mut chars = cluster.chars();
		let Some(short) = chars.next() else { return Ok(""); };
		let after = chars.as_str();

		let Some(flag) = self.shorthands.get(&short).and_then(|&idx| self.flag_at(idx)) else {
			if short == 'h' && ! self.disable_builtin_help {
				return Err(self.help());
			}

			if self.allowlist.unknown_flags {
				// Longer clusters are recorded whole.
				if cluster.len() > 2 {
					self.add_unknown(format!("-{cluster}"));
					return Ok("");
				}

				self.add_unknown(format!("-{short}"));
				if after.is_empty() { self.strip_unknown_value(args); }
				return Ok(after);
			}

			return Err(FlagError::UnknownShorthand {
				short,
				cluster: cluster.to_owned(),
			});
		};

		let canonical = flag.name().to_owned();
		let no_opt = flag.no_opt_default();
		let deprecated = flag.shorthand_deprecated().map(str::to_owned);

		let (value, rest) =
			if let Some(v) = after.strip_prefix('=').filter(|v| ! v.is_empty()) {
				(v.to_owned(), "")
			}
			else if ! no_opt.is_empty() { (no_opt.to_owned(), after) }
			else if ! after.is_empty() { (after.to_owned(), "") }
			else if let Some(next) = args.next() { (next, "") }
			else {
				return Err(FlagError::NeedsArgument(format!("{short:?} in -{cluster}")));
			};

		if let Some(msg) = deprecated {
			tracing::warn!(flag = canonical.as_str(), shorthand = %short, "deprecated shorthand used");
			let _res = writeln!(self.output, "Flag shorthand -{short} has been deprecated, {msg}");
		}

		cb(self, &canonical, &value)?;
		Ok(rest)
	}

	/// # Strip Unknown Value.
	///
	/// An unknown flag might have been given a value as the next token. If
	/// that token doesn't look like a flag, assume it was and set it aside
	/// along with the flag.
	fn strip_unknown_value(&mut self, args: &mut Tokens) {
		if args.peek().is_some_and(|next| ! next.starts_with('-')) {
			if let Some(next) = args.next() { self.add_unknown(next); }
		}
	}

	/// # Record Unknown.
	fn add_unknown(&mut self, token: String) {
		tracing::debug!(token = token.as_str(), "unknown flag recorded");
		self.unknown_flags.push(token);
	}

	/// # Help.
	fn help(&mut self) -> FlagError {
		self.print_usage();
		FlagError::HelpRequested
	}

	/// # Fail.
	///
	/// Apply the error-handling policy.
	fn fail(&mut self, err: FlagError) -> Result<(), FlagError> {
		match self.error_handling {
			ErrorHandling::ContinueOnError => Err(err),
			ErrorHandling::ExitOnError => {
				self.report(&err);
				std::process::exit(err.exit_code());
			},
			ErrorHandling::PanicOnError => {
				self.report(&err);
				panic!("{err}");
			},
		}
	}

	/// # Report.
	///
	/// Print the usage and error, unless this was a help request, in which
	/// case the usage has already been printed.
	fn report(&mut self, err: &FlagError) {
		if ! err.is_help() {
			self.print_usage();
			let _res = writeln!(self.output, "\n{err}");
		}
	}
}
