/*!
# Pennant: Usage

Help output is assembled one line per visible flag, with the descriptions
aligned into a single column:

```text
  -n, --num int         how many (default 3)
      --name string     your name
  -v, --verbose         chatty output
```

The pieces of each line come from a [`UsageFormatter`]; the alignment and
wrapping are handled here.
*/

use crate::{
	Flag,
	FlagSet,
};



/// # Usage Formatter.
///
/// Each method renders one piece of a flag's help line. All of them have
/// defaults, so a custom formatter need only override what it wants to
/// change.
///
/// ## Examples
///
/// ```
/// use pennant::{Flag, FlagSet, UsageFormatter};
///
/// struct Shouty;
/// impl UsageFormatter for Shouty {
///     fn usage(&self, _flag: &Flag, usage: &str) -> String {
///         usage.to_uppercase()
///     }
/// }
///
/// let mut flags = FlagSet::default();
/// flags.bool("verbose", false, "chatty output", []);
/// flags.set_formatter(Shouty);
///
/// assert_eq!(flags.flag_usages(), "      --verbose   CHATTY OUTPUT\n");
/// ```
pub trait UsageFormatter {
	/// # Name.
	///
	/// The leading part of the line, e.g. `  -n, --num`.
	fn name(&self, flag: &Flag) -> String {
		let mut out = String::from("  ");
		match flag.shorthand() {
			Some(c) if flag.shorthand_deprecated().is_none() => {
				out.push('-');
				out.push(c);
				if ! flag.shorthand_only() { out.push_str(", "); }
			},
			_ => { out.push_str("    "); },
		}
		out.push_str("--");
		out.push_str(flag.name());
		out
	}

	/// # Usage.
	///
	/// The description, after back-quote processing.
	fn usage(&self, _flag: &Flag, usage: &str) -> String { usage.to_owned() }

	/// # Variable Name.
	///
	/// The placeholder shown after the name, e.g. `int` in `--num int`.
	fn usage_var_name(&self, _flag: &Flag, name: &str) -> String { name.to_owned() }

	/// # Default Value.
	///
	/// The suffix used when the default is worth mentioning.
	fn default_value(&self, flag: &Flag) -> String {
		if flag.value().kind() == "string" { format!(" (default {:?})", flag.default_value()) }
		else { format!(" (default {})", flag.default_value()) }
	}

	/// # No-Option Default.
	///
	/// The suffix used when a flag can appear without a value, e.g.
	/// `[="always"]`. Booleans and counts using the natural defaults get
	/// nothing.
	fn no_opt_default(&self, flag: &Flag) -> String {
		let no_opt = flag.no_opt_default();
		match flag.value().kind() {
			"string" => format!("[=\"{no_opt}\"]"),
			"bool" if no_opt == "true" => String::new(),
			"count" if no_opt == crate::Count::INCREMENT => String::new(),
			_ => format!("[={no_opt}]"),
		}
	}

	/// # Deprecated.
	fn deprecated(&self, flag: &Flag) -> String {
		format!(" (DEPRECATED: {})", flag.deprecated().unwrap_or_default())
	}
}



#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
/// # Default Usage Formatter.
pub struct DefaultUsageFormatter;

impl UsageFormatter for DefaultUsageFormatter {}



#[must_use]
/// # Unquote Usage.
///
/// Return a flag's placeholder name and its usage text.
///
/// The first back-quoted word in the usage is taken as the name (unless
/// [`Opt::UsageType`](crate::Opt::UsageType) already provided one), and the
/// quotes are removed. Failing that, the name is derived from the value's
/// type, with booleans getting none at all.
///
/// ## Examples
///
/// ```
/// use pennant::{FlagSet, unquote_usage};
///
/// let mut flags = FlagSet::default();
/// flags.string("out", "", "write to `path`", []);
/// flags.int64("num", 0, "how many", []);
///
/// let out = flags.lookup("out").unwrap();
/// assert_eq!(
///     unquote_usage(out),
///     ("path".to_owned(), "write to path".to_owned()),
/// );
///
/// let num = flags.lookup("num").unwrap();
/// assert_eq!(
///     unquote_usage(num),
///     ("int".to_owned(), "how many".to_owned()),
/// );
/// ```
pub fn unquote_usage(flag: &Flag) -> (String, String) {
	let mut name = flag.usage_type().to_owned();
	let usage = flag.usage();

	if ! flag.disable_unquote_usage() {
		if let Some(start) = usage.find('`') {
			if let Some(len) = usage[start + 1..].find('`') {
				let end = start + 1 + len;
				let extracted = &usage[start + 1..end];
				if name.is_empty() { name.push_str(extracted); }
				return (name, format!("{}{extracted}{}", &usage[..start], &usage[end + 1..]));
			}
		}
	}

	if name.is_empty() { name.push_str(kind_label(flag.value().kind())); }
	(name, usage.to_owned())
}

/// # Placeholder From Type.
const fn kind_label(kind: &'static str) -> &'static str {
	match kind.as_bytes() {
		b"" => "value",
		b"bool" => "",
		b"boolSlice" => "bools",
		b"durationSlice" => "durations",
		b"float32" | b"float64" => "float",
		b"float32Slice" | b"float64Slice" => "floats",
		b"int8" | b"int16" | b"int32" | b"int64" => "int",
		b"intSlice" | b"int32Slice" | b"int64Slice" => "ints",
		b"stringSlice" | b"stringArray" => "strings",
		b"uint8" | b"uint16" | b"uint32" | b"uint64" => "uint",
		b"uintSlice" | b"uint8Slice" | b"uint16Slice" | b"uint32Slice" | b"uint64Slice" => "uints",
		_ => kind,
	}
}

/// # Default Is Zero?
///
/// Zero-ish defaults are left out of the help.
fn default_is_zero_value(flag: &Flag) -> bool {
	let value = flag.value();
	let default = flag.default_value();
	if value.is_bool_flag() { return default == "false"; }

	let kind = value.kind();
	match kind {
		"duration" => matches!(default, "0" | "0s"),
		"int" | "int8" | "int16" | "int32" | "int64" |
		"uint" | "uint8" | "uint16" | "uint32" | "uint64" |
		"count" | "float32" | "float64" => default == "0",
		"string" => default.is_empty(),
		"ip" => matches!(default, "0.0.0.0" | "::" | "<nil>"),
		"ipMask" => matches!(default, "00000000" | "<nil>"),
		"ipNet" => matches!(default, "0.0.0.0/0" | "<nil>"),
		_ if
			value.as_list().is_some() ||
			kind.ends_with("Slice") ||
			kind.starts_with("stringTo") => default == "[]",
		_ => matches!(default, "false" | "<nil>" | "" | "0"),
	}
}

/// # Wrap.
///
/// Wrap `s` to `cols` columns, indenting continuation lines by `indent`. The
/// first line is assumed to be indented already. If there isn't room for at
/// least 24 columns of text, the whole block moves to the next line at a
/// fixed indent of 16. A `cols` of zero disables wrapping, but embedded line
/// breaks are still indented.
fn wrap(mut indent: usize, cols: usize, s: &str) -> String {
	if cols == 0 {
		return s.replace('\n', &format!("\n{}", " ".repeat(indent)));
	}

	let mut width = cols.saturating_sub(indent);
	let mut out = String::new();

	if width < 24 {
		indent = 16;
		width = cols.saturating_sub(indent);
		out.push('\n');
		out.push_str(&" ".repeat(indent));

		if width < 24 { return s.replace('\n', &out); }
	}

	// Allow going a little over to avoid orphaned words.
	let slop = 5;
	width -= slop;

	let pad = format!("\n{}", " ".repeat(indent));
	let (line, mut rest) = wrap_n(width, slop, s);
	out.push_str(&line.replace('\n', &pad));

	while ! rest.is_empty() {
		let (line, next) = wrap_n(width, slop, rest);
		out.push_str(&pad);
		out.push_str(&line.replace('\n', &pad));
		rest = next;
	}

	out
}

/// # Wrap Once.
///
/// Split `s` at the last whitespace within the first `width` bytes,
/// preferring a line break if there is one. Strings within `slop` of the
/// limit are left whole.
fn wrap_n(width: usize, slop: usize, s: &str) -> (&str, &str) {
	if width + slop > s.len() { return (s, ""); }

	let mut end = width;
	while ! s.is_char_boundary(end) { end -= 1; }
	let head = &s[..end];

	let Some(w) = head.rfind([' ', '\t', '\n']).filter(|&w| w > 0) else {
		return (s, "");
	};

	if let Some(nl) = head.rfind('\n').filter(|&nl| nl > 0 && nl < w) {
		return (&s[..nl], &s[nl + 1..]);
	}

	(&s[..w], &s[w + 1..])
}



/// # Usage.
impl FlagSet {
	#[must_use]
	/// # Flag Usages.
	///
	/// Return the help lines for the ungrouped flags, unwrapped.
	pub fn flag_usages(&self) -> String { self.flag_usages_for_group_wrapped("", 0) }

	#[must_use]
	/// # Flag Usages (Wrapped).
	///
	/// Return the help lines for the ungrouped flags, wrapped to `cols`
	/// columns. A `cols` of zero disables wrapping.
	pub fn flag_usages_wrapped(&self, cols: usize) -> String {
		self.flag_usages_for_group_wrapped("", cols)
	}

	#[must_use]
	/// # Flag Usages for Group.
	pub fn flag_usages_for_group(&self, group: &str) -> String {
		self.flag_usages_for_group_wrapped(group, 0)
	}

	#[must_use]
	/// # Flag Usages for Group (Wrapped).
	///
	/// Return the help lines for the flags in `group`, wrapped to `cols`
	/// columns. Hidden flags are skipped.
	///
	/// The description column is aligned across every visible flag in the
	/// set, not just those in the group, so the sections line up when printed
	/// together.
	pub fn flag_usages_for_group_wrapped(&self, group: &str, cols: usize) -> String {
		let fmt = self.formatter();
		let mut maxlen = 0;
		let mut lines: Vec<(usize, String)> = Vec::new();

		for flag in self.all_flags() {
			if flag.hidden() { continue; }

			let mut line = fmt.name(flag);
			let (varname, usage) = unquote_usage(flag);
			if ! varname.is_empty() {
				line.push(' ');
				line.push_str(&fmt.usage_var_name(flag, &varname));
			}
			if ! flag.no_opt_default().is_empty() {
				line.push_str(&fmt.no_opt_default(flag));
			}

			// Count the separator too.
			let sidx = line.len();
			maxlen = maxlen.max(sidx + 1);

			if flag.group() != group { continue; }

			line.push_str(&fmt.usage(flag, &usage));
			if ! flag.disable_print_default() && ! default_is_zero_value(flag) {
				line.push_str(&fmt.default_value(flag));
			}
			if flag.deprecated().is_some() {
				line.push_str(&fmt.deprecated(flag));
			}

			lines.push((sidx, line));
		}

		let mut out = String::new();
		for (sidx, line) in lines {
			out.push_str(&line[..sidx]);
			out.push(' ');
			out.push_str(&" ".repeat(maxlen - sidx));
			out.push(' ');
			out.push_str(&wrap(maxlen + 2, cols, &line[sidx..]));
			out.push('\n');
		}
		out
	}

	#[must_use]
	/// # Groups.
	///
	/// Return the distinct groups, sorted, with the ungrouped (empty) group
	/// first if there are any such flags.
	pub fn groups(&self) -> Vec<&str> {
		let mut ungrouped = false;
		let mut out: Vec<&str> = Vec::new();
		for flag in self.all_flags() {
			let group = flag.group();
			if group.is_empty() { ungrouped = true; }
			else { out.push(group); }
		}

		out.sort_unstable();
		out.dedup();
		if ungrouped { out.insert(0, ""); }
		out
	}

	#[must_use]
	/// # Default Usage.
	///
	/// Return the `Usage of <name>:` header followed by the help for every
	/// group, ungrouped flags first, then each named group under its own
	/// heading.
	pub fn default_usage(&self) -> String {
		let mut out =
			if self.name().is_empty() { String::from("Usage:\n") }
			else { format!("Usage of {}:\n", self.name()) };

		for group in self.groups() {
			let usages = self.flag_usages_for_group(group);
			if usages.is_empty() { continue; }

			if ! group.is_empty() {
				out.push('\n');
				out.push_str(group);
				out.push_str(":\n");
			}
			out.push_str(&usages);
		}

		out
	}
}



#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		ErrorHandling,
		Opt,
		set::Sink,
	};
	use std::time::Duration;

	/// # Example Set.
	fn example() -> (FlagSet, Sink) {
		let sink = Sink::default();
		let mut set = FlagSet::new("test", ErrorHandling::ContinueOnError);
		set.set_output(sink.clone());
		set.bool("long-form", false, "Some description", []);
		set.bool("long-form2", false, "Some description\n  with multiline", []);
		set.bool("long-name", false, "Some description", [Opt::Shorthand('s')]);
		set.bool("long-name2", false, "Some description with\n  multiline", [Opt::Shorthand('t')]);
		(set, sink)
	}

	#[test]
	fn t_print_defaults() {
		let (mut set, sink) = example();
		set.print_defaults();
		assert_eq!(
			sink.text(),
			"      --long-form    Some description
      --long-form2   Some description
                       with multiline
  -s, --long-name    Some description
  -t, --long-name2   Some description with
                       multiline
",
		);
	}

	#[test]
	fn t_wrapped() {
		let (mut set, _) = example();
		set.string(
			"some-very-long-arg",
			"test",
			"Some very long description having break the limit",
			[Opt::Shorthand('l')],
		);
		set.string(
			"other-very-long-arg",
			"long-default-value",
			"Some very long description having break the limit",
			[Opt::Shorthand('o')],
		);
		set.string(
			"some-very-long-arg2",
			"very long default value",
			"Some very long description\nwith line break\nmultiple",
			[],
		);

		assert_eq!(
			set.flag_usages_wrapped(80),
			r#"      --long-form                    Some description
      --long-form2                   Some description
                                       with multiline
  -s, --long-name                    Some description
  -t, --long-name2                   Some description with
                                       multiline
  -o, --other-very-long-arg string   Some very long description having
                                     break the limit (default
                                     "long-default-value")
  -l, --some-very-long-arg string    Some very long description having
                                     break the limit (default "test")
      --some-very-long-arg2 string   Some very long description
                                     with line break
                                     multiple (default "very long default
                                     value")
"#,
		);
	}

	#[test]
	fn t_wrap_narrow() {
		// Too narrow: the text moves to its own line.
		assert_eq!(
			wrap(30, 45, "one two three"),
			"\n                one two three",
		);

		// Hopeless: no wrapping at all.
		assert_eq!(wrap(30, 35, "one\ntwo"), "one\n                two");

		// Disabled.
		assert_eq!(wrap(4, 0, "one\ntwo"), "one\n    two");

		// Never split a character.
		assert_eq!(wrap_n(2, 0, "aé b"), ("aé b", ""));
	}

	#[test]
	fn t_suffixes() {
		let mut set = FlagSet::new("test", ErrorHandling::ContinueOnError);
		set.int("num", 3, "how `many`", [Opt::Shorthand('n')]);
		set.string("color", "auto", "when to colorize", [Opt::NoOptDefault("always".to_owned())]);
		set.count("verbose", "chattiness", [Opt::Shorthand('v')]);
		set.duration("wait", Duration::ZERO, "pause", [Opt::UsageType("time".to_owned())]);
		set.int_slice("ids", Vec::new(), "record ids", []);
		set.bool("force", true, "overwrite", [Opt::NoOptDefault("false".to_owned()), Opt::DisablePrintDefault]);
		set.string("old", "", "", [Opt::Deprecated("gone".to_owned())]);
		set.int("only", 0, "only short", [Opt::Shorthand('o'), Opt::ShorthandOnly]);
		set.int("quiet", 0, "quietness", [Opt::Shorthand('q'), Opt::ShorthandDeprecated("no".to_owned())]);

		assert_eq!(
			set.flag_usages(),
			"      --color string[=\"always\"]   when to colorize (default \"auto\")
      --force[=false]             overwrite
      --ids ints                  record ids
  -n, --num many                  how many (default 3)
  -o--only int                    only short
      --quiet int                 quietness
  -v, --verbose count             chattiness
      --wait time                 pause
",
		);
	}

	#[test]
	fn t_groups() {
		let mut set = FlagSet::new("app", ErrorHandling::ContinueOnError);
		set.bool("verbose", false, "chatty", []);
		set.string("host", "", "remote host", [Opt::Group("network".to_owned())]);
		set.uint16("port", 80, "remote port", [Opt::Group("network".to_owned())]);
		set.bool("secret", false, "", [Opt::Group("admin".to_owned()), Opt::Hidden]);

		assert_eq!(set.groups(), ["", "admin", "network"]);
		assert_eq!(
			set.usage_string(),
			"Usage of app:
      --verbose       chatty

network:
      --host string   remote host
      --port uint16   remote port (default 80)
",
		);

		set.set_usage(|set| format!("{} is great\n", set.name()));
		assert_eq!(set.usage_string(), "app is great\n");
	}

	#[test]
	fn t_unquote_usage() {
		let mut set = FlagSet::default();
		set.float32("ratio", 0.0, "", []);
		set.string_array("tag", Vec::new(), "", []);
		set.bool("yes", false, "", []);
		set.string("raw", "", "keep `these`", [Opt::DisableUnquoteUsage]);
		set.string("typed", "", "a `thing`", [Opt::UsageType("kind".to_owned())]);
		set.string("half", "", "a `thing", []);

		let unquote = |name: &str| set.lookup(name).map(unquote_usage);
		assert_eq!(unquote("ratio"), Some(("float".to_owned(), String::new())));
		assert_eq!(unquote("tag"), Some(("strings".to_owned(), String::new())));
		assert_eq!(unquote("yes"), Some((String::new(), String::new())));
		assert_eq!(unquote("raw"), Some(("string".to_owned(), "keep `these`".to_owned())));
		assert_eq!(unquote("typed"), Some(("kind".to_owned(), "a thing".to_owned())));
		assert_eq!(unquote("half"), Some(("string".to_owned(), "a `thing".to_owned())));
	}

	#[test]
	fn t_empty_name() {
		let mut set = FlagSet::default();
		set.int("n", 0, "", []);
		assert!(set.default_usage().starts_with("Usage:\n"));
	}
}
