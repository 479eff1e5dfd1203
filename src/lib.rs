/*!
# Pennant

This crate provides POSIX/GNU-style command-line flag parsing: typed flags
with long names and optional one-character shorthands, clustered
shorthands like `-vvv` or `-n5`, `--key=value` and `--key value`
assignments, optional values, the `--` terminator, and aligned help output.

Flags are registered on a [`FlagSet`], either through one of the many typed
constructors (which hand back a [`Slot`] to read the value from) or with any
type implementing [`Value`]. Parsing walks the argument vector once, fills
in the values, and collects whatever is left over as positional arguments.

Unknown flags, malformed values, and the like are reported as
[`FlagError`]s; depending on the set's [`ErrorHandling`], they are either
returned, or printed alongside the usage before exiting or panicking.



## Example

```
use pennant::{ErrorHandling, FlagSet, Opt};

let mut flags = FlagSet::new("app", ErrorHandling::ContinueOnError);

let verbose = flags.count("verbose", "chattiness; repeat for more", [Opt::Shorthand('v')]);
let threads = flags.uint("threads", 4, "number of `workers`", [Opt::Shorthand('j')]);
let exclude = flags.string_slice("exclude", Vec::new(), "skip these", []);
let color = flags.string("color", "auto", "colorize output", [
    Opt::NoOptDefault("always".to_owned()),
]);

flags.parse([
    "-vvj8",
    "--exclude=a,b",
    "src/",
    "--color",
    "--exclude", "c",
    "--",
    "--not-a-flag",
]).unwrap();

assert_eq!(verbose.get(), 2);
assert_eq!(threads.get(), 8);
assert_eq!(exclude.get(), ["a", "b", "c"]);
assert_eq!(color.get(), "always");
assert_eq!(flags.args(), ["src/", "--not-a-flag"]);
assert_eq!(flags.args_len_at_dash(), Some(1));

// Values are also available by name.
assert_eq!(flags.get_uint("threads").unwrap(), 8);

// And the help practically writes itself.
assert_eq!(
    flags.flag_usages(),
    "      --color string[=\"always\"]   colorize output (default \"auto\")
      --exclude strings           skip these
  -j, --threads workers           number of workers (default 4)
  -v, --verbose count             chattiness; repeat for more
",
);
```
*/

#![forbid(unsafe_code)]

#![deny(
	clippy::allow_attributes_without_reason,
	clippy::correctness,
	unreachable_pub,
)]

#![warn(
	clippy::complexity,
	clippy::nursery,
	clippy::pedantic,
	clippy::perf,
	clippy::style,

	clippy::allow_attributes,
	clippy::clone_on_ref_ptr,
	clippy::create_dir,
	clippy::filetype_is_file,
	clippy::format_push_string,
	clippy::get_unwrap,
	clippy::impl_trait_in_params,
	clippy::lossy_float_literal,
	clippy::missing_assert_message,
	clippy::missing_docs_in_private_items,
	clippy::needless_raw_strings,
	clippy::panic_in_result_fn,
	clippy::pub_without_shorthand,
	clippy::rest_pat_in_fully_bound_structs,
	clippy::semicolon_inside_block,
	clippy::str_to_string,
	clippy::string_to_string,
	clippy::todo,
	clippy::undocumented_unsafe_blocks,
	clippy::unneeded_field_pattern,
	clippy::unseparated_literal_suffix,
	clippy::unwrap_in_result,

	macro_use_extern_crate,
	missing_copy_implementations,
	missing_docs,
	non_ascii_idents,
	trivial_casts,
	trivial_numeric_casts,
	unused_crate_dependencies,
	unused_extern_crates,
	unused_import_braces,
)]

#![cfg_attr(docsrs, feature(doc_cfg))]



mod error;
mod flag;
mod keykind;
mod set;
mod usage;
mod utility;
mod value;

pub use error::{
	DefinitionError,
	FlagError,
	ValueError,
};
pub use flag::{
	Flag,
	Opt,
};
#[doc(hidden)]
pub use keykind::KeyKind;
pub use set::{
	ErrorHandling,
	FlagSet,
	ParseErrorsAllowlist,
};
pub use usage::{
	DefaultUsageFormatter,
	unquote_usage,
	UsageFormatter,
};
pub use value::{
	codec,
	Codec,
	Count,
	IpMask,
	IpNet,
	List,
	ListValue,
	Map,
	Scalar,
	Slot,
	StringArray,
	Value,
};



#[must_use]
/// # Command Line.
///
/// Return a new [`FlagSet`] named after the running program (i.e. the first
/// entry of [`std::env::args_os`]), that prints the usage and exits on
/// error.
///
/// Parse it with [`FlagSet::parse_env`] once the flags are defined.
pub fn command_line() -> FlagSet {
	let name = std::env::args_os()
		.next()
		.map(|a| a.to_string_lossy().into_owned())
		.unwrap_or_default();
	FlagSet::new(&name, ErrorHandling::ExitOnError)
}
