/*!
# Pennant: Debug

This example parses whatever arguments are fed to it against a handful of
sample flags and displays the results. Unknown flags are tolerated and
listed separately.
*/

use pennant::{
	Opt,
	ParseErrorsAllowlist,
};



fn main() {
	let mut flags = pennant::command_line();
	flags.set_allowlist(ParseErrorsAllowlist { unknown_flags: true });

	flags.count("verbose", "chattiness; repeat for more", [Opt::Shorthand('v')]);
	flags.uint("threads", 1, "number of `workers`", [Opt::Shorthand('j')]);
	flags.string("color", "auto", "colorize output", [Opt::NoOptDefault("always".to_owned())]);
	flags.string_slice("exclude", Vec::new(), "skip these", [Opt::Shorthand('x')]);
	flags.duration("timeout", std::time::Duration::from_secs(30), "give up after", []);

	// Errors exit on their own.
	let _res = flags.parse_env();

	println!("\x1b[2mFLAGS:\x1b[0m");
	flags.visit_all(|flag| {
		let mark = if flag.changed() { "\x1b[92m*\x1b[0m" } else { " " };
		println!("{mark} {:<10} {}", flag.name(), flag.value().render());
	});

	println!("\n\x1b[2mARGUMENTS:\x1b[0m");
	for arg in flags.args() { println!("  {arg:?}"); }
	if let Some(idx) = flags.args_len_at_dash() {
		println!("  \x1b[2m(-- after {idx})\x1b[0m");
	}

	if ! flags.unknown_flags().is_empty() {
		println!("\n\x1b[2mUNKNOWN:\x1b[0m");
		for arg in flags.unknown_flags() { println!("  {arg:?}"); }
	}
}
