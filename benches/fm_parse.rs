/*!
# Benchmark: `pennant::FlagSet`
*/

use brunch::{
	Bench,
	benches,
};
use pennant::{
	ErrorHandling,
	FlagSet,
	Opt,
};

/// # Test Set.
fn flags() -> FlagSet {
	let mut flags = FlagSet::new("bench", ErrorHandling::ContinueOnError);
	flags.count("verbose", "chattiness", [Opt::Shorthand('v')]);
	flags.bool("quiet", false, "say nothing", [Opt::Shorthand('q')]);
	flags.uint("threads", 1, "number of `workers`", [Opt::Shorthand('j')]);
	flags.string("key", "", "the key", [Opt::Shorthand('k')]);
	flags.string_slice("exclude", Vec::new(), "skip these", []);
	flags.duration("timeout", std::time::Duration::from_secs(30), "give up after", []);
	flags
}

/// # Test Arguments.
const ARGS: [&str; 10] = [
	"-vvv",
	"--key=val",
	"-j4",
	"out",
	"--quiet",
	"--exclude", "a,b,c",
	"--timeout=1m30s",
	"/foo/bar",
	"/bar/baz",
];

benches!(
	Bench::new("pennant::FlagSet::new")
		.run(flags),

	Bench::spacer(),

	Bench::new("pennant::FlagSet::parse(10)")
		.run_seeded_with(flags, |mut f| f.parse(ARGS).is_ok()),

	Bench::new("pennant::FlagSet::flag_usages_wrapped(80)")
		.run_seeded_with(flags, |f| f.flag_usages_wrapped(80)),
);
