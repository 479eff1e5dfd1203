/*!
# Benchmark: `pennant::KeyKind`
*/

use brunch::{
	Bench,
	benches,
};
use pennant::KeyKind;

benches!(
	Bench::new("pennant::KeyKind::from(Hello World)")
		.run(|| KeyKind::from("Hello World")),

	Bench::new("pennant::KeyKind::from(-p)")
		.run(|| KeyKind::from("-p")),

	Bench::new("pennant::KeyKind::from(--prefix)")
		.run(|| KeyKind::from("--prefix")),

	Bench::new("pennant::KeyKind::from(--prefix-color=199)")
		.run(|| KeyKind::from("--prefix-color=199"))
);
