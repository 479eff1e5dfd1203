/*!
# Pennant: Durations
*/

use crate::ValueError;
use std::{
	fmt::Write,
	time::Duration,
};



/// # Nanoseconds Per Second.
const SECOND: u128 = 1_000_000_000;

/// # Upper Limit (Nanoseconds).
const MAX_NANOS: u128 = i64::MAX.unsigned_abs() as u128;



/// # Parse Duration.
///
/// Parse text like `1h15m30.5s` into a [`Duration`]. Each component is a
/// decimal number, optionally fractional, followed by one of `ns`, `us`,
/// `µs`, `ms`, `s`, `m`, or `h`. A bare `0` is also accepted.
///
/// Whole-number components are summed by `humantime`; fractions and the
/// micro sign are handled here.
///
/// [`Duration`] is unsigned, so negative durations other than zero are
/// rejected, as are totals above `i64::MAX` nanoseconds.
pub(super) fn parse(raw: &str) -> Result<Duration, ValueError> {
	let bad = || ValueError::Duration(raw.to_owned());

	let (neg, s) = match raw.as_bytes() {
		[b'-', ..] => (true, &raw[1..]),
		[b'+', ..] => (false, &raw[1..]),
		_ => (false, raw),
	};

	if s == "0" { return Ok(Duration::ZERO); }
	if s.is_empty() { return Err(bad()); }

	let parts = components(raw, s)?;
	let total: u128 =
		if parts.iter().all(Component::is_plain) {
			humantime::parse_duration(s).map_err(|_| bad())?.as_nanos()
		}
		else {
			parts.iter().try_fold(0_u128, |acc, p|
				p.nanos().and_then(|n| acc.checked_add(n))
			).ok_or_else(bad)?
		};

	if MAX_NANOS < total || (neg && total != 0) { return Err(bad()); }
	u64::try_from(total).map(Duration::from_nanos).map_err(|_| bad())
}

/// # Duration Component.
///
/// One `<number><unit>` run, e.g. `1.5h`.
struct Component<'a> {
	/// # Whole Digits.
	whole: &'a str,

	/// # Fractional Digits (if there was a dot).
	frac: Option<&'a str>,

	/// # Unit.
	unit: &'a str,

	/// # Nanoseconds Per Unit.
	scale: u128,
}

impl Component<'_> {
	/// # Plain?
	///
	/// Whole numbers with ASCII units read the same way in `humantime`.
	fn is_plain(&self) -> bool {
		self.frac.is_none() && ! self.whole.is_empty() && self.unit.is_ascii()
	}

	/// # Nanoseconds.
	fn nanos(&self) -> Option<u128> {
		let whole: u128 =
			if self.whole.is_empty() { 0 }
			else { self.whole.parse().ok()? };
		let mut v = whole.checked_mul(self.scale)?;

		// Anything past twenty digits is noise.
		if let Some(frac) = self.frac.filter(|f| ! f.is_empty()) {
			let (f, div) = frac.bytes().take(20).fold((0_u128, 1_u128), |(f, d), b|
				(f * 10 + u128::from(b - b'0'), d * 10)
			);
			v = v.checked_add(f * self.scale / div)?;
		}

		Some(v)
	}
}

/// # Split Components.
///
/// Break the (unsigned) text into its components, validating the grammar
/// along the way.
fn components<'a>(raw: &str, mut s: &'a str) -> Result<Vec<Component<'a>>, ValueError> {
	let mut out = Vec::new();
	while ! s.is_empty() {
		// Whole part.
		let end = s.find(|c: char| ! c.is_ascii_digit()).unwrap_or(s.len());
		let (whole, rest) = s.split_at(end);
		s = rest;

		// Fractional part.
		let mut frac = None;
		if let Some(rest) = s.strip_prefix('.') {
			let end = rest.find(|c: char| ! c.is_ascii_digit()).unwrap_or(rest.len());
			frac = Some(&rest[..end]);
			s = &rest[end..];
		}
		if whole.is_empty() && matches!(frac, None | Some("")) {
			return Err(ValueError::Duration(raw.to_owned()));
		}

		// Unit.
		let end = s.find(|c: char| c == '.' || c.is_ascii_digit()).unwrap_or(s.len());
		let (unit, rest) = s.split_at(end);
		s = rest;
		let scale: u128 = match unit {
			"" => return Err(ValueError::DurationUnit(raw.to_owned())),
			"ns" => 1,
			"us" | "µs" | "μs" => 1_000,
			"ms" => 1_000_000,
			"s" => SECOND,
			"m" => 60 * SECOND,
			"h" => 3600 * SECOND,
			_ => return Err(ValueError::DurationUnknownUnit {
				unit: unit.to_owned(),
				raw: raw.to_owned(),
			}),
		};

		out.push(Component { whole, frac, unit, scale });
	}

	Ok(out)
}

/// # Format Duration.
///
/// This is the inverse of [`parse`], producing the shortest representation
/// with the largest units, e.g. `1h2m0.5s` or `1.5ms`. Zero is `0s`.
pub(super) fn format(d: Duration) -> String {
	let nanos = d.as_nanos();
	if nanos == 0 { return "0s".to_owned(); }
	if nanos < 1_000 { return format!("{nanos}ns"); }
	if nanos < 1_000_000 { return format!("{}µs", decimal(nanos, 1_000)); }
	if nanos < SECOND { return format!("{}ms", decimal(nanos, 1_000_000)); }

	let secs = nanos / SECOND;
	let h = secs / 3600;
	let m = (secs / 60) % 60;

	let mut out = String::new();
	if h != 0 { let _res = write!(out, "{h}h"); }
	if h != 0 || m != 0 { let _res = write!(out, "{m}m"); }
	out.push_str(&decimal(nanos % (60 * SECOND), SECOND));
	out.push('s');
	out
}

/// # Decimal.
///
/// Divide `n` by the power-of-ten `unit`, keeping any remainder as a
/// fraction with trailing zeroes trimmed.
fn decimal(n: u128, unit: u128) -> String {
	let whole = n / unit;
	let rem = n % unit;
	if rem == 0 { return whole.to_string(); }

	let width = unit.ilog10() as usize;
	let frac = format!("{rem:0width$}");
	format!("{whole}.{}", frac.trim_end_matches('0'))
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_parse() {
		for (raw, expected) in [
			("0", Duration::ZERO),
			("-0", Duration::ZERO),
			("+5s", Duration::from_secs(5)),
			("300ms", Duration::from_millis(300)),
			("1.5h", Duration::from_secs(5400)),
			("2h45m", Duration::from_secs(9900)),
			("1h15m30.5s", Duration::from_millis(4_530_500)),
			(".5s", Duration::from_millis(500)),
			("1.s", Duration::from_secs(1)),
			("10us", Duration::from_micros(10)),
			("10µs", Duration::from_micros(10)),
			("7ns", Duration::from_nanos(7)),
			("1h0m0s", Duration::from_secs(3600)),
			("2562047h47m16.854775807s", Duration::from_nanos(i64::MAX.unsigned_abs())),
		] {
			assert_eq!(parse(raw), Ok(expected), "Bug: parsing {raw:?}.");
		}
	}

	#[test]
	fn t_parse_bad() {
		assert_eq!(parse(""), Err(ValueError::Duration(String::new())));
		assert_eq!(parse("-1s"), Err(ValueError::Duration("-1s".to_owned())));
		assert_eq!(parse(".s"), Err(ValueError::Duration(".s".to_owned())));
		assert_eq!(parse("-1.5h"), Err(ValueError::Duration("-1.5h".to_owned())));
		assert_eq!(parse("-0s"), Ok(Duration::ZERO));

		// Anything past i64::MAX nanoseconds is out of range.
		assert_eq!(parse("3000000h"), Err(ValueError::Duration("3000000h".to_owned())));
		assert_eq!(
			parse("2562047h47m16.854775808s"),
			Err(ValueError::Duration("2562047h47m16.854775808s".to_owned())),
		);
		let over = Duration::from_nanos(i64::MAX.unsigned_abs() + 1);
		assert_eq!(parse(&format(over)), Err(ValueError::Duration(format(over))));
		assert_eq!(parse("10"), Err(ValueError::DurationUnit("10".to_owned())));
		assert_eq!(
			parse("3x"),
			Err(ValueError::DurationUnknownUnit { unit: "x".to_owned(), raw: "3x".to_owned() }),
		);
	}

	#[test]
	fn t_format() {
		for (d, expected) in [
			(Duration::ZERO, "0s"),
			(Duration::from_nanos(7), "7ns"),
			(Duration::from_nanos(1_500), "1.5µs"),
			(Duration::from_micros(1_500), "1.5ms"),
			(Duration::from_secs(1), "1s"),
			(Duration::from_millis(2_500), "2.5s"),
			(Duration::from_secs(90), "1m30s"),
			(Duration::from_secs(3600), "1h0m0s"),
			(Duration::from_millis(3_723_500), "1h2m3.5s"),
		] {
			assert_eq!(format(d), expected);
			assert_eq!(parse(expected), Ok(d), "Bug: {expected:?} did not survive.");
		}
	}
}
