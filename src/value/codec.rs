/*!
# Pennant: Codecs

A [`Codec`] converts a single item to and from text. The generic
[`Scalar`](super::Scalar), [`List`](super::List), and [`Map`](super::Map)
wrappers take care of everything else.
*/

use base64::{
	Engine,
	engine::general_purpose::STANDARD,
};
use crate::ValueError;
use std::{
	net::IpAddr,
	num::IntErrorKind,
};
use super::{
	duration,
	IpMask,
	IpNet,
};



/// # Codec.
///
/// Text conversion for one item of type [`Codec::Target`], along with the
/// type tags used by each wrapper.
pub trait Codec: 'static {
	/// # Native Type.
	type Target: Clone + Send + 'static;

	/// # Scalar Type Tag.
	const KIND: &'static str;

	/// # List Type Tag.
	const LIST_KIND: &'static str = "";

	/// # Map Type Tag.
	const MAP_KIND: &'static str = "";

	/// # Boolean?
	const BOOL: bool = false;

	/// # Trim List Items?
	///
	/// Most types ignore whitespace around comma-separated items. Strings
	/// keep it.
	const TRIM: bool = true;

	/// # Strip Quotes?
	///
	/// When true, list parsing removes every `"`, `'`, and `` ` `` before
	/// splitting.
	const UNQUOTE: bool = false;

	/// # Parse.
	///
	/// ## Errors
	///
	/// Return an error if the text is not valid.
	fn parse(raw: &str) -> Result<Self::Target, ValueError>;

	/// # Render.
	fn render(value: &Self::Target) -> String;
}



#[derive(Debug, Clone, Copy)]
/// # Codec: `bool`.
///
/// Accepts `1`, `t`, `T`, `true`, `TRUE`, `True`, and their false-y
/// counterparts.
pub struct Bool;

impl Codec for Bool {
	type Target = bool;
	const KIND: &'static str = "bool";
	const LIST_KIND: &'static str = "boolSlice";
	const BOOL: bool = true;
	const UNQUOTE: bool = true;

	fn parse(raw: &str) -> Result<bool, ValueError> {
		match raw {
			"1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
			"0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
			_ => Err(ValueError::Syntax(raw.to_owned())),
		}
	}

	fn render(value: &bool) -> String {
		if *value { "true".to_owned() } else { "false".to_owned() }
	}
}



#[derive(Debug, Clone, Copy)]
/// # Codec: `String`.
pub struct Text;

impl Codec for Text {
	type Target = String;
	const KIND: &'static str = "string";
	const LIST_KIND: &'static str = "stringSlice";
	const MAP_KIND: &'static str = "stringToString";
	const TRIM: bool = false;

	#[inline]
	fn parse(raw: &str) -> Result<String, ValueError> { Ok(raw.to_owned()) }

	#[inline]
	fn render(value: &String) -> String { value.clone() }
}



/// # Helper: Signed Integer Codecs.
macro_rules! signed {
	($($name:ident $ty:ty, $kind:literal, $list:literal, $map:literal;)+) => ($(
		#[derive(Debug, Clone, Copy)]
		#[doc = concat!("# Codec: `", stringify!($ty), "`.")]
		///
		/// Decimal, `0x` hex, `0o`/leading-zero octal, and `0b` binary are all
		/// accepted, with an optional sign.
		pub struct $name;

		impl Codec for $name {
			type Target = $ty;
			const KIND: &'static str = $kind;
			const LIST_KIND: &'static str = $list;
			const MAP_KIND: &'static str = $map;

			fn parse(raw: &str) -> Result<$ty, ValueError> {
				parse_signed(raw, <$ty>::MIN as i128, <$ty>::MAX as i128)
					.and_then(|n| <$ty>::try_from(n).map_err(|_| ValueError::Range(raw.to_owned())))
			}

			#[inline]
			fn render(value: &$ty) -> String { value.to_string() }
		}
	)+);
}

signed!(
	Int isize,   "int",   "intSlice",   "stringToInt";
	Int8 i8,     "int8",  "",           "";
	Int16 i16,   "int16", "",           "";
	Int32 i32,   "int32", "int32Slice", "";
	Int64 i64,   "int64", "int64Slice", "stringToInt64";
);

/// # Helper: Unsigned Integer Codecs.
macro_rules! unsigned {
	($($name:ident $ty:ty, $kind:literal, $list:literal;)+) => ($(
		#[derive(Debug, Clone, Copy)]
		#[doc = concat!("# Codec: `", stringify!($ty), "`.")]
		///
		/// Decimal, `0x` hex, `0o`/leading-zero octal, and `0b` binary are all
		/// accepted. Signs are not.
		pub struct $name;

		impl Codec for $name {
			type Target = $ty;
			const KIND: &'static str = $kind;
			const LIST_KIND: &'static str = $list;

			fn parse(raw: &str) -> Result<$ty, ValueError> {
				parse_unsigned(raw, <$ty>::MAX as u128)
					.map_err(|e| e.into_error(raw))
					.and_then(|n| <$ty>::try_from(n).map_err(|_| ValueError::Range(raw.to_owned())))
			}

			#[inline]
			fn render(value: &$ty) -> String { value.to_string() }
		}
	)+);
}

unsigned!(
	Uint usize,  "uint",   "uintSlice";
	Uint8 u8,    "uint8",  "uint8Slice";
	Uint16 u16,  "uint16", "uint16Slice";
	Uint32 u32,  "uint32", "uint32Slice";
	Uint64 u64,  "uint64", "uint64Slice";
);

/// # Helper: Float Codecs.
macro_rules! float {
	($($name:ident $ty:ty, $kind:literal, $list:literal;)+) => ($(
		#[derive(Debug, Clone, Copy)]
		#[doc = concat!("# Codec: `", stringify!($ty), "`.")]
		pub struct $name;

		impl Codec for $name {
			type Target = $ty;
			const KIND: &'static str = $kind;
			const LIST_KIND: &'static str = $list;

			fn parse(raw: &str) -> Result<$ty, ValueError> {
				let out: $ty = raw.parse().map_err(|_| ValueError::Syntax(raw.to_owned()))?;

				// Rust quietly overflows to infinity.
				if out.is_infinite() && ! raw.to_ascii_lowercase().contains("inf") {
					Err(ValueError::Range(raw.to_owned()))
				}
				else { Ok(out) }
			}

			#[inline]
			fn render(value: &$ty) -> String { value.to_string() }
		}
	)+);
}

float!(
	Float32 f32, "float32", "float32Slice";
	Float64 f64, "float64", "float64Slice";
);



#[derive(Debug, Clone, Copy)]
/// # Codec: `Duration`.
///
/// Durations are written as a sequence of decimal numbers with units, like
/// `300ms`, `1.5h`, or `2h45m`. Valid units are `ns`, `us` (or `µs`), `ms`,
/// `s`, `m`, and `h`.
///
/// The native type is unsigned, so negative values (other than zero) are
/// rejected, as is anything past `i64::MAX` nanoseconds.
pub struct Duration;

impl Codec for Duration {
	type Target = std::time::Duration;
	const KIND: &'static str = "duration";
	const LIST_KIND: &'static str = "durationSlice";

	#[inline]
	fn parse(raw: &str) -> Result<std::time::Duration, ValueError> { duration::parse(raw) }

	#[inline]
	fn render(value: &std::time::Duration) -> String { duration::format(*value) }
}



#[derive(Debug, Clone, Copy)]
/// # Codec: `IpAddr`.
pub struct Ip;

impl Codec for Ip {
	type Target = IpAddr;
	const KIND: &'static str = "ip";
	const LIST_KIND: &'static str = "ipSlice";
	const UNQUOTE: bool = true;

	fn parse(raw: &str) -> Result<IpAddr, ValueError> {
		raw.trim().parse().map_err(|_| ValueError::Ip(raw.to_owned()))
	}

	#[inline]
	fn render(value: &IpAddr) -> String { value.to_string() }
}

#[derive(Debug, Clone, Copy)]
/// # Codec: [`IpMask`].
pub struct Mask;

impl Codec for Mask {
	type Target = IpMask;
	const KIND: &'static str = "ipMask";

	#[inline]
	fn parse(raw: &str) -> Result<IpMask, ValueError> { raw.parse() }

	#[inline]
	fn render(value: &IpMask) -> String { value.to_string() }
}

#[derive(Debug, Clone, Copy)]
/// # Codec: [`IpNet`].
pub struct Cidr;

impl Codec for Cidr {
	type Target = IpNet;
	const KIND: &'static str = "ipNet";
	const LIST_KIND: &'static str = "ipNetSlice";
	const UNQUOTE: bool = true;

	#[inline]
	fn parse(raw: &str) -> Result<IpNet, ValueError> { raw.trim().parse() }

	#[inline]
	fn render(value: &IpNet) -> String { value.to_string() }
}



#[derive(Debug, Clone, Copy)]
/// # Codec: Hex Bytes.
///
/// Rendered in uppercase; parsed in either case.
pub struct BytesHex;

impl Codec for BytesHex {
	type Target = Vec<u8>;
	const KIND: &'static str = "bytesHex";

	fn parse(raw: &str) -> Result<Vec<u8>, ValueError> {
		/// # Hex Nibble.
		const fn nibble(b: u8) -> Option<u8> {
			match b {
				b'0'..=b'9' => Some(b - b'0'),
				b'a'..=b'f' => Some(b - b'a' + 10),
				b'A'..=b'F' => Some(b - b'A' + 10),
				_ => None,
			}
		}

		let raw = raw.trim().as_bytes();
		let mut out = Vec::with_capacity(raw.len() / 2);
		for pair in raw.chunks(2) {
			let [hi, lo] = pair else { return Err(ValueError::Hex("odd length hex string")); };
			match (nibble(*hi), nibble(*lo)) {
				(Some(hi), Some(lo)) => out.push((hi << 4) | lo),
				_ => return Err(ValueError::Hex("invalid byte")),
			}
		}

		Ok(out)
	}

	fn render(value: &Vec<u8>) -> String {
		use std::fmt::Write;
		value.iter().fold(String::with_capacity(value.len() * 2), |mut acc, b| {
			let _res = write!(acc, "{b:02X}");
			acc
		})
	}
}

#[derive(Debug, Clone, Copy)]
/// # Codec: Base64 Bytes.
///
/// Standard alphabet, with padding.
pub struct BytesBase64;

impl Codec for BytesBase64 {
	type Target = Vec<u8>;
	const KIND: &'static str = "bytesBase64";

	fn parse(raw: &str) -> Result<Vec<u8>, ValueError> {
		STANDARD.decode(raw.trim()).map_err(|e| ValueError::Base64(e.to_string()))
	}

	#[inline]
	fn render(value: &Vec<u8>) -> String { STANDARD.encode(value) }
}



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Integer Failure.
enum IntFail {
	/// # Bad Digits.
	Syntax,

	/// # Too Big.
	Range,
}

impl IntFail {
	/// # Into Value Error.
	fn into_error(self, raw: &str) -> ValueError {
		match self {
			Self::Syntax => ValueError::Syntax(raw.to_owned()),
			Self::Range => ValueError::Range(raw.to_owned()),
		}
	}
}

/// # Split Base Prefix.
///
/// Return the radix implied by the prefix, along with the digits that
/// follow it.
fn split_radix(raw: &str) -> (u32, &str) {
	match raw.as_bytes() {
		[b'0', b'x' | b'X', ..] => (16, &raw[2..]),
		[b'0', b'b' | b'B', ..] => (2, &raw[2..]),
		[b'0', b'o' | b'O', ..] => (8, &raw[2..]),
		[b'0', _, ..] => (8, &raw[1..]),
		_ => (10, raw),
	}
}

/// # Parse Unsigned.
fn parse_unsigned(raw: &str, max: u128) -> Result<u128, IntFail> {
	let (radix, digits) = split_radix(raw);

	// The standard library tolerates a leading plus; we don't.
	if digits.is_empty() || ! digits.bytes().all(|b| b.is_ascii_alphanumeric()) {
		return Err(IntFail::Syntax);
	}

	match u128::from_str_radix(digits, radix) {
		Ok(n) if n <= max => Ok(n),
		Ok(_) => Err(IntFail::Range),
		Err(e) =>
			if matches!(e.kind(), IntErrorKind::PosOverflow) { Err(IntFail::Range) }
			else { Err(IntFail::Syntax) },
	}
}

/// # Parse Signed.
fn parse_signed(raw: &str, min: i128, max: i128) -> Result<i128, ValueError> {
	let (neg, body) = match raw.as_bytes() {
		[b'-', ..] => (true, &raw[1..]),
		[b'+', ..] => (false, &raw[1..]),
		_ => (false, raw),
	};

	let limit = if neg { min.unsigned_abs() } else { max.unsigned_abs() };
	let n = parse_unsigned(body, limit).map_err(|e| e.into_error(raw))?;
	let n = i128::try_from(n).map_err(|_| ValueError::Range(raw.to_owned()))?;
	Ok(if neg { -n } else { n })
}
