/*!
# Pennant: Typed Flags

Each built-in type gets three methods: a constructor that hands back a fresh
[`Slot`], a `_var` variant that binds an existing one, and a getter.
*/

use crate::{
	Count,
	Flag,
	FlagError,
	FlagSet,
	IpMask,
	IpNet,
	List,
	Map,
	Opt,
	Scalar,
	Slot,
	StringArray,
	value::codec::{
		self,
		Codec,
	},
};
use std::{
	collections::BTreeMap,
	net::IpAddr,
	time::Duration,
};



/// # Helper: Scalar Flags.
macro_rules! scalar {
	($($codec:ident $ty:ty, $new:ident, $var:ident, $get:ident;)+) => ($(
		#[doc = concat!("# `", stringify!($ty), "` Flag.")]
		///
		/// Define a flag with the given default, returning a slot that will
		/// hold its value.
		///
		/// ## Panics
		///
		/// This will panic if the name or shorthand is already taken.
		pub fn $new<I>(&mut self, name: &str, default: $ty, usage: &str, opts: I) -> Slot<$ty>
		where I: IntoIterator<Item = Opt> {
			let slot = Slot::new(default);
			self.$var(slot.clone(), name, usage, opts);
			slot
		}

		#[doc = concat!("# `", stringify!($ty), "` Flag (Bound).")]
		///
		/// Define a flag backed by an existing slot. The slot's current value
		/// is the default.
		///
		/// ## Panics
		///
		/// This will panic if the name or shorthand is already taken.
		pub fn $var<I>(&mut self, slot: Slot<$ty>, name: &str, usage: &str, opts: I) -> &mut Flag
		where I: IntoIterator<Item = Opt> {
			self.var(Scalar::<codec::$codec>::from_slot(slot), name, usage, opts)
		}

		#[doc = concat!("# Get `", stringify!($ty), "`.")]
		///
		/// ## Errors
		///
		/// Returns an error if the flag is not defined or is some other type.
		pub fn $get(&self, name: &str) -> Result<$ty, FlagError> {
			self.get_typed(name, codec::$codec::KIND)
		}
	)+);
}

/// # Helper: List Flags.
macro_rules! list {
	($($codec:ident $ty:ty, $new:ident, $var:ident, $get:ident;)+) => ($(
		#[doc = concat!("# `Vec<", stringify!($ty), ">` Flag.")]
		///
		/// Define a comma-separated list flag with the given default,
		/// returning a slot that will hold its value. The first assignment
		/// replaces the default; later ones append.
		///
		/// ## Panics
		///
		/// This will panic if the name or shorthand is already taken.
		pub fn $new<I>(&mut self, name: &str, default: Vec<$ty>, usage: &str, opts: I)
		-> Slot<Vec<$ty>>
		where I: IntoIterator<Item = Opt> {
			let slot = Slot::new(default);
			self.$var(slot.clone(), name, usage, opts);
			slot
		}

		#[doc = concat!("# `Vec<", stringify!($ty), ">` Flag (Bound).")]
		///
		/// ## Panics
		///
		/// This will panic if the name or shorthand is already taken.
		pub fn $var<I>(&mut self, slot: Slot<Vec<$ty>>, name: &str, usage: &str, opts: I)
		-> &mut Flag
		where I: IntoIterator<Item = Opt> {
			self.var(List::<codec::$codec>::from_slot(slot), name, usage, opts)
		}

		#[doc = concat!("# Get `Vec<", stringify!($ty), ">`.")]
		///
		/// ## Errors
		///
		/// Returns an error if the flag is not defined or is some other type.
		pub fn $get(&self, name: &str) -> Result<Vec<$ty>, FlagError> {
			self.get_typed(name, codec::$codec::LIST_KIND)
		}
	)+);
}

/// # Helper: Map Flags.
macro_rules! map {
	($($codec:ident $ty:ty, $new:ident, $var:ident, $get:ident;)+) => ($(
		#[doc = concat!("# `BTreeMap<String, ", stringify!($ty), ">` Flag.")]
		///
		/// Define a `key=value` flag with the given default, returning a slot
		/// that will hold its value. The first assignment replaces the
		/// default; later ones merge in.
		///
		/// ## Panics
		///
		/// This will panic if the name or shorthand is already taken.
		pub fn $new<I>(&mut self, name: &str, default: BTreeMap<String, $ty>, usage: &str, opts: I)
		-> Slot<BTreeMap<String, $ty>>
		where I: IntoIterator<Item = Opt> {
			let slot = Slot::new(default);
			self.$var(slot.clone(), name, usage, opts);
			slot
		}

		#[doc = concat!("# `BTreeMap<String, ", stringify!($ty), ">` Flag (Bound).")]
		///
		/// ## Panics
		///
		/// This will panic if the name or shorthand is already taken.
		pub fn $var<I>(&mut self, slot: Slot<BTreeMap<String, $ty>>, name: &str, usage: &str, opts: I)
		-> &mut Flag
		where I: IntoIterator<Item = Opt> {
			self.var(Map::<codec::$codec>::from_slot(slot), name, usage, opts)
		}

		#[doc = concat!("# Get `BTreeMap<String, ", stringify!($ty), ">`.")]
		///
		/// ## Errors
		///
		/// Returns an error if the flag is not defined or is some other type.
		pub fn $get(&self, name: &str) -> Result<BTreeMap<String, $ty>, FlagError> {
			self.get_typed(name, codec::$codec::MAP_KIND)
		}
	)+);
}



/// # Scalars.
impl FlagSet {
	scalar!(
		Bool bool,            bool,         bool_var,         get_bool;
		Int isize,            int,          int_var,          get_int;
		Int8 i8,              int8,         int8_var,         get_int8;
		Int16 i16,            int16,        int16_var,        get_int16;
		Int32 i32,            int32,        int32_var,        get_int32;
		Int64 i64,            int64,        int64_var,        get_int64;
		Uint usize,           uint,         uint_var,         get_uint;
		Uint8 u8,             uint8,        uint8_var,        get_uint8;
		Uint16 u16,           uint16,       uint16_var,       get_uint16;
		Uint32 u32,           uint32,       uint32_var,       get_uint32;
		Uint64 u64,           uint64,       uint64_var,       get_uint64;
		Float32 f32,          float32,      float32_var,      get_float32;
		Float64 f64,          float64,      float64_var,      get_float64;
		Duration Duration,    duration,     duration_var,     get_duration;
		Ip IpAddr,            ip,           ip_var,           get_ip;
		Mask IpMask,          ip_mask,      ip_mask_var,      get_ip_mask;
		Cidr IpNet,           ip_net,       ip_net_var,       get_ip_net;
		BytesHex Vec<u8>,     bytes_hex,    bytes_hex_var,    get_bytes_hex;
		BytesBase64 Vec<u8>,  bytes_base64, bytes_base64_var, get_bytes_base64;
	);

	/// # `String` Flag.
	///
	/// Define a flag with the given default, returning a slot that will hold
	/// its value.
	///
	/// ## Panics
	///
	/// This will panic if the name or shorthand is already taken.
	pub fn string<I>(&mut self, name: &str, default: &str, usage: &str, opts: I) -> Slot<String>
	where I: IntoIterator<Item = Opt> {
		let slot = Slot::new(default.to_owned());
		self.string_var(slot.clone(), name, usage, opts);
		slot
	}

	/// # `String` Flag (Bound).
	///
	/// ## Panics
	///
	/// This will panic if the name or shorthand is already taken.
	pub fn string_var<I>(&mut self, slot: Slot<String>, name: &str, usage: &str, opts: I) -> &mut Flag
	where I: IntoIterator<Item = Opt> {
		self.var(Scalar::<codec::Text>::from_slot(slot), name, usage, opts)
	}

	/// # Get `String`.
	///
	/// ## Errors
	///
	/// Returns an error if the flag is not defined or is some other type.
	pub fn get_string(&self, name: &str) -> Result<String, FlagError> {
		self.get_typed(name, codec::Text::KIND)
	}

	/// # Count Flag.
	///
	/// Define a counter starting at zero. Each bare appearance (`-v`,
	/// `--verbose`) adds one, so `-vvv` yields three; an explicit value
	/// (`-v=5`) sets it outright.
	///
	/// ## Panics
	///
	/// This will panic if the name or shorthand is already taken.
	pub fn count<I>(&mut self, name: &str, usage: &str, opts: I) -> Slot<isize>
	where I: IntoIterator<Item = Opt> {
		let slot = Slot::new(0);
		self.count_var(slot.clone(), name, usage, opts);
		slot
	}

	/// # Count Flag (Bound).
	///
	/// ## Panics
	///
	/// This will panic if the name or shorthand is already taken.
	pub fn count_var<I>(&mut self, slot: Slot<isize>, name: &str, usage: &str, opts: I) -> &mut Flag
	where I: IntoIterator<Item = Opt> {
		let opts = opts.into_iter()
			.chain(std::iter::once(Opt::NoOptDefault(Count::INCREMENT.to_owned())));
		self.var(Count::from_slot(slot), name, usage, opts)
	}

	/// # Get Count.
	///
	/// ## Errors
	///
	/// Returns an error if the flag is not defined or is some other type.
	pub fn get_count(&self, name: &str) -> Result<isize, FlagError> {
		self.get_typed(name, "count")
	}
}

/// # Lists.
impl FlagSet {
	list!(
		Bool bool,        bool_slice,     bool_slice_var,     get_bool_slice;
		Text String,      string_slice,   string_slice_var,   get_string_slice;
		Int isize,        int_slice,      int_slice_var,      get_int_slice;
		Int32 i32,        int32_slice,    int32_slice_var,    get_int32_slice;
		Int64 i64,        int64_slice,    int64_slice_var,    get_int64_slice;
		Uint usize,       uint_slice,     uint_slice_var,     get_uint_slice;
		Uint8 u8,         uint8_slice,    uint8_slice_var,    get_uint8_slice;
		Uint16 u16,       uint16_slice,   uint16_slice_var,   get_uint16_slice;
		Uint32 u32,       uint32_slice,   uint32_slice_var,   get_uint32_slice;
		Uint64 u64,       uint64_slice,   uint64_slice_var,   get_uint64_slice;
		Float32 f32,      float32_slice,  float32_slice_var,  get_float32_slice;
		Float64 f64,      float64_slice,  float64_slice_var,  get_float64_slice;
		Duration Duration, duration_slice, duration_slice_var, get_duration_slice;
		Ip IpAddr,        ip_slice,       ip_slice_var,       get_ip_slice;
		Cidr IpNet,       ip_net_slice,   ip_net_slice_var,   get_ip_net_slice;
	);

	/// # String Array Flag.
	///
	/// Like [`FlagSet::string_slice`], but commas are not special: each
	/// occurrence of the flag adds exactly one item.
	///
	/// ## Panics
	///
	/// This will panic if the name or shorthand is already taken.
	pub fn string_array<I>(&mut self, name: &str, default: Vec<String>, usage: &str, opts: I)
	-> Slot<Vec<String>>
	where I: IntoIterator<Item = Opt> {
		let slot = Slot::new(default);
		self.string_array_var(slot.clone(), name, usage, opts);
		slot
	}

	/// # String Array Flag (Bound).
	///
	/// ## Panics
	///
	/// This will panic if the name or shorthand is already taken.
	pub fn string_array_var<I>(&mut self, slot: Slot<Vec<String>>, name: &str, usage: &str, opts: I)
	-> &mut Flag
	where I: IntoIterator<Item = Opt> {
		self.var(StringArray::from_slot(slot), name, usage, opts)
	}

	/// # Get String Array.
	///
	/// ## Errors
	///
	/// Returns an error if the flag is not defined or is some other type.
	pub fn get_string_array(&self, name: &str) -> Result<Vec<String>, FlagError> {
		self.get_typed(name, "stringArray")
	}
}

/// # Maps.
impl FlagSet {
	map!(
		Text String, string_to_string, string_to_string_var, get_string_to_string;
		Int isize,   string_to_int,    string_to_int_var,    get_string_to_int;
		Int64 i64,   string_to_int64,  string_to_int64_var,  get_string_to_int64;
	);
}
