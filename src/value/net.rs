/*!
# Pennant: Network Types
*/

use crate::ValueError;
use std::{
	fmt,
	net::{
		IpAddr,
		Ipv4Addr,
		Ipv6Addr,
	},
	str::FromStr,
};



#[derive(Debug, Clone, Copy, Default, Eq, Hash, PartialEq)]
/// # IPv4 Mask.
///
/// Parsed from dotted-quad (`255.255.255.0`) or eight hex digits
/// (`ffffff00`); rendered as the latter.
pub struct IpMask([u8; 4]);

impl fmt::Display for IpMask {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let [a, b, c, d] = self.0;
		write!(f, "{a:02x}{b:02x}{c:02x}{d:02x}")
	}
}

impl From<[u8; 4]> for IpMask {
	#[inline]
	fn from(src: [u8; 4]) -> Self { Self(src) }
}

impl From<IpMask> for [u8; 4] {
	#[inline]
	fn from(src: IpMask) -> Self { src.0 }
}

impl FromStr for IpMask {
	type Err = ValueError;

	fn from_str(src: &str) -> Result<Self, Self::Err> {
		if let Ok(ip) = src.parse::<Ipv4Addr>() { return Ok(Self(ip.octets())); }

		if src.len() == 8 && src.bytes().all(|b| b.is_ascii_hexdigit()) {
			let mut out = [0_u8; 4];
			for (b, pair) in out.iter_mut().zip(src.as_bytes().chunks_exact(2)) {
				let pair = std::str::from_utf8(pair).map_err(|_| ValueError::IpMask(src.to_owned()))?;
				*b = u8::from_str_radix(pair, 16).map_err(|_| ValueError::IpMask(src.to_owned()))?;
			}
			return Ok(Self(out));
		}

		Err(ValueError::IpMask(src.to_owned()))
	}
}

impl IpMask {
	#[must_use]
	/// # Octets.
	pub const fn octets(self) -> [u8; 4] { self.0 }

	#[must_use]
	/// # Prefix Length.
	///
	/// Return the number of leading ones, or `None` if the mask is not
	/// canonical (i.e. has ones after a zero).
	pub const fn prefix_len(self) -> Option<u32> {
		let n = u32::from_be_bytes(self.0);
		let ones = n.leading_ones();
		if ones == 32 || n << ones == 0 { Some(ones) }
		else { None }
	}
}



#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
/// # IP Network.
///
/// A CIDR block like `192.168.0.0/16`. Host bits are cleared during
/// parsing, so `192.168.1.1/16` comes back out as `192.168.0.0/16`.
pub struct IpNet {
	/// # Network Address.
	addr: IpAddr,

	/// # Prefix Length.
	prefix: u8,
}

impl Default for IpNet {
	#[inline]
	fn default() -> Self {
		Self { addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED), prefix: 0 }
	}
}

impl fmt::Display for IpNet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}", self.addr, self.prefix)
	}
}

impl FromStr for IpNet {
	type Err = ValueError;

	fn from_str(src: &str) -> Result<Self, Self::Err> {
		let bad = || ValueError::IpNet(src.to_owned());

		let (addr, prefix) = src.split_once('/').ok_or_else(bad)?;
		let addr: IpAddr = addr.parse().map_err(|_| bad())?;
		if prefix.is_empty() || ! prefix.bytes().all(|b| b.is_ascii_digit()) {
			return Err(bad());
		}
		let prefix: u8 = prefix.parse().map_err(|_| bad())?;

		Self::new(addr, prefix).ok_or_else(bad)
	}
}

impl IpNet {
	#[must_use]
	/// # New.
	///
	/// Return a new network, clearing any host bits from the address, or
	/// `None` if the prefix is too long for the address family.
	pub fn new(addr: IpAddr, prefix: u8) -> Option<Self> {
		let addr = match addr {
			IpAddr::V4(ip) => {
				if 32 < prefix { return None; }
				let mask = u32::MAX.checked_shl(32 - u32::from(prefix)).unwrap_or(0);
				IpAddr::V4(Ipv4Addr::from(u32::from(ip) & mask))
			},
			IpAddr::V6(ip) => {
				if 128 < prefix { return None; }
				let mask = u128::MAX.checked_shl(128 - u32::from(prefix)).unwrap_or(0);
				IpAddr::V6(Ipv6Addr::from(u128::from(ip) & mask))
			},
		};

		Some(Self { addr, prefix })
	}

	#[must_use]
	/// # Network Address.
	pub const fn addr(&self) -> IpAddr { self.addr }

	#[must_use]
	/// # Prefix Length.
	pub const fn prefix(&self) -> u8 { self.prefix }

	#[must_use]
	/// # Contains?
	pub fn contains(&self, ip: IpAddr) -> bool {
		Self::new(ip, self.prefix).is_some_and(|n| n.addr == self.addr)
	}
}
