//! A small container for the raw codec streams.
//!
//! Neither codec's output records which codec made it or how long the
//! original data was, and a decoder needs both. The frame stores them in a
//! fixed header ahead of the payload, all fields little-endian u32:
//!
//! | field | value |
//! | --- | --- |
//! | magic | `"VSCF"` |
//! | method | 0 for LZSS, 1 for RLE |
//! | size | uncompressed length in bytes |
//! | payload | compressed length in bytes, payload follows |

use gospel::read::{Le as _, Reader};
use gospel::write::{Label, Le as _, Writer};

use crate::{Method, Result};

const MAGIC: u32 = u32::from_le_bytes(*b"VSCF");

/// Compresses `data` into a fresh framed blob.
pub fn compress(data: &[u8], method: Method) -> Result<Vec<u8>> {
	let mut payload = Vec::new();
	crate::compress(data, &mut payload, method)?;

	let mut f = Writer::new();
	let start = Label::new();
	let end = Label::new();
	f.u32(MAGIC);
	f.u32(method_id(method));
	f.u32(data.len() as u32);
	f.diff32(start, end);
	f.place(start);
	f.slice(&payload);
	f.place(end);
	Ok(f.finish().unwrap())
}

/// Reads back a frame's header without touching the payload.
///
/// Returns the method, the uncompressed size, and the payload size, or
/// `None` if `data` is not a well-formed frame: bad magic, a method this
/// crate does not know, or a payload whose length disagrees with the
/// header.
pub fn inspect(data: &[u8]) -> Option<(Method, usize, usize)> {
	let f = &mut Reader::new(data);
	f.check_u32(MAGIC).ok()?;
	let method = match f.u32().ok()? {
		0 => Method::Lzss,
		1 => Method::Rle,
		_ => return None,
	};
	let size = f.u32().ok()? as usize;
	let payload = f.u32().ok()? as usize;
	if f.remaining().len() != payload {
		return None;
	}
	Some((method, size, payload))
}

fn method_id(method: Method) -> u32 {
	match method {
		Method::Lzss => 0,
		Method::Rle => 1,
	}
}
