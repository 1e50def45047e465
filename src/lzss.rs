//! A sliding-window LZSS encoder for PSX homebrew asset pipelines.
//!
//! The stream is a sequence of groups: one flag byte, then up to eight
//! tokens described by its bits, most significant bit first. A set bit
//! means the token is a single literal byte; a clear bit means it is a
//! 16-bit little-endian match token, back-reference distance in the high
//! 12 bits and length in the low 4. Note that this is the opposite of the
//! usual LZSS flag convention, which marks matches; the decoders already
//! out there expect it this way around.
//!
//! A decoder replays a match by copying `length` bytes from `distance`
//! bytes behind its write position. Matches may reach into the bytes they
//! are still producing, which is how long runs collapse into distance-1
//! tokens.
//!
//! Nothing in the stream marks its end, and the final flag byte may
//! describe fewer than eight tokens. The uncompressed length has to travel
//! outside the stream, in the caller's own metadata or in a
//! [`frame`](crate::frame) header.

use bitmatch::bitmatch;

use crate::Result;
use crate::util::{count_equal, Sink};

/// How far back a match may reach.
pub const BACK_WINDOW: usize = 4095;
/// The longest match a token can carry.
pub const FRONT_WINDOW: usize = 15;
/// Shorter matches cost more than the literals they would replace.
pub const MIN_MATCH: usize = 3;

#[derive(Default)]
struct Group {
	bits: u8,
	count: u8,
	at: usize,
}

/// Compresses `input` into `out`, returning the number of bytes appended.
///
/// Empty input appends nothing. Every byte sequence is encodable, so the
/// only failures are the sink's own.
pub fn compress(input: &[u8], out: &mut impl Sink) -> Result<usize> {
	let mut size = 0;
	let mut group = Group::default();

	let mut i = 0;
	while i < input.len() {
		let max = FRONT_WINDOW.min(input.len() - i);
		let mut best_len = 0;
		let mut best_start = 0;
		for s in i.saturating_sub(BACK_WINDOW)..i {
			if input[s] != input[i] {
				continue;
			}
			let len = count_equal(&input[s..], &input[i..], max);
			// Strictly greater, so equal-length matches keep the first
			// candidate found: the most distant one. Decoders in the wild
			// are compared against streams built this way around.
			if len > best_len {
				best_len = len;
				best_start = s;
			}
		}

		if group.count == 0 {
			group.at = out.pos();
			out.put(0)?;
			size += 1;
		}

		if best_len < MIN_MATCH {
			out.put(input[i])?;
			group.bits |= 0x80 >> group.count;
			size += 1;
			i += 1;
		} else {
			let token = match_token((i - best_start) as u16, best_len as u16);
			out.verbatim(&token.to_le_bytes())?;
			size += 2;
			i += best_len;
		}

		group.count += 1;
		if group.count == 8 {
			out.patch(group.at, group.bits)?;
			group = Group::default();
		}
	}

	if group.count != 0 {
		out.patch(group.at, group.bits)?;
	}

	Ok(size)
}

#[bitmatch]
fn match_token(d: u16, l: u16) -> u16 {
	bitpack!("dddd_dddd_dddd_llll")
}
