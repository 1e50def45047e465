//! A run-length codec with self-describing packets.
//!
//! Each packet opens with a control byte. With the high bit set, the low
//! seven bits are a repetition count and a single following byte supplies
//! the value: up to 127 repeated bytes spelled in two. With the high bit
//! clear, the control byte is a literal count in [1, 127] and that many
//! bytes follow verbatim.
//!
//! Runs of one or two bytes are cheaper spelled out, so they ride along
//! inside literal packets. There is no end marker; the consumer must learn
//! the uncompressed or compressed length from elsewhere, for instance a
//! [`frame`](crate::frame) header.

use crate::Result;
use crate::util::Sink;

/// Largest count a control byte can carry, for runs and literal spans both.
pub const MAX_COUNT: usize = 127;
/// Runs shorter than this stay in literal packets.
pub const MIN_RUN: usize = 3;

const RUN_FLAG: u8 = 0x80;

/// Compresses `input` into `out`, returning the number of bytes appended.
///
/// Empty input appends nothing. Every byte sequence is encodable, so the
/// only failures are the sink's own.
pub fn compress(input: &[u8], out: &mut impl Sink) -> Result<usize> {
	let mut size = 0;

	let mut i = 0;
	while i < input.len() {
		let byte = input[i];
		let run = input[i..]
			.iter()
			.take(MAX_COUNT)
			.take_while(|&&b| b == byte)
			.count();

		if run >= MIN_RUN {
			out.put(run as u8 | RUN_FLAG)?;
			out.put(byte)?;
			size += 2;
			i += run;
		} else {
			let span = literal_len(input, i, run);
			out.put(span as u8)?;
			out.verbatim(&input[i..i + span])?;
			size += 1 + span;
			i += span;
		}
	}

	Ok(size)
}

// The probe index runs `run` bytes ahead of the span it measures, with the
// span length starting at 1. As a consequence a span opened at a lone byte
// absorbs the first byte of a 3-run that stops it, while a span opened at
// a double stops flush with the run boundary. Both outcomes are part of
// the stream format.
fn literal_len(input: &[u8], i: usize, run: usize) -> usize {
	let mut len = 1;
	let mut j = i + run;
	while j + 1 < input.len() && len < MAX_COUNT {
		if input[j - 1] == input[j] && input[j] == input[j + 1] {
			break;
		}
		len += 1;
		j += 1;
	}
	len
}

#[cfg(test)]
mod test {
	use gospel::read::{Le as _, Reader};

	use super::*;

	fn decode(stream: &[u8]) -> Vec<u8> {
		let mut out = Vec::new();
		let f = &mut Reader::new(stream);
		while !f.is_empty() {
			let control = f.u8().unwrap();
			if control & 0x80 != 0 {
				let value = f.u8().unwrap();
				for _ in 0..control & 0x7F {
					out.push(value);
				}
			} else {
				out.extend_from_slice(f.slice(control as usize).unwrap());
			}
		}
		out
	}

	fn xorshift(mut x: u32, len: usize) -> Vec<u8> {
		(0..len)
			.map(|_| {
				x ^= x << 13;
				x ^= x >> 17;
				x ^= x << 5;
				x as u8
			})
			.collect()
	}

	#[test]
	fn empty_input_writes_nothing() {
		let mut out = Vec::new();
		assert_eq!(compress(&[], &mut out).unwrap(), 0);
		assert!(out.is_empty());
	}

	#[test]
	fn run_then_literal() {
		let mut out = Vec::new();
		let n = compress(&[0x41, 0x41, 0x41, 0x41, 0x42], &mut out).unwrap();
		assert_eq!(out, [0x84, 0x41, 0x01, 0x42]);
		assert_eq!(n, 4);
	}

	#[test]
	fn long_runs_split_at_127() {
		let mut out = Vec::new();
		let n = compress(&[3; 130], &mut out).unwrap();
		assert_eq!(out, [0xFF, 3, 0x83, 3]);
		assert_eq!(n, 4);

		let mut out = Vec::new();
		assert_eq!(compress(&[3; 127], &mut out).unwrap(), 2);
		assert_eq!(out, [0xFF, 3]);

		// the single byte past the cap is too short for a second run
		let mut out = Vec::new();
		assert_eq!(compress(&[3; 128], &mut out).unwrap(), 4);
		assert_eq!(out, [0xFF, 3, 0x01, 3]);
	}

	#[test]
	fn leading_three_run_packs() {
		let mut out = Vec::new();
		let n = compress(&[7, 7, 7], &mut out).unwrap();
		assert_eq!(out, [0x83, 7]);
		assert_eq!(n, 2);
	}

	#[test]
	fn double_bytes_stay_in_literals() {
		let mut out = Vec::new();
		let n = compress(b"aabc", &mut out).unwrap();
		assert_eq!(out, [0x02, b'a', b'a', 0x01, b'b', 0x01, b'c']);
		assert_eq!(n, 7);
	}

	#[test]
	fn trailing_bytes_split_into_their_own_packet() {
		let mut out = Vec::new();
		let n = compress(&[1, 2, 3], &mut out).unwrap();
		assert_eq!(out, [0x02, 1, 2, 0x01, 3]);
		assert_eq!(n, 5);
	}

	#[test]
	fn three_run_after_lone_literal_loses_its_head() {
		let mut out = Vec::new();
		let n = compress(&[8, 9, 7, 7, 7], &mut out).unwrap();
		assert_eq!(out, [0x03, 8, 9, 7, 0x01, 7, 0x01, 7]);
		assert_eq!(n, 8);
		assert_eq!(decode(&out), [8, 9, 7, 7, 7]);
	}

	#[test]
	fn three_run_after_double_survives() {
		let mut out = Vec::new();
		let n = compress(&[5, 5, 7, 7, 7], &mut out).unwrap();
		assert_eq!(out, [0x02, 5, 5, 0x83, 7]);
		assert_eq!(n, 5);
	}

	#[test]
	fn literal_spans_cap_at_127() {
		let input: Vec<u8> = (0..200u8).collect();
		let mut out = Vec::new();
		let n = compress(&input, &mut out).unwrap();
		assert_eq!(out[0], 0x7F);
		assert_eq!(out[128], 0x48);
		assert_eq!(out[201], 0x01);
		assert_eq!(n, 203);
		assert_eq!(decode(&out), input);
	}

	#[test]
	fn roundtrip_mixed_runs() {
		let mut input = Vec::new();
		for (value, len) in (1usize..40).enumerate() {
			input.extend(std::iter::repeat(value as u8).take(len));
			input.push(0xEE);
		}
		let mut out = Vec::new();
		let n = compress(&input, &mut out).unwrap();
		assert_eq!(n, out.len());
		assert_eq!(decode(&out), input);
	}

	#[test]
	fn roundtrip_random_bytes() {
		let input = xorshift(0x9E3779B9, 2048);
		let mut out = Vec::new();
		let n = compress(&input, &mut out).unwrap();
		assert_eq!(n, out.len());
		assert_eq!(decode(&out), input);
	}
}
