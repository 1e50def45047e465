use std::io::{Seek, SeekFrom, Write};
use std::iter::zip;

use crate::{Result, Error};

pub fn count_equal(a: &[u8], b: &[u8], limit: usize) -> usize {
	let n = limit.min(a.len()).min(b.len());
	const N: usize = 8;

	let mut i = 0;
	for (a, b) in zip(a[..n].chunks_exact(N), b[..n].chunks_exact(N)) {
		if a == b {
			i += N;
		} else {
			let a = u64::from_le_bytes(a.try_into().unwrap());
			let b = u64::from_le_bytes(b.try_into().unwrap());
			return i + ((a ^ b).trailing_zeros() / 8) as usize;
		}
	}

	i = n.saturating_sub(N);
	zip(&a[i..n], &b[i..n])
		.take_while(|(a, b)| a == b)
		.count() + i
}

/// An append-only byte sink with one extra capability: a single already
/// written byte can be overwritten in place, without moving the append
/// position. The LZSS encoder relies on this to reserve each flag byte
/// before its tokens and fill it in once the group is complete.
///
/// Positions returned by [`pos`](Sink::pos) count bytes appended to this
/// sink and are only meaningful as [`patch`](Sink::patch) targets on the
/// same instance.
pub trait Sink {
	fn put(&mut self, value: u8) -> Result<()>;
	fn verbatim(&mut self, s: &[u8]) -> Result<()>;
	fn pos(&self) -> usize;
	fn patch(&mut self, pos: usize, value: u8) -> Result<()>;
}

impl Sink for Vec<u8> {
	fn put(&mut self, value: u8) -> Result<()> {
		self.push(value);
		Ok(())
	}

	fn verbatim(&mut self, s: &[u8]) -> Result<()> {
		self.extend_from_slice(s);
		Ok(())
	}

	fn pos(&self) -> usize {
		self.len()
	}

	fn patch(&mut self, pos: usize, value: u8) -> Result<()> {
		if pos >= self.len() {
			return Err(Error::Patch { pos, len: self.len() })
		}
		self[pos] = value;
		Ok(())
	}
}

/// A sink backed by a random-access stream, typically a file opened for
/// writing. Patching seeks back to the target byte and then restores the
/// append position, so the stream must support [`Seek`]; a socket or other
/// forward-only writer cannot carry the LZSS output without buffering.
///
/// The stream position at construction time becomes the sink's origin;
/// everything the sink writes lands at or after it.
pub struct SeekSink<W> {
	inner: W,
	base: u64,
	len: usize,
}

impl<W: Write + Seek> SeekSink<W> {
	pub fn new(mut inner: W) -> Result<Self> {
		let base = inner.stream_position()?;
		Ok(SeekSink { inner, base, len: 0 })
	}

	pub fn into_inner(self) -> W {
		self.inner
	}
}

impl<W: Write + Seek> Sink for SeekSink<W> {
	fn put(&mut self, value: u8) -> Result<()> {
		self.verbatim(&[value])
	}

	fn verbatim(&mut self, s: &[u8]) -> Result<()> {
		self.inner.write_all(s)?;
		self.len += s.len();
		Ok(())
	}

	fn pos(&self) -> usize {
		self.len
	}

	fn patch(&mut self, pos: usize, value: u8) -> Result<()> {
		if pos >= self.len {
			return Err(Error::Patch { pos, len: self.len })
		}
		self.inner.seek(SeekFrom::Start(self.base + pos as u64))?;
		self.inner.write_all(&[value])?;
		self.inner.seek(SeekFrom::Start(self.base + self.len as u64))?;
		Ok(())
	}
}

/// Counts bytes instead of keeping them, for sizing an encode without
/// allocating the output.
pub struct CountSize(pub usize);

impl Sink for CountSize {
	fn put(&mut self, _: u8) -> Result<()> {
		self.0 += 1;
		Ok(())
	}

	fn verbatim(&mut self, s: &[u8]) -> Result<()> {
		self.0 += s.len();
		Ok(())
	}

	fn pos(&self) -> usize {
		self.0
	}

	fn patch(&mut self, pos: usize, _: u8) -> Result<()> {
		if pos >= self.0 {
			return Err(Error::Patch { pos, len: self.0 })
		}
		Ok(())
	}
}
