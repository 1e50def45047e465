pub mod frame;
pub mod lzss;
pub mod rle;
pub mod util;

pub use util::Sink;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Io { #[from] source: std::io::Error },
	#[error("attempted to patch byte {pos}, but only {len} bytes have been written")]
	Patch {
		pos: usize,
		len: usize,
	},
}

pub type Result<A, E=Error> = std::result::Result<A, E>;

/// Selects which codec [`compress`] runs.
///
/// LZSS is the default: it is the stronger codec on most data, and tools
/// built on this crate treat anything that does not explicitly ask for RLE
/// as a request for LZSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Method {
	#[default]
	Lzss,
	Rle,
}

/// Compresses `input` into `out` with the chosen method, returning the
/// number of bytes appended to the sink.
///
/// Both codecs accept any input, including an empty one (which produces no
/// output); the only failures are those of the sink itself.
pub fn compress(input: &[u8], out: &mut impl Sink, method: Method) -> Result<usize> {
	match method {
		Method::Lzss => lzss::compress(input, out),
		Method::Rle => rle::compress(input, out),
	}
}
