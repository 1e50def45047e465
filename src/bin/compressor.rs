use std::io::{BufWriter, Write};
use std::process::ExitCode;

use psxpress::util::SeekSink;
use psxpress::Method;

const USAGE: &str = "\
compressor - compresses a file into an LZSS or RLE stream
usage: compressor <input> <LZSS|RLE> <output>";

fn main() -> ExitCode {
	let args: Vec<_> = std::env::args().collect();
	if args.len() != 4 {
		eprintln!("{}", USAGE);
		return ExitCode::FAILURE;
	}

	let method = if args[2] == "RLE" { Method::Rle } else { Method::Lzss };

	let data = match std::fs::read(&args[1]) {
		Ok(data) => data,
		Err(e) => {
			eprintln!("could not read {}: {}", args[1], e);
			return ExitCode::FAILURE;
		}
	};

	let size = match write_compressed(&data, &args[3], method) {
		Ok(size) => size,
		Err(e) => {
			eprintln!("could not write {}: {}", args[3], e);
			return ExitCode::FAILURE;
		}
	};

	println!("Uncompressed size = {}", data.len());
	println!("Compressed size = {}", size);
	ExitCode::SUCCESS
}

fn write_compressed(data: &[u8], path: &str, method: Method) -> psxpress::Result<usize> {
	let file = std::fs::File::create(path)?;
	let mut out = SeekSink::new(BufWriter::new(file))?;
	let size = psxpress::compress(data, &mut out, method)?;
	out.into_inner().flush()?;
	Ok(size)
}
