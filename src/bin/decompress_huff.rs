use std::{fs, process, time::Instant};

use clap::Parser;

use huffman_rust::processor::HuffProcessor;
use huffman_rust::LogSink;

#[derive(Parser, Debug)]
#[command(about = "Decompress a Huffman-compressed file")]
struct Args {
    /// Source filename
    source_name: String,
    /// Destination filename
    dest_name: String,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let data = fs::read(&args.source_name)
        .unwrap_or_else(|_| panic!("Could not read {}", args.source_name));

    let processor = HuffProcessor::new();
    let mut sink = LogSink;

    let decomp_time = Instant::now();
    match processor.uncompress(&data, &mut sink) {
        Ok((decoded, _bits)) => {
            let decomp_time = decomp_time.elapsed().as_nanos() as f64;
            fs::write(&args.dest_name, &decoded).expect("Failed writing the decompressed file");
            println!(
                "decompressed {} bytes into {} bytes in {}ns",
                data.len(),
                decoded.len(),
                decomp_time
            );
        }
        Err(e) => {
            eprintln!("decompression failed: {}", e);
            process::exit(1);
        }
    }
}
