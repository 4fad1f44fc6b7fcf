use std::{fs, process, time::Instant};

use clap::Parser;
use serde::Serialize;

use huffman_rust::huffman::HeaderFormat;
use huffman_rust::processor::{CompressOutcome, HuffProcessor};
use huffman_rust::LogSink;

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum HeaderArg {
    /// Store the full frequency table
    Counts,
    /// Store the serialized tree shape
    Tree,
}

impl From<HeaderArg> for HeaderFormat {
    fn from(value: HeaderArg) -> Self {
        match value {
            HeaderArg::Counts => HeaderFormat::Counts,
            HeaderArg::Tree => HeaderFormat::Tree,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Huffman-compress a file")]
struct Args {
    /// Source filename
    source_name: String,
    /// Destination filename
    dest_name: String,
    /// Header layout to store in the compressed file
    #[arg(long, value_enum, default_value = "tree")]
    header_format: HeaderArg,
    /// Write the output even when it would not be smaller than the input
    #[arg(long)]
    force: bool,
    /// Write a `<dest>.stats.json` report next to the output
    #[arg(long)]
    stats: bool,
}

#[derive(Serialize, Debug)]
struct CompressionStats {
    original_bits: usize,
    compressed_bits: u64,
    saved_bits: i64,
    header_format: String,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let data = fs::read(&args.source_name)
        .unwrap_or_else(|_| panic!("Could not read {}", args.source_name));

    let mut processor = HuffProcessor::new();
    let saved = processor.preprocess_compress(&data, args.header_format.into());

    let mut sink = LogSink;
    let comp_time = Instant::now();
    match processor.compress(&data, args.force, &mut sink) {
        CompressOutcome::Written { data: compressed, bits } => {
            let comp_time = comp_time.elapsed().as_nanos() as f64;
            fs::write(&args.dest_name, &compressed).expect("Failed writing the compressed file");

            println!(
                "compressed {} bytes into {} bytes ({} bits saved) in {}ns",
                data.len(),
                compressed.len(),
                saved,
                comp_time
            );

            if args.stats {
                let stats = CompressionStats {
                    original_bits: processor.original_bits(),
                    compressed_bits: bits,
                    saved_bits: saved,
                    header_format: format!("{:?}", args.header_format),
                };
                let report = serde_json::to_string_pretty(&stats)
                    .expect("Failed serializing the stats report");
                fs::write(format!("{}.stats.json", args.dest_name), report)
                    .expect("Failed writing the stats report");
            }
        }
        CompressOutcome::Declined => {
            eprintln!("compressed output would not be smaller, pass --force to write it anyway");
            process::exit(1);
        }
    }
}
