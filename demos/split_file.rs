//
// Copyright (c) 2025 Nathan Fiedler
//

//! Splits a file into content-defined chunks and prints each chunk's
//! offset, length, and MD5 digest.

use std::fs::File;
use std::io::BufReader;
use std::process;

use cdc_chunkers::{Chunker, ChunkerOptions, Status};
use clap::{value_parser, Arg, Command};
use md5::{Digest, Md5};

fn main() {
    let matches = Command::new("split_file")
        .about("Split a file into content-defined chunks")
        .arg(
            Arg::new("algorithm")
                .short('a')
                .long("algorithm")
                .default_value("fastcdc")
                .help("registered chunking algorithm to use"),
        )
        .arg(
            Arg::new("min")
                .long("min")
                .value_parser(value_parser!(u32))
                .help("minimum chunk size in bytes"),
        )
        .arg(
            Arg::new("normal")
                .long("normal")
                .value_parser(value_parser!(u32))
                .help("target chunk size in bytes"),
        )
        .arg(
            Arg::new("max")
                .long("max")
                .value_parser(value_parser!(u32))
                .help("maximum chunk size in bytes"),
        )
        .arg(Arg::new("path").required(true).help("file to split"))
        .get_matches();

    let path = matches.get_one::<String>("path").unwrap();
    let algorithm = matches.get_one::<String>("algorithm").unwrap();
    let min = matches.get_one::<u32>("min").copied();
    let normal = matches.get_one::<u32>("normal").copied();
    let max = matches.get_one::<u32>("max").copied();

    let options = match (min, normal, max) {
        (None, None, None) => None,
        (Some(min), Some(normal), Some(max)) => Some(ChunkerOptions::new(min, normal, max)),
        (Some(min), None, Some(max)) => Some(ChunkerOptions::without_normal_size(min, max)),
        _ => {
            eprintln!("--min, --normal, and --max must be supplied together, or omitted");
            process::exit(2);
        }
    };

    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    };

    let mut chunker = match Chunker::new(algorithm, BufReader::new(file), options) {
        Ok(chunker) => chunker,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    };

    loop {
        let (chunk, status) = match chunker.next() {
            Ok(result) => result,
            Err(err) => {
                eprintln!("error: {err}");
                process::exit(1);
            }
        };
        if chunk.length > 0 {
            let mut hasher = Md5::new();
            hasher.update(&chunk.data);
            let digest = hasher.finalize();
            println!(
                "offset={:<10} length={:<8} md5={:x}",
                chunk.offset, chunk.length, digest
            );
        }
        if status == Status::End {
            break;
        }
    }
}
