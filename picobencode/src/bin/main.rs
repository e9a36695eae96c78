// SPDX-License-Identifier: Apache-2.0

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use picobencode::{DecoderConfig, Event, PullParser, SliceDecoder};

/// Decode a bencode message and print one line per event.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Input file; reads stdin when omitted or "-"
    file: Option<PathBuf>,

    /// Reject containers nested deeper than this
    #[arg(long)]
    max_depth: Option<usize>,

    /// Only validate, print nothing on success
    #[arg(short, long)]
    quiet: bool,
}

fn read_input(file: Option<&PathBuf>) -> io::Result<Vec<u8>> {
    let mut data = Vec::new();
    match file {
        Some(path) if path.as_os_str() != "-" => {
            File::open(path)?.read_to_end(&mut data)?;
        }
        _ => {
            io::stdin().lock().read_to_end(&mut data)?;
        }
    }
    Ok(data)
}

fn describe(event: &Event<'_>) -> String {
    match event {
        Event::Integer(n) => format!("Integer {}", n),
        Event::String(s) => format!("String \"{}\"", s.escape_ascii()),
        other => other.name().to_string(),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let data = match read_input(args.file.as_ref()) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error: Unable to read input: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = DecoderConfig {
        max_depth: args.max_depth,
    };
    let mut decoder = SliceDecoder::with_config(&data, config);
    let mut out = io::stdout().lock();

    loop {
        match decoder.next_event() {
            Ok(event) => {
                if !args.quiet && writeln!(out, "{}", describe(&event)).is_err() {
                    return ExitCode::FAILURE;
                }
                if event == Event::EndDocument {
                    return ExitCode::SUCCESS;
                }
            }
            Err(e) => {
                eprintln!("error: {:?} at {}", e.kind(), e.position());
                return ExitCode::FAILURE;
            }
        }
    }
}
