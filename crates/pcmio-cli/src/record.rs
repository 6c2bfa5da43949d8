// SPDX-License-Identifier: Apache-2.0

//! Raw interleaved capture to a file.
//!
//! The device layer performs no format negotiation, so the frame size in
//! bytes must be supplied by the caller and the output is a headerless dump
//! of whatever the device is currently configured to deliver.

use crate::error::CliError;
use clap::Args as ClapArgs;
use pcmio::pcm::InterleavedReader;
use serde::Serialize;
use std::fs::File;
use std::io::Write;

#[derive(ClapArgs, Debug)]
pub struct Args {
    /// Card index
    #[arg(short, long, default_value_t = 0)]
    card: usize,

    /// Device index on the card
    #[arg(short, long, default_value_t = 0)]
    device: usize,

    /// Output file for the raw frame dump
    #[arg(short, long)]
    output: String,

    /// Size of one interleaved frame in bytes (all channels)
    #[arg(long, default_value_t = 4)]
    frame_bytes: usize,

    /// Total number of frames to capture
    #[arg(long, default_value_t = 48000)]
    frames: usize,

    /// Frames to request per read
    #[arg(long, default_value_t = 1024)]
    chunk: usize,
}

#[derive(Debug, Serialize)]
struct RecordOutput {
    output: String,
    frames_captured: usize,
    bytes_written: usize,
    short_reads: usize,
}

pub fn execute(args: Args, json: bool) -> Result<(), CliError> {
    log::debug!("Executing record command: {:?}", args);

    if args.frame_bytes == 0 || args.chunk == 0 {
        return Err(CliError::InvalidArgs(
            "--frame-bytes and --chunk must be nonzero".to_string(),
        ));
    }

    let reader = InterleavedReader::open(args.card, args.device, false)?;
    reader.prepare()?;
    reader.start()?;

    let mut file = File::create(&args.output)
        .map_err(|e| CliError::General(format!("cannot create {}: {}", args.output, e)))?;

    let mut buf = vec![0u8; args.chunk * args.frame_bytes];
    let mut captured = 0usize;
    let mut written = 0usize;
    let mut short_reads = 0usize;

    while captured < args.frames {
        let want = args.chunk.min(args.frames - captured);
        // The caller vouches via --frame-bytes that the device delivers
        // frames no larger than this; the kernel sizes the copy by its own
        // configured frame size.
        let got = unsafe {
            reader.read_unformatted(&mut buf[..want * args.frame_bytes], args.frame_bytes)?
        };
        if got == 0 {
            // Non-blocking devices can legitimately deliver nothing; a
            // blocking device returning zero frames means the stream stopped.
            log::warn!("device returned zero frames, stopping capture");
            break;
        }
        if got < want {
            short_reads += 1;
            log::debug!("short read: {} of {} frames", got, want);
        }

        let bytes = got * args.frame_bytes;
        file.write_all(&buf[..bytes])
            .map_err(|e| CliError::General(format!("write failed: {}", e)))?;
        captured += got;
        written += bytes;
    }

    reader.drop_frames()?;

    let output = RecordOutput {
        output: args.output,
        frames_captured: captured,
        bytes_written: written,
        short_reads,
    };

    if json {
        let json_str = serde_json::to_string_pretty(&output)
            .map_err(|e| CliError::General(format!("JSON serialization failed: {}", e)))?;
        println!("{}", json_str);
    } else {
        println!(
            "captured {} frames ({} bytes, {} short reads) to {}",
            output.frames_captured, output.bytes_written, output.short_reads, output.output
        );
    }

    Ok(())
}
