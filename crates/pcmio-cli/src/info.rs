// SPDX-License-Identifier: Apache-2.0

//! Metadata query for one PCM device.

use crate::error::CliError;
use clap::Args as ClapArgs;
use pcmio::pcm::Pcm;
use serde::Serialize;

#[derive(ClapArgs, Debug)]
pub struct Args {
    /// Card index
    #[arg(short, long, default_value_t = 0)]
    card: usize,

    /// Device index on the card
    #[arg(short, long, default_value_t = 0)]
    device: usize,

    /// Query the playback node instead of the capture node
    #[arg(long)]
    playback: bool,
}

#[derive(Debug, Serialize)]
struct InfoOutput {
    card: i32,
    device: u32,
    subdevice: u32,
    class: String,
    subclass: String,
    id: String,
    name: String,
    subname: String,
    subdevices_count: u32,
    subdevices_available: u32,
}

pub fn execute(args: Args, json: bool) -> Result<(), CliError> {
    log::debug!("Executing info command: {:?}", args);

    let mut pcm = Pcm::new();
    if args.playback {
        pcm.open_playback_device(args.card, args.device, false)?;
    } else {
        pcm.open_capture_device(args.card, args.device, false)?;
    }

    let info = pcm.info()?;

    if json {
        let output = InfoOutput {
            card: info.card,
            device: info.device,
            subdevice: info.subdevice,
            class: info.class.name().to_string(),
            subclass: info.subclass.name().to_string(),
            id: info.id().into_owned(),
            name: info.name().into_owned(),
            subname: info.subname().into_owned(),
            subdevices_count: info.subdevices_count,
            subdevices_available: info.subdevices_available,
        };
        let json_str = serde_json::to_string_pretty(&output)
            .map_err(|e| CliError::General(format!("JSON serialization failed: {}", e)))?;
        println!("{}", json_str);
    } else {
        println!("{}", info);
    }

    Ok(())
}
