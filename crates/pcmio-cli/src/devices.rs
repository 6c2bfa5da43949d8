// SPDX-License-Identifier: Apache-2.0

//! PCM device enumeration with card grouping.

use crate::error::CliError;
use clap::Args as ClapArgs;
use pcmio::pcm::{PcmInfo, PcmList};
use serde::Serialize;

#[derive(ClapArgs, Debug)]
pub struct Args {
    /// Show one entry per device node (disable grouping by card)
    #[arg(long)]
    all: bool,

    /// Show detailed identifier and subdevice information
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct DevicesOutput {
    cards: Vec<CardGroup>,
    summary: Summary,
}

#[derive(Debug, Serialize)]
struct CardGroup {
    card: i32,
    devices: Vec<DeviceEntry>,
}

#[derive(Debug, Serialize)]
struct DeviceEntry {
    device: u32,
    name: String,
    class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subclass: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subdevices: Option<String>,
}

#[derive(Debug, Serialize)]
struct Summary {
    total_devices: usize,
    cards: usize,
}

pub fn execute(args: Args, json: bool) -> Result<(), CliError> {
    log::debug!("Executing devices command: {:?}", args);

    let list = PcmList::scan();

    let groups = if args.all {
        // One group per node, preserving scan order.
        list.iter()
            .map(|info| CardGroup {
                card: info.card,
                devices: vec![device_entry(info, args.verbose)],
            })
            .collect::<Vec<_>>()
    } else {
        group_by_card(&list, args.verbose)
    };

    let output = DevicesOutput {
        summary: Summary {
            total_devices: list.len(),
            cards: groups.len(),
        },
        cards: groups,
    };

    if json {
        let json_str = serde_json::to_string_pretty(&output)
            .map_err(|e| CliError::General(format!("JSON serialization failed: {}", e)))?;
        println!("{}", json_str);
    } else {
        print_text_output(&output);
    }

    Ok(())
}

fn device_entry(info: &PcmInfo, verbose: bool) -> DeviceEntry {
    DeviceEntry {
        device: info.device,
        name: info.name().into_owned(),
        class: info.class.name().to_string(),
        id: verbose.then(|| info.id().into_owned()),
        subname: verbose.then(|| info.subname().into_owned()),
        subclass: verbose.then(|| info.subclass.name().to_string()),
        subdevices: verbose.then(|| {
            format!(
                "{}/{} available",
                info.subdevices_available, info.subdevices_count
            )
        }),
    }
}

/// Group devices by card index to deduplicate capture/playback node pairs
fn group_by_card(list: &PcmList, verbose: bool) -> Vec<CardGroup> {
    let mut groups: Vec<CardGroup> = Vec::new();

    for info in list {
        let entry = device_entry(info, verbose);
        match groups.iter_mut().find(|g| g.card == info.card) {
            Some(group) => {
                // Capture and playback nodes of one device carry the same
                // metadata; keep a single entry per device index.
                if !group.devices.iter().any(|d| d.device == info.device) {
                    group.devices.push(entry);
                }
            }
            None => groups.push(CardGroup {
                card: info.card,
                devices: vec![entry],
            }),
        }
    }

    groups.sort_by_key(|g| g.card);
    for group in &mut groups {
        group.devices.sort_by_key(|d| d.device);
    }
    groups
}

fn print_text_output(output: &DevicesOutput) {
    println!(
        "PCM Devices ({} nodes, {} cards)\n",
        output.summary.total_devices, output.summary.cards
    );

    if output.cards.is_empty() {
        println!("No devices found");
        return;
    }

    for group in &output.cards {
        println!("Card {}:", group.card);
        for dev in &group.devices {
            println!("  device {}: {} ({})", dev.device, dev.name, dev.class);
            if let Some(ref id) = dev.id {
                println!("    Id: {}", id);
            }
            if let Some(ref subname) = dev.subname {
                println!("    Subname: {}", subname);
            }
            if let Some(ref subclass) = dev.subclass {
                println!("    Subclass: {}", subclass);
            }
            if let Some(ref subdevices) = dev.subdevices {
                println!("    Subdevices: {}", subdevices);
            }
        }
    }
}
