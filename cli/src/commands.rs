pub mod scan;

use clap::{ArgAction, Parser};

#[derive(Parser)]
#[command(name = "espy")]
#[command(about = "Spot Espressif devices in 802.11 capture files.")]
pub struct CommandLine {
    /// Capture file to read (pcap or pcapng, optionally gzip compressed)
    #[arg(short, long, default_value = "")]
    pub file: String,

    /// Reduce output: once hides headers, twice hides device trees
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,

    /// Skip vendor name lookups in the report
    #[arg(long)]
    pub no_vendor: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
