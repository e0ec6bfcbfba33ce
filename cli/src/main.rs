mod commands;
mod terminal;

use std::process::ExitCode;

use anyhow::Context;
use commands::{CommandLine, scan};
use espy_common::config::Config;
use espy_common::network::prefix::PrefixTable;
use terminal::{logging, print};
use tracing::{error, info};

fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    logging::init_logging();
    print::banner(commands.quiet);

    let cfg = Config {
        quiet: commands.quiet,
        no_vendor: commands.no_vendor,
    };

    match run(&commands.file, &cfg) {
        Ok(()) => {
            if cfg.quiet == 0 {
                print::end_of_program();
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(file: &str, cfg: &Config) -> anyhow::Result<()> {
    print::header("getting ready", cfg.quiet);

    let table = PrefixTable::espressif().context("embedded Espressif prefix table is malformed")?;
    info!(prefixes = table.len(), "Loaded Espressif address prefixes");

    scan::scan(file, &table, cfg)
}
