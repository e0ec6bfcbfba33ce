use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use indicatif::ProgressStyle;
use pnet::util::MacAddr;
use tracing::{Span, info, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::mprint;
use crate::terminal::{colors, format, print};
use espy_common::config::Config;
use espy_common::frame::FrameRecord;
use espy_common::network::prefix::PrefixTable;
use espy_common::vendors::VendorRepository;
use espy_core::capture::CaptureReader;
use espy_core::report::{self, Report};
use espy_core::scanner::Scanner;
use espy_core::vendors::MacOuiRepo;

const PROGRESS_EVERY: u64 = 1_000;
const KEY_WIDTH: usize = 8;
const SPINNER_TICKS: &[&str] = &[
    "▁▁▁▁▁", "▁▂▂▂▁", "▁▄▂▄▁", "▂▄▆▄▂", "▄▆█▆▄", "▂▄▆▄▂", "▁▄▂▄▁", "▁▂▂▂▁",
];

pub fn scan(path: &str, table: &PrefixTable, cfg: &Config) -> anyhow::Result<()> {
    let reader = CaptureReader::open(path)
        .with_context(|| format!("failed to open capture file '{path}'"))?;

    print::header("capture", cfg.quiet);
    if cfg.quiet == 0 {
        print::aligned_line("File", path, KEY_WIDTH);
        print::aligned_line("Format", reader.format(), KEY_WIDTH);
        print::aligned_line("Prefixes", table.len().to_string(), KEY_WIDTH);
    }

    let span = info_span!("scan", indicatif.pb_show = true);
    span.pb_set_style(
        &ProgressStyle::with_template("{spinner:.blue} {msg}")?.tick_strings(SPINNER_TICKS),
    );
    span.pb_set_message("Reading frames...");
    let guard = span.enter();

    let start_time: Instant = Instant::now();
    let frames = reader.frames().inspect(|frame| report_progress(&span, frame));
    let outcome = Scanner::new(table)
        .on_match(|mac, frame| announce(mac, frame, cfg))
        .scan(frames);

    drop(guard);

    let repo = MacOuiRepo;
    let vendors: Option<&dyn VendorRepository> = if cfg.no_vendor {
        None
    } else {
        Some(&repo as &dyn VendorRepository)
    };
    let report: Report = report::build(outcome, table, vendors);

    scan_ends(&report, start_time.elapsed(), cfg);
    Ok(())
}

fn report_progress(span: &Span, frame: &FrameRecord) {
    if frame.number % PROGRESS_EVERY == 0 {
        span.pb_set_message(&format!(
            "Read {} frames so far...",
            frame.number.to_string().green().bold()
        ));
    }
}

fn announce(mac: &MacAddr, frame: &FrameRecord, cfg: &Config) {
    if cfg.quiet == 0 {
        info!(found_mac = %mac, frame = %frame, "Found espressif device");
    }
}

fn scan_ends(report: &Report, total_time: Duration, cfg: &Config) {
    if report.is_empty() {
        no_devices_found(report, total_time, cfg);
        return;
    }

    if cfg.quiet > 0 {
        mprint!();
    }

    print::header("Espressif Devices", cfg.quiet);
    info!(device_count = report.device_count(), "Found unique devices");
    print_sightings(report, cfg);
    print_summary(report, total_time, cfg);
}

fn no_devices_found(report: &Report, total_time: Duration, cfg: &Config) {
    print::header("ZERO DEVICES DETECTED", cfg.quiet);
    print::no_results();
    print_summary(report, total_time, cfg);
}

fn print_sightings(report: &Report, cfg: &Config) {
    for (idx, sighting) in report.sightings.iter().enumerate() {
        info!(mac = %sighting.mac, frame = %sighting.frame, "Found unique device");
        match cfg.quiet {
            2 => {}
            _ => {
                let name = sighting.vendor.as_deref().unwrap_or("Espressif device");
                print::tree_head(idx, name);
                print::as_tree_one_level(format::sighting_to_details(sighting, cfg));
            }
        }
        if idx + 1 != report.sightings.len() && cfg.quiet < 2 {
            mprint!();
        }
    }
}

fn print_summary(report: &Report, total_time: Duration, cfg: &Config) {
    let stats = report.stats;
    let devices: ColoredString = format!("{} unique devices", report.device_count())
        .bold()
        .green();
    let frames: ColoredString = format!("{} frames", stats.frames).bold().cyan();
    let skipped: ColoredString = format!("{} skipped", stats.skipped()).yellow();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64())
        .bold()
        .yellow();
    let output: ColoredString =
        format!("Scan Complete: {devices} in {frames} ({skipped}) in {total_time}")
            .color(colors::TEXT_DEFAULT);

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output.to_string());
        }
        _ => {
            mprint!();
            info!("{}", output);
        }
    }
}
