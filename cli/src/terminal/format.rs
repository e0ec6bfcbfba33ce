use crate::terminal::colors;
use colored::*;
use espy_common::config::Config;
use espy_common::frame::FrameRecord;
use espy_core::report::Sighting;

pub type Detail = (String, ColoredString);

pub fn sighting_to_details(sighting: &Sighting, cfg: &Config) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![mac_to_detail(&sighting.mac)];

    if let Some(prefix) = sighting.prefix {
        details.push((
            String::from("Prefix"),
            prefix.to_string().color(colors::PREFIX),
        ));
    }

    if !cfg.no_vendor {
        details.push(vendor_to_detail(sighting.vendor.as_deref()));
    }

    details.push(frame_to_detail(&sighting.frame));
    details
}

pub fn mac_to_detail(mac: &str) -> Detail {
    (String::from("MAC"), mac.color(colors::MAC_ADDR))
}

pub fn vendor_to_detail(vendor: Option<&str>) -> Detail {
    let value = match vendor {
        Some(name) => name.color(colors::VENDOR),
        None => "Unknown".dimmed(),
    };
    (String::from("Vendor"), value)
}

pub fn frame_to_detail(frame: &FrameRecord) -> Detail {
    (String::from("Frame"), frame.to_string().color(colors::FRAME))
}
