use espy_common::network::prefix::PrefixTable;
use espy_core::capture::{CaptureError, CaptureReader};
use espy_core::report;
use espy_core::scanner::{self, Scanner};

use crate::utils::*;

const ESP32: [u8; 6] = [0x24, 0x0a, 0xc4, 0x12, 0x34, 0x56];
const ESP8266: [u8; 6] = [0x78, 0x21, 0x84, 0xaa, 0xbb, 0xcc];
const PHONE: [u8; 6] = [0x3c, 0x22, 0xfb, 0x01, 0x02, 0x03];

fn espressif() -> PrefixTable {
    PrefixTable::espressif().unwrap()
}

fn open(bytes: &[u8]) -> (tempfile::NamedTempFile, CaptureReader) {
    let file = capture_file(bytes);
    let reader = CaptureReader::open(file.path()).unwrap();
    (file, reader)
}

#[test]
fn finds_espressif_device_in_radiotap_capture() {
    let bytes = pcap(
        LINKTYPE_RADIOTAP,
        &[
            radiotap(&probe_request(PHONE)),
            radiotap(&probe_request(ESP32)),
        ],
    );
    let (_file, reader) = open(&bytes);

    let matches = scanner::scan(reader.frames(), &espressif());

    assert_eq!(matches.len(), 1);
    let frame = matches.get("24:0a:c4:12:34:56").unwrap();
    assert_eq!(frame.number, 2);
}

#[test]
fn repeated_device_maps_to_its_last_frame() {
    let bytes = pcap(
        LINKTYPE_IEEE802_11,
        &[
            probe_request(ESP8266),
            probe_request(PHONE),
            management(0x5, PHONE, ESP8266, ESP8266),
        ],
    );
    let (_file, reader) = open(&bytes);

    let mut sightings = 0;
    let outcome = Scanner::new(&espressif())
        .on_match(|_, _| sightings += 1)
        .scan(reader.frames());

    assert_eq!(outcome.matches.len(), 1);
    assert_eq!(outcome.matches.get("78:21:84:aa:bb:cc").unwrap().number, 3);
    // once in the probe request, twice in the probe response
    assert_eq!(sightings, 3);
}

#[test]
fn fourth_address_is_checked() {
    let bytes = pcap(
        LINKTYPE_IEEE802_11,
        &[wds_data([ACCESS_POINT, ACCESS_POINT, PHONE, ESP32])],
    );
    let (_file, reader) = open(&bytes);

    let matches = scanner::scan(reader.frames(), &espressif());
    assert!(matches.get("24:0a:c4:12:34:56").is_some());
}

#[test]
fn bad_fcs_frames_are_skipped() {
    let bytes = pcap(
        LINKTYPE_RADIOTAP,
        &[
            radiotap_with_flags(&probe_request(ESP32), FLAG_FCS | FLAG_BAD_FCS),
            radiotap_with_flags(&probe_request(ESP8266), FLAG_FCS),
        ],
    );
    let (_file, reader) = open(&bytes);

    let outcome = Scanner::new(&espressif()).scan(reader.frames());

    assert_eq!(outcome.matches.len(), 1);
    assert!(outcome.matches.get("78:21:84:aa:bb:cc").is_some());
    assert_eq!(outcome.stats.decode_errors, 1);
}

#[test]
fn non_wireless_frames_are_ignored() {
    // Ethernet frame whose destination happens to be an Espressif address
    let mut ethernet = ESP32.to_vec();
    ethernet.extend_from_slice(&PHONE);
    ethernet.extend_from_slice(&[0x08, 0x00]);
    let bytes = pcap(LINKTYPE_ETHERNET, &[ethernet]);
    let (_file, reader) = open(&bytes);

    let outcome = Scanner::new(&espressif()).scan(reader.frames());
    assert!(outcome.matches.is_empty());
    assert_eq!(outcome.stats.without_header, 1);
}

#[test]
fn pcapng_uses_link_type_of_each_interface() {
    let mut ethernet = ESP8266.to_vec();
    ethernet.extend_from_slice(&PHONE);
    ethernet.extend_from_slice(&[0x08, 0x00]);

    let bytes = pcapng(
        &[LINKTYPE_ETHERNET, LINKTYPE_RADIOTAP],
        &[(0, ethernet), (1, radiotap(&probe_request(ESP32)))],
    );
    let (_file, reader) = open(&bytes);
    assert_eq!(reader.format(), "pcapng");

    let matches = scanner::scan(reader.frames(), &espressif());
    assert_eq!(matches.len(), 1);
    assert_eq!(matches.get("24:0a:c4:12:34:56").unwrap().number, 2);
}

#[test]
fn frames_after_an_oversized_block_are_still_scanned() {
    // bigger than the reader's initial 64 KiB buffer
    let mut jumbo = ESP8266.to_vec();
    jumbo.extend_from_slice(&PHONE);
    jumbo.resize(70_000, 0);

    let bytes = pcapng(
        &[LINKTYPE_ETHERNET, LINKTYPE_RADIOTAP],
        &[(0, jumbo), (1, radiotap(&probe_request(ESP32)))],
    );
    let (_file, reader) = open(&bytes);

    let outcome = Scanner::new(&espressif()).scan(reader.frames());

    assert_eq!(outcome.stats.frames, 2);
    assert_eq!(outcome.stats.without_header, 1);
    assert_eq!(outcome.matches.len(), 1);
    assert_eq!(outcome.matches.get("24:0a:c4:12:34:56").unwrap().number, 2);
}

#[test]
fn gzipped_capture_is_read_transparently() {
    let bytes = gzip(&pcap(
        LINKTYPE_RADIOTAP,
        &[radiotap(&probe_request(ESP8266))],
    ));
    let (_file, reader) = open(&bytes);
    assert_eq!(reader.format(), "pcap");

    let matches = scanner::scan(reader.frames(), &espressif());
    assert_eq!(matches.len(), 1);
}

#[test]
fn empty_capture_reports_nothing() {
    let bytes = pcap(LINKTYPE_RADIOTAP, &[]);
    let (_file, reader) = open(&bytes);

    let outcome = Scanner::new(&espressif()).scan(reader.frames());
    let report = report::build(outcome, &espressif(), None);

    assert!(report.is_empty());
    assert_eq!(report.stats.frames, 0);
}

#[test]
fn report_lists_unique_devices_in_order() {
    let table = espressif();
    let bytes = pcap(
        LINKTYPE_RADIOTAP,
        &[
            radiotap(&probe_request(ESP8266)),
            radiotap(&probe_request(ESP32)),
            radiotap(&probe_request(ESP8266)),
            radiotap(&probe_request(PHONE)),
        ],
    );
    let (_file, reader) = open(&bytes);

    let outcome = Scanner::new(&table).scan(reader.frames());
    let report = report::build(outcome, &table, None);

    let macs: Vec<&str> = report.sightings.iter().map(|s| s.mac.as_str()).collect();
    assert_eq!(macs, vec!["24:0a:c4:12:34:56", "78:21:84:aa:bb:cc"]);
    assert_eq!(report.sightings[1].frame.number, 3);
    assert_eq!(
        report.sightings[0].prefix.map(|p| p.to_string()),
        Some("24-0A-C4".to_string())
    );
    assert_eq!(report.stats.frames, 4);
}

#[test]
fn missing_capture_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.pcap");

    let err = CaptureReader::open(&path).err().unwrap();
    assert!(matches!(err, CaptureError::Open { .. }));
}

#[test]
fn garbage_file_is_rejected() {
    let file = capture_file(b"this is not a capture file");
    let err = CaptureReader::open(file.path()).err().unwrap();
    assert!(matches!(err, CaptureError::InvalidFormat { .. }));
}
