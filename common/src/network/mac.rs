use pnet::util::MacAddr;

/// Length of an IEEE 802 hardware address.
pub const MAC_LEN: usize = 6;

/// Reads the hardware address stored at `offset`.
///
/// Returns `None` when fewer than six bytes are left.
pub fn read_at(data: &[u8], offset: usize) -> Option<MacAddr> {
    let end = offset.checked_add(MAC_LEN)?;
    match data.get(offset..end)? {
        &[a, b, c, d, e, f] => Some(MacAddr::new(a, b, c, d, e, f)),
        _ => None,
    }
}

/// Raw octets of a MAC address, most significant first.
pub fn octets(mac: &MacAddr) -> [u8; MAC_LEN] {
    let MacAddr(a, b, c, d, e, f) = *mac;
    [a, b, c, d, e, f]
}

/// The key a MAC address is stored under when deduplicating sightings.
///
/// Lower-case, colon separated: `78:21:84:aa:bb:cc`.
pub fn canonical(mac: &MacAddr) -> String {
    mac.to_string()
}
