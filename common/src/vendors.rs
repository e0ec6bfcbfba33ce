use pnet::util::MacAddr;

/// Defines the contract for resolving device manufacturers from MAC addresses.
pub trait VendorRepository {
    /// Retrieves the vendor name for a given MAC address.
    ///
    /// # Returns
    /// * `Some(String)` - The name of the vendor if found.
    /// * `None` - If the OUI is unknown.
    fn get_vendor(&self, mac: MacAddr) -> Option<String>;
}
