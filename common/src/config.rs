pub struct Config {
    /// Output verbosity reduction.
    ///
    /// `1` hides section headers, `2` also hides the per-device trees.
    pub quiet: u8,
    /// Skips the IEEE OUI lookup when printing matched devices.
    pub no_vendor: bool,
}
