use std::sync::OnceLock;

use espy_common::vendors::VendorRepository;
use mac_oui::Oui;
use pnet::util::MacAddr;
use tracing::warn;

static OUI_DB: OnceLock<Option<Oui>> = OnceLock::new();

/// Retrieves or initializes the **Organizationally unique identifier** database.
///
/// A database that fails to load is reported once and leaves vendor names empty.
fn get_oui_db() -> Option<&'static Oui> {
    OUI_DB
        .get_or_init(|| match Oui::default() {
            Ok(db) => Some(db),
            Err(err) => {
                warn!(error = ?err, "Failed to load OUI database, vendor names disabled");
                None
            }
        })
        .as_ref()
}

/// Vendor names from the IEEE MA-L registry bundled with `mac_oui`.
pub struct MacOuiRepo;

impl VendorRepository for MacOuiRepo {
    fn get_vendor(&self, mac: MacAddr) -> Option<String> {
        let db = get_oui_db()?;
        let mac_str = mac.to_string();
        match db.lookup_by_mac(&mac_str) {
            Ok(Some(entry)) => Some(entry.company_name.clone()),
            _ => None,
        }
    }
}
