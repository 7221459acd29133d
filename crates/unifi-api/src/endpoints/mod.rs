// Endpoint catalogue
//
// Each file adds inherent methods to `Client` for one area of the
// management API. Paths are logical (`/api/s/{site}/...`); the client
// rewrites them for the controller flavor at dispatch time.

pub mod clients;
pub mod devices;
pub mod hotspot;
pub mod sites;
pub mod stats;
pub mod system;
pub mod wlan;

/// MAC addresses are always sent lower-case.
pub(crate) fn normalize_mac(mac: &str) -> String {
    mac.trim().to_lowercase()
}
