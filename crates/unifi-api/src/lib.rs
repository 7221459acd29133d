// unifi-api: Async Rust client for the UniFi controller management API
//
// `Client` owns the session (login, flavor detection, CSRF token, cookie
// jar) and dispatches requests; `endpoints` adds one method per remote
// call on top of it.

pub mod auth;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod models;
pub mod session;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use auth::{ControllerFlavor, Credentials, SessionState};
pub use client::{CSRF_HEADER, Client, HttpMethod};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_SESSION_COOKIE, DEFAULT_SITE};
pub use endpoints::clients::{GuestAuthorization, NewUser};
pub use endpoints::hotspot::VoucherRequest;
pub use endpoints::stats::{Interval, SessionKind, TimeRange};
pub use endpoints::system::AutoUpdateSettings;
pub use envelope::{Envelope, Meta};
pub use error::Error;
pub use models::{Alarm, Device, Site, Station, Voucher, VoucherBatch};
pub use session::SessionCookie;
pub use transport::{TlsMode, TransportConfig};
