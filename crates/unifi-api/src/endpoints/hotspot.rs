// Hotspot endpoints
//
// Voucher creation and guest extension via cmd/hotspot, voucher listing
// via stat/voucher, and social login records via stat/social-auth.

use serde_json::{Value, json};
use tracing::debug;

use crate::client::Client;
use crate::endpoints::normalize_mac;
use crate::error::Error;
use crate::models::{Voucher, VoucherBatch};

/// Parameters for [`Client::create_vouchers`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoucherRequest {
    /// Validity in minutes once redeemed.
    pub minutes: u32,
    /// Number of vouchers to create.
    pub count: u32,
    /// Redemptions allowed per voucher (0 = unlimited).
    pub quota: u32,
    pub note: Option<String>,
    /// Upload limit in Kbps.
    pub up: Option<u32>,
    /// Download limit in Kbps.
    pub down: Option<u32>,
    /// Data transfer quota in MB.
    pub megabytes: Option<u32>,
}

impl VoucherRequest {
    /// One single-use voucher valid for `minutes`.
    pub fn new(minutes: u32) -> Self {
        Self {
            minutes,
            count: 1,
            quota: 1,
            note: None,
            up: None,
            down: None,
            megabytes: None,
        }
    }

    fn to_body(&self) -> Value {
        let mut body = json!({
            "cmd": "create-voucher",
            "expire": self.minutes,
            "n": self.count,
            "quota": self.quota,
        });
        if let Some(note) = self.note.as_deref().filter(|n| !n.is_empty()) {
            body["note"] = json!(note);
        }
        if let Some(up) = self.up {
            body["up"] = json!(up);
        }
        if let Some(down) = self.down {
            body["down"] = json!(down);
        }
        if let Some(mb) = self.megabytes {
            body["bytes"] = json!(mb);
        }
        body
    }
}

impl Client {
    /// Create a batch of hotspot vouchers.
    ///
    /// The controller only echoes the batch `create_time`; fetch the codes
    /// with [`Client::list_vouchers`] afterwards.
    ///
    /// `POST /api/s/{site}/cmd/hotspot` with `{"cmd": "create-voucher", ...}`
    pub async fn create_vouchers(&self, request: &VoucherRequest) -> Result<Vec<VoucherBatch>, Error> {
        debug!(
            count = request.count,
            minutes = request.minutes,
            "creating vouchers"
        );
        self.post(&self.site_path("cmd/hotspot"), &request.to_body())
            .await
    }

    /// List vouchers, or the one with the given `_id`.
    pub async fn list_vouchers(&self, voucher_id: Option<&str>) -> Result<Vec<Voucher>, Error> {
        let path = match voucher_id {
            Some(id) => self.site_path(&format!("stat/voucher/{}", id.trim())),
            None => self.site_path("stat/voucher"),
        };
        debug!(?voucher_id, "listing vouchers");
        self.get(&path).await
    }

    /// Extend an authorized guest's validity by `minutes`.
    pub async fn extend_guest_validity(&self, mac: &str, minutes: u32) -> Result<(), Error> {
        debug!(mac, minutes, "extending guest validity");
        self.command(
            &self.site_path("cmd/hotspot"),
            &json!({ "cmd": "extend", "mac": normalize_mac(mac), "minutes": minutes }),
        )
        .await
    }

    /// Guests that logged in through a social provider.
    pub async fn list_social_auth(&self) -> Result<Vec<Value>, Error> {
        debug!("listing social auth records");
        self.get(&self.site_path("stat/social-auth")).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::test_support::{last_body, logged_in, mount_ok};

    #[test]
    fn minimal_voucher_body() {
        assert_eq!(
            VoucherRequest::new(1440).to_body(),
            json!({ "cmd": "create-voucher", "expire": 1440, "n": 1, "quota": 1 })
        );
    }

    #[tokio::test]
    async fn create_vouchers_sends_limits() {
        let (server, client) = logged_in(false).await;
        mount_ok(
            &server,
            "POST",
            "cmd/hotspot",
            json!([{ "create_time": 1_710_000_000 }]),
        )
        .await;

        let request = VoucherRequest {
            count: 10,
            quota: 0,
            note: Some("conference".into()),
            down: Some(4096),
            megabytes: Some(500),
            ..VoucherRequest::new(480)
        };
        let batches = client.create_vouchers(&request).await.unwrap();

        assert_eq!(batches, vec![VoucherBatch { create_time: 1_710_000_000 }]);
        assert_eq!(
            last_body(&server, "/api/s/default/cmd/hotspot").await,
            json!({
                "cmd": "create-voucher",
                "expire": 480,
                "n": 10,
                "quota": 0,
                "note": "conference",
                "down": 4096,
                "bytes": 500,
            })
        );
    }

    #[tokio::test]
    async fn list_vouchers_parses_codes() {
        let (server, client) = logged_in(false).await;
        mount_ok(
            &server,
            "GET",
            "stat/voucher",
            json!([{
                "_id": "v1",
                "code": "0123456789",
                "duration": 480,
                "quota": 1,
                "used": 0,
                "create_time": 1_710_000_000,
                "status": "VALID_ONE"
            }]),
        )
        .await;

        let vouchers = client.list_vouchers(None).await.unwrap();

        assert_eq!(vouchers[0].code, "0123456789");
        assert_eq!(vouchers[0].duration, Some(480));
        assert_eq!(vouchers[0].status.as_deref(), Some("VALID_ONE"));
    }

    #[tokio::test]
    async fn extend_guest_uses_hotspot_cmd() {
        let (server, client) = logged_in(false).await;
        mount_ok(&server, "POST", "cmd/hotspot", json!([])).await;

        client
            .extend_guest_validity("AA:BB:CC:DD:EE:FF", 30)
            .await
            .unwrap();

        assert_eq!(
            last_body(&server, "/api/s/default/cmd/hotspot").await,
            json!({ "cmd": "extend", "mac": "aa:bb:cc:dd:ee:ff", "minutes": 30 })
        );
    }
}
