// WLAN configuration endpoints (rest/wlanconf)

use serde_json::Value;
use tracing::debug;

use crate::client::Client;
use crate::error::Error;

impl Client {
    /// All WLAN configurations, or the one with the given `_id`.
    ///
    /// `GET /api/s/{site}/rest/wlanconf[/{id}]`
    pub async fn list_wlan_configs(&self, wlan_id: Option<&str>) -> Result<Vec<Value>, Error> {
        let path = match wlan_id {
            Some(id) => self.site_path(&format!("rest/wlanconf/{}", id.trim())),
            None => self.site_path("rest/wlanconf"),
        };
        debug!(?wlan_id, "listing WLAN configs");
        self.get(&path).await
    }

    /// Update a WLAN. `settings` must carry the target's `_id`.
    ///
    /// `PUT /api/s/{site}/rest/wlanconf/{_id}` with `settings` as the body.
    pub async fn set_wlan_settings(&self, settings: &Value) -> Result<Vec<Value>, Error> {
        let wlan_id = settings
            .get("_id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::Validation {
                field: "_id".into(),
                reason: "WLAN settings must include the `_id` of the WLAN to update".into(),
            })?;

        debug!(wlan_id, "updating WLAN settings");
        self.put(&self.site_path(&format!("rest/wlanconf/{wlan_id}")), settings)
            .await
    }
}
