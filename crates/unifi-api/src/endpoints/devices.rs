// Device endpoints
//
// Reads via stat/device, settings via rest/device (PUT), and LED locate
// via cmd/devmgr.

use serde_json::{Value, json};
use tracing::debug;

use crate::client::Client;
use crate::endpoints::normalize_mac;
use crate::error::Error;
use crate::models::Device;

impl Client {
    /// List all adopted devices, or the one matching `mac`.
    ///
    /// `GET /api/s/{site}/stat/device[/{mac}]`
    pub async fn list_devices(&self, mac: Option<&str>) -> Result<Vec<Device>, Error> {
        let path = match mac {
            Some(mac) => self.site_path(&format!("stat/device/{}", normalize_mac(mac))),
            None => self.site_path("stat/device"),
        };
        debug!(?mac, "listing devices");
        self.get(&path).await
    }

    /// Disable (`true`) or re-enable (`false`) a device.
    ///
    /// `PUT /api/s/{site}/rest/device/{mac}` with `{"disabled": ..., "mac": ...}`
    pub async fn disable_device(&self, mac: &str, disable: bool) -> Result<(), Error> {
        let mac = normalize_mac(mac);
        debug!(%mac, disable, "toggling device disabled flag");
        let _: Value = self
            .put(
                &self.site_path(&format!("rest/device/{mac}")),
                &json!({ "disabled": disable, "mac": mac }),
            )
            .await?;
        Ok(())
    }

    /// Push an arbitrary settings object to a device.
    pub async fn set_device_settings(&self, mac: &str, settings: &Value) -> Result<(), Error> {
        let mac = normalize_mac(mac);
        debug!(%mac, "updating device settings");
        let _: Value = self
            .put(&self.site_path(&format!("rest/device/{mac}")), settings)
            .await?;
        Ok(())
    }

    /// Toggle the LED locator on a device.
    ///
    /// `enable: true` sends `set-locate`, `false` sends `unset-locate`.
    pub async fn locate_device(&self, mac: &str, enable: bool) -> Result<(), Error> {
        let cmd = if enable { "set-locate" } else { "unset-locate" };
        debug!(mac, cmd, "toggling device locate LED");
        self.command(
            &self.site_path("cmd/devmgr"),
            &json!({ "cmd": cmd, "mac": normalize_mac(mac) }),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    use crate::test_support::{last_body, logged_in, mount_ok, ok_envelope};

    #[tokio::test]
    async fn list_devices_parses_typed_rows() {
        let (server, client) = logged_in(false).await;
        mount_ok(
            &server,
            "GET",
            "stat/device",
            json!([
                { "_id": "d1", "mac": "fc:ec:da:00:00:01", "type": "uap", "state": 1, "adopted": true, "name": "Hallway" },
                { "_id": "d2", "mac": "fc:ec:da:00:00:02", "type": "usw", "state": 0, "led_override": "default" }
            ]),
        )
        .await;

        let devices = client.list_devices(None).await.unwrap();

        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].device_type, "uap");
        assert!(devices[0].adopted);
        assert_eq!(devices[0].name.as_deref(), Some("Hallway"));
        assert_eq!(devices[1].state, 0);
        assert_eq!(devices[1].extra["led_override"], "default");
    }

    #[tokio::test]
    async fn single_device_lookup_lowercases_mac() {
        let (server, client) = logged_in(false).await;
        mount_ok(&server, "GET", "stat/device/fc:ec:da:00:00:01", json!([])).await;

        let devices = client.list_devices(Some("FC:EC:DA:00:00:01")).await.unwrap();
        assert!(devices.is_empty());
    }

    #[tokio::test]
    async fn disable_device_puts_flag() {
        let (server, client) = logged_in(false).await;
        mount_ok(&server, "PUT", "rest/device/fc:ec:da:00:00:01", json!([])).await;

        client
            .disable_device("FC:EC:DA:00:00:01", true)
            .await
            .unwrap();

        assert_eq!(
            last_body(&server, "/api/s/default/rest/device/fc:ec:da:00:00:01").await,
            json!({ "disabled": true, "mac": "fc:ec:da:00:00:01" })
        );
    }

    #[tokio::test]
    async fn device_settings_are_sent_verbatim() {
        let (server, client) = logged_in(true).await;

        Mock::given(method("PUT"))
            .and(path("/proxy/network/api/s/default/rest/device/aa:00:00:00:00:01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([]))))
            .expect(1)
            .mount(&server)
            .await;

        let settings = json!({ "name": "Lobby AP", "led_override": "off" });
        client
            .set_device_settings("aa:00:00:00:00:01", &settings)
            .await
            .unwrap();

        assert_eq!(
            last_body(
                &server,
                "/proxy/network/api/s/default/rest/device/aa:00:00:00:00:01"
            )
            .await,
            settings
        );
    }

    #[tokio::test]
    async fn locate_toggles_command() {
        let (server, client) = logged_in(false).await;

        Mock::given(method("POST"))
            .and(path("/api/s/default/cmd/devmgr"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([]))))
            .expect(2)
            .mount(&server)
            .await;

        client.locate_device("AA:00:00:00:00:01", true).await.unwrap();
        assert_eq!(
            last_body(&server, "/api/s/default/cmd/devmgr").await,
            json!({ "cmd": "set-locate", "mac": "aa:00:00:00:00:01" })
        );
        client.locate_device("AA:00:00:00:00:01", false).await.unwrap();
        assert_eq!(
            last_body(&server, "/api/s/default/cmd/devmgr").await["cmd"],
            "unset-locate"
        );
    }
}
