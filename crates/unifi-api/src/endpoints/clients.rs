// Client (station) and user endpoints
//
// Station commands via cmd/stamgr, reads via stat/sta, stat/guest and
// stat/alluser, and user records via group/user and upd/user.

use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::client::Client;
use crate::endpoints::normalize_mac;
use crate::error::Error;
use crate::models::Station;

/// Optional limits for [`Client::authorize_guest`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestAuthorization {
    /// Upload limit in Kbps.
    pub up: Option<u32>,
    /// Download limit in Kbps.
    pub down: Option<u32>,
    /// Data transfer quota in MB.
    pub megabytes: Option<u32>,
    /// AP the guest is associated with; speeds up authorization.
    pub ap_mac: Option<String>,
}

/// A user record to create with [`Client::create_user`].
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub mac: String,
    #[serde(rename = "usergroup_id")]
    pub user_group_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_guest: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_wired: Option<bool>,
}

impl NewUser {
    pub fn new(mac: impl Into<String>, user_group_id: impl Into<String>) -> Self {
        Self {
            mac: mac.into(),
            user_group_id: user_group_id.into(),
            name: None,
            note: None,
            is_guest: None,
            is_wired: None,
        }
    }
}

impl Client {
    /// Authorize a guest on the hotspot portal for `minutes`.
    ///
    /// `POST /api/s/{site}/cmd/stamgr` with `{"cmd": "authorize-guest", ...}`
    pub async fn authorize_guest(
        &self,
        mac: &str,
        minutes: u32,
        limits: &GuestAuthorization,
    ) -> Result<(), Error> {
        debug!(mac, minutes, "authorizing guest");

        let mut body = json!({
            "cmd": "authorize-guest",
            "mac": normalize_mac(mac),
            "minutes": minutes,
        });
        if let Value::Object(obj) = &mut body {
            if let Some(up) = limits.up {
                obj.insert("up".into(), json!(up));
            }
            if let Some(down) = limits.down {
                obj.insert("down".into(), json!(down));
            }
            if let Some(mb) = limits.megabytes {
                obj.insert("bytes".into(), json!(mb));
            }
            if let Some(ap) = limits.ap_mac.as_deref() {
                obj.insert("ap_mac".into(), json!(normalize_mac(ap)));
            }
        }

        self.command(&self.site_path("cmd/stamgr"), &body).await
    }

    /// Revoke a guest authorization.
    pub async fn unauthorize_guest(&self, mac: &str) -> Result<(), Error> {
        debug!(mac, "unauthorizing guest");
        self.stamgr("unauthorize-guest", mac).await
    }

    /// Force a client to reconnect (`kick-sta`).
    pub async fn reconnect_client(&self, mac: &str) -> Result<(), Error> {
        debug!(mac, "reconnecting client");
        self.stamgr("kick-sta", mac).await
    }

    pub async fn block_client(&self, mac: &str) -> Result<(), Error> {
        debug!(mac, "blocking client");
        self.stamgr("block-sta", mac).await
    }

    pub async fn unblock_client(&self, mac: &str) -> Result<(), Error> {
        debug!(mac, "unblocking client");
        self.stamgr("unblock-sta", mac).await
    }

    /// Forget one or more clients permanently.
    ///
    /// Can take minutes on large controllers.
    pub async fn forget_clients(&self, macs: &[&str]) -> Result<(), Error> {
        debug!(count = macs.len(), "forgetting clients");
        let macs: Vec<String> = macs.iter().map(|m| normalize_mac(m)).collect();
        self.command(
            &self.site_path("cmd/stamgr"),
            &json!({ "cmd": "forget-sta", "macs": macs }),
        )
        .await
    }

    async fn stamgr(&self, cmd: &str, mac: &str) -> Result<(), Error> {
        self.command(
            &self.site_path("cmd/stamgr"),
            &json!({ "cmd": cmd, "mac": normalize_mac(mac) }),
        )
        .await
    }

    /// Create a user record bound to a user group.
    ///
    /// `POST /api/s/{site}/group/user` with `{"objects": [{"data": {...}}]}`
    pub async fn create_user(&self, user: &NewUser) -> Result<Vec<Value>, Error> {
        let mut data = serde_json::to_value(user).map_err(|e| Error::Validation {
            field: "user".into(),
            reason: e.to_string(),
        })?;
        data["mac"] = json!(normalize_mac(&user.mac));
        debug!(mac = %user.mac, "creating user");
        self.post(
            &self.site_path("group/user"),
            &json!({ "objects": [{ "data": data }] }),
        )
        .await
    }

    /// Set (or clear, with `""`) the note on a user record.
    pub async fn set_client_note(&self, user_id: &str, note: &str) -> Result<(), Error> {
        debug!(user_id, "setting client note");
        self.command(
            &self.site_path(&format!("upd/user/{}", user_id.trim())),
            &json!({ "note": note }),
        )
        .await
    }

    /// Set (or clear, with `""`) the alias of a user record.
    pub async fn set_client_name(&self, user_id: &str, name: &str) -> Result<(), Error> {
        debug!(user_id, "setting client name");
        self.command(
            &self.site_path(&format!("upd/user/{}", user_id.trim())),
            &json!({ "name": name }),
        )
        .await
    }

    /// Online clients, or one client when `mac` is given.
    ///
    /// `GET /api/s/{site}/stat/sta[/{mac}]`
    pub async fn list_clients(&self, mac: Option<&str>) -> Result<Vec<Station>, Error> {
        let path = match mac {
            Some(mac) => self.site_path(&format!("stat/sta/{}", normalize_mac(mac))),
            None => self.site_path("stat/sta"),
        };
        debug!(?mac, "listing clients");
        self.get(&path).await
    }

    /// All known user records, online or not.
    pub async fn list_users(&self) -> Result<Vec<Station>, Error> {
        debug!("listing users");
        self.get(&self.site_path("list/user")).await
    }

    /// Guests with valid access seen in the last `within_hours` hours.
    pub async fn list_guests(&self, within_hours: u32) -> Result<Vec<Station>, Error> {
        debug!(within_hours, "listing guests");
        self.get_with_query(
            &self.site_path("stat/guest"),
            &[("within", within_hours.to_string())],
        )
        .await
    }

    /// Clients that connected within `history_hours` hours.
    ///
    /// The window only selects clients; the returned counters are all-time
    /// totals.
    pub async fn list_all_users(&self, history_hours: u32) -> Result<Vec<Station>, Error> {
        debug!(history_hours, "listing all users");
        self.get_with_query(
            &self.site_path("stat/alluser"),
            &[
                ("type", "all".into()),
                ("conn", "all".into()),
                ("within", history_hours.to_string()),
            ],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    use super::*;
    use crate::test_support::{last_body, logged_in, mount_ok, ok_envelope};

    #[tokio::test]
    async fn authorize_guest_sends_only_given_limits() {
        let (server, client) = logged_in(false).await;
        mount_ok(&server, "POST", "cmd/stamgr", json!([])).await;

        let limits = GuestAuthorization {
            up: Some(512),
            megabytes: Some(100),
            ap_mac: Some("AA:BB:CC:00:11:22".into()),
            ..GuestAuthorization::default()
        };
        client
            .authorize_guest("DE:AD:BE:EF:00:01", 60, &limits)
            .await
            .unwrap();

        assert_eq!(
            last_body(&server, "/api/s/default/cmd/stamgr").await,
            json!({
                "cmd": "authorize-guest",
                "mac": "de:ad:be:ef:00:01",
                "minutes": 60,
                "up": 512,
                "bytes": 100,
                "ap_mac": "aa:bb:cc:00:11:22",
            })
        );
    }

    #[tokio::test]
    async fn station_commands_use_expected_cmd_names() {
        let (server, client) = logged_in(false).await;

        Mock::given(method("POST"))
            .and(path("/api/s/default/cmd/stamgr"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([]))))
            .expect(4)
            .mount(&server)
            .await;

        client.block_client("AA:AA:AA:AA:AA:AA").await.unwrap();
        assert_eq!(
            last_body(&server, "/api/s/default/cmd/stamgr").await["cmd"],
            "block-sta"
        );
        client.unblock_client("aa:aa:aa:aa:aa:aa").await.unwrap();
        assert_eq!(
            last_body(&server, "/api/s/default/cmd/stamgr").await["cmd"],
            "unblock-sta"
        );
        client.reconnect_client("aa:aa:aa:aa:aa:aa").await.unwrap();
        assert_eq!(
            last_body(&server, "/api/s/default/cmd/stamgr").await["cmd"],
            "kick-sta"
        );
        client.unauthorize_guest("aa:aa:aa:aa:aa:aa").await.unwrap();
        assert_eq!(
            last_body(&server, "/api/s/default/cmd/stamgr").await,
            json!({ "cmd": "unauthorize-guest", "mac": "aa:aa:aa:aa:aa:aa" })
        );
    }

    #[tokio::test]
    async fn forget_clients_sends_mac_list() {
        let (server, client) = logged_in(false).await;
        mount_ok(&server, "POST", "cmd/stamgr", json!([])).await;

        client
            .forget_clients(&["AA:00:00:00:00:01", "aa:00:00:00:00:02"])
            .await
            .unwrap();

        assert_eq!(
            last_body(&server, "/api/s/default/cmd/stamgr").await,
            json!({ "cmd": "forget-sta", "macs": ["aa:00:00:00:00:01", "aa:00:00:00:00:02"] })
        );
    }

    #[tokio::test]
    async fn rejected_command_surfaces_rc() {
        let (server, client) = logged_in(false).await;

        Mock::given(method("POST"))
            .and(path("/api/s/default/cmd/stamgr"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "meta": { "rc": "error", "msg": "api.err.UnknownStation" },
                "data": []
            })))
            .mount(&server)
            .await;

        let err = client.block_client("aa:aa:aa:aa:aa:aa").await.unwrap_err();
        match err {
            Error::Api { message, .. } => assert_eq!(message, "api.err.UnknownStation"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_user_wraps_objects() {
        let (server, client) = logged_in(false).await;
        mount_ok(&server, "POST", "group/user", json!([{ "meta": { "rc": "ok" } }])).await;

        let mut user = NewUser::new("AA:BB:CC:DD:EE:FF", "grp1");
        user.name = Some("printer".into());
        client.create_user(&user).await.unwrap();

        assert_eq!(
            last_body(&server, "/api/s/default/group/user").await,
            json!({ "objects": [{ "data": {
                "mac": "aa:bb:cc:dd:ee:ff",
                "usergroup_id": "grp1",
                "name": "printer",
            }}]})
        );
    }

    #[tokio::test]
    async fn note_and_name_update_user_record() {
        let (server, client) = logged_in(false).await;

        Mock::given(method("POST"))
            .and(path("/api/s/default/upd/user/u1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([]))))
            .expect(2)
            .mount(&server)
            .await;

        client.set_client_note(" u1 ", "lobby").await.unwrap();
        assert_eq!(
            last_body(&server, "/api/s/default/upd/user/u1").await,
            json!({ "note": "lobby" })
        );
        client.set_client_name("u1", "").await.unwrap();
        assert_eq!(
            last_body(&server, "/api/s/default/upd/user/u1").await,
            json!({ "name": "" })
        );
    }

    #[tokio::test]
    async fn list_clients_parses_stations() {
        let (server, client) = logged_in(false).await;
        mount_ok(
            &server,
            "GET",
            "stat/sta/aa:bb:cc:dd:ee:ff",
            json!([{
                "_id": "c1",
                "mac": "aa:bb:cc:dd:ee:ff",
                "hostname": "laptop",
                "is_wired": false,
                "signal": -61,
                "radio_proto": "ax"
            }]),
        )
        .await;

        let stations = client.list_clients(Some("AA:BB:CC:DD:EE:FF")).await.unwrap();

        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].hostname.as_deref(), Some("laptop"));
        assert_eq!(stations[0].signal, Some(-61));
        assert_eq!(stations[0].extra["radio_proto"], "ax");
    }

    #[tokio::test]
    async fn all_users_passes_window_as_query() {
        let (server, client) = logged_in(false).await;

        Mock::given(method("GET"))
            .and(path("/api/s/default/stat/alluser"))
            .and(query_param("type", "all"))
            .and(query_param("conn", "all"))
            .and(query_param("within", "8760"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([]))))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/s/default/stat/guest"))
            .and(query_param("within", "24"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([]))))
            .expect(1)
            .mount(&server)
            .await;

        assert!(client.list_all_users(8760).await.unwrap().is_empty());
        assert!(client.list_guests(24).await.unwrap().is_empty());
    }
}
