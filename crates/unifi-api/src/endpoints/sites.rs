// Site, health and alarm endpoints
//
// Site listing is controller-scoped (`/api/self/sites`); everything else
// here is site-scoped. Site creation and deletion go through cmd/sitemgr
// on the currently selected site.

use serde_json::{Value, json};
use tracing::debug;

use crate::auth::ControllerFlavor;
use crate::client::Client;
use crate::error::Error;
use crate::models::{Alarm, Site};

impl Client {
    /// List all sites visible to the authenticated user.
    ///
    /// `GET /api/self/sites` (controller-level, not site-scoped). UniFi OS
    /// serves it behind the network proxy even though the path is not
    /// site-scoped, so the proxied route is requested explicitly there.
    pub async fn list_sites(&self) -> Result<Vec<Site>, Error> {
        let path = match self.flavor() {
            Some(ControllerFlavor::UnifiOs) => {
                format!("{}/api/self/sites", ControllerFlavor::NETWORK_PROXY)
            }
            _ => "/api/self/sites".to_owned(),
        };
        debug!(%path, "listing sites");
        self.get(&path).await
    }

    /// Per-site health and device counters for every site.
    ///
    /// `GET /api/s/{site}/stat/sites`
    pub async fn site_stats_summary(&self) -> Result<Vec<Value>, Error> {
        debug!("fetching site stats summary");
        self.get(&self.site_path("stat/sites")).await
    }

    /// Create a site. `name` defaults to a controller-generated slug.
    ///
    /// `POST /api/s/{site}/cmd/sitemgr` with `{"cmd": "add-site", "desc": ...}`
    pub async fn create_site(&self, desc: &str, name: Option<&str>) -> Result<Vec<Site>, Error> {
        debug!(desc, ?name, "creating site");
        let mut body = json!({ "cmd": "add-site", "desc": desc });
        if let Some(name) = name {
            body["name"] = json!(name);
        }
        self.post(&self.site_path("cmd/sitemgr"), &body).await
    }

    /// Delete a site by its `_id` (not its slug).
    pub async fn delete_site(&self, site_id: &str) -> Result<(), Error> {
        debug!(site_id, "deleting site");
        self.command(
            &self.site_path("cmd/sitemgr"),
            &json!({ "cmd": "delete-site", "site": site_id }),
        )
        .await
    }

    /// Health of each subsystem (wan, lan, wlan, vpn, www).
    ///
    /// `GET /api/s/{site}/stat/health`
    pub async fn list_health(&self) -> Result<Vec<Value>, Error> {
        debug!("fetching health");
        self.get(&self.site_path("stat/health")).await
    }

    /// Dashboard time series (latency, throughput).
    pub async fn list_dashboard(&self) -> Result<Vec<Value>, Error> {
        debug!("fetching dashboard");
        self.get(&self.site_path("stat/dashboard")).await
    }

    /// List alarms, optionally filtered on the archived flag.
    ///
    /// `GET /api/s/{site}/list/alarm[?archived=...]`
    pub async fn list_alarms(&self, archived: Option<bool>) -> Result<Vec<Alarm>, Error> {
        debug!(?archived, "listing alarms");
        let query: Vec<(&str, String)> = archived
            .map(|a| ("archived", a.to_string()))
            .into_iter()
            .collect();
        self.get_with_query(&self.site_path("list/alarm"), &query)
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

    use crate::test_support::{last_body, logged_in, mount_ok, ok_envelope};

    #[tokio::test]
    async fn legacy_sites_are_controller_scoped() {
        let (server, client) = logged_in(false).await;

        Mock::given(method("GET"))
            .and(path("/api/self/sites"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([
                { "_id": "s1", "name": "default", "desc": "Default", "role": "admin" },
                { "_id": "s2", "name": "k2ab81xy", "desc": "Branch" }
            ]))))
            .expect(1)
            .mount(&server)
            .await;

        let sites = client.list_sites().await.unwrap();

        assert_eq!(sites.len(), 2);
        assert_eq!(sites[1].name, "k2ab81xy");
        assert_eq!(sites[1].desc.as_deref(), Some("Branch"));
    }

    #[tokio::test]
    async fn unifi_os_sites_go_through_proxy() {
        let (server, client) = logged_in(true).await;

        Mock::given(method("GET"))
            .and(path("/proxy/network/api/self/sites"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([]))))
            .expect(1)
            .mount(&server)
            .await;

        assert!(client.list_sites().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_and_delete_site_use_sitemgr() {
        let (server, client) = logged_in(false).await;

        Mock::given(method("POST"))
            .and(path("/api/s/default/cmd/sitemgr"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([
                { "_id": "s9", "name": "lab", "desc": "Lab" }
            ]))))
            .expect(2)
            .mount(&server)
            .await;

        let created = client.create_site("Lab", Some("lab")).await.unwrap();
        assert_eq!(created[0].id, "s9");
        assert_eq!(
            last_body(&server, "/api/s/default/cmd/sitemgr").await,
            json!({ "cmd": "add-site", "desc": "Lab", "name": "lab" })
        );

        client.delete_site("s9").await.unwrap();
        assert_eq!(
            last_body(&server, "/api/s/default/cmd/sitemgr").await,
            json!({ "cmd": "delete-site", "site": "s9" })
        );
    }

    #[tokio::test]
    async fn health_and_dashboard_return_raw_rows() {
        let (server, client) = logged_in(false).await;
        mount_ok(
            &server,
            "GET",
            "stat/health",
            json!([{ "subsystem": "wan", "status": "ok" }]),
        )
        .await;
        mount_ok(&server, "GET", "stat/dashboard", json!([])).await;
        mount_ok(&server, "GET", "stat/sites", json!([{ "name": "default" }])).await;

        let health = client.list_health().await.unwrap();
        assert_eq!(health[0]["subsystem"], "wan");
        assert!(client.list_dashboard().await.unwrap().is_empty());
        assert_eq!(client.site_stats_summary().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn alarms_filter_on_archived() {
        let (server, client) = logged_in(false).await;

        Mock::given(method("GET"))
            .and(path("/api/s/default/list/alarm"))
            .and(query_param("archived", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([
                { "_id": "a1", "key": "EVT_GW_WANTransition", "archived": false }
            ]))))
            .expect(1)
            .mount(&server)
            .await;

        let alarms = client.list_alarms(Some(false)).await.unwrap();
        assert_eq!(alarms[0].key.as_deref(), Some("EVT_GW_WANTransition"));
    }
}
