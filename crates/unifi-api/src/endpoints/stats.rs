// Statistics endpoints
//
// Interval reports under stat/report/{interval}.{scope}, plus speed test
// archive, IPS events, login sessions and authorizations. Report windows
// are Unix milliseconds; sessions and authorizations use seconds.

use chrono::Utc;
use serde_json::{Value, json};
use strum::{Display, EnumString};
use tracing::debug;

use crate::client::Client;
use crate::endpoints::normalize_mac;
use crate::error::Error;

const HOUR_MS: i64 = 3_600_000;
const DAY_MS: i64 = 24 * HOUR_MS;
const WEEK_MS: i64 = 7 * DAY_MS;
const WEEK_SECS: i64 = 7 * 24 * 3600;

const SITE_ATTRS: &[&str] = &[
    "bytes",
    "wan-tx_bytes",
    "wan-rx_bytes",
    "wlan_bytes",
    "num_sta",
    "lan-num_sta",
    "wlan-num_sta",
    "time",
];
const AP_ATTRS: &[&str] = &["bytes", "num_sta", "time"];
const USER_ATTRS: &[&str] = &["time", "rx_bytes", "tx_bytes"];
const GATEWAY_ATTRS: &[&str] = &["time", "mem", "cpu", "loadavg_5"];
const SPEEDTEST_ATTRS: &[&str] = &["xput_download", "xput_upload", "latency", "time"];

/// Default row cap for [`Client::ips_events`].
pub const DEFAULT_IPS_LIMIT: u32 = 10_000;
/// Default row cap for [`Client::latest_client_sessions`].
pub const DEFAULT_SESSION_LIMIT: u32 = 5;

/// Report granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Interval {
    #[strum(serialize = "5minutes")]
    FiveMinutes,
    Hourly,
    Daily,
    Monthly,
}

/// Optional bounds of a report window.
///
/// Missing bounds are filled in per report: `end` defaults to now and
/// `start` to `end` minus the report's default window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl TimeRange {
    pub fn new(start: i64, end: i64) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    fn resolve(self, now: i64, window: i64, floor_to: Option<i64>) -> (i64, i64) {
        let end = self.end.unwrap_or_else(|| match floor_to {
            Some(step) => now - now.rem_euclid(step),
            None => now,
        });
        let start = self.start.unwrap_or(end - window);
        (start, end)
    }
}

/// Client category filter for [`Client::login_sessions`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SessionKind {
    #[default]
    All,
    Guest,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Site,
    Ap,
    User,
    Gateway,
}

impl Scope {
    fn suffix(self) -> &'static str {
        match self {
            Self::Site => "site",
            Self::Ap => "ap",
            Self::User => "user",
            Self::Gateway => "gw",
        }
    }

    /// Default window in milliseconds.
    fn window(self, interval: Interval) -> i64 {
        match (self, interval) {
            (_, Interval::FiveMinutes) => 12 * HOUR_MS,
            (_, Interval::Hourly) | (Self::Ap | Self::User, Interval::Daily) => WEEK_MS,
            (Self::User, Interval::Monthly) => 13 * WEEK_MS,
            _ => 52 * WEEK_MS,
        }
    }

    /// Whether a defaulted `end` is floored to the hour.
    fn floors_end(self, interval: Interval) -> bool {
        matches!(self, Self::Site | Self::Gateway)
            && matches!(interval, Interval::Daily | Interval::Monthly)
    }

    fn attrs(self, custom: Option<&[&str]>) -> Vec<String> {
        let defaults = match self {
            Self::Site => SITE_ATTRS,
            Self::Ap => AP_ATTRS,
            Self::User => USER_ATTRS,
            Self::Gateway => GATEWAY_ATTRS,
        };
        match custom {
            None => defaults.iter().map(ToString::to_string).collect(),
            Some(custom) => {
                let lead = matches!(self, Self::User | Self::Gateway).then_some("time");
                lead.into_iter()
                    .chain(custom.iter().copied())
                    .map(str::to_owned)
                    .collect()
            }
        }
    }
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

fn now_secs() -> i64 {
    Utc::now().timestamp()
}

fn report_body(
    scope: Scope,
    interval: Interval,
    range: TimeRange,
    mac: Option<&str>,
    attrs: Option<&[&str]>,
    now: i64,
) -> Value {
    let floor = scope.floors_end(interval).then_some(HOUR_MS);
    let (start, end) = range.resolve(now, scope.window(interval), floor);
    let mut body = json!({
        "attrs": scope.attrs(attrs),
        "start": start,
        "end": end,
    });
    if let Some(mac) = mac {
        body["mac"] = json!(normalize_mac(mac));
    }
    body
}

impl Client {
    async fn report(
        &self,
        scope: Scope,
        interval: Interval,
        range: TimeRange,
        mac: Option<&str>,
        attrs: Option<&[&str]>,
    ) -> Result<Vec<Value>, Error> {
        let path = self.site_path(&format!("stat/report/{interval}.{}", scope.suffix()));
        let body = report_body(scope, interval, range, mac, attrs, now_ms());
        debug!(%interval, scope = scope.suffix(), "fetching stats report");
        self.post(&path, &body).await
    }

    /// Site-wide traffic and client counts.
    ///
    /// `POST /api/s/{site}/stat/report/{interval}.site`. Custom `attrs`
    /// replace the defaults.
    pub async fn site_stats(
        &self,
        interval: Interval,
        range: TimeRange,
        attrs: Option<&[&str]>,
    ) -> Result<Vec<Value>, Error> {
        self.report(Scope::Site, interval, range, None, attrs).await
    }

    /// Per access point stats, optionally for a single AP.
    pub async fn ap_stats(
        &self,
        interval: Interval,
        range: TimeRange,
        mac: Option<&str>,
        attrs: Option<&[&str]>,
    ) -> Result<Vec<Value>, Error> {
        self.report(Scope::Ap, interval, range, mac, attrs).await
    }

    /// Per client stats. `time` is always the first attribute.
    ///
    /// Needs "Clients Historical Data" enabled on the controller.
    pub async fn client_stats(
        &self,
        interval: Interval,
        range: TimeRange,
        mac: Option<&str>,
        attrs: Option<&[&str]>,
    ) -> Result<Vec<Value>, Error> {
        self.report(Scope::User, interval, range, mac, attrs).await
    }

    /// Gateway resource stats (`.gw` reports). Requires a UniFi gateway.
    pub async fn gateway_stats(
        &self,
        interval: Interval,
        range: TimeRange,
        attrs: Option<&[&str]>,
    ) -> Result<Vec<Value>, Error> {
        self.report(Scope::Gateway, interval, range, None, attrs)
            .await
    }

    /// Speed test results, last 24 hours by default.
    ///
    /// `POST /api/s/{site}/stat/report/archive.speedtest`
    pub async fn speedtest_results(&self, range: TimeRange) -> Result<Vec<Value>, Error> {
        let (start, end) = range.resolve(now_ms(), DAY_MS, None);
        debug!(start, end, "fetching speed test results");
        self.post(
            &self.site_path("stat/report/archive.speedtest"),
            &json!({ "attrs": SPEEDTEST_ATTRS, "start": start, "end": end }),
        )
        .await
    }

    /// IPS/IDS events, last 24 hours by default.
    pub async fn ips_events(
        &self,
        range: TimeRange,
        limit: Option<u32>,
    ) -> Result<Vec<Value>, Error> {
        let (start, end) = range.resolve(now_ms(), DAY_MS, None);
        let limit = limit.unwrap_or(DEFAULT_IPS_LIMIT);
        debug!(start, end, limit, "fetching IPS events");
        self.get_with_query(
            &self.site_path("stat/ips/event"),
            &[
                ("start", start.to_string()),
                ("end", end.to_string()),
                ("_limit", limit.to_string()),
            ],
        )
        .await
    }

    /// Login sessions, last 7 days by default. Bounds are in seconds.
    pub async fn login_sessions(
        &self,
        range: TimeRange,
        mac: Option<&str>,
        kind: SessionKind,
    ) -> Result<Vec<Value>, Error> {
        let (start, end) = range.resolve(now_secs(), WEEK_SECS, None);
        debug!(start, end, %kind, "fetching login sessions");
        let mut query = vec![
            ("type", kind.to_string()),
            ("start", start.to_string()),
            ("end", end.to_string()),
        ];
        if let Some(mac) = mac {
            query.push(("mac", normalize_mac(mac)));
        }
        self.get_with_query(&self.site_path("stat/session"), &query)
            .await
    }

    /// The most recent `limit` sessions of one client (default 5).
    pub async fn latest_client_sessions(
        &self,
        mac: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Value>, Error> {
        let limit = limit.unwrap_or(DEFAULT_SESSION_LIMIT);
        debug!(mac, limit, "fetching latest client sessions");
        self.get_with_query(
            &self.site_path("stat/session"),
            &[
                ("mac", normalize_mac(mac)),
                ("_limit", limit.to_string()),
                ("_sort", "-assoc_time".into()),
            ],
        )
        .await
    }

    /// Guest authorizations, last 7 days by default. Bounds are in seconds.
    pub async fn authorizations(&self, range: TimeRange) -> Result<Vec<Value>, Error> {
        let (start, end) = range.resolve(now_secs(), WEEK_SECS, None);
        debug!(start, end, "fetching authorizations");
        self.get_with_query(
            &self.site_path("stat/authorization"),
            &[("start", start.to_string()), ("end", end.to_string())],
        )
        .await
    }
}
