// Controller system endpoints (cmd/system)

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::client::Client;
use crate::error::Error;

/// Firmware auto-update schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoUpdateSettings {
    pub enabled: bool,
    /// Hour of day, 0-23.
    pub hour: u8,
    /// Three-letter day: `sun`, `mon`, ... `sat`.
    pub day: String,
    pub timezone: String,
}

impl Default for AutoUpdateSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            hour: 4,
            day: "sun".into(),
            timezone: "America/Los_Angeles".into(),
        }
    }
}

impl Client {
    /// Configure the auto-update schedule.
    ///
    /// `POST /api/s/{site}/cmd/system` with `{"cmd": "set-auto-update-settings", ...}`
    pub async fn set_auto_update_settings(
        &self,
        settings: &AutoUpdateSettings,
    ) -> Result<(), Error> {
        if settings.hour > 23 {
            return Err(Error::Validation {
                field: "hour".into(),
                reason: format!("{} is not an hour of the day (0-23)", settings.hour),
            });
        }
        debug!(
            enabled = settings.enabled,
            hour = settings.hour,
            day = %settings.day,
            "setting auto-update schedule"
        );
        self.command(
            &self.site_path("cmd/system"),
            &json!({
                "cmd": "set-auto-update-settings",
                "enabled": settings.enabled,
                "hour": settings.hour,
                "day": settings.day,
                "timezone": settings.timezone,
            }),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::test_support::{last_body, logged_in, mount_ok};

    #[tokio::test]
    async fn default_schedule_body() {
        let (server, client) = logged_in(false).await;
        mount_ok(&server, "POST", "cmd/system", json!([])).await;

        client
            .set_auto_update_settings(&AutoUpdateSettings::default())
            .await
            .unwrap();

        assert_eq!(
            last_body(&server, "/api/s/default/cmd/system").await,
            json!({
                "cmd": "set-auto-update-settings",
                "enabled": true,
                "hour": 4,
                "day": "sun",
                "timezone": "America/Los_Angeles",
            })
        );
    }

    #[tokio::test]
    async fn out_of_range_hour_is_rejected() {
        let (_server, client) = logged_in(false).await;
        let settings = AutoUpdateSettings {
            hour: 24,
            ..AutoUpdateSettings::default()
        };

        let err = client.set_auto_update_settings(&settings).await.unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }
}
