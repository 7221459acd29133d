// Response envelope
//
// Every management endpoint wraps its payload:
//   { "meta": { "rc": "ok", "msg": "optional" }, "data": [...] }
// HTTP 200 only means the controller parsed the request; `meta.rc` says
// whether it actually carried out the command.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// The `{ meta, data }` wrapper around every response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub meta: Meta,
    pub data: T,
}

/// Metadata from the envelope. `rc == "ok"` means success.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Meta {
    pub rc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl Meta {
    pub fn is_ok(&self) -> bool {
        self.rc == "ok"
    }
}

impl<T> Envelope<T> {
    pub fn is_ok(&self) -> bool {
        self.meta.is_ok()
    }

    /// Strip the envelope, turning a non-`ok` rc into [`Error::Api`].
    pub fn into_result(self) -> Result<T, Error> {
        if self.meta.is_ok() {
            return Ok(self.data);
        }
        let rc = self.meta.rc;
        Err(Error::Api {
            message: self.meta.msg.unwrap_or_else(|| format!("rc={rc}")),
            rc,
        })
    }
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Interpret a dispatched JSON body as an envelope.
    ///
    /// `meta` is mandatory. A missing `data` field is treated as an empty
    /// list, which is what command endpoints return on older firmware.
    pub fn from_value(body: Value) -> Result<Self, Error> {
        let Value::Object(mut map) = body else {
            return Err(deserialization("response is not a JSON object", &body));
        };

        let meta_value = map
            .remove("meta")
            .ok_or_else(|| deserialization("missing `meta` field", &Value::Object(map.clone())))?;
        let meta: Meta = serde_json::from_value(meta_value.clone())
            .map_err(|e| deserialization(&e.to_string(), &meta_value))?;

        // A rejected command often carries no usable data; report the rc
        // rather than a shape mismatch.
        if !meta.is_ok() {
            let rc = meta.rc;
            return Err(Error::Api {
                message: meta.msg.unwrap_or_else(|| format!("rc={rc}")),
                rc,
            });
        }

        let data_value = map.remove("data").unwrap_or_else(|| Value::Array(Vec::new()));
        let data = serde_json::from_value(data_value.clone())
            .map_err(|e| deserialization(&e.to_string(), &data_value))?;

        Ok(Self { meta, data })
    }
}

fn deserialization(message: &str, body: &Value) -> Error {
    let body = body.to_string();
    let preview: String = body.chars().take(200).collect();
    Error::Deserialization {
        message: format!("{message} (body preview: {preview:?})"),
        body,
    }
}
