// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The qrpack contributors

//! Map raw content plus its kind to the payload string that gets encoded.

use serde::Deserialize;

use crate::models::ContentKind;

/// Encryption assumed when a WiFi description does not name one.
const DEFAULT_WIFI_ENCRYPTION: &str = "WPA";

/// WiFi credentials as entered in JSON form.
#[derive(Debug, Deserialize)]
struct WifiCredentials {
    #[serde(default)]
    ssid: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    encryption: Option<String>,
}

/// Build the encodable payload for `raw` according to `kind`.
///
/// Never fails. Scheme prefixes for email, phone and SMS are added
/// unconditionally, so content that already carries `mailto:` ends up with
/// it twice.
pub fn format_payload(raw: &str, kind: ContentKind) -> String {
    match kind {
        ContentKind::Url => {
            if has_http_scheme(raw) {
                raw.to_string()
            } else {
                format!("https://{raw}")
            }
        }
        ContentKind::Email => format!("mailto:{raw}"),
        ContentKind::Phone => format!("tel:{raw}"),
        ContentKind::Sms => format!("sms:{raw}"),
        ContentKind::Wifi => format_wifi(raw).unwrap_or_else(|| raw.to_string()),
        ContentKind::Text => raw.to_string(),
    }
}

fn has_http_scheme(raw: &str) -> bool {
    let starts_with = |prefix: &str| {
        raw.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    };
    starts_with("http://") || starts_with("https://")
}

/// `WIFI:` payload from a JSON object, or `None` when `raw` is not one.
fn format_wifi(raw: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    if !value.is_object() {
        return None;
    }
    let creds: WifiCredentials = serde_json::from_value(value).ok()?;
    let encryption = creds
        .encryption
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| DEFAULT_WIFI_ENCRYPTION.to_string());
    Some(format!(
        "WIFI:T:{};S:{};P:{};;",
        encryption,
        creds.ssid.unwrap_or_default(),
        creds.password.unwrap_or_default()
    ))
}
