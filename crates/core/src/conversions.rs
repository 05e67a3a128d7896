//! Server-side relay for the Meta Conversions API.
//!
//! The browser posts `{ "data": [event, ..] }`. Before forwarding we fill in
//! what only the server knows (client IP and user agent), default the event
//! bookkeeping fields and hash plaintext identifiers.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::Client;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use time::OffsetDateTime;
use url::Url;
use uuid::Uuid;

use crate::{Result, VitrineError};

pub const ENV_PIXEL_ID: &str = "META_PIXEL_ID";
pub const ENV_ACCESS_TOKEN: &str = "META_ACCESS_TOKEN";
pub const ENV_API_VERSION: &str = "META_API_VERSION";

pub const DEFAULT_API_VERSION: &str = "v18.0";
pub const DEFAULT_GRAPH_URL: &str = "https://graph.facebook.com";

/// Identifiers that must reach the API hashed.
const HASHED_FIELDS: [&str; 2] = ["em", "ph"];

static SHA256_HEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-f0-9]{64}$").expect("hash pattern is valid"));

#[derive(Debug, Clone)]
pub struct ConversionsConfig {
    pub pixel_id: Option<String>,
    pub access_token: Option<String>,
    pub api_version: String,
    pub graph_url: Url,
}

impl Default for ConversionsConfig {
    fn default() -> Self {
        Self {
            pixel_id: None,
            access_token: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            graph_url: Url::parse(DEFAULT_GRAPH_URL).expect("static URL is valid"),
        }
    }
}

impl ConversionsConfig {
    /// Missing credentials are not an error here; [`ConversionsClient::send`]
    /// refuses to forward until both are set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        Self {
            pixel_id: non_empty(ENV_PIXEL_ID),
            access_token: non_empty(ENV_ACCESS_TOKEN),
            api_version: non_empty(ENV_API_VERSION).unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            ..Default::default()
        }
    }

    pub fn is_configured(&self) -> bool {
        self.pixel_id.is_some() && self.access_token.is_some()
    }

    /// Events endpoint for the configured pixel.
    pub fn events_url(&self) -> Result<Url> {
        let (Some(pixel_id), Some(token)) = (&self.pixel_id, &self.access_token) else {
            return Err(VitrineError::Config("Meta pixel id or access token is not configured".to_string()));
        };
        let base = self.graph_url.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{}/{}/{}/events", base, self.api_version, pixel_id))
            .map_err(|e| VitrineError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut().append_pair("access_token", token);
        Ok(url)
    }
}

/// SHA-256 hex digest of a normalized identifier, unless already hashed.
pub fn hash_identifier(field: &str, value: &str) -> String {
    if SHA256_HEX.is_match(value) {
        return value.to_string();
    }
    let normalized = match field {
        "ph" => value.chars().filter(char::is_ascii_digit).collect(),
        _ => value.trim().to_lowercase(),
    };
    format!("{:x}", Sha256::digest(normalized.as_bytes()))
}

fn hash_value(field: &str, value: &mut Value) {
    match value {
        Value::String(s) => *s = hash_identifier(field, s),
        Value::Array(items) => items.iter_mut().for_each(|item| hash_value(field, item)),
        _ => {}
    }
}

fn augment_event(event: &mut Map<String, Value>, ip: Option<&str>, user_agent: Option<&str>) {
    let user_data = event.entry("user_data").or_insert_with(|| Value::Object(Map::new()));
    if !user_data.is_object() {
        *user_data = Value::Object(Map::new());
    }
    if let Value::Object(user_data) = user_data {
        if let Some(ip) = ip {
            user_data.entry("client_ip_address").or_insert_with(|| Value::from(ip));
        }
        if let Some(ua) = user_agent {
            user_data.entry("client_user_agent").or_insert_with(|| Value::from(ua));
        }
        for field in HASHED_FIELDS {
            if let Some(value) = user_data.get_mut(field) {
                hash_value(field, value);
            }
        }
    }

    event.entry("event_time").or_insert_with(|| Value::from(OffsetDateTime::now_utc().unix_timestamp()));
    event.entry("event_id").or_insert_with(|| Value::from(Uuid::new_v4().to_string()));
    event.entry("action_source").or_insert_with(|| Value::from("website"));
}

/// Fills in server-side fields on every event of `payload` and returns the
/// number of events.
///
/// Caller-provided values are kept. A payload without a `data` array is
/// rejected with a 400.
pub fn augment_events(payload: &mut Value, ip: Option<&str>, user_agent: Option<&str>) -> Result<usize> {
    let Some(events) = payload.get_mut("data").and_then(Value::as_array_mut) else {
        return Err(VitrineError::Conversions {
            status: 400,
            body: r#"{"error":"payload must contain a data array"}"#.to_string(),
        });
    };

    let mut count = 0;
    for event in events.iter_mut() {
        if let Value::Object(event) = event {
            augment_event(event, ip, user_agent);
            count += 1;
        }
    }
    Ok(count)
}

/// Upstream success response, passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relayed {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct ConversionsClient {
    http: Client,
    config: ConversionsConfig,
}

impl ConversionsClient {
    pub fn new(config: ConversionsConfig, timeout: u64) -> Result<Self> {
        let http = Client::builder().timeout(Duration::from_secs(timeout)).build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ConversionsConfig {
        &self.config
    }

    /// Forwards an already augmented payload and returns the upstream response verbatim.
    pub async fn send(&self, payload: &Value) -> Result<Relayed> {
        let url = self.config.events_url()?;
        let response = self.http.post(url).json(payload).send().await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "conversions API rejected events");
            return Err(VitrineError::Conversions { status: status.as_u16(), body });
        }
        Ok(Relayed { status: status.as_u16(), content_type, body })
    }
}
