// Flash messages and their signed cookie round trip
use axum::http::{header, HeaderMap, HeaderValue};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

// Fixed signing secret; rotating it drops any pending flash messages.
const FLASH_SECRET: &str = "change-me-dashboard-secret";
const FLASH_COOKIE: &str = "_flash";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Error,
    Success,
}

impl FlashLevel {
    /// CSS class suffix used by the page templates.
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Error => "error",
            FlashLevel::Success => "success",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub text: String,
}

impl FlashMessage {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            text: text.into(),
        }
    }
}

/// Per-request queue of flash messages. Incoming messages are restored from
/// the signed cookie; whatever the handler does not consume is written back
/// out, so messages survive exactly one render.
#[derive(Debug, Default)]
pub struct FlashBag {
    messages: Vec<FlashMessage>,
}

impl FlashBag {
    /// Restore pending messages from the request's cookie header. A missing,
    /// malformed, or tampered cookie yields an empty bag.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let messages = cookie_value(headers)
            .and_then(decode_cookie)
            .unwrap_or_default();
        Self { messages }
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.messages.push(FlashMessage::error(text));
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.messages.push(FlashMessage::success(text));
    }

    /// Consume every queued message for rendering.
    pub fn take_all(&mut self) -> Vec<FlashMessage> {
        std::mem::take(&mut self.messages)
    }

    /// The Set-Cookie header for whatever is left in the bag. An empty bag
    /// expires the cookie so consumed messages are not shown twice.
    pub fn into_set_cookie(self) -> HeaderValue {
        let cookie = if self.messages.is_empty() {
            format!("{}=; Path=/; HttpOnly; Max-Age=0", FLASH_COOKIE)
        } else {
            format!(
                "{}={}; Path=/; HttpOnly",
                FLASH_COOKIE,
                encode_cookie(&self.messages)
            )
        };
        HeaderValue::from_str(&cookie).unwrap()
    }
}

fn cookie_value(headers: &HeaderMap) -> Option<&str> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(FLASH_COOKIE)?.strip_prefix('='))
}

/// Serialize messages to `base64(json).base64(hmac)`.
fn encode_cookie(messages: &[FlashMessage]) -> String {
    let payload = serde_json::to_vec(messages).unwrap_or_default();
    let signature = sign(&payload);
    format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(&payload),
        URL_SAFE_NO_PAD.encode(signature)
    )
}

/// Verify and deserialize a cookie value. None when the signature does not
/// match, which silently drops forged or corrupted cookies.
fn decode_cookie(value: &str) -> Option<Vec<FlashMessage>> {
    let (payload_b64, signature_b64) = value.split_once('.')?;
    let payload = URL_SAFE_NO_PAD.decode(payload_b64).ok()?;
    let signature = URL_SAFE_NO_PAD.decode(signature_b64).ok()?;

    let mut mac = HmacSha256::new_from_slice(FLASH_SECRET.as_bytes()).ok()?;
    mac.update(&payload);
    mac.verify_slice(&signature).ok()?;

    serde_json::from_slice(&payload).ok()
}

fn sign(payload: &[u8]) -> Vec<u8> {
    // The secret is a fixed-size string, so key setup cannot fail.
    let mut mac = HmacSha256::new_from_slice(FLASH_SECRET.as_bytes()).unwrap();
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}
