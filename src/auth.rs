//! HMAC request signing.
//!
//! Every API call carries an HMAC-SHA256 signature over a canonical string
//! built from the access key, HTTP method, signed path, a millisecond
//! timestamp, and the User-Agent. The server recomputes the same string, so
//! all five parts must match byte for byte.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::clients::HttpMethod;
use crate::config::DcmConfig;

type HmacSha256 = Hmac<Sha256>;

/// The material produced by signing a single request.
///
/// One signature is valid for exactly one method, path, and timestamp;
/// a fresh one is computed per call.
#[derive(Clone, Debug)]
pub struct RequestSignature {
    /// Millisecond UNIX timestamp captured when the signature was computed.
    pub timestamp: i64,
    /// Base64-encoded HMAC-SHA256 digest of the canonical string.
    pub signature: String,
    /// The access key the signature was computed for.
    pub access_key: String,
    /// The User-Agent string signed into the canonical string.
    pub user_agent: String,
}

/// Signs a request for the given method and resource path, using the
/// current time.
///
/// `path` is the resource path without the base path prefix, for example
/// `admin/Job/123`.
#[must_use]
pub fn sign(config: &DcmConfig, method: HttpMethod, path: &str) -> RequestSignature {
    sign_at(config, method, path, Utc::now().timestamp_millis())
}

/// Signs a request at an explicit millisecond timestamp.
///
/// [`sign`] is the normal entry point; this exists so signatures can be
/// reproduced deterministically.
#[must_use]
pub fn sign_at(
    config: &DcmConfig,
    method: HttpMethod,
    path: &str,
    timestamp: i64,
) -> RequestSignature {
    let access_key = config.access_key().as_ref();
    let base_path = config.base_path();
    let user_agent = config.user_agent();

    let canonical =
        format!("{access_key}:{method}:{base_path}/{path}:{timestamp}:{user_agent}");

    let mut mac = HmacSha256::new_from_slice(config.secret_key().as_ref().as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(canonical.as_bytes());
    let signature = BASE64.encode(mac.finalize().into_bytes());

    RequestSignature {
        timestamp,
        signature,
        access_key: access_key.to_string(),
        user_agent: user_agent.to_string(),
    }
}
