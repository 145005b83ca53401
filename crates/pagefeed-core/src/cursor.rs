//! Cursor codec.
//!
//! A cursor is the position `(created_at, id)` of the last article a client
//! has seen. The wire token is compact JSON encoded with URL-safe base64
//! without padding, so it can travel in query strings, headers, and JSON
//! bodies without escaping. The token carries ordering position only; it
//! is not signed and grants no access.

use std::cmp::Ordering;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ArticleId;

/// Upper bound on accepted token length, checked before any decoding.
pub const MAX_CURSOR_TOKEN_LEN: usize = 512;

/// A position in the feed ordering.
///
/// The natural ordering of keys is ascending `(created_at, id)`; the feed is
/// listed in the reverse of it. `id` breaks ties between articles sharing a
/// timestamp, which makes the ordering total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CursorKey {
    pub created_at: DateTime<Utc>,
    pub id: ArticleId,
}

impl CursorKey {
    pub fn new(created_at: DateTime<Utc>, id: ArticleId) -> Self {
        Self { created_at, id }
    }

    /// Check whether `candidate` comes strictly after this position when
    /// listing newest first.
    ///
    /// Equivalent to `candidate.created_at < self.created_at ||
    /// (candidate.created_at == self.created_at && candidate.id < self.id)`.
    pub fn admits(&self, candidate: &CursorKey) -> bool {
        candidate < self
    }

    /// Encode this position as an opaque token.
    pub fn encode(&self) -> String {
        encode(self.created_at, self.id)
    }
}

impl Ord for CursorKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.created_at
            .cmp(&other.created_at)
            .then(self.id.cmp(&other.id))
    }
}

impl PartialOrd for CursorKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct WireCursor {
    t: DateTime<Utc>,
    i: ArticleId,
}

/// Why a token failed to decode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CursorDecodeError {
    #[error("cursor token is empty")]
    Empty,

    #[error("cursor token exceeds max length: {len} chars (max {max})")]
    TooLong { len: usize, max: usize },

    #[error("cursor token is not valid base64: {message}")]
    Base64 { message: String },

    #[error("cursor payload is malformed: {message}")]
    Payload { message: String },
}

/// Encode a feed position into an opaque token.
///
/// The same input always yields the same token.
pub fn encode(created_at: DateTime<Utc>, id: ArticleId) -> String {
    let wire = WireCursor { t: created_at, i: id };
    // Serializing a struct of a timestamp and an integer cannot fail.
    let json = serde_json::to_vec(&wire).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

/// Decode a token, treating every malformed input as "no cursor".
pub fn decode(token: &str) -> Option<CursorKey> {
    try_decode(token).ok()
}

/// Decode a token, reporting why it was rejected.
///
/// Surrounding whitespace is trimmed.
pub fn try_decode(token: &str) -> Result<CursorKey, CursorDecodeError> {
    let token = token.trim();

    if token.is_empty() {
        return Err(CursorDecodeError::Empty);
    }

    if token.len() > MAX_CURSOR_TOKEN_LEN {
        return Err(CursorDecodeError::TooLong {
            len: token.len(),
            max: MAX_CURSOR_TOKEN_LEN,
        });
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|e| CursorDecodeError::Base64 {
            message: e.to_string(),
        })?;

    let wire: WireCursor =
        serde_json::from_slice(&bytes).map_err(|e| CursorDecodeError::Payload {
            message: e.to_string(),
        })?;

    Ok(CursorKey::new(wire.t, wire.i))
}
