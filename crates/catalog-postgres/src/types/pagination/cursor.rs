//! Cursor-based pagination for database queries.
//!
//! A cursor is the ordering key `(created_at, id)` of the last row of a page,
//! rendered as `<RFC 3339 timestamp>,<uuid>` and wrapped in standard base64.
//! The identifier breaks ties between rows created at the same instant, which
//! keeps the order total and page boundaries free of duplicates and gaps.

use std::fmt;
use std::str::FromStr;

use base64::prelude::*;
use jiff::Timestamp;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of items per page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Separator between the timestamp and the identifier in the decoded payload.
const FIELD_SEPARATOR: char = ',';

/// Reasons a cursor token fails to decode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    /// The token is present but empty.
    #[error("cursor is empty")]
    Empty,
    /// The token is not valid standard base64.
    #[error("cursor is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The decoded payload is not UTF-8 text.
    #[error("cursor payload is not valid UTF-8")]
    Utf8,
    /// The payload does not consist of exactly two fields.
    #[error("cursor payload has {0} fields, expected 2")]
    FieldCount(usize),
    /// The first field is not an RFC 3339 timestamp.
    #[error("cursor timestamp is invalid: {0}")]
    Timestamp(String),
    /// The second field is not a UUID.
    #[error("cursor identifier is invalid: {0}")]
    Identifier(#[from] uuid::Error),
}

/// A position in a result set ordered by `(created_at, id)` ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(into = "String", try_from = "String")]
pub struct Cursor {
    /// Creation timestamp of the last seen item.
    pub timestamp: Timestamp,
    /// Identifier of the last seen item (tiebreaker).
    pub id: Uuid,
}

impl Cursor {
    /// Creates a new cursor from a timestamp and identifier.
    pub fn new(timestamp: Timestamp, id: Uuid) -> Self {
        Self { timestamp, id }
    }

    /// Encodes the cursor as an opaque standard base64 token.
    pub fn encode(&self) -> String {
        let payload = format!("{}{}{}", self.timestamp, FIELD_SEPARATOR, self.id);
        BASE64_STANDARD.encode(payload.as_bytes())
    }

    /// Decodes a cursor from a token produced by [`Cursor::encode`].
    ///
    /// An absent cursor must be handled by the caller: the empty string is
    /// rejected with [`CursorError::Empty`] rather than treated as a start
    /// position.
    pub fn decode(token: &str) -> Result<Self, CursorError> {
        if token.is_empty() {
            return Err(CursorError::Empty);
        }

        let bytes = BASE64_STANDARD.decode(token)?;
        let payload = String::from_utf8(bytes).map_err(|_| CursorError::Utf8)?;

        let fields: Vec<&str> = payload.split(FIELD_SEPARATOR).collect();
        let [timestamp, id] = fields.as_slice() else {
            return Err(CursorError::FieldCount(fields.len()));
        };

        let timestamp = timestamp
            .parse::<Timestamp>()
            .map_err(|err| CursorError::Timestamp(err.to_string()))?;
        let id = id.parse::<Uuid>()?;

        Ok(Self { timestamp, id })
    }

    /// Returns whether a row with the given ordering key sorts strictly after this cursor.
    pub fn precedes(&self, timestamp: Timestamp, id: Uuid) -> bool {
        (timestamp, id) > (self.timestamp, self.id)
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Cursor {
    type Err = CursorError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl From<Cursor> for String {
    #[inline]
    fn from(cursor: Cursor) -> Self {
        cursor.encode()
    }
}

impl TryFrom<String> for Cursor {
    type Error = CursorError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::decode(&value)
    }
}

/// Keyset pagination parameters for database queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPagination {
    /// Maximum number of records to return.
    pub limit: i64,
    /// Cursor pointing to the last item of the previous page.
    pub after: Option<Cursor>,
}

impl CursorPagination {
    /// Creates a first-page pagination with the given limit.
    pub fn new(limit: i64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_PAGE_SIZE),
            after: None,
        }
    }

    /// Creates pagination that resumes strictly after the given cursor.
    pub fn after(limit: i64, cursor: Cursor) -> Self {
        Self {
            after: Some(cursor),
            ..Self::new(limit)
        }
    }

    /// Checks if we have a cursor to paginate from.
    #[inline]
    pub fn has_cursor(&self) -> bool {
        self.after.is_some()
    }
}

/// Result of a cursor-paginated query.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorPage<T> {
    /// The items in this page, ascending by ordering key.
    pub items: Vec<T>,
    /// Cursor to fetch the next page. Present only for full pages.
    pub next_cursor: Option<Cursor>,
}

impl<T> CursorPage<T> {
    /// Creates a cursor page from at most `limit` items.
    ///
    /// A full page carries the key of its last item as the next cursor; a
    /// short page signals the end of the result set.
    pub fn new<F>(items: Vec<T>, limit: i64, key_fn: F) -> Self
    where
        F: Fn(&T) -> (Timestamp, Uuid),
    {
        let is_full = limit > 0 && items.len() as i64 == limit;
        let next_cursor = if is_full {
            items.last().map(|item| {
                let (timestamp, id) = key_fn(item);
                Cursor::new(timestamp, id)
            })
        } else {
            None
        };

        Self { items, next_cursor }
    }

    /// Returns true if there may be more items to fetch.
    #[inline]
    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }

    /// Returns true if the page holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
