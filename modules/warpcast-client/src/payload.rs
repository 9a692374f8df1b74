//! Decoding of saved or fetched cast payloads.
//!
//! A payload is either a bare array of casts or an object carrying a `casts`
//! array. Each cast is decoded on its own so a bad one is reported by its
//! position and the field that failed, not as an opaque whole-file error.

use castgraph_common::{Engagement, RawAuthor, RawCast};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, WarpcastError};

type FieldCheck = (&'static str, fn(Option<&Value>) -> bool);

// Leaves come before their containers so the narrowest failing path wins.
const FIELD_CHECKS: &[FieldCheck] = &[
    ("id", rejects::<Option<String>>),
    ("text", rejects::<Option<String>>),
    ("timestamp", rejects::<Option<i64>>),
    ("author.username", rejects::<Option<String>>),
    ("author.displayName", rejects::<Option<String>>),
    ("author.profileImage", rejects::<Option<String>>),
    ("author", rejects::<RawAuthor>),
    ("engagement.likes", rejects::<Option<u64>>),
    ("engagement.recasts", rejects::<Option<u64>>),
    ("engagement.replies", rejects::<Option<u64>>),
    ("engagement.total", rejects::<Option<u64>>),
    ("engagement", rejects::<Engagement>),
];

pub(crate) fn decode_casts(payload: Value) -> Result<Vec<RawCast>> {
    let casts = match payload {
        Value::Array(casts) => casts,
        Value::Object(mut body) => match body.remove("casts") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(casts)) => casts,
            Some(other) => {
                return Err(WarpcastError::Parse(format!(
                    "`casts` must be an array, found {}",
                    kind(&other)
                )))
            }
        },
        other => {
            return Err(WarpcastError::Parse(format!(
                "expected a cast array or an object with a `casts` array, found {}",
                kind(&other)
            )))
        }
    };

    casts
        .iter()
        .enumerate()
        .map(|(position, cast)| decode_cast(position, cast))
        .collect()
}

fn decode_cast(position: usize, cast: &Value) -> Result<RawCast> {
    RawCast::deserialize(cast).map_err(|err| WarpcastError::MalformedCast {
        position,
        field: offending_field(cast).unwrap_or("cast"),
        message: err.to_string(),
    })
}

fn offending_field(cast: &Value) -> Option<&'static str> {
    if !cast.is_object() {
        return None;
    }
    FIELD_CHECKS
        .iter()
        .find(|(path, check)| check(cast.pointer(&format!("/{}", path.replace('.', "/")))))
        .map(|(path, _)| *path)
}

fn rejects<T: DeserializeOwned>(value: Option<&Value>) -> bool {
    value.is_some_and(|v| T::deserialize(v).is_err())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
