//! Adapter for the server-rendered comps document.
//!
//! The bundle is not served on its own: the site framework embeds it in its
//! dehydrated query cache. This module is the only code that knows that
//! shape; everything downstream works with [`RawBundle`].

use serde::Deserialize;
use serde_json::Value;
use tftstats_types::{FetchError, RawBundle};

/// JSON pointer to the bundle inside the comps document.
pub const BUNDLE_DATA_POINTER: &str = "/props/pageProps/dehydratedState/queries/0/data";

/// Extract the bundle from a comps document.
///
/// A missing segment, a non-object payload, or a collection of the wrong
/// type is a [`FetchError::MalformedResponse`].
pub fn unwrap_dehydrated(document: &Value) -> Result<RawBundle, FetchError> {
    let mut current = document;
    let mut walked = String::new();
    for segment in BUNDLE_DATA_POINTER.split('/').skip(1) {
        walked.push('/');
        walked.push_str(segment);
        let next = match segment.parse::<usize>() {
            Ok(index) => current.get(index),
            Err(_) => current.get(segment),
        };
        current = next.ok_or_else(|| FetchError::MalformedResponse {
            message: format!("missing '{}' in comps document", walked),
        })?;
    }

    if !current.is_object() {
        return Err(FetchError::MalformedResponse {
            message: format!("expected object at '{}', found {}", BUNDLE_DATA_POINTER, kind(current)),
        });
    }

    RawBundle::deserialize(current)
        .map_err(|e| FetchError::MalformedResponse { message: format!("bundle payload: {}", e) })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
