//! Identifier codec
//!
//! Source ids are the handle with its `h:` scheme stripped; point ids add a
//! three character `pt:` marker in front of the same suffix. Both directions
//! are lossless for every handle the tree hands out.

use crate::core::error::{Error, Result};
use crate::tree::HANDLE_SCHEME;

pub const POINT_ID_PREFIX: &str = "pt:";

fn handle_suffix(handle: &str) -> Result<&str> {
    match handle.strip_prefix(HANDLE_SCHEME) {
        Some(suffix) if !suffix.is_empty() => Ok(suffix),
        _ => Err(Error::InvalidHandle {
            handle: handle.to_string(),
        }),
    }
}

/// Source id for the node owning `handle`
pub fn source_id(handle: &str) -> Result<String> {
    Ok(handle_suffix(handle)?.to_string())
}

/// Point id for the node owning `handle`
pub fn point_id(handle: &str) -> Result<String> {
    Ok(format!("{}{}", POINT_ID_PREFIX, handle_suffix(handle)?))
}

/// Recover the handle a point id was derived from
pub fn handle_for_point_id(id: &str) -> Result<String> {
    match id.strip_prefix(POINT_ID_PREFIX) {
        Some(suffix) if !suffix.is_empty() => Ok(format!("{}{}", HANDLE_SCHEME, suffix)),
        _ => Err(Error::InvalidPointId { id: id.to_string() }),
    }
}

/// Recover the handle a source id was derived from
pub fn handle_for_source_id(id: &str) -> String {
    format!("{}{}", HANDLE_SCHEME, id)
}
