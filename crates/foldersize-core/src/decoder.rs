/// Tree decoder: JSON payload -> `Vec<FileSystemEntry>`.
///
/// The payload comes from the directory scanner as an opaque string. Three
/// top-level shapes are accepted:
///
/// 1. `{ "DirectoryItem": { .. } }`: a single wrapped root directory.
/// 2. `[ Item, Item, .. ]`: a list of wrapped items.
/// 3. Anything else: the whole value is read as the fields of one root
///    directory. This is what the scanner actually emits (a bare directory
///    object) and is kept as a compatibility branch, not as an error path.
///
/// Items below the root are tag driven. An item carrying neither a
/// `FileItem` nor a `DirectoryItem` key fails the **whole** decode: partially
/// decoded siblings are discarded and [`decode_tree`] returns an empty list.
///
/// Parsing and item decoding recurse once per JSON level, so the nesting of
/// the raw text is checked against [`MAX_DIRECTORY_DEPTH`] before anything
/// is parsed.
use crate::model::{DirectoryEntry, FileEntry, FileSystemEntry};
use compact_str::CompactString;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;
use tracing::error;

/// Discriminator key for file items.
pub const FILE_TAG: &str = "FileItem";

/// Discriminator key for directory items.
pub const DIRECTORY_TAG: &str = "DirectoryItem";

/// Deepest directory chain a payload may describe.
pub const MAX_DIRECTORY_DEPTH: usize = 256;

/// JSON nesting allowed in a payload: each directory level costs three
/// levels (wrapper object, fields object, `children` array), plus one for a
/// top-level array.
const MAX_NESTING: usize = 3 * MAX_DIRECTORY_DEPTH + 1;

/// Longest item excerpt quoted in an [`DecodeError::UnknownItem`] message.
const MAX_EXCERPT_CHARS: usize = 200;

/// Why a payload could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The text is not valid JSON.
    #[error("invalid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// An item carries neither a `FileItem` nor a `DirectoryItem` key.
    #[error("invalid item type: {0}")]
    UnknownItem(String),

    /// The payload nests deeper than [`MAX_DIRECTORY_DEPTH`] directories.
    #[error("tree nests deeper than {} directory levels", MAX_DIRECTORY_DEPTH)]
    TooDeep,

    /// A tagged item whose fields have the wrong shape (e.g. a string size).
    #[error("invalid {tag} fields: {source}")]
    InvalidFields {
        tag: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Wire fields of a file item. Missing fields fall back to empty/zero.
#[derive(Deserialize)]
struct FileFields {
    #[serde(default)]
    name: CompactString,
    #[serde(default)]
    fullpath: String,
    #[serde(default, deserialize_with = "wire_size")]
    size: u64,
}

/// Wire fields of a directory item.
///
/// `children` is kept as a raw value so a missing, null or non-array value
/// can degrade to "no children" instead of failing.
#[derive(Deserialize)]
struct DirectoryFields {
    #[serde(default)]
    name: CompactString,
    #[serde(default)]
    fullpath: String,
    #[serde(default, deserialize_with = "wire_size")]
    size: u64,
    #[serde(default)]
    children: Value,
}

/// Decode a payload, mapping every failure to an empty list.
///
/// The failure is logged exactly once and never returned to the caller.
pub fn decode_tree(raw: &str) -> Vec<FileSystemEntry> {
    match try_decode_tree(raw) {
        Ok(entries) => entries,
        Err(e) => {
            error!("Error parsing folder tree JSON: {e}");
            Vec::new()
        }
    }
}

/// Decode a payload, returning the first failure.
pub fn try_decode_tree(raw: &str) -> Result<Vec<FileSystemEntry>, DecodeError> {
    let root = parse_value(raw)?;

    match root {
        Value::Object(ref map) if map.contains_key(DIRECTORY_TAG) => {
            let fields = &map[DIRECTORY_TAG];
            Ok(vec![decode_directory(fields)?.into()])
        }
        Value::Array(items) => items.iter().map(decode_item).collect(),
        // Legacy shape: a bare directory object without the wrapper key.
        other => Ok(vec![decode_directory(&other)?.into()]),
    }
}

/// Parse into a generic value.
///
/// serde_json's own limit of 128 levels would stop at about 40 directories,
/// so it is disabled and [`check_nesting`] bounds the depth instead.
fn parse_value(raw: &str) -> Result<Value, DecodeError> {
    check_nesting(raw)?;
    let mut de = serde_json::Deserializer::from_str(raw);
    de.disable_recursion_limit();
    let value = Value::deserialize(&mut de).map_err(DecodeError::Parse)?;
    de.end().map_err(DecodeError::Parse)?;
    Ok(value)
}

/// Reject text whose bracket nesting exceeds [`MAX_NESTING`].
///
/// Brackets inside string literals are skipped. Malformed text is left for
/// the parser to report.
fn check_nesting(raw: &str) -> Result<(), DecodeError> {
    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escaped = false;

    for byte in raw.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                if depth > MAX_NESTING {
                    return Err(DecodeError::TooDeep);
                }
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

/// Read a byte count from any JSON number that holds a whole, non-negative
/// value, so `3000` and `3000.0` are the same size. Fractions, negatives and
/// non-numbers are rejected.
fn wire_size<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(size) = number.as_u64() {
        return Ok(size);
    }
    match number.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64 => Ok(f as u64),
        _ => Err(D::Error::custom(format!(
            "size must be a whole non-negative number, got {number}"
        ))),
    }
}

/// Decode one tagged item. `FileItem` is checked before `DirectoryItem`.
fn decode_item(item: &Value) -> Result<FileSystemEntry, DecodeError> {
    let map = item.as_object();

    if let Some(fields) = map.and_then(|m| m.get(FILE_TAG)) {
        let FileFields {
            name,
            fullpath,
            size,
        } = FileFields::deserialize(fields).map_err(|source| DecodeError::InvalidFields {
            tag: FILE_TAG,
            source,
        })?;
        return Ok(FileEntry {
            name,
            fullpath,
            size,
        }
        .into());
    }

    if let Some(fields) = map.and_then(|m| m.get(DIRECTORY_TAG)) {
        return Ok(decode_directory(fields)?.into());
    }

    Err(DecodeError::UnknownItem(excerpt(item)))
}

fn decode_directory(fields: &Value) -> Result<DirectoryEntry, DecodeError> {
    let DirectoryFields {
        name,
        fullpath,
        size,
        children,
    } = DirectoryFields::deserialize(fields).map_err(|source| DecodeError::InvalidFields {
        tag: DIRECTORY_TAG,
        source,
    })?;

    let children = match children {
        Value::Array(items) => items
            .iter()
            .map(decode_item)
            .collect::<Result<Vec<_>, _>>()?,
        _ => Vec::new(),
    };

    Ok(DirectoryEntry {
        name,
        fullpath,
        size,
        children,
    })
}

/// Compact JSON rendering of `item`, cut at [`MAX_EXCERPT_CHARS`].
fn excerpt(item: &Value) -> String {
    let text = item.to_string();
    match text.char_indices().nth(MAX_EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text,
    }
}
