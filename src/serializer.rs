//! Serialization layer. JSON via serde_json, configured by an explicit
//! [`JsonOptions`] value instead of global state.
//!
//! Reading is more forgiving than writing: `//` and `/* */` comments are
//! skipped and property names match regardless of case. Writing always
//! produces plain JSON.

use crate::document::ConfigDocument;
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Nesting limit used unless you pick another one.
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Knobs for every encode/decode call. Built once, then read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonOptions {
    /// Deepest array/object nesting accepted. Scalars are depth 0, `{}` is 1.
    pub max_depth: usize,
    /// Skip `//` and `/* */` comments when reading.
    pub allow_comments: bool,
    /// Indent the config file on save.
    pub pretty: bool,
}

impl JsonOptions {
    /// Depth 8, comments allowed, pretty output.
    pub const fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            allow_comments: true,
            pretty: true,
        }
    }
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts config documents and typed values to/from JSON text.
#[derive(Debug, Clone, Default)]
pub struct JsonSerializer {
    options: JsonOptions,
}

impl JsonSerializer {
    /// Serializer with the given options.
    pub fn new(options: JsonOptions) -> Self {
        Self { options }
    }

    /// The options this serializer was built with.
    pub fn options(&self) -> &JsonOptions {
        &self.options
    }

    // Comment stripping, parsing and the depth check shared by both decoders.
    // Errors come back as plain messages so callers pick the variant.
    fn parse_tree(&self, text: &str) -> std::result::Result<Value, String> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let value = if self.options.allow_comments {
            let stripped = strip_comments(text)?;
            serde_json::from_str::<Value>(&stripped)
        } else {
            serde_json::from_str::<Value>(text)
        }
        .map_err(|e| e.to_string())?;
        self.check_depth(&value)?;
        Ok(value)
    }

    fn check_depth(&self, value: &Value) -> std::result::Result<(), String> {
        let depth = depth(value);
        if depth > self.options.max_depth {
            return Err(format!(
                "nesting depth {depth} exceeds the limit of {}",
                self.options.max_depth
            ));
        }
        Ok(())
    }

    /// Encode a whole document for writing to disk.
    pub fn encode_document(&self, doc: &ConfigDocument) -> Result<Vec<u8>> {
        let bytes = if self.options.pretty {
            serde_json::to_vec_pretty(doc)
        } else {
            serde_json::to_vec(doc)
        };
        bytes.map_err(|e| Error::Serialize(e.to_string()))
    }

    /// Decode file contents into a document. Failures are [`Error::Parse`].
    pub fn decode_document(&self, bytes: &[u8]) -> Result<ConfigDocument> {
        let text = std::str::from_utf8(bytes).map_err(|e| Error::Parse(e.to_string()))?;
        let tree = self.parse_tree(text).map_err(Error::Parse)?;
        serde_json::from_value(fold_keys(tree)).map_err(|e| Error::Parse(e.to_string()))
    }

    /// Encode a single value to the JSON text kept in an entry.
    pub fn encode_value<T>(&self, value: &T) -> Result<String>
    where
        T: Serialize + ?Sized,
    {
        let tree = serde_json::to_value(value).map_err(|e| Error::Serialize(e.to_string()))?;
        self.check_depth(&tree).map_err(Error::Serialize)?;
        serde_json::to_string(&tree).map_err(|e| Error::Serialize(e.to_string()))
    }

    /// Decode an entry's text. `None` stands for a missing entry and always
    /// fails with [`Error::Deserialize`].
    pub fn decode_value<T>(&self, text: Option<&str>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let text = text.ok_or_else(|| Error::Deserialize("no value to decode".into()))?;
        let tree = self.parse_tree(text).map_err(Error::Deserialize)?;
        serde_json::from_value(tree).map_err(|e| Error::Deserialize(e.to_string()))
    }
}

fn depth(value: &Value) -> usize {
    match value {
        Value::Array(items) => 1 + items.iter().map(depth).max().unwrap_or(0),
        Value::Object(map) => 1 + map.values().map(depth).max().unwrap_or(0),
        _ => 0,
    }
}

/// Lowercase every object key so document fields match case-insensitively.
fn fold_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k.to_lowercase(), fold_keys(v)))
                .collect::<Map<_, _>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(fold_keys).collect()),
        other => other,
    }
}

/// Blank out `//` and `/* */` comments that sit outside string literals.
/// Each comment becomes a single space so neighbouring tokens stay apart.
fn strip_comments(text: &str) -> std::result::Result<String, String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (c, chars.peek().copied()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                let mut closed = false;
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        closed = true;
                        break;
                    }
                    prev = next;
                }
                if !closed {
                    return Err("unterminated block comment".into());
                }
                out.push(' ');
            }
            _ => out.push(c),
        }
    }
    Ok(out)
}
