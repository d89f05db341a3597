//! Front-matter parsing
//!
//! Two layouts are understood, both read with meta-block rules:
//!
//! * a meta block: leading `key: value` lines where further values for the
//!   same key sit on following lines indented by four or more spaces. The
//!   block ends at the first blank line or `---`/`...` line.
//! * a block fenced by `---` lines. Inside the fence, values are kept as raw
//!   text (`title: Linux: the basics` and `summary: #12` survive), YAML-style
//!   `- item` lines and `[a, b]` flow lists add values to the current key, and
//!   quoted scalars are unquoted.
//!
//! Keys are lower-cased. A key holding one value becomes a scalar and a key
//! holding several values becomes a sequence.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};

lazy_static! {
    static ref META_LINE: Regex = Regex::new(r"^[ ]{0,3}([A-Za-z0-9_-]+):\s*(.*)$").unwrap();
    static ref META_MORE: Regex = Regex::new(r"^[ ]{4,}(.*)$").unwrap();
    static ref META_BEGIN: Regex = Regex::new(r"^-{3}(\s.*)?$").unwrap();
    static ref META_END: Regex = Regex::new(r"^(-{3}|\.{3})(\s.*)?$").unwrap();
    static ref LIST_ITEM: Regex = Regex::new(r"^\s*-\s+(.*)$").unwrap();
    static ref BLOCK_SCALAR: Regex = Regex::new(r"^[|>][-+]?$").unwrap();
}

/// Render a YAML scalar as text; `None` for anything that is not a scalar
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Custom deserializer that handles both a single scalar and a list of scalars
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(vec![value.to_string()])
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(vec![value.to_string()])
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<Value>()? {
                match scalar_text(&item) {
                    Some(text) => vec.push(text),
                    None => tracing::warn!("Skipping non-scalar list entry {:?}", item),
                }
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// `string_or_vec` for fields whose presence matters
fn opt_string_or_vec<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    string_or_vec(deserializer).map(Some)
}

/// Accept any YAML scalar as a string (`title: 1402` is still a title)
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct ScalarString;

    impl<'de> Visitor<'de> for ScalarString {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, number or boolean")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
            Ok(Some(value))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        // A meta block key continued over several lines
        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut parts = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                parts.push(item);
            }
            Ok(Some(parts.join(" ")))
        }
    }

    deserializer.deserialize_any(ScalarString)
}

/// Front-matter data from a content file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "scalar_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub image: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub status: Option<String>,
    /// Person slugs; a single slug is read as a one-element list
    #[serde(deserialize_with = "opt_string_or_vec")]
    pub presenters: Option<Vec<String>>,

    /// Additional custom fields, in file order
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}


impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> (Self, &str) {
        if let Some((block, body)) = split_fenced(content) {
            return match parse_fenced(block) {
                Some(meta) => (Self::from_meta(meta), body),
                None => {
                    // A thematic break followed by prose, not front-matter
                    tracing::debug!("Fenced block is not front-matter, treating as content");
                    (FrontMatter::default(), content)
                }
            };
        }

        let (meta, body) = parse_meta(content);
        (Self::from_meta(meta), body)
    }

    fn from_meta(meta: IndexMap<String, Vec<String>>) -> Self {
        let mut map = Mapping::new();
        for (key, values) in meta {
            map.insert(Value::String(key), meta_value(values));
        }
        Self::from_mapping(map)
    }

    /// Deserialize a mapping. A field that does not fit its type is dropped on
    /// its own; the other fields are kept.
    fn from_mapping(map: Mapping) -> Self {
        match serde_yaml::from_value::<FrontMatter>(Value::Mapping(map.clone())) {
            Ok(fm) => fm,
            Err(_) => {
                let mut fm = FrontMatter::default();
                for (key, value) in map {
                    let mut single = Mapping::new();
                    single.insert(key.clone(), value);
                    match serde_yaml::from_value::<FrontMatter>(Value::Mapping(single)) {
                        Ok(part) => fm.merge(part),
                        Err(e) => tracing::warn!("Ignoring front-matter field {:?}: {}", key, e),
                    }
                }
                fm
            }
        }
    }

    fn merge(&mut self, other: FrontMatter) {
        self.title = self.title.take().or(other.title);
        self.summary = self.summary.take().or(other.summary);
        self.image = self.image.take().or(other.image);
        self.date = self.date.take().or(other.date);
        self.status = self.status.take().or(other.status);
        self.presenters = self.presenters.take().or(other.presenters);
        self.extra.extend(other.extra);
    }
}

/// Collected values of one key as a YAML value
fn meta_value(mut values: Vec<String>) -> Value {
    match values.len() {
        0 => Value::Null,
        1 => match flow_list(&values[0]) {
            Some(items) => Value::Sequence(items.into_iter().map(Value::String).collect()),
            None => Value::String(values.remove(0)),
        },
        _ => Value::Sequence(values.into_iter().map(Value::String).collect()),
    }
}

/// `[a, "b"]` as its items
fn flow_list(value: &str) -> Option<Vec<String>> {
    let inner = value.strip_prefix('[')?.strip_suffix(']')?;
    Some(
        inner
            .split(',')
            .map(|item| unquote(item.trim()).to_string())
            .filter(|item| !item.is_empty())
            .collect(),
    )
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Split a `---` fenced block from the start of `content`.
/// Returns (block, body after the closing fence).
fn split_fenced(content: &str) -> Option<(&str, &str)> {
    let mut lines = content.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != "---" {
        return None;
    }

    let start = first.len();
    let mut offset = start;
    for raw in lines {
        let line = raw.trim_end();
        if line == "---" || line == "..." {
            return Some((&content[start..offset], &content[offset + raw.len()..]));
        }
        offset += raw.len();
    }
    None
}

/// Read the lines between the fences. `None` when the block does not open
/// with a `key: value` line.
fn parse_fenced(block: &str) -> Option<IndexMap<String, Vec<String>>> {
    let mut meta: IndexMap<String, Vec<String>> = IndexMap::new();
    let mut key: Option<String> = None;

    for line in block.lines() {
        if line.trim().is_empty() {
            continue;
        }

        if let (Some(caps), Some(k)) = (LIST_ITEM.captures(line), key.as_ref()) {
            meta.entry(k.clone())
                .or_default()
                .push(unquote(caps[1].trim()).to_string());
        } else if let Some(caps) = META_LINE.captures(line) {
            let k = caps[1].to_lowercase();
            let value = caps[2].trim();
            let values = meta.entry(k.clone()).or_default();
            if !value.is_empty() && !BLOCK_SCALAR.is_match(value) {
                values.push(unquote(value).to_string());
            }
            key = Some(k);
        } else if let (true, Some(k)) = (line.starts_with([' ', '\t']), key.as_ref()) {
            meta.entry(k.clone())
                .or_default()
                .push(line.trim().to_string());
        } else if key.is_none() {
            return None;
        } else {
            tracing::warn!("Skipping unrecognized front-matter line: {:?}", line);
        }
    }

    Some(meta)
}

/// Parse a meta block. Keys are lower-cased and keep first-seen order.
fn parse_meta(content: &str) -> (IndexMap<String, Vec<String>>, &str) {
    let mut meta: IndexMap<String, Vec<String>> = IndexMap::new();
    let mut key: Option<String> = None;
    let mut offset = 0;

    for (i, raw) in content.split_inclusive('\n').enumerate() {
        let line = raw.trim_end_matches(['\n', '\r']);

        if i == 0 && META_BEGIN.is_match(line) {
            offset += raw.len();
            continue;
        }
        if line.trim().is_empty() || META_END.is_match(line) {
            offset += raw.len();
            break;
        }

        if let Some(caps) = META_LINE.captures(line) {
            let k = caps[1].to_lowercase();
            meta.entry(k.clone())
                .or_default()
                .push(caps[2].trim().to_string());
            key = Some(k);
        } else if let (Some(caps), Some(k)) = (META_MORE.captures(line), key.as_ref()) {
            meta.entry(k.clone())
                .or_default()
                .push(caps[1].trim().to_string());
        } else {
            break;
        }
        offset += raw.len();
    }

    (meta, &content[offset..])
}
