//! Rich text payloads as Feishu sends them.
//!
//! A rich text object is an ordered list of elements, each either a styled
//! text run or an inline component (document mention, user mention). The
//! list lives under `elements`, or under `textElements` in older payloads.
//! Parsing is lenient. Only an element that is not an object is dropped.
//! Style flags are read by truthiness, and any other field of the wrong
//! shape falls back to its default, so run content is never lost.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// Ordered sequence of rich text elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RichText {
    pub elements: Vec<TextElement>,
}

impl RichText {
    /// Reads a rich text object. Returns `None` when `value` is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let raw_elements = object
            .get("elements")
            .and_then(Value::as_array)
            .filter(|elements| !elements.is_empty())
            .or_else(|| object.get("textElements").and_then(Value::as_array));

        let elements = raw_elements
            .map(|elements| elements.iter().filter_map(TextElement::from_value).collect())
            .unwrap_or_default();

        Some(Self { elements })
    }

    /// Convenience constructor for a single unstyled run.
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            elements: vec![TextElement::run(content, TextElementStyle::default())],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// One element of a rich text object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TextElement {
    #[serde(default, alias = "textRun", deserialize_with = "lenient_or_none")]
    pub text_run: Option<TextRun>,
    #[serde(
        default,
        alias = "inlineComponent",
        deserialize_with = "lenient_or_none"
    )]
    pub inline_component: Option<InlineComponent>,
}

impl TextElement {
    fn from_value(value: &Value) -> Option<Self> {
        match TextElement::deserialize(value) {
            Ok(element) => Some(element),
            Err(err) => {
                log::debug!("Skipping unreadable rich text element: {}", err);
                None
            }
        }
    }

    pub fn run(content: impl Into<String>, style: TextElementStyle) -> Self {
        Self {
            text_run: Some(TextRun {
                content: content.into(),
                text_element_style: style,
                link: None,
            }),
            inline_component: None,
        }
    }

    /// The run content, empty when the element has no run.
    pub fn content(&self) -> &str {
        self.text_run
            .as_ref()
            .map(|run| run.content.as_str())
            .unwrap_or_default()
    }
}

/// A styled span of text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TextRun {
    #[serde(default, deserialize_with = "lenient_string")]
    pub content: String,
    #[serde(
        default,
        alias = "textElementStyle",
        alias = "style",
        deserialize_with = "lenient_or_default"
    )]
    pub text_element_style: TextElementStyle,
    #[serde(default, deserialize_with = "lenient_or_none")]
    pub link: Option<RunLink>,
}

impl TextRun {
    /// The effective link: on the run itself, or inside its style.
    pub fn link_url(&self) -> Option<&str> {
        self.link
            .as_ref()
            .or(self.text_element_style.link.as_ref())
            .map(RunLink::url)
            .filter(|url| !url.is_empty())
    }
}

/// Style flags of a text run.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TextElementStyle {
    #[serde(default, deserialize_with = "truthy")]
    pub bold: bool,
    #[serde(default, deserialize_with = "truthy")]
    pub italic: bool,
    #[serde(default, deserialize_with = "truthy")]
    pub strikethrough: bool,
    #[serde(default, deserialize_with = "truthy")]
    pub underline: bool,
    #[serde(default, alias = "inline_code", deserialize_with = "truthy")]
    pub code: bool,
    #[serde(default, alias = "text_color", deserialize_with = "lenient_or_none")]
    pub color: Option<ColorValue>,
    #[serde(
        default,
        alias = "background_color",
        deserialize_with = "lenient_or_none"
    )]
    pub background: Option<ColorValue>,
    #[serde(default, deserialize_with = "lenient_or_none")]
    pub link: Option<RunLink>,
}

/// A link given either as a bare string or as `{"url": ...}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RunLink {
    Url(String),
    Object {
        #[serde(default, deserialize_with = "lenient_string")]
        url: String,
    },
}

impl RunLink {
    pub fn url(&self) -> &str {
        match self {
            RunLink::Url(url) => url,
            RunLink::Object { url } => url,
        }
    }
}

/// Colors arrive as names (`"red"`) or palette indices (`5`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    Name(String),
    Index(serde_json::Number),
}

impl ColorValue {
    /// Empty names and the zero index mean "no color".
    pub fn is_set(&self) -> bool {
        match self {
            ColorValue::Name(name) => !name.is_empty(),
            ColorValue::Index(index) => index.as_f64().map_or(true, |value| value != 0.0),
        }
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorValue::Name(name) => f.write_str(name),
            ColorValue::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Inline component of an element whose run content is empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InlineComponent {
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, alias = "url", deserialize_with = "lenient_string")]
    pub raw_url: String,
}

impl InlineComponent {
    pub fn is_document_mention(&self) -> bool {
        self.kind == "mention_doc"
    }

    pub fn is_user_mention(&self) -> bool {
        self.kind == "user"
    }
}

/// Reads a flag the way the API's loosely typed clients do: `1`, `"x"` and
/// non-empty containers are set, `0`, `""`, `null` and empty ones are not.
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(flag) => flag,
        Value::Number(number) => number.as_f64().map_or(true, |value| value != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    })
}

/// Strings pass through, numbers and booleans are printed, anything else is empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => String::new(),
    })
}

fn lenient_or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match T::deserialize(&value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) => {
            log::debug!("Ignoring unreadable rich text field {}: {}", value, err);
            Ok(None)
        }
    }
}

fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    Ok(lenient_or_none(deserializer)?.unwrap_or_default())
}
