//! Interleaved content - text and media carried by prompts and messages

use serde::{Deserialize, Serialize};

/// Where the bytes of an image come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSource {
    /// Fetchable location (`http(s)://` or a `data:` URI)
    Url(String),
    /// Raw image bytes supplied inline
    Data(Vec<u8>),
}

impl ImageSource {
    /// Image referenced by URL
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }

    /// Image supplied as raw bytes
    pub fn data(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Data(bytes.into())
    }
}

/// A single piece of interleaved content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItem {
    /// Plain text
    Text {
        /// The text
        text: String,
    },
    /// An image
    Image {
        /// Image location or bytes
        image: ImageSource,
    },
}

impl ContentItem {
    /// Text item
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Image item
    pub const fn image(image: ImageSource) -> Self {
        Self::Image { image }
    }

    /// Whether this item carries media
    pub const fn is_media(&self) -> bool {
        matches!(self, Self::Image { .. })
    }
}

/// Content as accepted by the host: a bare string, one item, or a list of items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InterleavedContent {
    /// Bare string
    Text(String),
    /// A single typed item
    Item(ContentItem),
    /// A list of typed items
    Items(Vec<ContentItem>),
}

impl InterleavedContent {
    /// Whether any part of the content is an image
    pub fn has_media(&self) -> bool {
        match self {
            Self::Text(_) => false,
            Self::Item(item) => item.is_media(),
            Self::Items(items) => items.iter().any(ContentItem::is_media),
        }
    }

    /// Content as a list of items, a bare string becoming one text item
    pub fn items(&self) -> Vec<ContentItem> {
        match self {
            Self::Text(text) => vec![ContentItem::text(text.clone())],
            Self::Item(item) => vec![item.clone()],
            Self::Items(items) => items.clone(),
        }
    }

    /// Flatten to text
    ///
    /// Text parts are joined with a single space; images render as `<image>`.
    pub fn as_text(&self) -> String {
        fn item_text(item: &ContentItem) -> &str {
            match item {
                ContentItem::Text { text } => text,
                ContentItem::Image { .. } => "<image>",
            }
        }

        match self {
            Self::Text(text) => text.clone(),
            Self::Item(item) => item_text(item).to_string(),
            Self::Items(items) => items.iter().map(item_text).collect::<Vec<_>>().join(" "),
        }
    }
}

impl From<&str> for InterleavedContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for InterleavedContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<ContentItem> for InterleavedContent {
    fn from(item: ContentItem) -> Self {
        Self::Item(item)
    }
}

impl From<Vec<ContentItem>> for InterleavedContent {
    fn from(items: Vec<ContentItem>) -> Self {
        Self::Items(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_text_has_no_media() {
        let content = InterleavedContent::from("hello");
        assert!(!content.has_media());
        assert_eq!(content.as_text(), "hello");
    }

    #[test]
    fn image_item_is_media() {
        let content = InterleavedContent::from(vec![
            ContentItem::text("look"),
            ContentItem::image(ImageSource::url("http://example.com/cat.png")),
        ]);
        assert!(content.has_media());
        assert_eq!(content.as_text(), "look <image>");
    }

    #[test]
    fn items_wraps_bare_text() {
        let items = InterleavedContent::from("hi").items();
        assert_eq!(items, vec![ContentItem::text("hi")]);
    }

    #[test]
    fn deserializes_bare_string() {
        let content: InterleavedContent = serde_json::from_str(r#""plain""#).unwrap();
        assert_eq!(content, InterleavedContent::Text("plain".to_string()));
    }

    #[test]
    fn deserializes_item_list() {
        let json = r#"[{"type":"text","text":"a"},{"type":"image","image":{"url":"http://x/y.png"}}]"#;
        let content: InterleavedContent = serde_json::from_str(json).unwrap();
        assert!(content.has_media());
        assert_eq!(content.items().len(), 2);
    }
}
