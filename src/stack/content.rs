use serde::{Deserialize, Serialize};

/// Content as returned by Llama Stack: a bare string, a single typed item,
/// or a list of typed items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InterleavedContent {
    Text(String),
    Item(ContentItem),
    Items(Vec<ContentItem>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItem {
    Text { text: String },
    /// Images and any other non-text media.
    #[serde(other)]
    Other,
}

impl ContentItem {
    fn text(&self) -> Option<&str> {
        match self {
            ContentItem::Text { text } => Some(text),
            ContentItem::Other => None,
        }
    }
}

impl InterleavedContent {
    /// Text of the content, with text items concatenated in order.
    pub fn to_text(&self) -> String {
        match self {
            InterleavedContent::Text(text) => text.clone(),
            InterleavedContent::Item(item) => item.text().unwrap_or_default().to_string(),
            InterleavedContent::Items(items) => items.iter().filter_map(ContentItem::text).collect(),
        }
    }
}

impl From<&str> for InterleavedContent {
    fn from(text: &str) -> Self {
        InterleavedContent::Text(text.to_string())
    }
}
