//! Page content blocks and their Notion wire encoding.
//!
//! A provisioned page body is always a level-2 heading, one unchecked
//! to-do per item, then an empty paragraph. [`task_page_blocks`] builds
//! that list; [`ContentBlock`] serialises into the block objects the
//! `POST /pages` endpoint expects in `children`.

use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Heading placed above the to-do list on every provisioned page.
pub const TASKS_HEADING: &str = "Tasks";

/// Notion rejects rich-text segments longer than this many characters.
pub const MAX_RICH_TEXT_LENGTH: usize = 2_000;

// ---------------------------------------------------------------------------
// Rich text
// ---------------------------------------------------------------------------

/// A single plain-text rich-text segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RichText {
    r#type: &'static str,
    text: TextContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct TextContent {
    content: String,
}

impl RichText {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            r#type: "text",
            text: TextContent {
                content: content.into(),
            },
        }
    }

    pub fn content(&self) -> &str {
        &self.text.content
    }
}

// ---------------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------------

/// One block of page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    /// `heading_2` block.
    Heading(String),
    /// `to_do` block.
    Task { text: String, checked: bool },
    /// `paragraph` block with no text.
    Spacer,
}

impl ContentBlock {
    /// Unchecked to-do item.
    pub fn task(text: impl Into<String>) -> Self {
        ContentBlock::Task {
            text: text.into(),
            checked: false,
        }
    }

    /// Notion block type name.
    pub fn block_type(&self) -> &'static str {
        match self {
            ContentBlock::Heading(_) => "heading_2",
            ContentBlock::Task { .. } => "to_do",
            ContentBlock::Spacer => "paragraph",
        }
    }
}

#[derive(Serialize)]
struct WireBlock {
    object: &'static str,
    #[serde(flatten)]
    body: WireBody,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum WireBody {
    #[serde(rename = "heading_2")]
    Heading2 { heading_2: TextBody },
    #[serde(rename = "to_do")]
    ToDo { to_do: ToDoBody },
    #[serde(rename = "paragraph")]
    Paragraph { paragraph: TextBody },
}

#[derive(Serialize)]
struct TextBody {
    rich_text: Vec<RichText>,
}

#[derive(Serialize)]
struct ToDoBody {
    rich_text: Vec<RichText>,
    checked: bool,
}

impl Serialize for ContentBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let body = match self {
            ContentBlock::Heading(text) => WireBody::Heading2 {
                heading_2: TextBody {
                    rich_text: vec![RichText::plain(text.as_str())],
                },
            },
            ContentBlock::Task { text, checked } => WireBody::ToDo {
                to_do: ToDoBody {
                    rich_text: vec![RichText::plain(text.as_str())],
                    checked: *checked,
                },
            },
            ContentBlock::Spacer => WireBody::Paragraph {
                paragraph: TextBody {
                    rich_text: Vec::new(),
                },
            },
        };

        WireBlock {
            object: "block",
            body,
        }
        .serialize(serializer)
    }
}

/// Build the body of a task page: heading, one unchecked to-do per item,
/// trailing spacer. Always `items.len() + 2` blocks.
pub fn task_page_blocks<S: AsRef<str>>(items: &[S]) -> Vec<ContentBlock> {
    let mut blocks = Vec::with_capacity(items.len() + 2);
    blocks.push(ContentBlock::Heading(TASKS_HEADING.to_string()));
    blocks.extend(items.iter().map(|item| ContentBlock::task(item.as_ref())));
    blocks.push(ContentBlock::Spacer);
    blocks
}
