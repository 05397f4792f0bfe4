//! The pages to provision and their validation.

use crate::blocks::{task_page_blocks, ContentBlock, MAX_RICH_TEXT_LENGTH};
use crate::error::CoreError;

/// One child page: its title and the to-do items listed under "Tasks".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSpec {
    pub name: String,
    pub items: Vec<String>,
}

impl PageSpec {
    pub fn new<I, S>(name: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Page body for this spec.
    pub fn blocks(&self) -> Vec<ContentBlock> {
        task_page_blocks(self.items.as_slice())
    }

    /// Check the spec against the limits Notion enforces, so a bad entry
    /// fails locally instead of as a 400 from the API.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_page_title(&self.name)?;
        for (idx, item) in self.items.iter().enumerate() {
            validate_text_length(item).map_err(|e| {
                CoreError::Validation(format!("Item {idx} of page '{}': {e}", self.name))
            })?;
        }
        Ok(())
    }
}

/// A page title must be non-blank and fit in one rich-text segment.
pub fn validate_page_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation(
            "Page title must not be empty".to_string(),
        ));
    }
    validate_text_length(title)
        .map_err(|e| CoreError::Validation(format!("Page title: {e}")))
}

fn validate_text_length(text: &str) -> Result<(), String> {
    let len = text.chars().count();
    if len > MAX_RICH_TEXT_LENGTH {
        return Err(format!(
            "text exceeds maximum length of {MAX_RICH_TEXT_LENGTH} characters (got {len})"
        ));
    }
    Ok(())
}

/// The three weekly grocery pages created under the parent page.
pub fn weekly_grocery_plan() -> Vec<PageSpec> {
    vec![
        PageSpec::new("Grocery Shopping - Week 1", ["milk", "eggs", "bread"]),
        PageSpec::new("Grocery Shopping - Week 2", ["chicken", "rice", "vegetables"]),
        PageSpec::new("Grocery Shopping - Week 3", ["pasta", "cheese", "tomatoes"]),
    ]
}
