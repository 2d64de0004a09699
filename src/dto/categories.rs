use serde::Serialize;
use utoipa::ToSchema;

use crate::dao::words::WordCategory;

/// Category entry listed by the category picker.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategorySummary {
    /// Identifier to send back in `POST /game/init`.
    pub name: String,
    pub display_name: String,
    pub word_count: usize,
}

impl From<WordCategory> for CategorySummary {
    fn from(category: WordCategory) -> Self {
        Self {
            name: category.name,
            display_name: category.display_name,
            word_count: category.words.len(),
        }
    }
}
