//! Blog post model for inkpost.

use serde::{Deserialize, Serialize};

/// A blog post joined with its category name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// Unique post ID.
    pub id: i64,
    /// Owning category ID.
    pub category_id: i64,
    /// Owning category name.
    pub category_name: String,
    /// Post title.
    pub title: String,
    /// URL slug derived from the title (unique).
    pub slug: String,
    /// Author name.
    pub author: String,
    /// Post body.
    pub content: String,
    /// Featured image path or URL.
    pub image: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
}

/// Data for creating a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// Owning category ID.
    pub category_id: i64,
    /// Post title.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Author name.
    pub author: String,
    /// Post body.
    pub content: String,
    /// Featured image path or URL.
    pub image: Option<String>,
}

impl NewPost {
    /// Create a new post, deriving the slug from the title.
    pub fn new(
        category_id: i64,
        title: impl Into<String>,
        author: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let title = title.into();
        Self {
            category_id,
            slug: slugify(&title),
            title,
            author: author.into(),
            content: content.into(),
            image: None,
        }
    }

    /// Set the featured image.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Data for updating a post.
///
/// The title is always rewritten (and the slug with it); other fields are
/// only changed when set.
#[derive(Debug, Clone)]
pub struct PostUpdate {
    /// New title.
    pub title: String,
    /// New slug.
    pub slug: String,
    /// New category ID.
    pub category_id: Option<i64>,
    /// New author.
    pub author: Option<String>,
    /// New content.
    pub content: Option<String>,
    /// New image. `None` keeps the current one.
    pub image: Option<String>,
}

impl PostUpdate {
    /// Create an update that only retitles the post.
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            slug: slugify(&title),
            title,
            category_id: None,
            author: None,
            content: None,
            image: None,
        }
    }
}

/// Creation-time ordering for post listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first.
    Asc,
    /// Newest first.
    Desc,
}

/// Filters for listing posts.
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    /// Only posts in this category.
    pub category_id: Option<i64>,
    /// Order by creation time. Unset means insertion order.
    pub sort: Option<SortOrder>,
    /// Maximum number of posts.
    pub limit: Option<u32>,
    /// Number of posts to skip.
    pub offset: Option<u32>,
}

/// Spelled-out forms of symbols that would otherwise be dropped.
const SYMBOL_WORDS: &[(char, &str)] = &[
    ('&', "and"),
    ('$', "dollar"),
    ('%', "percent"),
    ('<', "less"),
    ('>', "greater"),
    ('|', "or"),
];

/// Latin, Greek and Cyrillic letters are transliterated; other scripts are
/// dropped.
fn transliterable(c: char) -> bool {
    matches!(c, '\u{00C0}'..='\u{024F}' | '\u{0370}'..='\u{04FF}' | '\u{1E00}'..='\u{1EFF}')
}

/// Derive a URL slug from a title.
///
/// Whitespace and `-` separate words. Accented letters become their ASCII
/// form, a few symbols are spelled out, and all other punctuation is removed
/// without leaving a separator. The result is lowercase and may be empty.
///
/// ```
/// use inkpost::db::slugify;
///
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("  Rust   2024 -- notes "), "rust-2024-notes");
/// assert_eq!(slugify("What's new in v2.0?"), "whats-new-in-v20");
/// ```
pub fn slugify(title: &str) -> String {
    let mut text = String::with_capacity(title.len());

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            text.push(c);
        } else if c == '-' || c.is_whitespace() {
            text.push(' ');
        } else if let Some((_, word)) = SYMBOL_WORDS.iter().find(|(symbol, _)| *symbol == c) {
            text.push_str(word);
        } else if transliterable(c) {
            if let Some(ascii) = deunicode::deunicode_char(c) {
                text.extend(ascii.chars().filter(char::is_ascii_alphanumeric));
            }
        }
    }

    text.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_ascii_lowercase()
}
