//! Catalog data model and the client-side filter engine.
//!
//! The filter engine is pure and synchronous: given the full book list and
//! the active criteria it returns the visible subset, preserving server
//! order. Every criteria change reprocesses the whole list; the datasets
//! are small and no memoization is kept.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Synthetic category sentinel meaning "no category filter".
///
/// UI-only: it is prepended to the server's category list and never sent
/// to the backend.
pub const CATEGORY_ALL: &str = "all";

/// Default call-to-action label for new books.
pub const DEFAULT_CTA_TEXT: &str = "Buy Now";

/// User role as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

// Lenient on purpose: only "admin" grants anything; every other string the
// backend might send is an ordinary user.
impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(match value.as_str() {
            "admin" => Role::Admin,
            _ => Role::User,
        })
    }
}

/// An authenticated user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// A book record as served by the backend.
///
/// `id` is server-assigned and immutable; ids are never reused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_cta_text")]
    pub cta_button_text: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

fn default_cta_text() -> String {
    DEFAULT_CTA_TEXT.to_string()
}

impl Book {
    /// Resolves the cover image reference against the backend base URL.
    ///
    /// The backend serves either an absolute URL or a backend-relative path
    /// (`/uploads/...`). Returns `None` when the book has no cover; callers
    /// render their own placeholder.
    pub fn cover_image_url(&self, base_url: &str) -> Option<String> {
        let reference = self.cover_image.as_deref()?.trim();
        if reference.is_empty() {
            return None;
        }
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return Some(reference.to_string());
        }
        let base = base_url.trim_end_matches('/');
        if reference.starts_with('/') {
            Some(format!("{base}{reference}"))
        } else {
            Some(format!("{base}/{reference}"))
        }
    }
}

/// Client-side form payload for creating or updating a book.
///
/// Scalar fields are submitted as multipart text parts; `cover_image` is an
/// optional local file attached as a binary part.
#[derive(Debug, Clone)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub is_featured: bool,
    pub cta_button_text: String,
    pub cover_image: Option<std::path::PathBuf>,
}

impl Default for BookDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            description: String::new(),
            price: 0.0,
            category: String::new(),
            is_featured: false,
            cta_button_text: DEFAULT_CTA_TEXT.to_string(),
            cover_image: None,
        }
    }
}

impl BookDraft {
    /// Pre-fills a draft from an existing book (for the edit form).
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            description: book.description.clone(),
            price: book.price,
            category: book.category.clone(),
            is_featured: book.is_featured,
            cta_button_text: book.cta_button_text.clone(),
            cover_image: None,
        }
    }
}

/// Active filter criteria for the showcase view.
///
/// The default value is the identity filter: every book passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Selected category, or [`CATEGORY_ALL`].
    pub category: String,
    /// Free-text search over title and author (case-insensitive).
    pub query: String,
    /// Show only featured books.
    pub featured_only: bool,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            category: CATEGORY_ALL.to_string(),
            query: String::new(),
            featured_only: false,
        }
    }
}

impl FilterCriteria {
    /// Returns true if no criterion would exclude any book.
    pub fn is_identity(&self) -> bool {
        self.category == CATEGORY_ALL && self.query.is_empty() && !self.featured_only
    }

    /// Returns true if the given book passes all three predicates.
    pub fn matches(&self, book: &Book) -> bool {
        let category_pass = self.category == CATEGORY_ALL || book.category == self.category;
        let text_pass = self.query.is_empty()
            || contains_ignore_case(&book.title, &self.query)
            || contains_ignore_case(&book.author, &self.query);
        let featured_pass = !self.featured_only || book.is_featured;
        category_pass && text_pass && featured_pass
    }
}

/// Returns the visible subset of `books` under `criteria`.
///
/// Stable filter: the result is a subsequence of the input, order preserved.
pub fn filter_books<'a>(books: &'a [Book], criteria: &FilterCriteria) -> Vec<&'a Book> {
    books.iter().filter(|book| criteria.matches(book)).collect()
}

/// Returns the featured subset for the showcase rail.
///
/// Computed independently of the active criteria: the rail is shown
/// regardless of filters.
pub fn featured_books(books: &[Book]) -> Vec<&Book> {
    books.iter().filter(|book| book.is_featured).collect()
}

/// Builds the category choices for the UI: the `"all"` sentinel followed by
/// the server's categories as received.
pub fn category_options(server_categories: &[String]) -> Vec<String> {
    let mut options = Vec::with_capacity(server_categories.len() + 1);
    options.push(CATEGORY_ALL.to_string());
    options.extend(server_categories.iter().cloned());
    options
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str, author: &str, category: &str, featured: bool) -> Book {
        Book {
            id: format!("id-{title}"),
            title: title.to_string(),
            author: author.to_string(),
            description: String::new(),
            price: 9.99,
            category: category.to_string(),
            cover_image: None,
            is_featured: featured,
            cta_button_text: DEFAULT_CTA_TEXT.to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    fn sample() -> Vec<Book> {
        vec![
            book("Dune", "Frank Herbert", "Fiction", true),
            book("Atlas", "Peter Zeihan", "Business", false),
            book("Milk and Honey", "Rupi Kaur", "Poetry", true),
        ]
    }

    fn titles(books: &[&Book]) -> Vec<String> {
        books.iter().map(|b| b.title.clone()).collect()
    }

    /// Test: identity criteria pass every book through unchanged.
    #[test]
    fn test_identity_criteria_returns_all() {
        let books = sample();
        let visible = filter_books(&books, &FilterCriteria::default());
        assert_eq!(visible.len(), books.len());
        assert_eq!(titles(&visible), vec!["Dune", "Atlas", "Milk and Honey"]);
    }

    /// Test: the result is an order-preserving subsequence and idempotent.
    #[test]
    fn test_filter_is_stable_and_idempotent() {
        let books = sample();
        let criteria = FilterCriteria {
            featured_only: true,
            ..FilterCriteria::default()
        };

        let once: Vec<Book> = filter_books(&books, &criteria)
            .into_iter()
            .cloned()
            .collect();
        let twice: Vec<Book> = filter_books(&once, &criteria)
            .into_iter()
            .cloned()
            .collect();

        assert_eq!(titles(&once.iter().collect::<Vec<_>>()), vec![
            "Dune",
            "Milk and Honey"
        ]);
        assert_eq!(
            titles(&once.iter().collect::<Vec<_>>()),
            titles(&twice.iter().collect::<Vec<_>>())
        );
    }

    /// Test: featured-only singleton behavior.
    #[test]
    fn test_featured_only_singleton() {
        let criteria = FilterCriteria {
            featured_only: true,
            ..FilterCriteria::default()
        };

        let featured = vec![book("Dune", "Frank Herbert", "Fiction", true)];
        assert_eq!(filter_books(&featured, &criteria).len(), 1);

        let plain = vec![book("Atlas", "Peter Zeihan", "Business", false)];
        assert!(filter_books(&plain, &criteria).is_empty());
    }

    /// Test: text match is case-insensitive on title and author.
    #[test]
    fn test_text_match_ignores_case() {
        let books = sample();
        for query in ["dune", "DUNE", "Dune"] {
            let criteria = FilterCriteria {
                query: query.to_string(),
                ..FilterCriteria::default()
            };
            assert_eq!(titles(&filter_books(&books, &criteria)), vec!["Dune"]);
        }

        // Author matches too.
        let criteria = FilterCriteria {
            query: "herbert".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(titles(&filter_books(&books, &criteria)), vec!["Dune"]);
    }

    /// Test: category match is exact and case-sensitive.
    #[test]
    fn test_category_match_is_exact() {
        let books = sample();
        let criteria = FilterCriteria {
            category: "Fiction".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(titles(&filter_books(&books, &criteria)), vec!["Dune"]);

        let lowercase = FilterCriteria {
            category: "fiction".to_string(),
            ..FilterCriteria::default()
        };
        assert!(filter_books(&books, &lowercase).is_empty());
    }

    /// Test: category and query criteria applied over two books.
    #[test]
    fn test_category_and_query_scenario() {
        let books = vec![
            book("Dune", "Frank Herbert", "Fiction", true),
            book("Atlas", "Peter Zeihan", "Business", false),
        ];

        let by_category = FilterCriteria {
            category: "Fiction".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(titles(&filter_books(&books, &by_category)), vec!["Dune"]);

        let by_query = FilterCriteria {
            query: "atl".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(titles(&filter_books(&books, &by_query)), vec!["Atlas"]);
    }

    /// Test: featured rail ignores the active criteria.
    #[test]
    fn test_featured_books_independent_of_criteria() {
        let books = sample();
        let rail = featured_books(&books);
        assert_eq!(titles(&rail), vec!["Dune", "Milk and Honey"]);
    }

    /// Test: the "all" sentinel is prepended and never duplicated from data.
    #[test]
    fn test_category_options_prepends_sentinel() {
        let server = vec!["Fiction".to_string(), "Poetry".to_string()];
        let options = category_options(&server);
        assert_eq!(options, vec!["all", "Fiction", "Poetry"]);
    }

    /// Test: cover references resolve against the base URL.
    #[test]
    fn test_cover_image_url_resolution() {
        let mut b = book("Dune", "Frank Herbert", "Fiction", true);
        assert_eq!(b.cover_image_url("http://localhost:8000"), None);

        b.cover_image = Some("/uploads/abc.jpg".to_string());
        assert_eq!(
            b.cover_image_url("http://localhost:8000/"),
            Some("http://localhost:8000/uploads/abc.jpg".to_string())
        );

        b.cover_image = Some("https://cdn.example.com/x.png".to_string());
        assert_eq!(
            b.cover_image_url("http://localhost:8000"),
            Some("https://cdn.example.com/x.png".to_string())
        );
    }

    /// Test: unknown role strings and missing fields use lenient defaults.
    #[test]
    fn test_book_deserializes_with_defaults() {
        let json = r#"{
            "id": "b1",
            "title": "Dune",
            "author": "Frank Herbert",
            "description": "Sand.",
            "price": 14.99,
            "category": "Fiction"
        }"#;
        let b: Book = serde_json::from_str(json).unwrap();
        assert!(!b.is_featured);
        assert_eq!(b.cta_button_text, DEFAULT_CTA_TEXT);
        assert!(b.cover_image.is_none());
    }
}
