use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Genre value that disables genre filtering.
pub const ALL_GENRES: &str = "all";

/// Genres offered by the admin form. Genre stays free-form; this list is advisory.
pub const SUGGESTED_GENRES: &[&str] = &[
    "Ficción",
    "No Ficción",
    "Misterio",
    "Romance",
    "Ciencia Ficción",
    "Fantasía",
    "Biografía",
    "Historia",
    "Autoayuda",
    "Negocios",
    "Tecnología",
    "Cocina",
    "Viajes",
    "Arte",
    "Filosofía",
    "Psicología",
    "Educación",
    "Infantil",
    "Juvenil",
    "Poesía",
];

/// A catalog entry as stored and served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Store-assigned identifier
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub publisher: String,
    pub price: f64,
    pub stock: i64,
    pub description: Option<String>,
    /// URL of the cover image
    pub image1: String,
    /// URL of the secondary image
    pub image2: String,
    /// Always `stock > 0`; never taken from the caller
    pub available: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Numeric field as submitted: the admin form posts strings, API clients post numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(serde_json::Number),
    Text(String),
}

/// Request body for create and update.
///
/// Every field is optional on the wire so that missing fields are reported by
/// validation rather than by the JSON decoder. Unknown fields, `available`
/// included, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookInput {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub price: Option<NumericInput>,
    pub stock: Option<NumericInput>,
    pub description: Option<String>,
    pub image1: Option<String>,
    pub image2: Option<String>,
}

/// Validated editable fields of a book, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct BookRecord {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub publisher: String,
    pub price: f64,
    pub stock: i64,
    pub description: String,
    pub image1: String,
    pub image2: String,
}

impl BookRecord {
    /// Availability is derived from stock on every write.
    pub fn available(&self) -> bool {
        self.stock > 0
    }
}

/// Query parameters accepted by the listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookFilter {
    /// Case-insensitive substring matched against title, author or publisher
    pub search: Option<String>,
    /// Exact genre; empty or `all` disables the filter
    pub genre: Option<String>,
}

impl BookFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            genre: None,
        }
    }

    pub fn genre(genre: impl Into<String>) -> Self {
        Self {
            search: None,
            genre: Some(genre.into()),
        }
    }

    pub fn matches(&self, book: &Book) -> bool {
        self.matches_search(book) && self.matches_genre(book)
    }

    fn matches_search(&self, book: &Book) -> bool {
        let Some(term) = self.search.as_deref().filter(|term| !term.is_empty()) else {
            return true;
        };
        let needle = term.to_lowercase();

        [&book.title, &book.author, &book.publisher]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_genre(&self, book: &Book) -> bool {
        match self.genre.as_deref() {
            None | Some("") | Some(ALL_GENRES) => true,
            Some(genre) => book.genre == genre,
        }
    }
}

/// Body returned after a successful delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str, author: &str, publisher: &str, genre: &str) -> Book {
        let now = OffsetDateTime::now_utc();
        Book {
            id: 1,
            title: title.to_string(),
            author: author.to_string(),
            genre: genre.to_string(),
            publisher: publisher.to_string(),
            price: 10.0,
            stock: 1,
            description: None,
            image1: "https://img.example/1.jpg".to_string(),
            image2: "https://img.example/2.jpg".to_string(),
            available: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn search_matches_any_of_three_fields_case_insensitively() {
        let dune = book("Dune", "Frank Herbert", "Chilton Books", "Ciencia Ficción");

        assert!(BookFilter::search("dUn").matches(&dune));
        assert!(BookFilter::search("herb").matches(&dune));
        assert!(BookFilter::search("CHILTON").matches(&dune));
        assert!(!BookFilter::search("Ciencia").matches(&dune));
    }

    #[test]
    fn search_lowercases_non_ascii_text() {
        let novel = book("ÁRBOL DE LA CIENCIA", "Pío Baroja", "Cátedra", "Ficción");
        assert!(BookFilter::search("árbol").matches(&novel));
    }

    #[test]
    fn genre_filter_is_exact_and_all_disables_it() {
        let hobbit = book("El Hobbit", "Tolkien", "Minotauro", "Fantasía");

        assert!(BookFilter::genre("Fantasía").matches(&hobbit));
        assert!(!BookFilter::genre("fantasía").matches(&hobbit));
        assert!(!BookFilter::genre("Fanta").matches(&hobbit));
        assert!(BookFilter::genre(ALL_GENRES).matches(&hobbit));
        assert!(BookFilter::genre("").matches(&hobbit));
    }

    #[test]
    fn search_and_genre_combine_with_and() {
        let hobbit = book("El Hobbit", "Tolkien", "Minotauro", "Fantasía");
        let filter = BookFilter {
            search: Some("hobbit".to_string()),
            genre: Some("Historia".to_string()),
        };
        assert!(!filter.matches(&hobbit));
    }

    #[test]
    fn book_serializes_with_camel_case_timestamps() {
        let value = serde_json::to_value(book("A", "B", "C", "D")).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("created_at").is_none());
        assert_eq!(value["description"], serde_json::Value::Null);
    }

    #[test]
    fn numeric_input_accepts_numbers_and_strings() {
        let input: BookInput =
            serde_json::from_str(r#"{"price": "12.50", "stock": 3, "available": true}"#).unwrap();
        assert_eq!(input.price, Some(NumericInput::Text("12.50".to_string())));
        assert!(matches!(input.stock, Some(NumericInput::Number(_))));
        assert_eq!(input.title, None);
    }
}
