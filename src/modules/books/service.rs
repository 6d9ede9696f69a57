use std::sync::Arc;

use super::{
    error::CatalogError,
    models::{Book, BookFilter, BookInput, BookRecord, NumericInput, SUGGESTED_GENRES},
    repository::BookRepository,
};

/// Query, validation and derivation rules over the catalog store.
#[derive(Clone)]
pub struct CatalogService {
    repository: Arc<dyn BookRepository>,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self { repository }
    }

    /// Books matching `filter`, most recently created first. Never paginated.
    pub async fn list(&self, filter: &BookFilter) -> Result<Vec<Book>, CatalogError> {
        let books = self.repository.list().await?;
        Ok(books.into_iter().filter(|book| filter.matches(book)).collect())
    }

    pub async fn get(&self, id: &str) -> Result<Book, CatalogError> {
        let id = parse_id(id)?;
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    pub async fn create(&self, input: BookInput) -> Result<Book, CatalogError> {
        let record = validate(input)?;
        let book = self.repository.insert(record).await?;

        tracing::info!(book_id = book.id, stock = book.stock, "book created");
        Ok(book)
    }

    /// Full replacement of every editable field.
    pub async fn update(&self, id: &str, input: BookInput) -> Result<Book, CatalogError> {
        let id = parse_id(id)?;
        let record = validate(input)?;
        let book = self
            .repository
            .update(id, record)
            .await?
            .ok_or(CatalogError::NotFound(id))?;

        tracing::info!(book_id = book.id, stock = book.stock, "book updated");
        Ok(book)
    }

    pub async fn delete(&self, id: &str) -> Result<(), CatalogError> {
        let id = parse_id(id)?;
        if !self.repository.delete(id).await? {
            return Err(CatalogError::NotFound(id));
        }

        tracing::info!(book_id = id, "book deleted");
        Ok(())
    }

    /// Genres currently in the catalog. Recomputed on every call.
    pub async fn distinct_genres(&self) -> Result<Vec<String>, CatalogError> {
        Ok(self.repository.distinct_genres().await?)
    }

    pub fn suggested_genres(&self) -> &'static [&'static str] {
        SUGGESTED_GENRES
    }

    pub async fn health(&self) -> Result<(), CatalogError> {
        Ok(self.repository.ping().await?)
    }
}

/// Parse a path identifier.
pub fn parse_id(raw: &str) -> Result<i64, CatalogError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| CatalogError::invalid("id", format!("'{raw}' is not a valid book id")))
}

/// Check required fields and numeric formats, producing the record to write.
pub fn validate(input: BookInput) -> Result<BookRecord, CatalogError> {
    let mut missing = Vec::new();

    let title = required_text("title", input.title, &mut missing);
    let author = required_text("author", input.author, &mut missing);
    let genre = required_text("genre", input.genre, &mut missing);
    let publisher = required_text("publisher", input.publisher, &mut missing);
    let price = input.price.filter(|value| !is_blank(value));
    if price.is_none() {
        missing.push("price");
    }
    let image1 = required_text("image1", input.image1, &mut missing);
    let image2 = required_text("image2", input.image2, &mut missing);

    let (
        Some(title),
        Some(author),
        Some(genre),
        Some(publisher),
        Some(price),
        Some(image1),
        Some(image2),
    ) = (title, author, genre, publisher, price, image1, image2)
    else {
        return Err(CatalogError::Validation { fields: missing });
    };

    Ok(BookRecord {
        title,
        author,
        genre,
        publisher,
        price: parse_price(&price)?,
        stock: parse_stock(input.stock.as_ref())?,
        description: input.description.unwrap_or_default(),
        image1,
        image2,
    })
}

fn required_text(
    field: &'static str,
    value: Option<String>,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Some(text),
        _ => {
            missing.push(field);
            None
        }
    }
}

fn is_blank(value: &NumericInput) -> bool {
    matches!(value, NumericInput::Text(text) if text.trim().is_empty())
}

fn parse_price(value: &NumericInput) -> Result<f64, CatalogError> {
    let price = match value {
        NumericInput::Number(number) => number.as_f64(),
        NumericInput::Text(text) => text.trim().parse::<f64>().ok(),
    };

    match price {
        Some(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(CatalogError::invalid(
            "price",
            format!("{} is not a non-negative number", describe(value)),
        )),
    }
}

/// Absent or blank stock means zero.
fn parse_stock(value: Option<&NumericInput>) -> Result<i64, CatalogError> {
    let stock = match value {
        None => return Ok(0),
        Some(value) if is_blank(value) => return Ok(0),
        Some(NumericInput::Number(number)) => number.as_i64(),
        Some(NumericInput::Text(text)) => text.trim().parse::<i64>().ok(),
    };

    match stock {
        Some(stock) if stock >= 0 => Ok(stock),
        _ => Err(CatalogError::invalid(
            "stock",
            format!(
                "{} is not a non-negative integer",
                value.map(describe).unwrap_or_default()
            ),
        )),
    }
}

fn describe(value: &NumericInput) -> String {
    match value {
        NumericInput::Number(number) => number.to_string(),
        NumericInput::Text(text) => format!("'{text}'"),
    }
}
