//! Book service - business rules for the book resource
//!
//! A book must reference an existing section and carry a unique
//! (title, author) pair. The section check runs before the duplicate check
//! so a bad parent reference is reported even when the natural key would
//! also conflict.

use crate::domain::{BookInput, BookRepository, DomainError, SectionRepository};
use crate::models::Book;

const MAX_FIELD_LEN: usize = 255;
const MAX_SUMMARY_LEN: usize = 1000;

fn validate(input: &BookInput) -> Result<(), DomainError> {
    super::require_text("title", &input.title, MAX_FIELD_LEN)?;
    super::require_text("author", &input.author, MAX_FIELD_LEN)?;
    super::require_text("summary", &input.summary, MAX_SUMMARY_LEN)?;

    if chrono::DateTime::parse_from_rfc3339(&input.date).is_err()
        && input.date.parse::<chrono::NaiveDate>().is_err()
    {
        return Err(DomainError::Validation(format!(
            "date must be an ISO date, got '{}'",
            input.date
        )));
    }

    if url::Url::parse(&input.cover).is_err() {
        return Err(DomainError::Validation("cover must be a valid URL".into()));
    }

    if input.copies < 1 {
        return Err(DomainError::Validation("copies must be at least 1".into()));
    }

    Ok(())
}

async fn validate_section(
    sections: &dyn SectionRepository,
    section_id: i32,
) -> Result<(), DomainError> {
    if sections.find_by_id(section_id).await?.is_none() {
        return Err(DomainError::NotFound(format!(
            "Section with ID {} not found",
            section_id
        )));
    }
    Ok(())
}

async fn check_duplicate(
    books: &dyn BookRepository,
    input: &BookInput,
    exclude_id: Option<i32>,
) -> Result<(), DomainError> {
    if let Some(existing) = books
        .find_duplicate(&input.title, &input.author, exclude_id)
        .await?
    {
        tracing::debug!(id = existing.id, title = %input.title, "duplicate book");
        return Err(DomainError::Conflict(format!(
            "Book with title {} and author {} already exists",
            input.title, input.author
        )));
    }
    Ok(())
}

/// Get a single book by ID
pub async fn find_one(repo: &dyn BookRepository, id: i32) -> Result<Book, DomainError> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("Book with ID {} not found", id)))
}

/// Create a new book
pub async fn create(
    books: &dyn BookRepository,
    sections: &dyn SectionRepository,
    input: BookInput,
) -> Result<Book, DomainError> {
    validate(&input)?;
    // Parent existence before natural-key uniqueness
    validate_section(sections, input.section_id).await?;
    check_duplicate(books, &input, None).await?;
    books.create(&input).await
}

/// Replace a book's fields by ID
pub async fn update(
    books: &dyn BookRepository,
    sections: &dyn SectionRepository,
    id: i32,
    input: BookInput,
) -> Result<Book, DomainError> {
    find_one(books, id).await?;
    validate(&input)?;
    validate_section(sections, input.section_id).await?;
    // A record may re-assert its own (title, author)
    check_duplicate(books, &input, Some(id)).await?;
    books.update(id, &input).await
}

/// Remove a book by ID
pub async fn remove(books: &dyn BookRepository, id: i32) -> Result<(), DomainError> {
    find_one(books, id).await?;
    books.delete(id).await
}
