//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;

use super::query::QueryOptions;
use super::DomainError;
use crate::models::{Book, Section};

/// Paginated result with total count.
///
/// `count` is the number of records matching the filter, ignoring
/// offset/limit, so clients can render page controls.
#[derive(Debug, serde::Serialize)]
pub struct Rows<T> {
    pub rows: Vec<T>,
    pub count: u64,
}

/// Input for creating or replacing a section
#[derive(Debug, Clone, serde::Deserialize, utoipa::ToSchema)]
pub struct SectionInput {
    pub name: String,
    pub description: String,
}

/// Input for creating or replacing a book
#[derive(Debug, Clone, serde::Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub date: String,
    pub summary: String,
    pub cover: String,
    pub copies: i32,
    pub section_id: i32,
}

/// Repository trait for the Section entity
#[async_trait]
pub trait SectionRepository: Send + Sync {
    /// Find sections matching the query descriptor
    async fn find(&self, opts: &QueryOptions) -> Result<Vec<Section>, DomainError>;

    /// Find sections matching the query descriptor, with the total count
    async fn find_and_count(&self, opts: &QueryOptions) -> Result<Rows<Section>, DomainError>;

    /// Find a section by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Section>, DomainError>;

    /// Find a section by name, optionally excluding one record (used on
    /// update so a section does not conflict with itself)
    async fn find_by_name(
        &self,
        name: &str,
        exclude_id: Option<i32>,
    ) -> Result<Option<Section>, DomainError>;

    /// Create a new section
    async fn create(&self, input: &SectionInput) -> Result<Section, DomainError>;

    /// Replace a section's fields (full-record update)
    async fn update(&self, id: i32, input: &SectionInput) -> Result<Section, DomainError>;

    /// Delete a section by ID
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Repository trait for the Book entity
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Find books matching the query descriptor
    async fn find(&self, opts: &QueryOptions) -> Result<Vec<Book>, DomainError>;

    /// Find books matching the query descriptor, with the total count
    async fn find_and_count(&self, opts: &QueryOptions) -> Result<Rows<Book>, DomainError>;

    /// Find a book by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError>;

    /// Find a book with the given (title, author) pair, optionally excluding
    /// one record
    async fn find_duplicate(
        &self,
        title: &str,
        author: &str,
        exclude_id: Option<i32>,
    ) -> Result<Option<Book>, DomainError>;

    /// Whether at least one book references the given section
    async fn exists_in_section(&self, section_id: i32) -> Result<bool, DomainError>;

    /// Create a new book
    async fn create(&self, input: &BookInput) -> Result<Book, DomainError>;

    /// Replace a book's fields (full-record update)
    async fn update(&self, id: i32, input: &BookInput) -> Result<Book, DomainError>;

    /// Delete a book by ID
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}
