//! Section service - business rules for the section resource
//!
//! Enforces the invariants that are not plain field constraints: section
//! names are unique, and a section cannot be deleted while books still
//! reference it. The checks are read-only; the write is a separate
//! repository call.

use crate::domain::{BookRepository, DomainError, SectionInput, SectionRepository};
use crate::models::Section;

const MAX_FIELD_LEN: usize = 255;

fn validate(input: &SectionInput) -> Result<(), DomainError> {
    super::require_text("name", &input.name, MAX_FIELD_LEN)?;
    super::require_text("description", &input.description, MAX_FIELD_LEN)?;
    Ok(())
}

async fn check_duplicate(
    repo: &dyn SectionRepository,
    input: &SectionInput,
    exclude_id: Option<i32>,
) -> Result<(), DomainError> {
    if let Some(existing) = repo.find_by_name(&input.name, exclude_id).await? {
        tracing::debug!(id = existing.id, name = %input.name, "duplicate section name");
        return Err(DomainError::Conflict(format!(
            "Section with name {} already exists",
            input.name
        )));
    }
    Ok(())
}

/// Get a single section by ID
pub async fn find_one(repo: &dyn SectionRepository, id: i32) -> Result<Section, DomainError> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("Section with ID {} not found", id)))
}

/// Create a new section
pub async fn create(
    repo: &dyn SectionRepository,
    input: SectionInput,
) -> Result<Section, DomainError> {
    validate(&input)?;
    check_duplicate(repo, &input, None).await?;
    repo.create(&input).await
}

/// Replace a section's fields by ID
pub async fn update(
    repo: &dyn SectionRepository,
    id: i32,
    input: SectionInput,
) -> Result<Section, DomainError> {
    // Report a missing record before any conflict
    find_one(repo, id).await?;
    validate(&input)?;
    check_duplicate(repo, &input, Some(id)).await?;
    repo.update(id, &input).await
}

/// Remove a section by ID, refusing while books still reference it
pub async fn remove(
    sections: &dyn SectionRepository,
    books: &dyn BookRepository,
    id: i32,
) -> Result<(), DomainError> {
    find_one(sections, id).await?;

    if books.exists_in_section(id).await? {
        return Err(DomainError::Conflict(format!(
            "Cannot delete section with ID {} as it has existing books",
            id
        )));
    }

    sections.delete(id).await
}
