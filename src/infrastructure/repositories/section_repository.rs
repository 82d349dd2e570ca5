//! SeaORM implementation of SectionRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};

use crate::domain::{
    DomainError, Filter, QueryOptions, Rows, SectionInput, SectionRepository, SortDirection,
};
use crate::models::section::{ActiveModel, Column, Entity as SectionEntity};
use crate::models::Section;

/// SeaORM-based implementation of SectionRepository
pub struct SeaOrmSectionRepository {
    db: DatabaseConnection,
}

impl SeaOrmSectionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn column_for(field: &str) -> Column {
    match field {
        "name" => Column::Name,
        "description" => Column::Description,
        "id" => Column::Id,
        "updatedAt" => Column::UpdatedAt,
        _ => Column::CreatedAt,
    }
}

/// Apply the filter part of a query descriptor.
///
/// SQLite LIKE is case-insensitive for ASCII, which gives the substring
/// search its case-insensitive behavior.
fn apply_filter(mut query: Select<SectionEntity>, opts: &QueryOptions) -> Select<SectionEntity> {
    if let Filter::Search { fields, term } = &opts.filter {
        let mut cond = Condition::any();
        for field in *fields {
            cond = cond.add(column_for(field).contains(term));
        }
        query = query.filter(cond);
    }
    query
}

fn apply_order_and_window(
    mut query: Select<SectionEntity>,
    opts: &QueryOptions,
) -> Select<SectionEntity> {
    for key in &opts.order {
        query = match key.direction {
            SortDirection::Asc => query.order_by_asc(column_for(key.field)),
            SortDirection::Desc => query.order_by_desc(column_for(key.field)),
        };
    }
    query.offset(opts.offset).limit(opts.limit)
}

#[async_trait]
impl SectionRepository for SeaOrmSectionRepository {
    async fn find(&self, opts: &QueryOptions) -> Result<Vec<Section>, DomainError> {
        let query = apply_order_and_window(apply_filter(SectionEntity::find(), opts), opts);
        let sections = query.all(&self.db).await?;
        Ok(sections.into_iter().map(Section::from).collect())
    }

    async fn find_and_count(&self, opts: &QueryOptions) -> Result<Rows<Section>, DomainError> {
        let filtered = apply_filter(SectionEntity::find(), opts);
        // Total count ignores offset/limit
        let count = filtered.clone().count(&self.db).await?;
        let sections = apply_order_and_window(filtered, opts).all(&self.db).await?;
        Ok(Rows {
            rows: sections.into_iter().map(Section::from).collect(),
            count,
        })
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Section>, DomainError> {
        let section = SectionEntity::find_by_id(id).one(&self.db).await?;
        Ok(section.map(Section::from))
    }

    async fn find_by_name(
        &self,
        name: &str,
        exclude_id: Option<i32>,
    ) -> Result<Option<Section>, DomainError> {
        let mut query = SectionEntity::find().filter(Column::Name.eq(name));
        if let Some(id) = exclude_id {
            query = query.filter(Column::Id.ne(id));
        }
        let section = query.one(&self.db).await?;
        Ok(section.map(Section::from))
    }

    async fn create(&self, input: &SectionInput) -> Result<Section, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();
        let section = ActiveModel {
            name: Set(input.name.clone()),
            description: Set(input.description.clone()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };
        let model = section.insert(&self.db).await?;
        Ok(Section::from(model))
    }

    async fn update(&self, id: i32, input: &SectionInput) -> Result<Section, DomainError> {
        let model = SectionEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Section with ID {} not found", id)))?;

        let mut section: ActiveModel = model.into();
        section.name = Set(input.name.clone());
        section.description = Set(input.description.clone());
        section.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let model = section.update(&self.db).await?;
        Ok(Section::from(model))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let model = SectionEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Section with ID {} not found", id)))?;
        model.delete(&self.db).await?;
        Ok(())
    }
}
