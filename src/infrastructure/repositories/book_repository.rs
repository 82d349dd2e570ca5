//! SeaORM implementation of BookRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};

use crate::domain::{
    BookInput, BookRepository, DomainError, Filter, QueryOptions, Rows, SortDirection,
};
use crate::models::book::{ActiveModel, Column, Entity as BookEntity};
use crate::models::Book;

/// SeaORM-based implementation of BookRepository
pub struct SeaOrmBookRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn column_for(field: &str) -> Column {
    match field {
        "title" => Column::Title,
        "author" => Column::Author,
        "date" => Column::Date,
        "summary" => Column::Summary,
        "copies" => Column::Copies,
        "id" => Column::Id,
        "updatedAt" => Column::UpdatedAt,
        _ => Column::CreatedAt,
    }
}

fn apply_filter(mut query: Select<BookEntity>, opts: &QueryOptions) -> Select<BookEntity> {
    if let Filter::Search { fields, term } = &opts.filter {
        let mut cond = Condition::any();
        for field in *fields {
            cond = cond.add(column_for(field).contains(term));
        }
        query = query.filter(cond);
    }
    query
}

fn apply_order_and_window(mut query: Select<BookEntity>, opts: &QueryOptions) -> Select<BookEntity> {
    for key in &opts.order {
        query = match key.direction {
            SortDirection::Asc => query.order_by_asc(column_for(key.field)),
            SortDirection::Desc => query.order_by_desc(column_for(key.field)),
        };
    }
    query.offset(opts.offset).limit(opts.limit)
}

fn active_model_from(input: &BookInput) -> ActiveModel {
    ActiveModel {
        title: Set(input.title.clone()),
        author: Set(input.author.clone()),
        date: Set(input.date.clone()),
        summary: Set(input.summary.clone()),
        cover: Set(input.cover.clone()),
        copies: Set(input.copies),
        section_id: Set(input.section_id),
        ..Default::default()
    }
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn find(&self, opts: &QueryOptions) -> Result<Vec<Book>, DomainError> {
        let query = apply_order_and_window(apply_filter(BookEntity::find(), opts), opts);
        let books = query.all(&self.db).await?;
        Ok(books.into_iter().map(Book::from).collect())
    }

    async fn find_and_count(&self, opts: &QueryOptions) -> Result<Rows<Book>, DomainError> {
        let filtered = apply_filter(BookEntity::find(), opts);
        // Total count ignores offset/limit
        let count = filtered.clone().count(&self.db).await?;
        let books = apply_order_and_window(filtered, opts).all(&self.db).await?;
        Ok(Rows {
            rows: books.into_iter().map(Book::from).collect(),
            count,
        })
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError> {
        let book = BookEntity::find_by_id(id).one(&self.db).await?;
        Ok(book.map(Book::from))
    }

    async fn find_duplicate(
        &self,
        title: &str,
        author: &str,
        exclude_id: Option<i32>,
    ) -> Result<Option<Book>, DomainError> {
        let mut query = BookEntity::find()
            .filter(Column::Title.eq(title))
            .filter(Column::Author.eq(author));
        if let Some(id) = exclude_id {
            query = query.filter(Column::Id.ne(id));
        }
        let book = query.one(&self.db).await?;
        Ok(book.map(Book::from))
    }

    async fn exists_in_section(&self, section_id: i32) -> Result<bool, DomainError> {
        let count = BookEntity::find()
            .filter(Column::SectionId.eq(section_id))
            .limit(1)
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn create(&self, input: &BookInput) -> Result<Book, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();
        let mut book = active_model_from(input);
        book.created_at = Set(now.clone());
        book.updated_at = Set(now);

        let model = book.insert(&self.db).await?;
        Ok(Book::from(model))
    }

    async fn update(&self, id: i32, input: &BookInput) -> Result<Book, DomainError> {
        let model = BookEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Book with ID {} not found", id)))?;

        let created_at = model.created_at.clone();
        let mut book = active_model_from(input);
        book.id = Set(id);
        book.created_at = Set(created_at);
        book.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let model = book.update(&self.db).await?;
        Ok(Book::from(model))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let model = BookEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Book with ID {} not found", id)))?;
        model.delete(&self.db).await?;
        Ok(())
    }
}
