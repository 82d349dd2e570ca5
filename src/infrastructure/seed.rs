use sea_orm::sea_query::OnConflict;
use sea_orm::*;

use crate::models::{book, section};

pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    // 1. Create Sections
    let sections = vec![
        ("Fiction", "Books that tell imaginary stories"),
        ("Non-fiction", "Books that provide factual information"),
        ("Children", "Books for young readers"),
    ];

    for (name, description) in sections {
        let model = section::ActiveModel {
            name: Set(name.to_owned()),
            description: Set(description.to_owned()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            updated_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };
        section::Entity::insert(model)
            .on_conflict(
                OnConflict::column(section::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }

    let fiction = section::Entity::find()
        .filter(section::Column::Name.eq("Fiction"))
        .one(db)
        .await?;
    let non_fiction = section::Entity::find()
        .filter(section::Column::Name.eq("Non-fiction"))
        .one(db)
        .await?;

    let (fiction_id, non_fiction_id) = match (fiction, non_fiction) {
        (Some(f), Some(n)) => (f.id, n.id),
        _ => return Ok(()),
    };

    // 2. Create Books
    let books = vec![
        (
            "To Kill a Mockingbird",
            "Harper Lee",
            "1960-07-11",
            "A classic novel about racism and injustice in the American South",
            "https://upload.wikimedia.org/wikipedia/commons/4/4f/To_Kill_a_Mockingbird_%28first_edition_cover%29.jpg",
            1,
            fiction_id,
        ),
        (
            "The Great Gatsby",
            "F. Scott Fitzgerald",
            "1925-04-10",
            "A tale of love, wealth, and excess in 1920s America",
            "https://upload.wikimedia.org/wikipedia/commons/7/7a/The_Great_Gatsby_Cover_1925_Retouched.jpg",
            3,
            fiction_id,
        ),
        (
            "A Brief History of Time",
            "Stephen Hawking",
            "1988-04-01",
            "An overview of cosmology for the general reader",
            "https://upload.wikimedia.org/wikipedia/en/a/a3/BriefHistoryTime.jpg",
            2,
            non_fiction_id,
        ),
    ];

    for (title, author, date, summary, cover, copies, section_id) in books {
        let model = book::ActiveModel {
            title: Set(title.to_owned()),
            author: Set(author.to_owned()),
            date: Set(date.to_owned()),
            summary: Set(summary.to_owned()),
            cover: Set(cover.to_owned()),
            copies: Set(copies),
            section_id: Set(section_id),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            updated_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };
        book::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([book::Column::Title, book::Column::Author])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }

    Ok(())
}
