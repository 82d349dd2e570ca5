use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::sections::list_sections,
        api::sections::get_section,
        api::sections::create_section,
        api::sections::update_section,
        api::sections::delete_section,
        api::books::list_books,
        api::books::get_book,
        api::books::create_book,
        api::books::update_book,
        api::books::delete_book,
    ),
    components(
        schemas(
            crate::models::Section,
            crate::models::Book,
            crate::domain::SectionInput,
            crate::domain::BookInput,
        )
    ),
    tags(
        (name = "shelfmark", description = "Shelfmark catalog API")
    )
)]
pub struct ApiDoc;
