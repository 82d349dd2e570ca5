//! Repository implementations using SeaORM

pub mod book_repository;
pub mod section_repository;

pub use book_repository::SeaOrmBookRepository;
pub use section_repository::SeaOrmSectionRepository;
