pub mod book;
pub mod section;

pub use book::Book;
pub use section::Section;
