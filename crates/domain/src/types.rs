//! Catalog entity types and service inputs

pub mod author;
pub mod book;
pub mod genre;

pub use author::{Author, AuthorPatch, NewAuthor};
pub use book::Book;
pub use genre::Genre;
