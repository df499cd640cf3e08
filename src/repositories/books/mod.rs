//! 책 리포지토리 모듈

pub mod book_repo;

pub use book_repo::{BookRepository, BookStore};
