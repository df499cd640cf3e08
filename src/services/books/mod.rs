//! 책 관리 서비스 모듈

pub mod book_service;

pub use book_service::BookService;
