//! Books Entity Module

pub mod book;

pub use book::Book;
