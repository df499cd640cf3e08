pub mod request;
pub mod response;

pub use request::{CreateBookRequest, UpdateBookRequest};
pub use response::BookResponse;
