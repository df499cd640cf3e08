pub mod request;
pub mod response;

pub use request::CreateReviewRequest;
pub use response::ReviewResponse;
