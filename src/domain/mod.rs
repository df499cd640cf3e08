pub mod entities;
pub mod dto;
pub mod models;
