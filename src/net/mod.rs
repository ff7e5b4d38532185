pub mod download;
pub mod fetch;
pub mod image;
