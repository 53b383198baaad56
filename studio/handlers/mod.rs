pub mod assets;
pub mod catalog;
pub mod page;
pub mod tryon;
pub mod upload;
