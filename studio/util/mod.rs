pub mod data_url;
pub mod form;
pub mod multipart;
