pub mod info;
pub mod rings;
