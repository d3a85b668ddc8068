pub mod movie;
pub mod section;
pub mod section_movie;
