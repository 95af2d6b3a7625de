pub mod hide;
pub mod inspect;
pub mod unveil;
