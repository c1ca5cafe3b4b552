//! Records exchanged between the catalog services.

mod movie;
mod movie_info;
mod review;

pub use movie::Movie;
pub use movie_info::MovieInfo;
pub use review::Review;
