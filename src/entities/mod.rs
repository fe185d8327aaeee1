pub mod prelude;

pub mod events;
pub mod locations;
pub mod movies;
pub mod weather;
pub mod yelps;
