pub mod events;
pub mod location;
pub mod movies;
pub mod weather;
pub mod yelps;
