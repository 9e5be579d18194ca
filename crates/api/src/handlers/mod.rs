pub mod movies;
pub mod session;
pub mod users;
