//! Query structs, one per table. Each takes the pool explicitly.

pub mod movie_repo;
pub mod session_repo;
pub mod user_repo;

pub use movie_repo::MovieRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
