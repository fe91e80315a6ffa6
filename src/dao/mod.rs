//! Query facades: one DAO per entity kind over the shared [`crate::db::Database`].
//!
//! Owner references (`firebase_uid`) are never joined or validated here;
//! referential integrity is up to the caller.

pub mod event;
pub mod preference;
pub mod user;
pub mod workout;

pub use event::FitnessEventDao;
pub use preference::PreferenceDao;
pub use user::UserDao;
pub use workout::WorkoutDao;
