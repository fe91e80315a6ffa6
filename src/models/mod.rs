pub mod fitness_event;
pub mod user;
pub mod workout;

pub use fitness_event::{FitnessEvent, NewFitnessEvent};
pub use user::User;
pub use workout::{NewWorkout, Workout};
