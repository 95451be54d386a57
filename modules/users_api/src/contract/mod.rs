pub mod model;

pub use model::{BirthDateRange, NewUser, User, UserPatch};
