pub mod set_difference;

pub use set_difference::{is_following, unfollowers, DiffOutcome, SearchOutcome};
