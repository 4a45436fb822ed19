pub mod submission;
pub mod board;
pub mod store;

pub use submission::ScoreSubmission;
pub use board::{ScoreBoard, Standing};
pub use store::ScoreStore;
