//! Quiz mini-game: a fixed catalog of questions and the single in-process
//! session that tracks which questions were asked and the best score seen.
pub mod catalog;
pub mod session;

pub use catalog::{Catalog, QuizError};
pub use session::QuizSession;
