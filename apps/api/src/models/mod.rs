pub mod cv;
pub mod saved_cv;
