/// Handle errors
pub mod error;
