pub mod expr;
pub mod input;

pub use expr::{evaluate, Evaluation, ERROR_SENTINEL};
pub use input::{InputBuffer, Key};
