pub mod forms;

pub use forms::*;
