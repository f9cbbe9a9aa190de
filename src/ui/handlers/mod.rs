//! Handler modules for keyboard input and quiz session transitions.

mod input_handler;
mod quiz_handler;

pub use input_handler::InputHandler;
pub use quiz_handler::QuizHandler;
