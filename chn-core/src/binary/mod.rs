//! Вспомогательные примитивы для полей фиксированной ширины.

pub mod read;
pub mod write;

pub use read::*;
pub use write::*;
