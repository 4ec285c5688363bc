// Puzzle construction on top of the dictionary

pub mod bag;
pub mod extensions;
pub mod generator;

pub use bag::DrawBag;
pub use extensions::{Evaluation, EvaluationMode, ExtensionGenerator, EXTENSION_COUNT};
pub use generator::{Puzzle, PuzzleGenerator};
