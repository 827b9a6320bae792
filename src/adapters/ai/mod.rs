//! AI adapters implementing the TextGenerator port.

mod mock_generator;
mod openai_generator;

pub use mock_generator::MockTextGenerator;
pub use openai_generator::{OpenAiConfig, OpenAiGenerator};
