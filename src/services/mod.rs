pub mod content_builder;
pub mod exercise;
pub mod randomizer;
pub mod tokenizer;
pub mod warn_writer;

pub use content_builder::ContentBuilder;
pub use exercise::{build_exercise, check_definition_order, check_fill_answer, ExerciseItem};
pub use randomizer::{obscure_word, shuffle_definition, DEFAULT_PLACEHOLDER};
pub use tokenizer::Tokenizer;
pub use warn_writer::WarnWriter;
