pub mod eval;
pub mod tokenizer;

pub use eval::{apply_aug, eval, eval_condition};
pub use tokenizer::Tokenizer;
