//! CSS Tokenizer per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).

mod token;
#[allow(clippy::module_inception)]
mod tokenizer;

pub use token::{CSSToken, HashType, NumericType};
pub use tokenizer::CSSTokenizer;
