mod document;
mod error;
mod segmenter;
mod words;

pub use document::{DocumentMetadata, DocumentUnit, LineUnit};
pub use error::TextError;
pub use segmenter::Segmenter;
pub use words::{WordToken, has_internal_capital, is_capitalized, word_tokens};
