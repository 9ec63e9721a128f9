//! URL decomposition, path tokenization and entropy.
//!
//! Everything in here is total: malformed input degrades to empty values
//! instead of returning errors.

pub mod entropy;
pub mod normalizer;
pub mod suffix;
pub mod tokenizer;

#[cfg(test)]
mod tests;

pub use entropy::shannon_entropy;
pub use normalizer::{ensure_scheme, normalize, normalize_with, split_components, ParsedUrl, RawComponents};
pub use suffix::{DomainParts, SuffixList};
pub use tokenizer::{last_path_segment, split_tokens, tokenize_path, PathTokens, SEGMENT_SEPARATORS};
