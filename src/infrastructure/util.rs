// src/infrastructure/util.rs
use crate::application::ports::util::Normalizer;
use slug::slugify;

/// Lowercase, ASCII-transliterated, dash-separated form of the input.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParameterizeNormalizer;

impl Normalizer for ParameterizeNormalizer {
    fn normalize(&self, input: &str) -> String {
        slugify(input)
    }
}
