// src/application/ports/util.rs
/// Deterministic transform from arbitrary text to a candidate slug.
pub trait Normalizer: Send + Sync {
    fn normalize(&self, input: &str) -> String;
}

impl<F> Normalizer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn normalize(&self, input: &str) -> String {
        self(input)
    }
}
