// src/application/ports/mod.rs
pub mod util;

// Injection-site alias for the normalizer trait object.
pub type NormalizerPort = dyn util::Normalizer;
