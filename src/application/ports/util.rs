// src/application/ports/util.rs
/// Turns free text into a URL-safe slug. Implementations return an empty
/// string when nothing in the input survives normalisation.
pub trait SlugGenerator: Send + Sync {
    fn slugify(&self, input: &str) -> String;
}
