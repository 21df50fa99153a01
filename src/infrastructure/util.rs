// src/infrastructure/util.rs
use crate::application::ports::util::SlugGenerator;
use slug::slugify;

/// Lower-cases, transliterates to ASCII and collapses every run of
/// non-alphanumerics into a single `-`.
#[derive(Default, Clone)]
pub struct DefaultSlugGenerator;

impl SlugGenerator for DefaultSlugGenerator {
    fn slugify(&self, input: &str) -> String {
        slugify(input)
    }
}
