//! Reference gallery of known plates.
//!
//! A gallery is an ordered list of templates. Order matters: when two
//! templates score identically against a region, the one that comes first
//! wins. Labels are not deduplicated; repeated labels simply compete on score.

#[cfg(feature = "image-io")]
mod load;

#[cfg(feature = "image-io")]
pub use load::{label_from_path, load_gallery_dir};

use crate::template::Template;
use crate::util::{PlateMatchError, PlateMatchResult};

/// Ordering applied to directory entries when a gallery is loaded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GalleryOrder {
    /// Sort entries by file name so tie-breaks are reproducible everywhere.
    #[default]
    Lexicographic,
    /// Keep the platform's directory enumeration order.
    Enumeration,
}

/// Ordered collection of templates.
#[derive(Clone, Debug, Default)]
pub struct Gallery {
    templates: Vec<Template>,
}

impl Gallery {
    /// Creates an empty gallery.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gallery keeping the given order.
    pub fn from_templates(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    /// Appends a template at the end of the gallery.
    pub fn push(&mut self, template: Template) {
        self.templates.push(template);
    }

    /// Returns the number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns true when the gallery holds no templates.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Returns the template at `index`.
    pub fn get(&self, index: usize) -> Option<&Template> {
        self.templates.get(index)
    }

    /// Iterates over templates in gallery order.
    pub fn iter(&self) -> std::slice::Iter<'_, Template> {
        self.templates.iter()
    }

    /// Iterates over labels in gallery order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(Template::label)
    }

    /// Fails with `GalleryEmpty` when the gallery holds no templates.
    pub fn ensure_not_empty(&self, source_name: &str) -> PlateMatchResult<()> {
        if self.is_empty() {
            return Err(PlateMatchError::GalleryEmpty {
                source_name: source_name.to_string(),
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Gallery {
    type Item = &'a Template;
    type IntoIter = std::slice::Iter<'a, Template>;

    fn into_iter(self) -> Self::IntoIter {
        self.templates.iter()
    }
}

impl FromIterator<Template> for Gallery {
    fn from_iter<I: IntoIterator<Item = Template>>(iter: I) -> Self {
        Self::from_templates(iter.into_iter().collect())
    }
}
