//! Loading a gallery from a directory of plate images.

use crate::gallery::{Gallery, GalleryOrder};
use crate::image::io::{load_gray_image, media_error};
use crate::template::Template;
use crate::trace::trace_event;
use crate::util::PlateMatchResult;
use std::fs;
use std::path::Path;

/// Loads every image file in `dir` as a grayscale template.
///
/// The label is the file name with its extension stripped. Subdirectories and
/// hidden files are skipped; any other file that fails to decode aborts the
/// load. An empty result is reported as `GalleryEmpty`.
pub fn load_gallery_dir<P: AsRef<Path>>(dir: P, order: GalleryOrder) -> PlateMatchResult<Gallery> {
    let dir = dir.as_ref();
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|err| media_error(dir, err))? {
        let path = entry.map_err(|err| media_error(dir, err))?.path();
        if path.is_file() && !is_hidden(&path) {
            paths.push(path);
        }
    }
    if order == GalleryOrder::Lexicographic {
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    }

    let gallery = paths
        .iter()
        .map(|path| -> PlateMatchResult<Template> {
            Ok(Template::from_image(label_from_path(path), load_gray_image(path)?))
        })
        .collect::<PlateMatchResult<Gallery>>()?;
    gallery.ensure_not_empty(&dir.display().to_string())?;

    trace_event!("gallery_loaded", templates = gallery.len());
    Ok(gallery)
}

/// Derives a template label from a file path (file stem).
pub fn label_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}
