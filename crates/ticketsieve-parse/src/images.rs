//! Significant-image extraction.
//!
//! Exports embed logos, avatars and icons alongside the screenshots that
//! matter. Only images of at least [`MIN_IMAGE_WIDTH`]×[`MIN_IMAGE_HEIGHT`]
//! pixels are kept; smaller ones are dropped without a trace.

use std::path::Path;

use ticketsieve_core::{ImageRef, PageImages, RawImage, Result, MIN_IMAGE_HEIGHT, MIN_IMAGE_WIDTH};
use tracing::warn;

/// An image that passed the size filter, with its position in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignificantImage {
    /// 1-based page number.
    pub page: u32,
    /// 1-based position among all image slots of the page.
    pub index: u32,
    pub image: RawImage,
}

impl SignificantImage {
    /// `page<N>_img<M>_<w>x<h>.<ext>`, unique within one document.
    pub fn filename(&self) -> String {
        format!(
            "page{}_img{}_{}x{}.{}",
            self.page, self.index, self.image.width, self.image.height, self.image.extension
        )
    }
}

pub fn is_significant(width: u32, height: u32) -> bool {
    width >= MIN_IMAGE_WIDTH && height >= MIN_IMAGE_HEIGHT
}

/// Keep the images large enough to matter.
///
/// Numbering counts every slot on the page, including dropped and
/// undecodable ones, so filenames do not shift when the filter changes.
pub fn select_significant(pages: Vec<PageImages>) -> Vec<SignificantImage> {
    let mut selected = Vec::new();

    for (page_idx, slots) in pages.into_iter().enumerate() {
        for (slot_idx, slot) in slots.into_iter().enumerate() {
            let image = match slot {
                Ok(image) => image,
                Err(e) => {
                    warn!(page = page_idx + 1, slot = slot_idx + 1, "Skipping image: {}", e);
                    continue;
                }
            };
            if !is_significant(image.width, image.height) {
                continue;
            }
            selected.push(SignificantImage {
                page: (page_idx + 1) as u32,
                index: (slot_idx + 1) as u32,
                image,
            });
        }
    }

    selected
}

/// Write selected images under `dir` and describe them.
///
/// The directory is created if needed. A file that cannot be written is
/// skipped; the rest are still written.
pub fn write_images(
    selected: Vec<SignificantImage>,
    dir: &Path,
    ticket_id: &str,
) -> Result<Vec<ImageRef>> {
    std::fs::create_dir_all(dir)?;

    let mut refs = Vec::with_capacity(selected.len());
    for significant in selected {
        let filename = significant.filename();
        let path = dir.join(&filename);

        if let Err(e) = std::fs::write(&path, &significant.image.data) {
            warn!("Failed to write {}: {}", path.display(), e);
            continue;
        }

        refs.push(ImageRef {
            relative_path: format!("images_{}/{}", ticket_id, filename),
            path,
            filename,
            width: significant.image.width,
            height: significant.image.height,
            page: significant.page,
            description: String::new(),
        });
    }

    Ok(refs)
}
