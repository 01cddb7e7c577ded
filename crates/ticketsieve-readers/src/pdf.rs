//! PDF text (pdf-extract) and embedded images (lopdf).

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use ticketsieve_core::{Error, ImageReader, ImageSlot, PageImages, RawImage, Result, TextReader};
use tracing::{debug, warn};

/// Page text via `pdf-extract`, pages concatenated in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextReader;

impl TextReader for PdfTextReader {
    fn read_text(&self, bytes: &[u8]) -> Result<String> {
        // pdf-extract can panic on malformed fonts and glyph tables
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(bytes)
        }));

        match result {
            Ok(Ok(text)) => {
                debug!("PDF text extracted: {} chars", text.len());
                Ok(text)
            }
            Ok(Err(e)) => Err(Error::Reader(format!("PDF text extraction failed: {}", e))),
            Err(_) => {
                warn!("PDF text extraction panicked, likely a malformed font");
                Err(Error::Reader(
                    "PDF text extraction panicked on malformed content".to_string(),
                ))
            }
        }
    }
}

/// Image XObjects per page via `lopdf`.
///
/// JPEG and JPEG 2000 streams are passed through untouched. Uncompressed
/// or Flate/LZW encoded 8-bit RGB and grayscale samples are re-encoded as
/// PNG. Anything else becomes an error slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfImageReader;

impl ImageReader for PdfImageReader {
    fn read_images(&self, bytes: &[u8]) -> Result<Vec<PageImages>> {
        let doc = Document::load_mem(bytes)
            .map_err(|e| Error::Reader(format!("Failed to load PDF: {}", e)))?;

        let pages = doc
            .get_pages()
            .into_iter()
            .map(|(page_no, page_id)| {
                let slots = page_images(&doc, page_id);
                debug!(page = page_no, images = slots.len(), "scanned page XObjects");
                slots
            })
            .collect();

        Ok(pages)
    }
}

/// One slot per image XObject, plus an error slot for every entry that
/// cannot be resolved to a stream. Form XObjects are not slots.
fn page_images(doc: &Document, page_id: ObjectId) -> PageImages {
    let Some(xobjects) = page_xobjects(doc, page_id) else {
        return Vec::new();
    };

    xobjects
        .iter()
        .filter_map(|(name, value)| {
            let resolved = doc
                .dereference(value)
                .and_then(|(_, object)| object.as_stream());
            match resolved {
                Ok(stream) => is_image(&stream.dict).then(|| decode_image(stream)),
                Err(e) => Some(Err(Error::Reader(format!(
                    "XObject {}: {}",
                    String::from_utf8_lossy(name),
                    e
                )))),
            }
        })
        .collect()
}

/// XObject dictionary of the page's own resources, else the nearest
/// inherited one.
fn page_xobjects(doc: &Document, page_id: ObjectId) -> Option<&Dictionary> {
    let (inline, inherited) = doc.get_page_resources(page_id).ok()?;

    let inherited = inherited
        .into_iter()
        .filter_map(|id| doc.get_object(id).and_then(Object::as_dict).ok());

    inline
        .into_iter()
        .chain(inherited)
        .find_map(|resources| {
            resources
                .get_deref(b"XObject", doc)
                .and_then(Object::as_dict)
                .ok()
        })
}

fn is_image(dict: &Dictionary) -> bool {
    matches!(dict.get(b"Subtype").and_then(Object::as_name), Ok(b"Image"))
}

fn dimension(dict: &Dictionary, key: &[u8]) -> Result<u32> {
    let value = dict
        .get(key)
        .and_then(Object::as_i64)
        .map_err(|e| Error::Reader(format!("image {}: {}", String::from_utf8_lossy(key), e)))?;
    u32::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| Error::Reader(format!("invalid image dimension {}", value)))
}

fn decode_image(stream: &Stream) -> ImageSlot {
    let dict = &stream.dict;
    let width = dimension(dict, b"Width")?;
    let height = dimension(dict, b"Height")?;
    let filters = stream.filters().unwrap_or_default();

    let passthrough = match filters.last().copied() {
        Some(b"DCTDecode") => Some("jpg"),
        Some(b"JPXDecode") => Some("jp2"),
        _ => None,
    };
    if let Some(extension) = passthrough {
        return Ok(RawImage {
            width,
            height,
            data: stream.content.clone(),
            extension: extension.to_string(),
        });
    }

    let samples = stream
        .get_plain_content()
        .map_err(|e| Error::Reader(format!("image stream: {}", e)))?;
    let png = encode_png(dict, width, height, samples)?;

    Ok(RawImage {
        width,
        height,
        data: png,
        extension: "png".to_string(),
    })
}

fn encode_png(dict: &Dictionary, width: u32, height: u32, samples: Vec<u8>) -> Result<Vec<u8>> {
    let bits = dict
        .get(b"BitsPerComponent")
        .and_then(Object::as_i64)
        .unwrap_or(8);
    if bits != 8 {
        return Err(Error::Reader(format!("unsupported bit depth {}", bits)));
    }

    let color_space = dict
        .get(b"ColorSpace")
        .and_then(Object::as_name)
        .map_err(|_| Error::Reader("unsupported image color space".to_string()))?;

    let too_short = || Error::Reader("image stream shorter than its dimensions".to_string());
    let image = match color_space {
        b"DeviceRGB" => RgbImage::from_raw(width, height, samples)
            .map(DynamicImage::ImageRgb8)
            .ok_or_else(too_short)?,
        b"DeviceGray" => GrayImage::from_raw(width, height, samples)
            .map(DynamicImage::ImageLuma8)
            .ok_or_else(too_short)?,
        other => {
            return Err(Error::Reader(format!(
                "unsupported image color space {}",
                String::from_utf8_lossy(other)
            )))
        }
    };

    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| Error::Reader(format!("PNG encoding failed: {}", e)))?;
    Ok(out.into_inner())
}
