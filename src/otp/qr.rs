//! QR-code rendering for `otpauth://` payload URIs.
//!
//! Uses the `qrcode` crate to produce the QR matrix and the `image` crate
//! to render it as a PNG blob the caller can write to disk or embed.

use image::{GrayImage, Luma};
use qrcode::QrCode;

use crate::otp::types::{OtpError, OtpErrorKind};

/// Default module size in pixels (each QR "module" becomes this many px wide).
const MODULE_PX: u32 = 8;
/// Quiet-zone border in modules.
const QUIET_ZONE: u32 = 4;
/// Minimum overall image edge; phone cameras struggle below ~300 px.
const MIN_IMAGE_PX: u32 = 300;

/// Render a PNG QR code (as bytes) encoding the given text.
///
/// Modules are scaled up as needed so the image is at least
/// [`MIN_IMAGE_PX`] pixels on each side.
pub fn text_to_qr_png(text: &str) -> Result<Vec<u8>, OtpError> {
    let code = QrCode::new(text.as_bytes()).map_err(|e| {
        OtpError::new(OtpErrorKind::QrEncodeFailed, "QR encode error").with_detail(e.to_string())
    })?;

    let matrix = code.to_colors();
    let width = code.width() as u32;
    let total_modules = width + QUIET_ZONE * 2;
    let px = MODULE_PX.max(MIN_IMAGE_PX.div_ceil(total_modules));
    let img_size = total_modules * px;

    let mut img = GrayImage::from_pixel(img_size, img_size, Luma([255u8]));

    for y in 0..width {
        for x in 0..width {
            if matrix[(y * width + x) as usize] == qrcode::Color::Dark {
                let px_x = (x + QUIET_ZONE) * px;
                let px_y = (y + QUIET_ZONE) * px;
                for dy in 0..px {
                    for dx in 0..px {
                        img.put_pixel(px_x + dx, px_y + dy, Luma([0u8]));
                    }
                }
            }
        }
    }

    let mut buf = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut buf);
    image::ImageEncoder::write_image(
        encoder,
        img.as_raw(),
        img_size,
        img_size,
        image::ExtendedColorType::L8,
    )
    .map_err(|e| {
        OtpError::new(OtpErrorKind::QrEncodeFailed, "PNG encode error").with_detail(e.to_string())
    })?;

    Ok(buf)
}

/// Render a QR code as a base64 `data:image/png;base64,...` URI, for callers
/// embedding the image in HTML instead of writing a file.
pub fn text_to_qr_data_uri(text: &str) -> Result<String, OtpError> {
    use base64::Engine;
    let png = text_to_qr_png(text)?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(png);
    Ok(format!("data:image/png;base64,{}", b64))
}
