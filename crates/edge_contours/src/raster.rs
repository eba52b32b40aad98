//! Validation of caller-supplied rasters.
//!
//! The extractor only accepts 8-bit samples with one to four channels.
//! Anything else is rejected with [`ContourError::InvalidInput`] before
//! any processing happens.

use image::{ColorType, DynamicImage, GrayImage, ImageBuffer};
use crate::error::{ContourError, Result};

/// Check that `image` is a non-empty 8-bit raster
pub fn validate(image: &DynamicImage) -> Result<()> {
    let color = image.color();
    if !matches!(
        color,
        ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8
    ) {
        return Err(ContourError::InvalidInput(format!(
            "expected 8-bit samples, got {color:?}"
        )));
    }

    if image.width() == 0 || image.height() == 0 {
        return Err(ContourError::InvalidInput(format!(
            "image has no pixels ({}x{})",
            image.width(),
            image.height()
        )));
    }

    Ok(())
}

/// Validate and reduce to a single luma channel
pub fn to_luma8(image: &DynamicImage) -> Result<GrayImage> {
    validate(image)?;
    Ok(match image {
        DynamicImage::ImageLuma8(gray) => gray.clone(),
        other => other.to_luma8(),
    })
}

/// Build an image from a row-major, channel-interleaved sample buffer
pub fn raster_from_raw(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<DynamicImage> {
    let expected = width as usize * height as usize * channels as usize;
    if data.len() != expected {
        return Err(ContourError::InvalidInput(format!(
            "buffer holds {} samples, {width}x{height}x{channels} needs {expected}",
            data.len()
        )));
    }

    let image = match channels {
        1 => ImageBuffer::from_raw(width, height, data).map(DynamicImage::ImageLuma8),
        2 => ImageBuffer::from_raw(width, height, data).map(DynamicImage::ImageLumaA8),
        3 => ImageBuffer::from_raw(width, height, data).map(DynamicImage::ImageRgb8),
        4 => ImageBuffer::from_raw(width, height, data).map(DynamicImage::ImageRgba8),
        n => {
            return Err(ContourError::InvalidInput(format!(
                "unsupported channel count {n}"
            )));
        }
    }
    .ok_or_else(|| ContourError::InvalidInput("buffer does not match dimensions".to_string()))?;

    validate(&image)?;
    Ok(image)
}

/// `HxW` or `HxWxC` shape, in the order the numeric-array world prints it
pub fn shape(image: &DynamicImage) -> String {
    let channels = image.color().channel_count();
    if channels == 1 {
        format!("({}, {})", image.height(), image.width())
    } else {
        format!("({}, {}, {})", image.height(), image.width(), channels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma};

    #[test]
    fn test_accepts_8bit_variants() {
        assert!(validate(&DynamicImage::new_luma8(4, 4)).is_ok());
        assert!(validate(&DynamicImage::new_rgb8(4, 4)).is_ok());
        assert!(validate(&DynamicImage::new_rgba8(4, 4)).is_ok());
    }

    #[test]
    fn test_rejects_16bit_and_float() {
        let deep = DynamicImage::ImageLuma16(ImageBuffer::<Luma<u16>, Vec<u16>>::new(4, 4));
        assert!(matches!(validate(&deep), Err(ContourError::InvalidInput(_))));
        assert!(matches!(
            to_luma8(&DynamicImage::new_rgb32f(4, 4)),
            Err(ContourError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            validate(&DynamicImage::new_luma8(0, 5)),
            Err(ContourError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_raw_buffer_checks() {
        assert!(raster_from_raw(2, 2, 3, vec![0; 12]).is_ok());
        assert!(matches!(
            raster_from_raw(2, 2, 3, vec![0; 11]),
            Err(ContourError::InvalidInput(_))
        ));
        assert!(matches!(
            raster_from_raw(2, 2, 5, vec![0; 20]),
            Err(ContourError::InvalidInput(_))
        ));
        assert!(matches!(
            raster_from_raw(0, 0, 1, vec![]),
            Err(ContourError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_shape() {
        assert_eq!(shape(&DynamicImage::new_rgb8(7, 3)), "(3, 7, 3)");
        assert_eq!(shape(&DynamicImage::new_luma8(7, 3)), "(3, 7)");
    }
}
