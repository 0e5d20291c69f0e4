/* Copyright 2020 @TwoCookingMice */

use crate::math::bitmap::Bitmap;
use crate::math::constants::{Float, Vector4f};

use exr::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageIoError {
    #[error("failed to write {path}: {source}")]
    Write { path: String, source: exr::error::Error },
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: exr::error::Error },
    #[error("cannot write an empty {width}x{height} image")]
    Empty { width: usize, height: usize },
}

struct Pixels {
    width: usize,
    data: Vec<(Float, Float, Float, Float)>,
    height: usize,
}

// Read EXR Image from file
pub fn read_exr_from_file(file_path: &str) -> std::result::Result<Bitmap, ImageIoError> {
    log::info!("Starting reading OpenEXR image from: {}.", file_path);

    let image = read()
        .no_deep_data()
        .largest_resolution_level()
        .rgba_channels(
            |resolution, _| Pixels {
                width: resolution.width(),
                height: resolution.height(),
                data: vec![(0.0, 0.0, 0.0, 0.0); resolution.width() * resolution.height()],
            },
            |image, position, (r, g, b, a): (f32, f32, f32, f32)| {
                let idx = position.y() * image.width + position.x();
                image.data[idx] = (r, g, b, a);
            },
        )
        .first_valid_layer()
        .all_attributes()
        .from_file(file_path)
        .map_err(|source| ImageIoError::Read { path: file_path.to_string(), source })?;

    let pixels = image.layer_data.channel_data.pixels;
    let mut bitmap = Bitmap::new(pixels.width, pixels.height);
    for y in 0..pixels.height {
        for x in 0..pixels.width {
            let (r, g, b, a) = pixels.data[y * pixels.width + x];
            bitmap[(x, y)] = Vector4f::new(r, g, b, a);
        }
    }

    log::info!("OpenEXR loaded, width = {}, height = {}.", pixels.width, pixels.height);
    Ok(bitmap)
}

// Write EXR Image to file
pub fn write_exr_to_file(image: &Bitmap, file_path: &str) -> std::result::Result<(), ImageIoError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(ImageIoError::Empty { width, height });
    }
    log::info!("Starting writing openexr images: {}.", file_path);

    write_rgba_file(file_path, width, height, |x, y| {
        let p = image[(x, y)];
        (p.x, p.y, p.z, p.w)
    })
    .map_err(|source| ImageIoError::Write { path: file_path.to_string(), source })?;

    log::info!("EXR written to: {}.", file_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_image_reads_back() {
        let mut bitmap = Bitmap::new(5, 3);
        bitmap[(0, 0)] = Vector4f::new(0.25, 0.5, 1.0, 1.0);
        bitmap[(4, 2)] = Vector4f::new(3.0, 0.0, 0.125, 0.5);

        let path = std::env::temp_dir().join(format!("cloudmarch_exr_{}.exr", std::process::id()));
        let path = path.to_string_lossy().to_string();
        write_exr_to_file(&bitmap, &path).unwrap();
        let loaded = read_exr_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.width(), 5);
        assert_eq!(loaded.height(), 3);
        assert_eq!(loaded.pixels(), bitmap.pixels());
    }

    #[test]
    fn empty_image_is_rejected() {
        let bitmap = Bitmap::new(0, 4);
        assert!(matches!(write_exr_to_file(&bitmap, "unused.exr"), Err(ImageIoError::Empty { .. })));
    }

    #[test]
    fn missing_file_reports_the_path() {
        match read_exr_from_file("/nonexistent/image.exr") {
            Err(ImageIoError::Read { path, .. }) => assert_eq!(path, "/nonexistent/image.exr"),
            other => panic!("unexpected result {:?}", other.map(|b| b.width())),
        }
    }
}
