// Copyright 2020 @TwoCookingMice

use super::constants::Vector4f;

use std::ops;
use std::vec::Vec;

/// Row-major RGBA float image.
#[derive(Debug, Clone)]
pub struct Bitmap {
    data: Vec<Vector4f>,
    height: usize,
    width: usize
}

impl ops::Index<(usize, usize)> for Bitmap {
    type Output = Vector4f;

    fn index(&self, index: (usize, usize)) -> &Vector4f {
        let transformed_index = index.0 + self.width * index.1;
        assert!(index.0 < self.width && index.1 < self.height);
        &self.data[transformed_index]
    }
}

impl ops::IndexMut<(usize, usize)> for Bitmap {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Vector4f {
        let transformed_index = index.0 + self.width * index.1;
        assert!(index.0 < self.width && index.1 < self.height);
        &mut self.data[transformed_index]
    }
}

impl Bitmap {
    pub fn new(width: usize, height: usize) -> Self {
        let pixel_number = width * height;
        Self { data: vec!(Vector4f::new(0.0, 0.0, 0.0, 0.0);
                          pixel_number),
               width: width,
               height: height }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Vector4f] {
        &self.data
    }
}

/* Test for Bitmap */
#[cfg(test)]
mod tests {
    use super::Bitmap;
    use super::Vector4f;

    #[test]
    fn test_bitmap_basic_functions() {
        let mut bitmap = Bitmap::new(256usize, 128usize);
        assert_eq!(bitmap.width(), 256);
        assert_eq!(bitmap.height(), 128);

        bitmap[(5, 6)] = Vector4f::new(1.0, 0.5, 0.6, 1.0);
        assert_eq!(bitmap[(5, 6)][0], 1.0);
        assert_eq!(bitmap[(2, 6)][0], 0.0);

        let pixels = bitmap.pixels();
        assert_eq!(pixels.len(), 256 * 128);
        assert_eq!(pixels[5 + 256 * 6], Vector4f::new(1.0, 0.5, 0.6, 1.0));
    }
}
