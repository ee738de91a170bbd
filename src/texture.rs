//! Luminance textures synthesized from light sources.
//!
//! A [`LuminanceImage`] is a row-major grid of luminance values in `[0, 1]`.
//! One-dimensional textures have `height == 1`. Pre-filtering renders the
//! texture at [`SUPERSAMPLING`] times the requested resolution and reduces every
//! block of samples with a fixed kernel.

use crate::contour;
use crate::float_types::Real;

#[cfg(feature = "image-io")]
use image::{GrayImage, ImageBuffer, Luma};

/// Resolution factor of pre-filtered textures.
pub const SUPERSAMPLING: usize = 4;

/// Texture resolution used when none is requested.
pub const DEFAULT_TEXTURE_SIZE: usize = 256;

/// 1-D pre-filter weights, normalized by their sum.
pub const KERNEL_1D: [Real; SUPERSAMPLING] = [1.0, 2.0, 2.0, 1.0];
pub const KERNEL_1D_SUM: Real = 6.0;

/// 2-D pre-filter weights, normalized by their sum.
pub const KERNEL_2D: [[Real; SUPERSAMPLING]; SUPERSAMPLING] = [
    [1.0, 1.0, 1.0, 1.0],
    [1.0, 2.0, 2.0, 1.0],
    [1.0, 2.0, 2.0, 1.0],
    [1.0, 1.0, 1.0, 1.0],
];
pub const KERNEL_2D_SUM: Real = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct LuminanceImage {
    width: usize,
    height: usize,
    data: Vec<Real>,
}

impl LuminanceImage {
    /// Black image.
    pub fn new(width: usize, height: usize) -> Self {
        LuminanceImage {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    /// Wrap row-major `data`. Missing values are filled with 0 and extra values dropped.
    pub fn from_data(width: usize, height: usize, mut data: Vec<Real>) -> Self {
        debug_assert_eq!(data.len(), width * height, "image data does not match its size");
        data.resize(width * height, 0.0);
        LuminanceImage { width, height, data }
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn is_one_dimensional(&self) -> bool {
        self.height == 1
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[Real] {
        &self.data
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Real> {
        if x < self.width && y < self.height {
            Some(self.data[y * self.width + x])
        } else {
            None
        }
    }

    /// Out of range writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, value: Real) {
        if x < self.width && y < self.height {
            self.data[y * self.width + x] = value;
        }
    }

    /// 8-bit grey image, values clamped to `[0, 1]`.
    #[cfg(feature = "image-io")]
    pub fn to_gray_image(&self) -> GrayImage {
        ImageBuffer::from_fn(self.width as u32, self.height as u32, |x, y| {
            let v = self.data[y as usize * self.width + x as usize].clamp(0.0, 1.0);
            Luma([(v * 255.0).round() as u8])
        })
    }

    /// 16-bit grey image, values clamped to `[0, 1]`.
    #[cfg(feature = "image-io")]
    pub fn to_gray16(&self) -> ImageBuffer<Luma<u16>, Vec<u16>> {
        ImageBuffer::from_fn(self.width as u32, self.height as u32, |x, y| {
            let v = self.data[y as usize * self.width + x as usize].clamp(0.0, 1.0);
            Luma([(v * u16::MAX as Real).round() as u16])
        })
    }

    /// Save as a 16-bit grey image; the format follows the file extension.
    #[cfg(feature = "image-io")]
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> image::ImageResult<()> {
        self.to_gray16().save(path)
    }
}

/// Reduce a supersampled 1-D image to `size` texels.
///
/// Texel `i` is `(s[4i] + 2 s[4i+1] + 2 s[4i+2] + s[4i+3]) / 6`.
pub fn prefilter_1d(image: &LuminanceImage, size: usize) -> LuminanceImage {
    let samples = image.data();
    let data = (0..size)
        .map(|i| {
            let block = i * SUPERSAMPLING;
            KERNEL_1D
                .iter()
                .enumerate()
                .map(|(k, w)| w * samples.get(block + k).copied().unwrap_or(0.0))
                .sum::<Real>()
                / KERNEL_1D_SUM
        })
        .collect();
    LuminanceImage::from_data(size, 1, data)
}

/// Reduce a supersampled 2-D image to `size × size` texels with the 4×4 kernel.
pub fn prefilter_2d(image: &LuminanceImage, size: usize) -> LuminanceImage {
    let mut out = LuminanceImage::new(size, size);
    for ty in 0..size {
        for tx in 0..size {
            let mut sum = 0.0;
            for (ky, row) in KERNEL_2D.iter().enumerate() {
                for (kx, w) in row.iter().enumerate() {
                    let sample = image
                        .get(tx * SUPERSAMPLING + kx, ty * SUPERSAMPLING + ky)
                        .unwrap_or(0.0);
                    sum += w * sample;
                }
            }
            out.set(tx, ty, sum / KERNEL_2D_SUM);
        }
    }
    out
}

/// Isophote stripe texture: a 1-D image that is white at the texels of the
/// isovalues (remapped from `[-1, 1]` to `[0, 1]`) and black elsewhere.
///
/// `number_of_lines <= 1` puts a single stripe at the cosine 0.
pub fn isophote_stripes(size: usize, number_of_lines: usize) -> LuminanceImage {
    let mut image = LuminanceImage::new(size, 1);
    if size == 0 {
        return image;
    }

    let values = if number_of_lines > 1 {
        contour::iso_values(-1.0, 1.0, number_of_lines)
    } else {
        vec![0.0]
    };
    for value in values {
        let t = 0.5 * (value + 1.0);
        let texel = (t * (size - 1) as Real).round() as usize;
        image.set(texel, 0, 1.0);
    }
    image
}
