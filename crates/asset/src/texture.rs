//! Texture loading and data structures.
//! Images are stored bottom row first, ready for GL-style upload.

use std::path::Path;

use anyhow::{Context, Result, ensure};

/// Texture data in CPU-friendly format before GPU upload.
#[derive(Clone, Debug)]
pub struct TextureData {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
}

/// Supported texture formats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextureFormat {
    Rgba8,
}

impl TextureData {
    /// Wrap RGBA8 pixels; fails on an empty size or if `data` does not hold
    /// `width * height` pixels.
    pub fn new_rgba8(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let texture = Self {
            data,
            width,
            height,
            format: TextureFormat::Rgba8,
        };
        ensure!(
            texture.is_valid(),
            "RGBA8 data size mismatch: {} bytes for {}x{}",
            texture.data.len(),
            width,
            height
        );
        Ok(texture)
    }

    /// Load an image file (PNG/JPEG) flipped vertically.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading texture from {:?}", path);

        let img = image::open(path).with_context(|| format!("Failed to open image {:?}", path))?;
        let rgba = img.flipv().to_rgba8();
        let (width, height) = rgba.dimensions();

        log::debug!("Loaded texture {}x{}", width, height);

        Self::new_rgba8(width, height, rgba.into_raw())
    }

    /// Deterministic grey noise over a 20px checker, darkening alternate cells.
    pub fn space(size: u32, seed: u64) -> Self {
        let mut data = Vec::with_capacity(size as usize * size as usize * 4);
        let mut state = seed;

        for y in 0..size {
            for x in 0..size {
                let mut val = (next_noise(&mut state) % 255) as u8;
                if ((x / 20) + (y / 20)) % 2 == 0 {
                    val /= 2;
                }
                data.extend_from_slice(&[val, val, val, 255]);
            }
        }

        Self {
            data,
            width: size,
            height: size,
            format: TextureFormat::Rgba8,
        }
    }

    pub fn bytes_per_pixel(&self) -> u32 {
        match self.format {
            TextureFormat::Rgba8 => 4,
        }
    }

    /// Both sides non-zero and exactly one pixel's worth of bytes per texel.
    pub fn is_valid(&self) -> bool {
        let texels = self.width as usize * self.height as usize;
        texels > 0 && self.data.len() == texels * self.bytes_per_pixel() as usize
    }
}

// splitmix64
fn next_noise(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_mismatch_is_rejected() {
        assert!(TextureData::new_rgba8(2, 2, vec![0; 15]).is_err());
        assert!(TextureData::new_rgba8(2, 2, vec![0; 16]).is_ok());
        assert!(TextureData::new_rgba8(0, 4, Vec::new()).is_err());
    }

    #[test]
    fn space_texture_is_deterministic() {
        let a = TextureData::space(64, 7);
        let b = TextureData::space(64, 7);
        let c = TextureData::space(64, 8);
        assert!(a.is_valid());
        assert_eq!(a.data, b.data);
        assert_ne!(a.data, c.data);
        assert!(a.data.chunks(4).all(|px| px[0] == px[1] && px[1] == px[2] && px[3] == 255));
    }

    #[test]
    fn dark_cells_stay_below_half() {
        let tex = TextureData::space(40, 1);
        // (0, 0) is in a darkened cell.
        for y in 0..20 {
            for x in 0..20 {
                let i = ((y * 40 + x) * 4) as usize;
                assert!(tex.data[i] < 128);
            }
        }
    }

    #[test]
    fn load_flips_vertically() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("two_rows.png");
        let mut img = image::RgbaImage::new(1, 2);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        img.put_pixel(0, 1, image::Rgba([0, 0, 255, 255]));
        img.save(&path).expect("save png");

        let tex = TextureData::load(&path).expect("load png");
        assert_eq!((tex.width, tex.height), (1, 2));
        assert_eq!(&tex.data[0..4], &[0, 0, 255, 255]);
        assert_eq!(&tex.data[4..8], &[255, 0, 0, 255]);
    }

    #[test]
    fn missing_image_is_an_error() {
        assert!(TextureData::load("does/not/exist.png").is_err());
    }
}
