//! Writing frames as images, format is chosen by file extension

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, ensure, Context, Result};
use image::RgbaImage;

/// Wrap RGBA `buffer` of frame `width`x`height` into an image
pub fn frame_image(width: usize, height: usize, buffer: &[u8]) -> Result<RgbaImage> {
    ensure!(
        buffer.len() == width * height * 4,
        "buffer has {} bytes, image {}x{} needs {}",
        buffer.len(),
        width,
        height,
        width * height * 4
    );

    let w = u32::try_from(width).context("image width")?;
    let h = u32::try_from(height).context("image height")?;
    RgbaImage::from_raw(w, h, buffer.to_vec()).ok_or_else(|| anyhow!("buffer too small"))
}

/// Write frame into file `path`
pub fn save_frame(path: &Path, width: usize, height: usize, buffer: &[u8]) -> Result<()> {
    frame_image(width, height, buffer)?
        .save(path)
        .with_context(|| format!("writing {}", path.display()))
}

/// File name of frame `index` out of `total`
///
/// Single frame keeps `base`, otherwise frame number is appended to the stem.
pub fn frame_file_name(base: &Path, index: usize, total: usize) -> PathBuf {
    if total <= 1 {
        return base.to_path_buf();
    }

    let mut name: OsString = base.file_stem().unwrap_or_default().to_owned();
    name.push(format!("_{index:03}"));
    if let Some(ext) = base.extension() {
        name.push(".");
        name.push(ext);
    }
    base.with_file_name(name)
}

#[cfg(test)]
mod test {

    use image::Rgba;

    use super::*;

    #[test]
    fn image_from_buffer() {
        let img = frame_image(2, 1, &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();

        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(img.get_pixel(0, 0), &Rgba([1, 2, 3, 4]));
        assert_eq!(img.get_pixel(1, 0), &Rgba([5, 6, 7, 8]));
    }

    #[test]
    fn size_mismatch() {
        assert!(frame_image(2, 2, &[0; 4]).is_err());
        assert!(frame_image(1, 1, &[0; 8]).is_err());
    }

    #[test]
    fn png_written() {
        let path = std::env::temp_dir().join(format!("vol_render_{}.png", std::process::id()));
        let buffer = [10, 20, 30, 255, 0, 0, 0, 0, 1, 2, 3, 4, 255, 255, 255, 128];

        save_frame(&path, 2, 2, &buffer).unwrap();
        let img = image::open(&path).unwrap().into_rgba8();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.into_raw(), buffer.to_vec());
    }

    #[test]
    fn frame_names() {
        let base = Path::new("out/frame.png");

        assert_eq!(frame_file_name(base, 0, 1), PathBuf::from("out/frame.png"));
        assert_eq!(frame_file_name(base, 7, 12), PathBuf::from("out/frame_007.png"));
        assert_eq!(
            frame_file_name(Path::new("img"), 3, 4),
            PathBuf::from("img_003")
        );
    }
}
