//! CPU pixel surfaces and blitting
//!
//! A [`Surface`] is an RGBA8 image with an optional color key. Blits copy
//! source pixels over the destination, skipping keyed and fully transparent
//! pixels, clipped to both surfaces.

use image::{Rgba, RgbaImage};

/// Exact RGB value treated as transparent when blitting from a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorKey {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorKey {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    fn matches(&self, px: &Rgba<u8>) -> bool {
        px[0] == self.r && px[1] == self.g && px[2] == self.b
    }
}

/// Rectangle inside a source surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// RGBA pixel buffer
#[derive(Debug, Clone)]
pub struct Surface {
    image: RgbaImage,
    color_key: Option<ColorKey>,
}

impl Surface {
    /// Opaque black surface
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_image(RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])))
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self {
            image,
            color_key: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn color_key(&self) -> Option<ColorKey> {
        self.color_key
    }

    /// Mark an exact RGB value as transparent when this surface is blitted
    pub fn set_color_key(&mut self, key: Option<ColorKey>) {
        self.color_key = key;
    }

    /// Pixel at `(x, y)`, or `None` outside the surface
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    pub fn fill(&mut self, rgba: [u8; 4]) {
        for px in self.image.pixels_mut() {
            *px = Rgba(rgba);
        }
    }

    /// Tightly packed RGBA8 rows, top to bottom
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Copy all of `src` with its top-left at `(x, y)`
    pub fn blit(&mut self, src: &Surface, x: i32, y: i32) {
        let (w, h) = src.size();
        self.blit_region(src, Region::new(0, 0, w, h), x, y);
    }

    /// Copy `region` of `src` with its top-left at `(dst_x, dst_y)`
    pub fn blit_region(&mut self, src: &Surface, region: Region, dst_x: i32, dst_y: i32) {
        // Clip the region to the source
        let sx0 = region.x.min(src.width());
        let sy0 = region.y.min(src.height());
        let sx1 = region.x.saturating_add(region.width).min(src.width());
        let sy1 = region.y.saturating_add(region.height).min(src.height());

        // Then to the destination, in i64 so large offsets cannot overflow
        let (dw, dh) = (self.width() as i64, self.height() as i64);
        let x_start = (-(dst_x as i64)).max(0) + sx0 as i64;
        let y_start = (-(dst_y as i64)).max(0) + sy0 as i64;
        let x_end = (dw - dst_x as i64 + sx0 as i64).min(sx1 as i64);
        let y_end = (dh - dst_y as i64 + sy0 as i64).min(sy1 as i64);

        if x_start >= x_end || y_start >= y_end {
            return;
        }

        let key = src.color_key;
        for sy in y_start..y_end {
            let ty = (dst_y as i64 + sy - sy0 as i64) as u32;
            for sx in x_start..x_end {
                let px = src.image.get_pixel(sx as u32, sy as u32);
                if px[3] == 0 || key.is_some_and(|k| k.matches(px)) {
                    continue;
                }
                let tx = (dst_x as i64 + sx - sx0 as i64) as u32;
                self.image.put_pixel(tx, ty, *px);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const MAGENTA: [u8; 4] = [255, 0, 255, 255];
    const BLACK: [u8; 4] = [0, 0, 0, 255];

    fn solid(w: u32, h: u32, rgba: [u8; 4]) -> Surface {
        Surface::from_image(RgbaImage::from_pixel(w, h, Rgba(rgba)))
    }

    #[test]
    fn test_blit_copies_at_offset() {
        let mut dst = Surface::new(4, 4);
        dst.blit(&solid(2, 2, RED), 1, 1);
        assert_eq!(dst.pixel(0, 0), Some(BLACK));
        assert_eq!(dst.pixel(1, 1), Some(RED));
        assert_eq!(dst.pixel(2, 2), Some(RED));
        assert_eq!(dst.pixel(3, 3), Some(BLACK));
    }

    #[test]
    fn test_color_key_pixels_are_skipped() {
        let mut src = solid(2, 1, MAGENTA);
        src.image.put_pixel(1, 0, Rgba(RED));
        src.set_color_key(Some(ColorKey::new(255, 0, 255)));

        let mut dst = Surface::new(2, 1);
        dst.blit(&src, 0, 0);
        assert_eq!(dst.pixel(0, 0), Some(BLACK));
        assert_eq!(dst.pixel(1, 0), Some(RED));
    }

    #[test]
    fn test_near_key_colors_are_drawn() {
        let mut src = solid(1, 1, [254, 0, 255, 255]);
        src.set_color_key(Some(ColorKey::new(255, 0, 255)));
        let mut dst = Surface::new(1, 1);
        dst.blit(&src, 0, 0);
        assert_eq!(dst.pixel(0, 0), Some([254, 0, 255, 255]));
    }

    #[test]
    fn test_without_key_magenta_is_drawn() {
        let mut dst = Surface::new(1, 1);
        dst.blit(&solid(1, 1, MAGENTA), 0, 0);
        assert_eq!(dst.pixel(0, 0), Some(MAGENTA));
    }

    #[test]
    fn test_blit_clips_negative_offset() {
        let mut src = solid(3, 3, RED);
        src.image.put_pixel(2, 2, Rgba([0, 255, 0, 255]));
        let mut dst = Surface::new(2, 2);
        dst.blit(&src, -1, -1);
        assert_eq!(dst.pixel(0, 0), Some(RED));
        assert_eq!(dst.pixel(1, 1), Some([0, 255, 0, 255]));
    }

    #[test]
    fn test_blit_fully_offscreen_is_noop() {
        let mut dst = Surface::new(2, 2);
        dst.blit(&solid(2, 2, RED), 5, 0);
        dst.blit(&solid(2, 2, RED), -2, 0);
        dst.blit(&solid(2, 2, RED), i32::MAX, i32::MIN);
        assert!(dst.as_bytes().chunks(4).all(|px| px == BLACK));
    }

    #[test]
    fn test_blit_region_selects_sub_rect() {
        let mut src = solid(4, 4, RED);
        src.image.put_pixel(2, 3, Rgba(MAGENTA));
        let mut dst = Surface::new(3, 3);
        dst.blit_region(&src, Region::new(2, 2, 2, 2), 1, 1);
        assert_eq!(dst.pixel(0, 0), Some(BLACK));
        assert_eq!(dst.pixel(1, 1), Some(RED));
        assert_eq!(dst.pixel(1, 2), Some(MAGENTA));
        assert_eq!(dst.pixel(2, 2), Some(RED));
    }

    #[test]
    fn test_blit_region_clipped_to_source() {
        let mut dst = Surface::new(4, 4);
        dst.blit_region(&solid(2, 2, RED), Region::new(1, 1, 10, 10), 0, 0);
        assert_eq!(dst.pixel(0, 0), Some(RED));
        assert_eq!(dst.pixel(1, 0), Some(BLACK));
        assert_eq!(dst.pixel(0, 1), Some(BLACK));
    }

    #[test]
    fn test_transparent_alpha_is_skipped() {
        let mut dst = Surface::new(1, 1);
        dst.blit(&solid(1, 1, [255, 255, 255, 0]), 0, 0);
        assert_eq!(dst.pixel(0, 0), Some(BLACK));
    }

    #[test]
    fn test_fill_and_bytes() {
        let mut s = Surface::new(2, 1);
        s.fill(RED);
        assert_eq!(s.as_bytes(), &[255, 0, 0, 255, 255, 0, 0, 255]);
    }
}
