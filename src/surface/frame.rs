use egui::{Color32, ColorImage, Pos2};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::sync::Arc;

use crate::error::SurfaceError;

/// Immutable copy of a frame's pixels. Clones share the same buffer.
#[derive(Clone, Debug)]
pub struct Snapshot(Arc<RgbaImage>);

impl Snapshot {
    pub fn pixels(&self) -> &RgbaImage {
        &self.0
    }

    pub fn same_pixels(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.as_raw() == other.0.as_raw()
    }
}

/// The live raster the user draws on.
///
/// Every mutation bumps [`Frame::revision`] so display textures know when to refresh.
#[derive(Debug, Clone)]
pub struct Frame {
    pixels: RgbaImage,
    revision: u64,
}

fn rgba(color: Color32) -> Rgba<u8> {
    Rgba(color.to_array())
}

impl Frame {
    pub fn new(width: u32, height: u32, background: Color32) -> Result<Self, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::InvalidDimensions { width, height });
        }
        Ok(Self {
            pixels: RgbaImage::from_pixel(width, height, rgba(background)),
            revision: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let [r, g, b, a] = self.pixels.get_pixel(x, y).0;
        Some(Color32::from_rgba_premultiplied(r, g, b, a))
    }

    /// True if every pixel has exactly `color`
    pub fn is_uniform(&self, color: Color32) -> bool {
        let expected = rgba(color);
        self.pixels.pixels().all(|p| *p == expected)
    }

    pub fn fill(&mut self, color: Color32) {
        let color = rgba(color);
        for pixel in self.pixels.pixels_mut() {
            *pixel = color;
        }
        self.revision += 1;
    }

    /// Paint a filled disc. The pixel under `center` is always painted,
    /// so even a hairline tap leaves a mark.
    pub fn stamp_dot(&mut self, center: Pos2, width: f32, color: Color32) {
        self.stamp_segment(center, center, width, color);
        if center.x >= 0.0 && center.y >= 0.0 {
            let (x, y) = (center.x as u32, center.y as u32);
            if x < self.width() && y < self.height() {
                self.pixels.put_pixel(x, y, rgba(color));
            }
        }
    }

    /// Paint a line of the given width from `from` to `to` with round caps.
    ///
    /// A pixel is covered when its centre lies within `width / 2` of the segment.
    pub fn stamp_segment(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        let radius = (width / 2.0).max(0.5);
        let min_x = from.x.min(to.x) - radius;
        let max_x = from.x.max(to.x) + radius;
        let min_y = from.y.min(to.y) - radius;
        let max_y = from.y.max(to.y) + radius;

        let Some((x0, x1)) = clip_span(min_x, max_x, self.width()) else {
            self.revision += 1;
            return;
        };
        let Some((y0, y1)) = clip_span(min_y, max_y, self.height()) else {
            self.revision += 1;
            return;
        };

        let color = rgba(color);
        let radius_sq = radius * radius;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                if distance_sq_to_segment(center, from, to) <= radius_sq {
                    self.pixels.put_pixel(x, y, color);
                }
            }
        }
        self.revision += 1;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot(Arc::new(self.pixels.clone()))
    }

    /// Replace the frame contents with a snapshot of the same dimensions.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        debug_assert_eq!(snapshot.pixels().dimensions(), self.pixels.dimensions());
        self.pixels.clone_from(snapshot.pixels());
        self.revision += 1;
    }

    pub fn matches(&self, snapshot: &Snapshot) -> bool {
        self.pixels.as_raw() == snapshot.pixels().as_raw()
    }

    /// Encode the frame as a PNG image
    pub fn encode_png(&self) -> Result<Vec<u8>, SurfaceError> {
        let mut bytes = Cursor::new(Vec::new());
        self.pixels.write_to(&mut bytes, ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }

    /// Convert to an egui image for uploading as a texture
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_unmultiplied(
            [self.width() as usize, self.height() as usize],
            self.pixels.as_raw(),
        )
    }
}

fn clip_span(min: f32, max: f32, len: u32) -> Option<(u32, u32)> {
    if max < 0.0 || min >= len as f32 {
        return None;
    }
    let start = min.max(0.0).floor() as u32;
    let end = (max.floor() as u32).min(len - 1);
    (start <= end).then_some((start, end))
}

fn distance_sq_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq <= f32::EPSILON {
        return (p - a).length_sq();
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).length_sq()
}
