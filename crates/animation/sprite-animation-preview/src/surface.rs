//! Preview surface geometry: checkerboard background, sprite UVs and aspect fitting.
//!
//! Nothing here draws. The host asks for a [`PreviewLayout`] and feeds the rects to
//! whatever immediate-mode UI it uses.

use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::config::PreviewConfig;

const LIGHT: u8 = 255;
const DARK: u8 = 205;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Shrink by `amount` on every side.
    pub fn inset(&self, amount: f32) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            self.width - amount * 2.0,
            self.height - amount * 2.0,
        )
    }
}

/// Where a sprite sits inside its texture, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpriteRegion {
    pub rect: Rect,
    pub texture_width: u32,
    pub texture_height: u32,
}

impl SpriteRegion {
    /// Normalized texture coordinates, or `None` for a degenerate region or texture.
    pub fn uv(&self) -> Option<Rect> {
        if self.rect.width <= 0.0 || self.rect.height <= 0.0 {
            return None;
        }
        if self.texture_width == 0 || self.texture_height == 0 {
            return None;
        }
        let (tw, th) = (self.texture_width as f32, self.texture_height as f32);
        Some(Rect::new(
            self.rect.x / tw,
            self.rect.y / th,
            self.rect.width / tw,
            self.rect.height / th,
        ))
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.rect.width / self.rect.height
    }
}

/// Largest rect of the given aspect ratio centred in `outer`.
pub fn aspect_fit(outer: Rect, aspect: f32) -> Rect {
    if outer.width <= 0.0 || outer.height <= 0.0 || aspect.is_nan() || aspect <= 0.0 {
        return outer;
    }
    if outer.width / outer.height > aspect {
        let width = outer.height * aspect;
        Rect::new(outer.x + (outer.width - width) * 0.5, outer.y, width, outer.height)
    } else {
        let height = outer.width / aspect;
        Rect::new(outer.x, outer.y + (outer.height - height) * 0.5, outer.width, height)
    }
}

/// Square RGBA8 checkerboard, meant to be sampled with repeat wrapping and point
/// filtering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckerTexture {
    size: u32,
    rgba: Vec<u8>,
}

impl CheckerTexture {
    pub fn generate(size: u32, block: u32) -> Self {
        let block = block.max(1);
        let mut rgba = Vec::with_capacity(byte_offset(size, 0, size));
        for y in 0..size {
            for x in 0..size {
                let odd = (x / block + y / block) % 2 == 1;
                let v = if odd { DARK } else { LIGHT };
                rgba.extend_from_slice(&[v, v, v, 255]);
            }
        }
        Self { size, rgba }
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Row-major RGBA8 bytes.
    #[inline]
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size || y >= self.size {
            return None;
        }
        let i = byte_offset(self.size, x, y);
        let px = self.rgba.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Offset of pixel `(x, y)` in a square RGBA8 buffer; `(0, size)` is the length.
fn byte_offset(size: u32, x: u32, y: u32) -> usize {
    (y as usize * size as usize + x as usize) * 4
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PreviewContent {
    /// Draw the texture region `uv` into `dest`.
    Sprite { dest: Rect, uv: Rect },
    /// Nothing to draw; show a centred label instead.
    Label(&'static str),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreviewLayout {
    /// Checker texture coordinates covering the whole preview rect.
    pub checker_uv: Rect,
    pub content: PreviewContent,
}

/// Per-pane drawing state. The checker texture is built on first use and kept for the
/// lifetime of the surface.
#[derive(Debug, Default)]
pub struct PreviewSurface {
    config: PreviewConfig,
    checker: OnceCell<CheckerTexture>,
}

impl PreviewSurface {
    pub fn new(config: PreviewConfig) -> Self {
        Self {
            config,
            checker: OnceCell::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    pub fn checker(&self) -> &CheckerTexture {
        self.checker.get_or_init(|| {
            log::trace!(
                "building {0}x{0} checker texture",
                self.config.checker_size
            );
            CheckerTexture::generate(self.config.checker_size, self.config.checker_block)
        })
    }

    /// Texture coordinates that tile the checker once per `checker_tile_size` points.
    pub fn checker_uv(&self, rect: Rect) -> Rect {
        let tile = self.config.checker_tile_size;
        if tile <= 0.0 {
            return Rect::new(0.0, 0.0, 1.0, 1.0);
        }
        Rect::new(0.0, 0.0, rect.width / tile, rect.height / tile)
    }

    /// Lay out one preview pane. `region` is `None` when no frame is shown.
    pub fn layout(&self, rect: Rect, region: Option<SpriteRegion>) -> PreviewLayout {
        let checker_uv = self.checker_uv(rect);
        let inner = rect.inset(self.config.preview_padding);
        let content = match region {
            None => PreviewContent::Label("(no frame)"),
            Some(region) => match region.uv() {
                Some(uv) => PreviewContent::Sprite {
                    dest: aspect_fit(inner, region.aspect()),
                    uv,
                },
                None if region.texture_width == 0 || region.texture_height == 0 => {
                    PreviewContent::Label("(no texture)")
                }
                None => PreviewContent::Label("(empty)"),
            },
        };
        PreviewLayout {
            checker_uv,
            content,
        }
    }
}
