use super::color::Color;

/// Native surface width in pixels.
pub const SCREEN_WIDTH: usize = 320;
/// Native surface height in pixels.
pub const SCREEN_HEIGHT: usize = 240;

/// Axis-aligned rectangle in surface coordinates. `x`/`y` may be negative;
/// drawing always clips.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Build from a top-left corner and an exclusive bottom-right corner.
    /// Inverted corners give an empty rectangle.
    pub const fn from_corners(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let w = if x1 > x0 { (x1 - x0) as u32 } else { 0 };
        let h = if y1 > y0 { (y1 - y0) as u32 } else { 0 };
        Self { x: x0, y: y0, w, h }
    }

    pub const fn right(&self) -> i32 {
        self.x + self.w as i32
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.h as i32
    }

    pub const fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Overlap of two rectangles, or `None` if they do not touch.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        let r = Rect::from_corners(x0, y0, x1, y1);
        (!r.is_empty()).then_some(r)
    }
}

/// A fixed 320×240 surface of packed 16-bit pixels, stored row-major.
pub struct Framebuffer {
    pixels: Box<[u16]>,
}

impl Framebuffer {
    /// Allocate a surface cleared to packed value 0 (transparent black).
    pub fn new() -> Self {
        Self {
            pixels: vec![0u16; SCREEN_WIDTH * SCREEN_HEIGHT].into_boxed_slice(),
        }
    }

    pub fn width(&self) -> usize {
        SCREEN_WIDTH
    }

    pub fn height(&self) -> usize {
        SCREEN_HEIGHT
    }

    pub const fn bounds(&self) -> Rect {
        Rect::new(0, 0, SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32)
    }

    /// Read one pixel, or `None` outside the surface.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.bounds()
            .contains(x, y)
            .then(|| Color::from_packed(self.pixels[y as usize * SCREEN_WIDTH + x as usize]))
    }

    /// Packed pixel words, row-major.
    pub fn pixels(&self) -> &[u16] {
        &self.pixels
    }

    /// Full-surface fill.
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color.packed());
    }

    /// Fill a rectangle, clipped to the surface.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let bounds = self.bounds();
        self.region(bounds).fill_rect(rect, color);
    }

    /// Borrow a clipped view. Writes through the view never land outside
    /// `clip` (or outside the surface).
    pub fn region(&mut self, clip: Rect) -> Region<'_> {
        let clip = clip
            .intersect(&self.bounds())
            .unwrap_or(Rect::new(0, 0, 0, 0));
        Region { surface: self, clip }
    }

    /// Serialize the packed pixels in native byte order, the layout a
    /// streaming 16-bit texture expects.
    pub fn write_native_bytes(&self, out: &mut Vec<u8>) {
        out.clear();
        out.reserve(self.pixels.len() * 2);
        for &px in self.pixels.iter() {
            out.extend_from_slice(&px.to_ne_bytes());
        }
    }

    /// Expand to RGB24 (3 bytes per pixel, R, G, B).
    pub fn to_rgb24(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 3);
        for &px in self.pixels.iter() {
            let c = Color::from_packed(px).to_rgba8();
            out.extend_from_slice(&[c.r, c.g, c.b]);
        }
        out
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// A write view of a [`Framebuffer`] clipped to one rectangle.
pub struct Region<'a> {
    surface: &'a mut Framebuffer,
    clip: Rect,
}

impl Region<'_> {
    pub fn clip(&self) -> Rect {
        self.clip
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if self.clip.contains(x, y) {
            self.surface.pixels[y as usize * SCREEN_WIDTH + x as usize] = color.packed();
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(r) = rect.intersect(&self.clip) else {
            return;
        };
        let packed = color.packed();
        for y in r.y..r.bottom() {
            let row = y as usize * SCREEN_WIDTH;
            self.surface.pixels[row + r.x as usize..row + r.right() as usize].fill(packed);
        }
    }

    /// Outline a rectangle with a border `thickness` pixels wide, drawn inside
    /// `rect`.
    pub fn stroke_rect(&mut self, rect: Rect, thickness: u32, color: Color) {
        let t = thickness.min(rect.w).min(rect.h);
        if t == 0 {
            return;
        }
        let ti = t as i32;
        self.fill_rect(Rect::new(rect.x, rect.y, rect.w, t), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - ti, rect.w, t), color);
        self.fill_rect(Rect::new(rect.x, rect.y, t, rect.h), color);
        self.fill_rect(Rect::new(rect.right() - ti, rect.y, t, rect.h), color);
    }
}
