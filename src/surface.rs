//! # Surface Sinks
//!
//! All drawing in the core goes through the [`SurfaceSink`] trait: glyphs,
//! single pixels, line segments and filled rectangles, with a two-color
//! stroke state. Coordinates are integer pixel offsets on the configured
//! canvas; the core performs no bounds clamping, so every sink is responsible
//! for clipping or silently ignoring offscreen coordinates.
//!
//! Three sinks ship with the crate:
//! - [`FrameBuffer`]: an in-memory 1-bit canvas with a terminal preview,
//!   used by the development binary and by tests that count lit pixels
//! - [`EgSurface`]: an adapter onto any `embedded_graphics` draw target so a
//!   real panel driver can sit behind the core unchanged
//! - [`RecordingSurface`]: records every draw call verbatim, for tests and
//!   debugging that need exact operation counts

use embedded_graphics::{
    mono_font::{
        ascii::{FONT_10X20, FONT_6X10},
        MonoTextStyle,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
    text::Text,
};

/// Stroke color for pixel and line draws. White erases ink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokeColor {
    Black,
    White,
}

/// Glyph size class: large for hours/minutes, small for the date row glyphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeClass {
    Large,
    Small,
}

/// Drawing capability handed to the core once per tick.
///
/// Glyph indices are hexadecimal digits 0..=15 ("0".."9", "A".."F"); the
/// width/height arguments restate the glyph box so sinks without their own
/// bitmap set can still scale something sensible into it.
pub trait SurfaceSink {
    /// Select the stroke color for subsequent pixel and line draws
    fn set_stroke(&mut self, color: StrokeColor);
    /// Draw one hex glyph with its origin at (x, y) in a w×h box
    fn draw_glyph(&mut self, glyph: u8, size: SizeClass, x: i32, y: i32, w: i32, h: i32);
    /// Draw a single pixel in the current stroke color
    fn draw_pixel(&mut self, x: i32, y: i32);
    /// Draw a line segment in the current stroke color
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32);
    /// Fill a rectangle with ink
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32);
    /// Draw the 14×5 charging icon; `variant` alternates 0/1 on odd seconds
    fn draw_charging_icon(&mut self, variant: u8, x: i32, y: i32);
}

/// 3×5 hex digit patterns used by sinks without a bitmap resource set.
/// Each row holds 3 bits, most significant bit leftmost.
const HEX_FONT: [[u8; 5]; 16] = [
    [0b111, 0b101, 0b101, 0b101, 0b111], // 0
    [0b010, 0b110, 0b010, 0b010, 0b111], // 1
    [0b111, 0b001, 0b111, 0b100, 0b111], // 2
    [0b111, 0b001, 0b111, 0b001, 0b111], // 3
    [0b101, 0b101, 0b111, 0b001, 0b001], // 4
    [0b111, 0b100, 0b111, 0b001, 0b111], // 5
    [0b111, 0b100, 0b111, 0b101, 0b111], // 6
    [0b111, 0b001, 0b001, 0b001, 0b001], // 7
    [0b111, 0b101, 0b111, 0b101, 0b111], // 8
    [0b111, 0b101, 0b111, 0b001, 0b111], // 9
    [0b010, 0b101, 0b111, 0b101, 0b101], // A
    [0b110, 0b101, 0b110, 0b101, 0b110], // B
    [0b111, 0b100, 0b100, 0b100, 0b111], // C
    [0b110, 0b101, 0b101, 0b101, 0b110], // D
    [0b111, 0b100, 0b111, 0b100, 0b111], // E
    [0b111, 0b100, 0b111, 0b100, 0b100], // F
];

/// 14×5 charging icon variants, one `u16` of row bits each (bit 13 leftmost).
const CHARGING_ICON: [[u16; 5]; 2] = [
    [
        0b00000011000000,
        0b00000110000000,
        0b00011111110000,
        0b00000011000000,
        0b00000110000000,
    ],
    [
        0b00000001100000,
        0b00000011000000,
        0b00001111111000,
        0b00000110000000,
        0b00001100000000,
    ],
];

/// In-memory 1-bit frame buffer.
///
/// Rows are packed 8 pixels per byte, set bits meaning ink, matching the
/// row-major framebuffer convention of monochrome panel controllers.
/// Offscreen draws are silently clipped.
pub struct FrameBuffer {
    width: i32,
    height: i32,
    bits: Vec<u8>,
    stroke: StrokeColor,
}

impl FrameBuffer {
    pub fn new(width: i32, height: i32) -> Self {
        let bytes_per_row = ((width.max(0) as u32) + 7) / 8;
        let size = (bytes_per_row * height.max(0) as u32) as usize;
        FrameBuffer {
            width,
            height,
            bits: vec![0x00; size],
            stroke: StrokeColor::Black,
        }
    }

    /// Reset the whole canvas to white
    pub fn clear(&mut self) {
        self.bits.fill(0x00);
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// True when the pixel holds ink. Offscreen coordinates read as white.
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        let bytes_per_row = (self.width as u32 + 7) / 8;
        let index = (y as u32 * bytes_per_row + x as u32 / 8) as usize;
        self.bits[index] & (0x80 >> (x as u32 % 8)) != 0
    }

    /// Count of ink pixels across the canvas
    pub fn ink_count(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }

    fn set(&mut self, x: i32, y: i32, ink: bool) {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return;
        }
        let bytes_per_row = (self.width as u32 + 7) / 8;
        let index = (y as u32 * bytes_per_row + x as u32 / 8) as usize;
        let mask = 0x80 >> (x as u32 % 8);
        if ink {
            self.bits[index] |= mask;
        } else {
            self.bits[index] &= !mask;
        }
    }

    /// Render a half-resolution terminal preview: each character covers a
    /// 2×2 pixel block, '#' where any of the four holds ink.
    pub fn render_ascii(&self) -> String {
        let mut out =
            String::with_capacity(((self.width / 2 + 1).max(0) * (self.height / 2).max(0)) as usize);
        let mut y = 0;
        while y < self.height {
            let mut x = 0;
            while x < self.width {
                let lit = self.pixel(x, y)
                    || self.pixel(x + 1, y)
                    || self.pixel(x, y + 1)
                    || self.pixel(x + 1, y + 1);
                out.push(if lit { '#' } else { ' ' });
                x += 2;
            }
            out.push('\n');
            y += 2;
        }
        out
    }
}

impl SurfaceSink for FrameBuffer {
    fn set_stroke(&mut self, color: StrokeColor) {
        self.stroke = color;
    }

    fn draw_glyph(&mut self, glyph: u8, _size: SizeClass, x: i32, y: i32, w: i32, h: i32) {
        if w <= 0 || h <= 0 {
            return;
        }
        let pattern = &HEX_FONT[(glyph as usize) % HEX_FONT.len()];
        for dy in 0..h {
            let row = pattern[(dy * 5 / h) as usize];
            for dx in 0..w {
                let col = dx * 3 / w;
                if row & (0b100 >> col) != 0 {
                    self.set(x + dx, y + dy, true);
                }
            }
        }
    }

    fn draw_pixel(&mut self, x: i32, y: i32) {
        self.set(x, y, self.stroke == StrokeColor::Black);
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        // Bresenham; the face only uses short vertical segments but the
        // contract is a general line
        let ink = self.stroke == StrokeColor::Black;
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        loop {
            self.set(x, y, ink);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        for dy in 0..h.max(0) {
            for dx in 0..w.max(0) {
                self.set(x + dx, y + dy, true);
            }
        }
    }

    fn draw_charging_icon(&mut self, variant: u8, x: i32, y: i32) {
        let rows = &CHARGING_ICON[(variant as usize) % CHARGING_ICON.len()];
        for (dy, row) in rows.iter().enumerate() {
            for dx in 0..14 {
                if row & (1 << (13 - dx)) != 0 {
                    self.set(x + dx, y + dy as i32, true);
                }
            }
        }
    }
}

/// Adapter sink over any `embedded_graphics` monochrome draw target.
///
/// Glyphs are rendered as a boxed mono-font character per size class, which
/// keeps simulator targets usable without the face's bitmap resources; a
/// hardware host that owns real glyph bitmaps implements [`SurfaceSink`]
/// directly instead.
pub struct EgSurface<D> {
    target: D,
    stroke: BinaryColor,
}

impl<D> EgSurface<D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    pub fn new(target: D) -> Self {
        EgSurface {
            target,
            stroke: BinaryColor::On,
        }
    }

    /// Hand the wrapped draw target back to the host (for flushing)
    pub fn into_inner(self) -> D {
        self.target
    }
}

impl<D> SurfaceSink for EgSurface<D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    fn set_stroke(&mut self, color: StrokeColor) {
        self.stroke = match color {
            StrokeColor::Black => BinaryColor::On,
            StrokeColor::White => BinaryColor::Off,
        };
    }

    fn draw_glyph(&mut self, glyph: u8, size: SizeClass, x: i32, y: i32, w: i32, h: i32) {
        Rectangle::new(Point::new(x, y), Size::new(w.max(0) as u32, h.max(0) as u32))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut self.target)
            .ok();

        let digit = char::from_digit(u32::from(glyph) % 16, 16)
            .unwrap_or('0')
            .to_ascii_uppercase();
        let mut buf = [0u8; 4];
        let text = digit.encode_utf8(&mut buf);
        let (style, font_h) = match size {
            SizeClass::Large => (MonoTextStyle::new(&FONT_10X20, BinaryColor::On), 20),
            SizeClass::Small => (MonoTextStyle::new(&FONT_6X10, BinaryColor::On), 10),
        };
        // Baseline roughly centered in the glyph box
        let baseline = y + (h + font_h) / 2;
        Text::new(text, Point::new(x + w / 3, baseline), style)
            .draw(&mut self.target)
            .ok();
    }

    fn draw_pixel(&mut self, x: i32, y: i32) {
        Pixel(Point::new(x, y), self.stroke)
            .draw(&mut self.target)
            .ok();
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        Line::new(Point::new(x0, y0), Point::new(x1, y1))
            .into_styled(PrimitiveStyle::with_stroke(self.stroke, 1))
            .draw(&mut self.target)
            .ok();
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        Rectangle::new(Point::new(x, y), Size::new(w.max(0) as u32, h.max(0) as u32))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut self.target)
            .ok();
    }

    fn draw_charging_icon(&mut self, variant: u8, x: i32, y: i32) {
        let rows = &CHARGING_ICON[(variant as usize) % CHARGING_ICON.len()];
        for (dy, row) in rows.iter().enumerate() {
            for dx in 0..14i32 {
                if row & (1 << (13 - dx)) != 0 {
                    Pixel(Point::new(x + dx, y + dy as i32), BinaryColor::On)
                        .draw(&mut self.target)
                        .ok();
                }
            }
        }
    }
}

/// One recorded draw call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOp {
    Stroke(StrokeColor),
    Glyph {
        glyph: u8,
        size: SizeClass,
        x: i32,
        y: i32,
    },
    Pixel {
        x: i32,
        y: i32,
    },
    Line {
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
    },
    Rect {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
    },
    ChargingIcon {
        variant: u8,
        x: i32,
        y: i32,
    },
}

/// Sink that records every draw call in order.
///
/// Used by the test suites to assert exact glyph positions and corruption
/// pixel counts; also handy when debugging a layout change from a terminal.
#[derive(Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded glyph draws, in issue order
    pub fn glyphs(&self) -> Vec<DrawOp> {
        self.ops
            .iter()
            .copied()
            .filter(|op| matches!(op, DrawOp::Glyph { .. }))
            .collect()
    }

    pub fn pixel_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Pixel { .. }))
            .count()
    }

    pub fn line_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .count()
    }
}

impl SurfaceSink for RecordingSurface {
    fn set_stroke(&mut self, color: StrokeColor) {
        self.ops.push(DrawOp::Stroke(color));
    }

    fn draw_glyph(&mut self, glyph: u8, size: SizeClass, x: i32, y: i32, _w: i32, _h: i32) {
        self.ops.push(DrawOp::Glyph { glyph, size, x, y });
    }

    fn draw_pixel(&mut self, x: i32, y: i32) {
        self.ops.push(DrawOp::Pixel { x, y });
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        self.ops.push(DrawOp::Line { x0, y0, x1, y1 });
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.ops.push(DrawOp::Rect { x, y, w, h });
    }

    fn draw_charging_icon(&mut self, variant: u8, x: i32, y: i32) {
        self.ops.push(DrawOp::ChargingIcon { variant, x, y });
    }
}
