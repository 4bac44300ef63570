/// An 8-bit-per-channel color literal.
///
/// This is an authoring format only. Surfaces store [`Color`], so every
/// `Rgba8` has to be converted with [`Color::from_rgba8`] before it can be
/// drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 0xFF)
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    pub fn parse_hex(text: &str) -> Option<Self> {
        let hex = text.strip_prefix('#').unwrap_or(text);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }
}

/// A packed pixel in the surface's native 16-bit depth (RGBA 5551).
///
/// Bit layout, MSB first: `RRRRR GGGGG BBBBB A`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub struct Color(u16);

impl Color {
    pub const BLACK: Color = Color::from_rgba8(Rgba8::rgb(0, 0, 0));
    pub const WHITE: Color = Color::from_rgba8(Rgba8::rgb(255, 255, 255));
    pub const RED: Color = Color::from_rgba8(Rgba8::rgb(255, 0, 0));
    pub const GREEN: Color = Color::from_rgba8(Rgba8::rgb(0, 255, 0));
    pub const BLUE: Color = Color::from_rgba8(Rgba8::rgb(0, 0, 255));
    pub const YELLOW: Color = Color::from_rgba8(Rgba8::rgb(255, 255, 0));

    /// Wrap an already-packed 5551 value.
    pub const fn from_packed(raw: u16) -> Self {
        Self(raw)
    }

    pub const fn packed(self) -> u16 {
        self.0
    }

    /// Reduce an 8-bit-per-channel color to 5551. Alpha keeps only its top bit.
    pub const fn from_rgba8(c: Rgba8) -> Self {
        let r = (c.r as u16 >> 3) << 11;
        let g = (c.g as u16 >> 3) << 6;
        let b = (c.b as u16 >> 3) << 1;
        let a = (c.a as u16 >> 7) & 1;
        Self(r | g | b | a)
    }

    /// Expand to 8 bits per channel, replicating the high bits into the low
    /// bits so that 0x1F maps to 0xFF.
    pub const fn to_rgba8(self) -> Rgba8 {
        Rgba8 {
            r: expand5(((self.0 >> 11) & 0x1F) as u8),
            g: expand5(((self.0 >> 6) & 0x1F) as u8),
            b: expand5(((self.0 >> 1) & 0x1F) as u8),
            a: if self.0 & 1 != 0 { 0xFF } else { 0x00 },
        }
    }
}

impl From<Rgba8> for Color {
    fn from(c: Rgba8) -> Self {
        Color::from_rgba8(c)
    }
}

const fn expand5(v: u8) -> u8 {
    (v << 3) | (v >> 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        assert_eq!(Color::WHITE.packed(), 0xFFFF);
        assert_eq!(Color::BLACK.packed(), 0x0001);
        assert_eq!(Color::WHITE.to_rgba8(), Rgba8::rgb(255, 255, 255));
        assert_eq!(Color::BLACK.to_rgba8(), Rgba8::rgb(0, 0, 0));
    }

    #[test]
    fn channel_positions() {
        assert_eq!(Color::RED.packed(), 0xF801);
        assert_eq!(Color::GREEN.packed(), 0x07C1);
        assert_eq!(Color::BLUE.packed(), 0x003F);
    }

    #[test]
    fn transparent_clears_alpha_bit() {
        let c = Color::from_rgba8(Rgba8::new(255, 255, 255, 0x7F));
        assert_eq!(c.packed(), 0xFFFE);
        assert_eq!(c.to_rgba8().a, 0);
    }

    #[test]
    fn low_bits_are_dropped() {
        // 0x07 and 0x00 reduce to the same 5-bit value
        let a = Color::from_rgba8(Rgba8::rgb(0x07, 0x07, 0x07));
        assert_eq!(a, Color::BLACK);
    }

    #[test]
    fn parse_hex_forms() {
        assert_eq!(Rgba8::parse_hex("#00102f"), Some(Rgba8::rgb(0x00, 0x10, 0x2F)));
        assert_eq!(Rgba8::parse_hex("ff000080"), Some(Rgba8::new(255, 0, 0, 0x80)));
        assert_eq!(Rgba8::parse_hex("#fff"), None);
        assert_eq!(Rgba8::parse_hex("#gg0000"), None);
        assert_eq!(Rgba8::parse_hex("#ÿÿÿ"), None);
        assert_eq!(Rgba8::parse_hex("#+f+f+f"), None);
    }
}
