#![forbid(unsafe_code)]

//! Packed RGBA colors.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// A compact RGBA color.
///
/// - **Size:** 4 bytes.
/// - **Layout:** `0xRRGGBBAA` (R in bits 31..24, A in bits 7..0).
///
/// Stored as **straight alpha** (RGB channels are not pre-multiplied).
/// Compositing uses Porter-Duff **SourceOver** (`src over dst`).
///
/// Serializes as a CSS hex string (`#rrggbb`, or `#rrggbbaa` when not
/// opaque) so recorded draw ops can be assigned to a canvas `fillStyle`
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    /// Fully transparent (alpha = 0).
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create an opaque RGB color (alpha = 255).
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create an RGBA color with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Alpha channel.
    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Channels in `[r, g, b, a]` order, as image buffers expect.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r(), self.g(), self.b(), self.a()]
    }

    /// Parse a CSS hex color: `#rgb`, `#rrggbb` or `#rrggbbaa`.
    ///
    /// The leading `#` is optional. Returns `None` for anything else.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        match digits.len() {
            3 => {
                let mut out = [0u8; 3];
                for (slot, c) in out.iter_mut().zip(digits.chars()) {
                    let v = c.to_digit(16)? as u8;
                    *slot = v * 16 + v;
                }
                Some(Self::rgb(out[0], out[1], out[2]))
            }
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// Format as a CSS hex string.
    pub fn to_hex(self) -> String {
        if self.a() == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r(), self.g(), self.b())
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r(),
                self.g(),
                self.b(),
                self.a()
            )
        }
    }

    #[inline]
    const fn div_round_u8(numer: u64, denom: u64) -> u8 {
        debug_assert!(denom != 0);
        let v = (numer + (denom / 2)) / denom;
        if v > 255 { 255 } else { v as u8 }
    }

    /// Porter-Duff SourceOver: `src over dst`.
    ///
    /// Computed in the exact rational form and rounded once at the end.
    #[inline]
    pub fn over(self, dst: Self) -> Self {
        let s_a = self.a() as u64;
        if s_a == 255 {
            return self;
        }
        if s_a == 0 {
            return dst;
        }

        let d_a = dst.a() as u64;
        let inv_s_a = 255 - s_a;

        // numer_a = 255*s_a + d_a*(255 - s_a), i.e. out_a scaled by 255^2.
        let numer_a = 255 * s_a + d_a * inv_s_a;
        if numer_a == 0 {
            return Self::TRANSPARENT;
        }

        let out_a = Self::div_round_u8(numer_a, 255);
        let blend = |s: u8, d: u8| {
            Self::div_round_u8(
                (s as u64) * s_a * 255 + (d as u64) * d_a * inv_s_a,
                numer_a,
            )
        };

        Self::rgba(
            blend(self.r(), dst.r()),
            blend(self.g(), dst.g()),
            blend(self.b(), dst.b()),
            out_a,
        )
    }
}

impl fmt::Display for PackedRgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for PackedRgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PackedRgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HexVisitor;

        impl Visitor<'_> for HexVisitor {
            type Value = PackedRgba;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a CSS hex color string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<PackedRgba, E> {
                PackedRgba::from_hex(v)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_str(HexVisitor)
    }
}
