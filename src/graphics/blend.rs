pub type Argb = u32;

pub type Mixer = fn(Argb, Argb) -> Argb;

pub trait Blend {
    fn black() -> Self;
    fn trans() -> Self;

    /// Replaces the destination.
    fn over(self, other: Self) -> Self;
    /// Source-over compositing of `other` on top of `self`.
    fn mix(self, other: Self) -> Self;

    fn set_alpha(self, alpha: u8) -> Self;
    fn alpha(self) -> u8;

    fn decompose(self) -> [u8; 4];
    fn compose(array: [u8; 4]) -> Self;
}

/// Converts a CSS-style `0.0..=1.0` opacity into an 8-bit alpha.
pub fn alpha_from_opacity(opacity: f32) -> u8 {
    (opacity.clamp(0.0, 1.0) * 255.0).round() as u8
}

pub fn rgba(r: u8, g: u8, b: u8, opacity: f32) -> Argb {
    Argb::compose([alpha_from_opacity(opacity), r, g, b])
}

pub fn rgb(r: u8, g: u8, b: u8) -> Argb {
    Argb::compose([0xFF, r, g, b])
}

pub fn composite_u32(c1: Argb, c2: Argb) -> Argb {
    let [a1, r1, g1, b1] = c1.decompose();
    let [a2, r2, g2, b2] = c2.decompose();

    if a2 == 0xFF {
        return c2;
    }

    let (a, a3) = {
        let a1 = a1 as u16;
        let a2 = a2 as u16;

        let a3 = (a1 * (255 - a2)) / 255;

        (a2 + a3, a3)
    };

    if a == 0 {
        return Argb::trans();
    }

    let composite_channel = |c1: u8, c2: u8| -> u8 {
        let c1 = c1 as u16;
        let c2 = c2 as u16;
        let a2 = a2 as u16;

        ((c2 * a2 + c1 * a3) / a) as u8
    };

    Argb::compose([
        a as u8,
        composite_channel(r1, r2),
        composite_channel(g1, g2),
        composite_channel(b1, b2),
    ])
}

impl Blend for Argb {
    fn black() -> Argb {
        0xFF_00_00_00
    }

    fn trans() -> Argb {
        0x0
    }

    fn over(self, other: Argb) -> Argb {
        other
    }

    fn mix(self, other: Argb) -> Argb {
        composite_u32(self, other)
    }

    fn set_alpha(self, alpha: u8) -> Argb {
        (self & 0x00_FF_FF_FF) | (alpha as Argb) << 24
    }

    fn alpha(self) -> u8 {
        self.decompose()[0]
    }

    fn decompose(self) -> [u8; 4] {
        self.to_be_bytes()
    }

    fn compose(array: [u8; 4]) -> Argb {
        Argb::from_be_bytes(array)
    }
}
