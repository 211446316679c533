use serde::{Deserialize, Serialize};

/// RGB pixel, the element type the image tools store in grids.
///
/// Channels hold raw samples in `0..=maxval` of the owning
/// [`Pixmap`](super::Pixmap), so 8-bit and 16-bit PPM data both fit
/// unscaled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

impl Rgb {
    #[inline]
    pub const fn new(red: u16, green: u16, blue: u16) -> Self {
        Self { red, green, blue }
    }

    #[inline]
    pub fn to_array(self) -> [u16; 3] {
        [self.red, self.green, self.blue]
    }
}

impl From<[u16; 3]> for Rgb {
    #[inline]
    fn from([red, green, blue]: [u16; 3]) -> Self {
        Self { red, green, blue }
    }
}
