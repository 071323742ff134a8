//! Canonical intermediate pixel form.
//!
//! Every conversion decodes a source pixel into a [`Canonical`] value, remaps
//! its channel composition, and encodes it into the destination sample type.
//! Integer samples are normalized to [0, 1]; float samples are carried as
//! stored (including out-of-range values and NaN). Channel handling and
//! sample handling are each written once and composed, instead of one routine
//! per (source, destination) pair.
//!
//! # Channel remapping
//!
//! | from \ to | L         | LA            | RGB      | RGBA         |
//! |-----------|-----------|---------------|----------|--------------|
//! | L         | l         | l, 1          | l, l, l  | l, l, l, 1   |
//! | LA        | l         | l, a          | l, l, l  | l, l, l, a   |
//! | RGB       | mean      | mean, 1       | r, g, b  | r, g, b, 1   |
//! | RGBA      | mean      | mean, a       | r, g, b  | r, g, b, a   |
//!
//! `mean` is the unweighted arithmetic mean of red, green and blue, not a
//! Rec.601/709 luma. Added alpha is 1.0, i.e. the destination's maximum.

use crate::layout::Channels;

/// Decoded pixel: up to four channel values plus their composition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canonical {
    channels: Channels,
    values: [f64; 4],
}

impl Canonical {
    /// Creates a canonical pixel. Values past the channel count are ignored.
    #[inline]
    pub fn new(channels: Channels, values: [f64; 4]) -> Self {
        let mut v = [0.0; 4];
        let n = channels.count();
        v[..n].copy_from_slice(&values[..n]);
        Self { channels, values: v }
    }

    /// Channel composition.
    #[inline]
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Channel values (length equals the channel count).
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values[..self.channels.count()]
    }

    /// All four slots; unused trailing slots are zero.
    #[inline]
    pub fn to_array(&self) -> [f64; 4] {
        self.values
    }

    /// Alpha, or 1.0 when the composition has none.
    #[inline]
    pub fn alpha(&self) -> f64 {
        if self.channels.has_alpha() {
            self.values[self.channels.count() - 1]
        } else {
            1.0
        }
    }

    /// Luminance: the value itself for L/LA, the mean of RGB otherwise.
    #[inline]
    pub fn luminance(&self) -> f64 {
        if self.channels.is_color() {
            (self.values[0] + self.values[1] + self.values[2]) / 3.0
        } else {
            self.values[0]
        }
    }

    /// Red, green, blue; luminance is replicated for L/LA.
    #[inline]
    pub fn rgb(&self) -> [f64; 3] {
        if self.channels.is_color() {
            [self.values[0], self.values[1], self.values[2]]
        } else {
            [self.values[0]; 3]
        }
    }

    /// Remaps to another channel composition.
    pub fn remap(&self, to: Channels) -> Self {
        if to == self.channels {
            return *self;
        }
        let values = match to {
            Channels::L => [self.luminance(), 0.0, 0.0, 0.0],
            Channels::La => [self.luminance(), self.alpha(), 0.0, 0.0],
            Channels::Rgb => {
                let [r, g, b] = self.rgb();
                [r, g, b, 0.0]
            }
            Channels::Rgba => {
                let [r, g, b] = self.rgb();
                [r, g, b, self.alpha()]
            }
        };
        Self {
            channels: to,
            values,
        }
    }
}
