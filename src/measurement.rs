use crate::tmd2771::Error;

/// Number of bytes in one data block: CH0, CH1 and proximity, low byte first.
pub const RAW_SAMPLE_LEN: usize = 6;

/// Counts per lux for ATIME = 101 ms and 1x AGAIN.
pub const CPL: f64 = 101.0 / 24.0;

/// The six data bytes as read from the device, in register order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSample([u8; RAW_SAMPLE_LEN]);

impl RawSample {
    pub fn new(bytes: [u8; RAW_SAMPLE_LEN]) -> Self {
        RawSample(bytes)
    }

    /// Takes a block read result. Anything but exactly six bytes is a failed read.
    pub fn from_block<E>(data: &[u8]) -> Result<Self, Error<E>> {
        let bytes: [u8; RAW_SAMPLE_LEN] = data.try_into().map_err(|_| Error::ShortRead {
            expected: RAW_SAMPLE_LEN,
            actual: data.len(),
        })?;
        Ok(RawSample(bytes))
    }

    pub fn bytes(&self) -> [u8; RAW_SAMPLE_LEN] {
        self.0
    }
}

/// Decoded channel counts and the derived luminance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub c0_data: u16,
    pub c1_data: u16,
    pub proximity: f64,
    pub luminance: f64,
}

impl From<RawSample> for Measurement {
    fn from(sample: RawSample) -> Self {
        let [c0_lo, c0_hi, c1_lo, c1_hi, prox_lo, prox_hi] = sample.0;
        let c0_data = decode_word(c0_lo, c0_hi);
        let c1_data = decode_word(c1_lo, c1_hi);
        let proximity = decode_word(prox_lo, prox_hi);
        Measurement {
            c0_data,
            c1_data,
            proximity: f64::from(proximity),
            luminance: compute_luminance(c0_data, c1_data),
        }
    }
}

/// Unsigned little-endian word from its two register bytes.
pub fn decode_word(low: u8, high: u8) -> u16 {
    u16::from(high) * 256 + u16::from(low)
}

/// Dual-channel lux approximation.
///
/// Takes the larger of the two estimates when it is strictly positive and
/// strictly larger than the other one. Equal estimates and non-positive
/// estimates give exactly `0.0`.
pub fn compute_luminance(c0_data: u16, c1_data: u16) -> f64 {
    let c0 = f64::from(c0_data);
    let c1 = f64::from(c1_data);
    let luminance1 = (1.0 * c0 - 2.0 * c1) / CPL;
    let luminance2 = (0.6 * c0 - 1.0 * c1) / CPL;

    if luminance1 > 0.0 && luminance1 > luminance2 {
        luminance1
    } else if luminance2 > 0.0 && luminance2 > luminance1 {
        luminance2
    } else {
        0.0
    }
}
