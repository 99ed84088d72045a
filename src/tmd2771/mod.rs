mod device_impl;

pub use device_impl::{Register, INIT_SEQUENCE};

/// All possible errors in this crate
#[derive(Debug)]
pub enum Error<E> {
    /// I²C bus error
    I2C(E),
    /// Block read returned a different number of bytes than requested
    ShortRead { expected: usize, actual: usize },
}
impl<E> From<E> for Error<E> {
    fn from(other: E) -> Self {
        Error::I2C(other)
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::I2C(e) => write!(f, "I2C bus error: {e:?}"),
            Error::ShortRead { expected, actual } => {
                write!(f, "short read: expected {expected} bytes, got {actual}")
            }
        }
    }
}

impl<E: core::fmt::Debug> std::error::Error for Error<E> {}

/// 7-bit bus address of the TMD2771.
pub const DEVICE_ADDRESS: u8 = 0x39;

/// Command bit pattern, ORed into every register offset.
pub const COMMAND: u8 = 0xA0;

/// TMD2771 device driver.
#[derive(Debug)]
pub struct TMD2771<I2C> {
    /// The concrete I²C device implementation.
    i2c: I2C,
}
