//! Driver and one-shot measurement session for the TMD2771 ambient light and
//! proximity sensor.
//!
//! The driver is generic over [`embedded_hal::i2c::I2c`], so any bus
//! implementation (or a mock) can stand in for the real device.

pub mod measurement;
pub mod report;
pub mod session;
pub mod tmd2771;
