use embedded_hal::i2c::{ErrorType, I2c, SevenBitAddress};
use log::{debug, info};

use crate::measurement::{RawSample, RAW_SAMPLE_LEN};
use crate::tmd2771::{Error, COMMAND, DEVICE_ADDRESS, TMD2771};

/// Register offsets, without the command bit.
pub struct Register;
impl Register {
    pub const ENABLE: u8 = 0x00;
    pub const ATIME: u8 = 0x01;
    pub const PTIME: u8 = 0x02;
    pub const WTIME: u8 = 0x03;
    pub const PPULSE: u8 = 0x0E;
    pub const CONTROL: u8 = 0x0F;
    pub const C0DATA: u8 = 0x14;
}

/// Bring-up writes as (register offset, value), applied in this order.
pub const INIT_SEQUENCE: [(u8, u8); 6] = [
    // Power ON, wait, proximity and ALS enabled
    (Register::ENABLE, 0x0F),
    // ATIME 101 ms
    (Register::ATIME, 0xDB),
    // PTIME 2.72 ms, max count 1023
    (Register::PTIME, 0xFF),
    // WTIME 2.72 ms
    (Register::WTIME, 0xFF),
    // 4 proximity pulses
    (Register::PPULSE, 0x04),
    // 120 mA LED, proximity on CH1 diode, 1x PGAIN, 1x AGAIN
    (Register::CONTROL, 0x20),
];

impl<I2C> TMD2771<I2C>
where
    I2C: I2c<SevenBitAddress>,
{
    pub fn new(i2c: I2C) -> Self {
        TMD2771 { i2c }
    }

    pub fn destroy(self) -> I2C {
        self.i2c
    }

    /// Writes the whole [`INIT_SEQUENCE`]. Stops at the first failed write.
    pub fn configure(&mut self) -> Result<(), Error<I2C::Error>> {
        for &(register, value) in INIT_SEQUENCE.iter() {
            self.write_register(register, value)?;
        }
        info!("TMD2771 configured ({} registers)", INIT_SEQUENCE.len());
        Ok(())
    }

    /// Reads both ALS channels and the proximity count in one block read.
    pub fn read_raw_sample(&mut self) -> Result<RawSample, Error<I2C::Error>> {
        let data = self.read_block(Register::C0DATA, RAW_SAMPLE_LEN)?;
        RawSample::from_block(&data)
    }

    fn write_register(
        &mut self,
        register: u8,
        value: u8,
    ) -> Result<(), <I2C as ErrorType>::Error> {
        debug!("write 0x{:02X} -> 0x{value:02X}", register | COMMAND);
        self.i2c.write(DEVICE_ADDRESS, &[register | COMMAND, value])
    }

    fn read_block(&mut self, register: u8, len: usize) -> Result<Vec<u8>, Error<I2C::Error>> {
        let mut data = vec![0; len];
        self.i2c
            .write_read(DEVICE_ADDRESS, &[register | COMMAND], &mut data)
            .map_err(Error::I2C)?;
        debug!("read {len} bytes from 0x{:02X}: {data:02X?}", register | COMMAND);
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    fn init_transactions() -> Vec<I2cTransaction> {
        vec![
            I2cTransaction::write(DEVICE_ADDRESS, vec![0xA0, 0x0F]),
            I2cTransaction::write(DEVICE_ADDRESS, vec![0xA1, 0xDB]),
            I2cTransaction::write(DEVICE_ADDRESS, vec![0xA2, 0xFF]),
            I2cTransaction::write(DEVICE_ADDRESS, vec![0xA3, 0xFF]),
            I2cTransaction::write(DEVICE_ADDRESS, vec![0xAE, 0x04]),
            I2cTransaction::write(DEVICE_ADDRESS, vec![0xAF, 0x20]),
        ]
    }

    #[test]
    fn configure_writes_bring_up_sequence_in_order() {
        let i2c = I2cMock::new(&init_transactions());
        let mut sensor = TMD2771::new(i2c);
        sensor.configure().unwrap();
        sensor.destroy().done();
    }

    #[test]
    fn init_table_matches_datasheet_values() {
        assert_eq!(
            INIT_SEQUENCE,
            [
                (0x00, 0x0F),
                (0x01, 0xDB),
                (0x02, 0xFF),
                (0x03, 0xFF),
                (0x0E, 0x04),
                (0x0F, 0x20),
            ]
        );
    }

    #[test]
    fn configure_stops_at_first_failed_write() {
        let i2c = I2cMock::new(&[
            I2cTransaction::write(DEVICE_ADDRESS, vec![0xA0, 0x0F]).with_error(ErrorKind::Other)
        ]);
        let mut sensor = TMD2771::new(i2c);
        match sensor.configure() {
            Err(Error::I2C(ErrorKind::Other)) => {}
            other => panic!("unexpected result: {other:?}"),
        }
        sensor.destroy().done();
    }

    #[test]
    fn read_raw_sample_uses_command_addressed_block_read() {
        let i2c = I2cMock::new(&[I2cTransaction::write_read(
            DEVICE_ADDRESS,
            vec![0xB4],
            vec![0x64, 0x00, 0x32, 0x00, 0xE8, 0x03],
        )]);
        let mut sensor = TMD2771::new(i2c);
        let sample = sensor.read_raw_sample().unwrap();
        assert_eq!(sample.bytes(), [0x64, 0x00, 0x32, 0x00, 0xE8, 0x03]);
        sensor.destroy().done();
    }

    #[test]
    fn read_error_is_reported() {
        let i2c = I2cMock::new(&[I2cTransaction::write_read(
            DEVICE_ADDRESS,
            vec![0xB4],
            vec![0; 6],
        )
        .with_error(ErrorKind::Other)]);
        let mut sensor = TMD2771::new(i2c);
        assert!(matches!(
            sensor.read_raw_sample(),
            Err(Error::I2C(ErrorKind::Other))
        ));
        sensor.destroy().done();
    }
}
