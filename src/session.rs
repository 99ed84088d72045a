use core::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{I2c, SevenBitAddress};
use log::info;

use crate::measurement::Measurement;
use crate::tmd2771::{Error, TMD2771};

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub bus_path: String,
    /// Wait between bring-up and the first read, long enough for the
    /// configured integration cycles to complete.
    pub settle: Duration,
    /// Pause between reads in monitor mode.
    pub poll_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            bus_path: "/dev/i2c-1".to_string(),
            settle: Duration::from_millis(800),
            poll_interval: Duration::from_millis(900),
        }
    }
}

/// One sensor run: configure, wait, then sample.
///
/// The session owns the bus handle for its whole lifetime, so the handle is
/// released whenever the session is dropped, on success and on error alike.
pub struct Session<I2C, D> {
    sensor: TMD2771<I2C>,
    delay: D,
    config: SessionConfig,
}

impl<I2C, D> Session<I2C, D>
where
    I2C: I2c<SevenBitAddress>,
    D: DelayNs,
{
    pub fn new(i2c: I2C, delay: D, config: SessionConfig) -> Self {
        Self {
            sensor: TMD2771::new(i2c),
            delay,
            config,
        }
    }

    pub fn release(self) -> I2C {
        self.sensor.destroy()
    }

    pub fn configure(&mut self) -> Result<(), Error<I2C::Error>> {
        self.sensor.configure()
    }

    /// Blocks for the configured settle time.
    pub fn settle(&mut self) {
        self.delay.delay_ms(duration_ms(self.config.settle));
    }

    pub fn sample(&mut self) -> Result<Measurement, Error<I2C::Error>> {
        let raw = self.sensor.read_raw_sample()?;
        let measurement = Measurement::from(raw);
        info!(
            "CH0={} CH1={} proximity={} luminance={:.2}",
            measurement.c0_data, measurement.c1_data, measurement.proximity, measurement.luminance
        );
        Ok(measurement)
    }

    /// Full one-shot run.
    pub fn measure(&mut self) -> Result<Measurement, Error<I2C::Error>> {
        self.configure()?;
        self.settle();
        self.sample()
    }

    /// Configures once, then keeps sampling every `poll_interval`.
    ///
    /// A failed bring-up ends the run. A failed read is passed to `on_sample`
    /// and polling carries on. With `samples` set to `None` this never returns
    /// unless bring-up fails.
    pub fn monitor<F>(
        &mut self,
        samples: Option<u32>,
        mut on_sample: F,
    ) -> Result<(), Error<I2C::Error>>
    where
        F: FnMut(Result<Measurement, Error<I2C::Error>>),
    {
        self.configure()?;
        self.settle();

        let mut taken: u32 = 0;
        loop {
            if samples.is_some_and(|limit| taken >= limit) {
                return Ok(());
            }
            if taken > 0 {
                self.delay.delay_ms(duration_ms(self.config.poll_interval));
            }
            on_sample(self.sample());
            taken = taken.saturating_add(1);
        }
    }
}

fn duration_ms(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

/// Opens the configured Linux I²C bus and wraps it in a session.
#[cfg(target_os = "linux")]
pub fn open(
    config: SessionConfig,
) -> anyhow::Result<Session<linux_embedded_hal::I2cdev, linux_embedded_hal::Delay>> {
    use anyhow::Context;

    let i2c = linux_embedded_hal::I2cdev::new(&config.bus_path)
        .with_context(|| format!("failed to open I2C bus {}", config.bus_path))?;
    info!("Opened {}", config.bus_path);
    Ok(Session::new(i2c, linux_embedded_hal::Delay, config))
}
