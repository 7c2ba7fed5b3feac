//! Platform-agnostic driver for the Bosch BMP280 barometric pressure and
//! temperature sensor.
//!
//! Works with any blocking I²C implementation of
//! [`embedded_hal::i2c::I2c`]; the bus handle is passed in explicitly, so
//! several drivers can sit on separate (real or simulated) buses.
//!
//! The compensation math is the vendor's 32-bit integer pipeline, so the
//! driver needs no floating point. Temperature comes back in centi-degrees
//! Celsius, pressure in Pascals.
//!
//! ```ignore
//! let mut baro = Bmp280::default(i2c);
//! baro.init()?;
//! let pascal = baro.read_pressure()?;
//! let centi_celsius = baro.last_temperature();
//! ```

#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod calibration;
pub mod config;
pub mod registers;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::calibration::Calibration;
use crate::config::Config;
use crate::registers::{Register, CALIB_BLOCK_LEN, CHIP_ID, DATA_BLOCK_LEN, RESET_COMMAND};

/// I²C address with the SDO pin tied to ground.
pub const DEFAULT_ADDRESS: u8 = 0x76;
/// I²C address with the SDO pin tied to VDDIO.
pub const ALTERNATE_ADDRESS: u8 = 0x77;

/// Value of [`Bmp280::last_temperature`] before the first successful
/// pressure reading: absolute zero in centi-degrees Celsius.
pub const TEMPERATURE_UNREAD: i16 = -27315;

/// Driver errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Underlying bus transfer failed.
    I2c(E),
    /// The identity register did not read back 0x58.
    ChipIdMismatch,
}

/// One decoded pressure/temperature ADC pair.
///
/// Each value is 20 bits, assembled from MSB, LSB and the upper nibble of
/// the XLSB byte. Built per reading and consumed immediately by the
/// compensation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    pub pressure: i32,
    pub temperature: i32,
}

impl RawSample {
    /// Decodes the 6-byte measurement block (pressure registers first).
    pub fn from_registers(data: &[u8; DATA_BLOCK_LEN]) -> Self {
        Self {
            pressure: (data[0] as i32) << 12 | (data[1] as i32) << 4 | (data[2] as i32) >> 4,
            temperature: (data[3] as i32) << 12 | (data[4] as i32) << 4 | (data[5] as i32) >> 4,
        }
    }
}

/// Sensor status flags, register 0xF3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    /// A conversion is currently running.
    pub measuring: bool,
    /// Calibration data are still being copied from NVM after power-up.
    pub im_update: bool,
}

/// BMP280 driver instance.
///
/// Owns the bus handle and the calibration data loaded during [`init`].
/// Reads are only meaningful after a successful `init`; the driver does not
/// re-check that per call.
///
/// [`init`]: Bmp280::init
pub struct Bmp280<I2C> {
    i2c: I2C,
    address: u8,
    calib: Calibration,
    last_temp: i16,
}

impl<I2C> Bmp280<I2C>
where
    I2C: I2c,
{
    /// Creates a driver for the given I²C address (0x76 or 0x77).
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            calib: Calibration::default(),
            last_temp: TEMPERATURE_UNREAD,
        }
    }

    /// Creates a driver at [`DEFAULT_ADDRESS`].
    pub fn default(i2c: I2C) -> Self {
        Self::new(i2c, DEFAULT_ADDRESS)
    }

    /// Consumes the driver and hands the bus back.
    pub fn destroy(self) -> I2C {
        self.i2c
    }

    /// Checks the chip identity, loads the factory calibration block and
    /// applies the measurement policy.
    ///
    /// Sequence:
    /// 1. Verify the identity register reads 0x58; anything else leaves the
    ///    device untouched and the driver unusable.
    /// 2. Burst-read the 24-byte calibration block.
    /// 3. Write `config` (1000 ms standby, filter off) and `ctrl_meas`
    ///    (×1/×1 oversampling, normal mode).
    pub fn init(&mut self) -> Result<(), Error<I2C::Error>> {
        if self.chip_id()? != CHIP_ID {
            return Err(Error::ChipIdMismatch);
        }

        let mut block = [0u8; CALIB_BLOCK_LEN];
        self.i2c
            .write_read(self.address, &[Register::CalibStart as u8], &mut block)
            .map_err(Error::I2c)?;
        self.calib = Calibration::from_registers(&block);

        let cfg = Config::default();
        self.i2c
            .write(self.address, &cfg.config_payload())
            .map_err(Error::I2c)?;
        self.i2c
            .write(self.address, &cfg.ctrl_meas_payload())
            .map_err(Error::I2c)?;
        Ok(())
    }

    /// Reads the chip identification register (0x58 on a BMP280).
    pub fn chip_id(&mut self) -> Result<u8, Error<I2C::Error>> {
        let mut id = [0u8; 1];
        self.i2c
            .write_read(self.address, &[Register::Id as u8], &mut id)
            .map_err(Error::I2c)?;
        Ok(id[0])
    }

    /// Triggers the complete power-on-reset procedure.
    ///
    /// The device needs ~2 ms before it accepts further traffic; the delay
    /// provider covers that. Calibration and configuration must be reloaded
    /// with [`Self::init`] afterwards.
    pub fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[Register::Reset as u8, RESET_COMMAND])
            .map_err(Error::I2c)?;
        delay.delay_ms(2);
        Ok(())
    }

    /// Reads the status register.
    pub fn status(&mut self) -> Result<Status, Error<I2C::Error>> {
        let mut status = [0u8; 1];
        self.i2c
            .write_read(self.address, &[Register::Status as u8], &mut status)
            .map_err(Error::I2c)?;
        Ok(Status {
            measuring: status[0] & 0b0000_1000 != 0,
            im_update: status[0] & 0b0000_0001 != 0,
        })
    }

    /// Reads one measurement and returns the pressure in Pascals.
    ///
    /// Burst-reads the 6-byte data block, compensates temperature first (its
    /// `t_fine` term feeds the pressure formula) and retains the temperature
    /// for [`Self::last_temperature`]. A result of 0 Pa means the
    /// calibration data were degenerate, not a physical reading.
    pub fn read_pressure(&mut self) -> Result<u32, Error<I2C::Error>> {
        let mut data = [0u8; DATA_BLOCK_LEN];
        self.i2c
            .write_read(self.address, &[Register::PressMsb as u8], &mut data)
            .map_err(Error::I2c)?;

        let sample = RawSample::from_registers(&data);
        let (t_fine, centi_celsius) = self.calib.compensate_temperature(sample.temperature);
        self.last_temp = centi_celsius;
        Ok(self.calib.compensate_pressure(sample.pressure, t_fine))
    }

    /// Temperature in centi-degrees Celsius as measured during the most
    /// recent successful [`Self::read_pressure`] call.
    ///
    /// No bus traffic; returns [`TEMPERATURE_UNREAD`] until the first
    /// successful reading.
    pub fn last_temperature(&self) -> i16 {
        self.last_temp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
    use std::vec::Vec;

    // Datasheet worked-example coefficients, little-endian register layout.
    const CAL_BLOCK: [u8; 24] = [
        0x70, 0x6B, 0x43, 0x67, 0x18, 0xFC, 0x7D, 0x8E, 0x43, 0xD6, 0xD0, 0x0B, 0x27, 0x0B,
        0x8C, 0x00, 0xF9, 0xFF, 0x8C, 0x3C, 0xF8, 0xC6, 0x70, 0x17,
    ];

    // Data block encoding adc_p = 415148, adc_t = 519888.
    const DATA_BLOCK: [u8; 6] = [0x65, 0x5A, 0xC0, 0x7E, 0xED, 0x00];

    fn init_expectations(address: u8) -> Vec<I2cTransaction> {
        vec![
            I2cTransaction::write_read(address, vec![0xD0], vec![0x58]),
            I2cTransaction::write_read(address, vec![0x88], CAL_BLOCK.to_vec()),
            I2cTransaction::write(address, vec![0xF5, 0xA0]),
            I2cTransaction::write(address, vec![0xF4, 0x27]),
        ]
    }

    #[test]
    fn raw_sample_assembly() {
        let sample = RawSample::from_registers(&DATA_BLOCK);
        assert_eq!(sample.pressure, 415148);
        assert_eq!(sample.temperature, 519888);
    }

    #[test]
    fn init_configures_device() {
        let i2c = I2cMock::new(&init_expectations(DEFAULT_ADDRESS));
        let mut baro = Bmp280::default(i2c);
        baro.init().unwrap();
        baro.destroy().done();
    }

    #[test]
    fn init_rejects_unknown_chip() {
        let i2c = I2cMock::new(&[I2cTransaction::write_read(
            DEFAULT_ADDRESS,
            vec![0xD0],
            vec![0x60],
        )]);
        let mut baro = Bmp280::default(i2c);
        assert_eq!(baro.init(), Err(Error::ChipIdMismatch));
        baro.destroy().done();
    }

    #[test]
    fn init_surfaces_bus_errors() {
        let i2c = I2cMock::new(&[
            I2cTransaction::write_read(DEFAULT_ADDRESS, vec![0xD0], vec![0x58])
                .with_error(ErrorKind::Other),
        ]);
        let mut baro = Bmp280::default(i2c);
        assert_eq!(baro.init(), Err(Error::I2c(ErrorKind::Other)));
        baro.destroy().done();
    }

    #[test]
    fn pressure_reading_matches_reference() {
        let mut expectations = init_expectations(DEFAULT_ADDRESS);
        expectations.push(I2cTransaction::write_read(
            DEFAULT_ADDRESS,
            vec![0xF7],
            DATA_BLOCK.to_vec(),
        ));
        let mut baro = Bmp280::default(I2cMock::new(&expectations));
        baro.init().unwrap();
        assert_eq!(baro.read_pressure().unwrap(), 100656);
        assert_eq!(baro.last_temperature(), 2508);
        baro.destroy().done();
    }

    #[test]
    fn last_temperature_starts_at_sentinel() {
        let baro = Bmp280::default(I2cMock::new(&[]));
        assert_eq!(baro.last_temperature(), TEMPERATURE_UNREAD);
        baro.destroy().done();
    }

    #[test]
    fn chip_id_reads_identity_register() {
        let i2c = I2cMock::new(&[I2cTransaction::write_read(
            ALTERNATE_ADDRESS,
            vec![0xD0],
            vec![0x58],
        )]);
        let mut baro = Bmp280::new(i2c, ALTERNATE_ADDRESS);
        assert_eq!(baro.chip_id().unwrap(), 0x58);
        baro.destroy().done();
    }

    #[test]
    fn reset_writes_command_byte() {
        let i2c = I2cMock::new(&[I2cTransaction::write(DEFAULT_ADDRESS, vec![0xE0, 0xB6])]);
        let mut baro = Bmp280::default(i2c);
        baro.reset(&mut NoopDelay::new()).unwrap();
        baro.destroy().done();
    }

    #[test]
    fn status_decodes_flags() {
        let i2c = I2cMock::new(&[
            I2cTransaction::write_read(DEFAULT_ADDRESS, vec![0xF3], vec![0b0000_1001]),
            I2cTransaction::write_read(DEFAULT_ADDRESS, vec![0xF3], vec![0x00]),
        ]);
        let mut baro = Bmp280::default(i2c);
        assert_eq!(
            baro.status().unwrap(),
            Status {
                measuring: true,
                im_update: true
            }
        );
        assert_eq!(
            baro.status().unwrap(),
            Status {
                measuring: false,
                im_update: false
            }
        );
        baro.destroy().done();
    }

    #[test]
    fn drivers_on_independent_buses_do_not_interfere() {
        let mut first_expectations = init_expectations(DEFAULT_ADDRESS);
        first_expectations.push(I2cTransaction::write_read(
            DEFAULT_ADDRESS,
            vec![0xF7],
            DATA_BLOCK.to_vec(),
        ));
        let mut first = Bmp280::default(I2cMock::new(&first_expectations));

        let second = I2cMock::new(&[I2cTransaction::write_read(
            ALTERNATE_ADDRESS,
            vec![0xD0],
            vec![0x61],
        )]);
        let mut second = Bmp280::new(second, ALTERNATE_ADDRESS);

        first.init().unwrap();
        assert_eq!(second.init(), Err(Error::ChipIdMismatch));
        assert_eq!(first.read_pressure().unwrap(), 100656);
        assert_eq!(second.last_temperature(), TEMPERATURE_UNREAD);

        first.destroy().done();
        second.destroy().done();
    }
}
