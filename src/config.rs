//! Typed encodings of the `ctrl_meas` (0xF4) and `config` (0xF5) register
//! fields.
//!
//! The driver applies one fixed measurement policy (see [`Config::default`]);
//! the enums exist so the register payloads are composed from named fields
//! rather than magic bytes.

use crate::registers::Register;

/// Pressure oversampling, osrs_p[2:0] in `ctrl_meas` bits 4:2.
///
/// | Variant | osrs_p | Resolution | RMS noise (typ) |
/// |---------|--------|------------|-----------------|
/// | X1      | 001    | 16 bit     | ~3.3 Pa         |
/// | X2      | 010    | 17 bit     | ~2.6 Pa         |
/// | X4      | 011    | 18 bit     | ~2.1 Pa         |
/// | X8      | 100    | 19 bit     | ~1.6 Pa         |
/// | X16     | 101    | 20 bit     | ~1.3 Pa         |
#[derive(Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PressureOversampling {
    X1 = 0x04,
    X2 = 0x08,
    X4 = 0x0C,
    X8 = 0x10,
    X16 = 0x14,
}

/// Temperature oversampling, osrs_t[2:0] in `ctrl_meas` bits 7:5.
///
/// ×1 already resolves 0.005 °C, which is plenty for compensating the
/// pressure reading.
#[derive(Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TemperatureOversampling {
    X1 = 0x20,
    X2 = 0x40,
    X4 = 0x60,
    X8 = 0x80,
    X16 = 0xA0,
}

/// Power mode, mode[1:0] in `ctrl_meas` bits 1:0.
///
/// Normal mode cycles measure → standby → measure on its own; forced mode
/// runs one conversion and drops back to sleep.
#[derive(Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PowerMode {
    Sleep = 0x00,
    Forced = 0x01,
    Normal = 0x03,
}

/// IIR filter coefficient, filter[2:0] in `config` bits 4:2.
#[derive(Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum IirFilter {
    Off = 0x00,
    X2 = 0x04,
    X4 = 0x08,
    X8 = 0x0C,
    X16 = 0x10,
}

/// Standby duration between normal-mode measurements, t_sb[2:0] in `config`
/// bits 7:5.
#[derive(Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StandbyTime {
    Ms0_5 = 0x00,
    Ms62_5 = 0x20,
    Ms125 = 0x40,
    Ms250 = 0x60,
    Ms500 = 0x80,
    Ms1000 = 0xA0,
    Ms2000 = 0xC0,
    Ms4000 = 0xE0,
}

/// Measurement policy written to the device during initialization.
#[derive(Clone, Copy)]
pub struct Config {
    pub temperature_oversampling: TemperatureOversampling,
    pub pressure_oversampling: PressureOversampling,
    pub power_mode: PowerMode,
    pub iir_filter: IirFilter,
    pub standby_time: StandbyTime,
}

impl Config {
    /// Register address + payload pair for the `config` register (0xF5).
    pub fn config_payload(&self) -> [u8; 2] {
        [
            Register::Config as u8,
            self.standby_time as u8 | self.iir_filter as u8,
        ]
    }

    /// Register address + payload pair for the `ctrl_meas` register (0xF4).
    pub fn ctrl_meas_payload(&self) -> [u8; 2] {
        [
            Register::CtrlMeas as u8,
            self.temperature_oversampling as u8
                | self.pressure_oversampling as u8
                | self.power_mode as u8,
        ]
    }
}

impl Default for Config {
    /// 1000 ms standby, filter off, ×1/×1 oversampling, normal mode.
    fn default() -> Self {
        Self {
            temperature_oversampling: TemperatureOversampling::X1,
            pressure_oversampling: PressureOversampling::X1,
            power_mode: PowerMode::Normal,
            iir_filter: IirFilter::Off,
            standby_time: StandbyTime::Ms1000,
        }
    }
}
