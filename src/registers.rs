//! BMP280 register map (Bosch Sensortec BMP280 datasheet, revision 1.26).
//!
//! All addresses are 8-bit; the burst-readable blocks rely on the device's
//! auto-incrementing register pointer:
//!
//! - **Measurement data** - 0xF7–0xFC (6 bytes): pressure then temperature,
//!   each 20 bits across MSB/LSB/XLSB
//! - **Control** - 0xF4 (oversampling + power mode), 0xF5 (standby + IIR)
//! - **Status** - 0xF3
//! - **Reset & ID** - 0xE0 (soft reset), 0xD0 (chip ID)
//! - **Calibration** - 0x88–0x9F (24 bytes, read-only, factory trimmed)

#[derive(Clone, Copy)]
#[repr(u8)]
pub enum Register {
    TempXlsb = 0xFC,
    TempLsb = 0xFB,
    TempMsb = 0xFA,
    PressXlsb = 0xF9,
    PressLsb = 0xF8,
    PressMsb = 0xF7,
    Config = 0xF5,
    CtrlMeas = 0xF4,
    // bit 3 - conversion running, bit 0 - NVM copy in progress
    Status = 0xF3,
    // writing 0xB6 triggers the complete power-on-reset procedure
    Reset = 0xE0,
    // reads 0x58 on a BMP280
    Id = 0xD0,
    CalibStart = 0x88,
}

/// Command value for the reset register.
pub const RESET_COMMAND: u8 = 0xB6;

/// Chip identification value reported by every BMP280.
pub const CHIP_ID: u8 = 0x58;

/// Length of the factory calibration block at [`Register::CalibStart`].
pub const CALIB_BLOCK_LEN: usize = 24;

/// Length of the pressure + temperature measurement block at
/// [`Register::PressMsb`].
pub const DATA_BLOCK_LEN: usize = 6;
