//! Register map of the INA219
//!
//! Every register holds a 16 bit word which is transferred most significant byte first.

/// Addresses of the internal registers of the INA219
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Register {
    /// Configuration register, see [`Configuration`](crate::configuration::Configuration)
    Configuration = 0x00,
    /// Voltage across the shunt, signed with an LSB of 10µV
    ShuntVoltage = 0x01,
    /// Voltage on the load side of the shunt, value in bits 3..=15 with an LSB of 4mV
    BusVoltage = 0x02,
    /// Power, signed, scaled by the power LSB of the active calibration
    Power = 0x03,
    /// Current, signed, scaled by the current LSB of the active calibration
    Current = 0x04,
    /// Calibration register, see [`Calibration`](crate::calibration::Calibration)
    Calibration = 0x05,
}

impl Register {
    /// Address of the register as sent on the bus
    #[must_use]
    pub const fn address(self) -> u8 {
        self as u8
    }
}

/// Combine the two bytes read from a register into its 16 bit value
#[must_use]
#[allow(clippy::cast_lossless)]
pub const fn word_from_bytes([high, low]: [u8; 2]) -> u16 {
    (high as u16) * 256 + low as u16
}

/// Split a 16 bit register value into the bytes written to the bus
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn bytes_from_word(value: u16) -> [u8; 2] {
    [((value & 0xFF00) >> 8) as u8, (value & 0xFF) as u8]
}

/// Interpret a register value as a signed reading
///
/// Values above `0x7FFF` have `65535` subtracted, so `0x8000` decodes to `-32767` and `0xFFFF`
/// decodes to `0`.
#[must_use]
#[allow(clippy::cast_lossless)]
pub const fn signed_from_register(bits: u16) -> i32 {
    if bits > 32767 {
        bits as i32 - 65535
    } else {
        bits as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_decoding_covers_all_words() {
        for v in 0..=u16::MAX {
            let expected = if v <= 32767 {
                i32::from(v)
            } else {
                i32::from(v) - 65535
            };
            assert_eq!(signed_from_register(v), expected);
        }

        assert_eq!(signed_from_register(0x7FFF), 32767);
        assert_eq!(signed_from_register(0x8000), -32767);
        assert_eq!(signed_from_register(0xFFFF), 0);
    }

    #[test]
    fn words_are_big_endian() {
        assert_eq!(word_from_bytes([0x00, 0x64]), 100);
        assert_eq!(word_from_bytes([0x10, 0x00]), 4096);
        assert_eq!(bytes_from_word(0x3EEF), [0x3E, 0xEF]);

        for value in [0, 1, 0xFF, 0x100, 4096, 26868, u16::MAX] {
            assert_eq!(word_from_bytes(bytes_from_word(value)), value);
        }
    }

    #[test]
    fn addresses_match_datasheet() {
        assert_eq!(Register::Configuration.address(), 0x00);
        assert_eq!(Register::ShuntVoltage.address(), 0x01);
        assert_eq!(Register::BusVoltage.address(), 0x02);
        assert_eq!(Register::Power.address(), 0x03);
        assert_eq!(Register::Current.address(), 0x04);
        assert_eq!(Register::Calibration.address(), 0x05);
    }
}
