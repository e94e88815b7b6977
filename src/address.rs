//! I2C address of the INA219 on the bus
//!
//! The chip is strapped to one of 16 addresses through its A0 and A1 pins (table 1 of the
//! datasheet). The UPS HATs use [`Address::UPS_HAT_AB`] and [`Address::UPS_HAT_D`].

use core::fmt::Formatter;
use core::ops::RangeInclusive;

/// Signal an address pin is tied to
///
/// The discriminants are the two address bits contributed by the pin.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum Pin {
    /// Tied to GND
    Gnd = 0,
    /// Tied to Vs
    Vs = 1,
    /// Tied to SDA
    Sda = 2,
    /// Tied to SCL
    Scl = 3,
}

impl Pin {
    const fn from_lowest_bits(byte: u8) -> Self {
        match byte & 0b11 {
            0 => Self::Gnd,
            1 => Self::Vs,
            2 => Self::Sda,
            _ => Self::Scl,
        }
    }
}

/// Validated 7 bit I2C address of an INA219
///
/// # Example
/// ```rust
/// use waveshare_ups::address::{Address, Pin};
///
/// assert_eq!(Address::from_pins(Pin::Sda, Pin::Gnd), Address::UPS_HAT_AB);
/// assert_eq!(Address::from_byte(0x43).unwrap(), Address::UPS_HAT_D);
/// assert!(Address::from_byte(0x3C).is_err());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Address {
    byte: u8,
}

impl Address {
    const VALID: RangeInclusive<u8> = 0x40..=0x4F;
    const MIN: u8 = *Self::VALID.start();
    const MAX: u8 = *Self::VALID.end();

    /// Address used by the UPS HAT (A) and (B): A0 on SDA, A1 on GND
    pub const UPS_HAT_AB: Self = Self { byte: 0x42 };

    /// Address used by the UPS HAT (D): A0 on SCL, A1 on GND
    pub const UPS_HAT_D: Self = Self { byte: 0x43 };

    /// Build the address selected by the A0 and A1 pins
    #[must_use]
    pub const fn from_pins(a0: Pin, a1: Pin) -> Self {
        Self {
            byte: Self::MIN | a0 as u8 | (a1 as u8) << 2,
        }
    }

    /// Validate a raw address
    ///
    /// # Errors
    /// Returns [`OutOfRange`] for bytes outside of `0x40..=0x4F`.
    pub const fn from_byte(byte: u8) -> Result<Self, OutOfRange> {
        match byte {
            Self::MIN..=Self::MAX => Ok(Self { byte }),
            which => Err(OutOfRange { which }),
        }
    }

    /// The address as sent on the bus
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self.byte
    }

    /// The pins (A0, A1) selecting this address
    #[must_use]
    pub const fn as_pins(self) -> (Pin, Pin) {
        (
            Pin::from_lowest_bits(self.byte),
            Pin::from_lowest_bits(self.byte >> 2),
        )
    }
}

impl Default for Address {
    fn default() -> Self {
        Self::UPS_HAT_AB
    }
}

impl TryFrom<u8> for Address {
    type Error = OutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_byte(value)
    }
}

impl core::fmt::Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:#04x}", self.byte)
    }
}

/// The byte is not an address an INA219 can be strapped to
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct OutOfRange {
    which: u8,
}

impl core::fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "address {:#04x} is outside of {:#04x}..={:#04x}",
            self.which,
            Address::MIN,
            Address::MAX,
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OutOfRange {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pins_round_trip() {
        use Pin::{Gnd, Scl, Sda, Vs};

        let mut bytes = vec![];
        for a0 in [Gnd, Vs, Sda, Scl] {
            for a1 in [Gnd, Vs, Sda, Scl] {
                let address = Address::from_pins(a0, a1);
                assert_eq!(address.as_pins(), (a0, a1));
                bytes.push(address.as_byte());
            }
        }

        bytes.sort_unstable();
        assert_eq!(bytes, (0x40..=0x4F).collect::<Vec<u8>>());
    }

    #[test]
    fn ups_hat_addresses() {
        assert_eq!(Address::UPS_HAT_AB.as_pins(), (Pin::Sda, Pin::Gnd));
        assert_eq!(Address::UPS_HAT_D.as_pins(), (Pin::Scl, Pin::Gnd));
        assert_eq!(Address::default(), Address::UPS_HAT_AB);
    }

    #[test]
    fn range_is_checked() {
        assert!(Address::try_from(0x3F).is_err());
        assert!(Address::try_from(0x50).is_err());
        assert_eq!(Address::try_from(0x4F).map(Address::as_byte), Ok(0x4F));
        assert_eq!(
            Address::from_byte(3).unwrap_err().to_string(),
            "address 0x03 is outside of 0x40..=0x4f"
        );
    }
}
