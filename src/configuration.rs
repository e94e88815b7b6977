//! Types describing the configuration register of the INA219
//!
//! Every bit field of the register is a closed enum, so only words the chip understands can be
//! assembled. The layout is (see figure 19 of the datasheet):
//!
//! | Bits   | Field                         |
//! |--------|-------------------------------|
//! | 13     | [`BusVoltageRange`]           |
//! | 11..12 | [`Gain`]                      |
//! | 7..10  | bus [`AdcResolution`]         |
//! | 3..6   | shunt [`AdcResolution`]       |
//! | 0..2   | [`Mode`]                      |
//!
//! # Example
//! ```rust
//! use waveshare_ups::configuration::{AdcResolution, Configuration};
//!
//! let conf = Configuration {
//!     bus_resolution: AdcResolution::Avg128,
//!     ..Configuration::UPS_32V_2A
//! };
//! assert_eq!(conf.as_bits(), 0x3FEF);
//! ```

/// Full scale range of the bus voltage measurement
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum BusVoltageRange {
    /// Up to 16V
    Range16V = 0,
    /// Up to 32V (still limited by the 26V maximum of the chip)
    #[default]
    Range32V = 1,
}

impl BusVoltageRange {
    const SHIFT: u8 = 13;
    const MASK: u16 = 1;

    /// Upper end of the range in V
    #[must_use]
    pub const fn max_v(self) -> u8 {
        match self {
            Self::Range16V => 16,
            Self::Range32V => 32,
        }
    }

    const fn from_register(reg: u16) -> Self {
        match (reg >> Self::SHIFT) & Self::MASK {
            0 => Self::Range16V,
            _ => Self::Range32V,
        }
    }
}

/// Gain of the shunt voltage amplifier, which sets the shunt voltage range
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum Gain {
    /// Gain 1, ±40mV
    Div1_40mV = 0,
    /// Gain 1/2, ±80mV
    Div2_80mV = 1,
    /// Gain 1/4, ±160mV
    Div4_160mV = 2,
    /// Gain 1/8, ±320mV
    #[default]
    Div8_320mV = 3,
}

impl Gain {
    const SHIFT: u8 = 11;
    const MASK: u16 = 0b11;

    /// Largest shunt voltage magnitude in mV that can be measured with this gain
    #[must_use]
    pub const fn range_mv(self) -> u16 {
        match self {
            Self::Div1_40mV => 40,
            Self::Div2_80mV => 80,
            Self::Div4_160mV => 160,
            Self::Div8_320mV => 320,
        }
    }

    const fn from_register(reg: u16) -> Self {
        match (reg >> Self::SHIFT) & Self::MASK {
            0 => Self::Div1_40mV,
            1 => Self::Div2_80mV,
            2 => Self::Div4_160mV,
            _ => Self::Div8_320mV,
        }
    }
}

/// Resolution and averaging of the bus or shunt ADC
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum AdcResolution {
    /// 9 bit, single sample
    Res9Bit = 0b0000,
    /// 10 bit, single sample
    Res10Bit = 0b0001,
    /// 11 bit, single sample
    Res11Bit = 0b0010,
    /// 12 bit, single sample
    #[default]
    Res12Bit = 0b0011,
    /// 12 bit, 2 samples averaged
    Avg2 = 0b1001,
    /// 12 bit, 4 samples averaged
    Avg4 = 0b1010,
    /// 12 bit, 8 samples averaged
    Avg8 = 0b1011,
    /// 12 bit, 16 samples averaged
    Avg16 = 0b1100,
    /// 12 bit, 32 samples averaged
    Avg32 = 0b1101,
    /// 12 bit, 64 samples averaged
    Avg64 = 0b1110,
    /// 12 bit, 128 samples averaged
    Avg128 = 0b1111,
}

impl AdcResolution {
    const SHIFT_BUS: u8 = 7;
    const SHIFT_SHUNT: u8 = 3;
    const MASK: u16 = 0b1111;

    const fn from_register(reg: u16, shift: u8) -> Self {
        match (reg >> shift) & Self::MASK {
            0b0000 | 0b0100 => Self::Res9Bit,
            0b0001 | 0b0101 => Self::Res10Bit,
            0b0010 | 0b0110 => Self::Res11Bit,
            0b1001 => Self::Avg2,
            0b1010 => Self::Avg4,
            0b1011 => Self::Avg8,
            0b1100 => Self::Avg16,
            0b1101 => Self::Avg32,
            0b1110 => Self::Avg64,
            0b1111 => Self::Avg128,
            // 0b0011, 0b0111 and 0b1000 all select a single 12 bit sample
            _ => Self::Res12Bit,
        }
    }

    /// Conversion time in µs, table 5 of the datasheet
    #[must_use]
    pub const fn conversion_time_us(self) -> u32 {
        match self {
            Self::Res9Bit => 84,
            Self::Res10Bit => 148,
            Self::Res11Bit => 276,
            Self::Res12Bit => 532,
            Self::Avg2 => 1_060,
            Self::Avg4 => 2_130,
            Self::Avg8 => 4_260,
            Self::Avg16 => 8_510,
            Self::Avg32 => 17_020,
            Self::Avg64 => 34_050,
            Self::Avg128 => 68_100,
        }
    }
}

/// Operating mode
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum Mode {
    /// Power down
    PowerDown = 0b000,
    /// Single shunt voltage conversion
    ShuntTriggered = 0b001,
    /// Single bus voltage conversion
    BusTriggered = 0b010,
    /// Single shunt and bus voltage conversion
    ShuntAndBusTriggered = 0b011,
    /// ADC disabled
    AdcOff = 0b100,
    /// Shunt voltage, continuous
    ShuntContinuous = 0b101,
    /// Bus voltage, continuous
    BusContinuous = 0b110,
    /// Shunt and bus voltage, continuous
    #[default]
    ShuntAndBusContinuous = 0b111,
}

impl Mode {
    const MASK: u16 = 0b111;

    const fn from_register(reg: u16) -> Self {
        match reg & Self::MASK {
            0b000 => Self::PowerDown,
            0b001 => Self::ShuntTriggered,
            0b010 => Self::BusTriggered,
            0b011 => Self::ShuntAndBusTriggered,
            0b100 => Self::AdcOff,
            0b101 => Self::ShuntContinuous,
            0b110 => Self::BusContinuous,
            _ => Self::ShuntAndBusContinuous,
        }
    }
}

/// Content of the configuration register
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct Configuration {
    /// Full scale range of the bus voltage
    pub bus_voltage_range: BusVoltageRange,
    /// Shunt amplifier gain
    pub gain: Gain,
    /// ADC setting for the bus voltage
    pub bus_resolution: AdcResolution,
    /// ADC setting for the shunt voltage
    pub shunt_resolution: AdcResolution,
    /// Operating mode
    pub mode: Mode,
}

impl Configuration {
    /// 32V bus range, ±320mV shunt range, both ADCs averaging 32 samples, continuous conversion
    pub const UPS_32V_2A: Self = Self {
        bus_voltage_range: BusVoltageRange::Range32V,
        gain: Gain::Div8_320mV,
        bus_resolution: AdcResolution::Avg32,
        shunt_resolution: AdcResolution::Avg32,
        mode: Mode::ShuntAndBusContinuous,
    };

    /// 16V bus range, ±80mV shunt range, both ADCs averaging 32 samples, continuous conversion
    pub const UPS_16V_5A: Self = Self {
        bus_voltage_range: BusVoltageRange::Range16V,
        gain: Gain::Div2_80mV,
        bus_resolution: AdcResolution::Avg32,
        shunt_resolution: AdcResolution::Avg32,
        mode: Mode::ShuntAndBusContinuous,
    };

    /// Decode the value read from the configuration register
    ///
    /// The reset bit and unused bits are ignored.
    #[must_use]
    pub const fn from_bits(reg: u16) -> Self {
        Self {
            bus_voltage_range: BusVoltageRange::from_register(reg),
            gain: Gain::from_register(reg),
            bus_resolution: AdcResolution::from_register(reg, AdcResolution::SHIFT_BUS),
            shunt_resolution: AdcResolution::from_register(reg, AdcResolution::SHIFT_SHUNT),
            mode: Mode::from_register(reg),
        }
    }

    /// Assemble the word written to the configuration register
    #[must_use]
    pub const fn as_bits(self) -> u16 {
        (self.bus_voltage_range as u16) << BusVoltageRange::SHIFT
            | (self.gain as u16) << Gain::SHIFT
            | (self.bus_resolution as u16) << AdcResolution::SHIFT_BUS
            | (self.shunt_resolution as u16) << AdcResolution::SHIFT_SHUNT
            | self.mode as u16
    }

    /// Time in µs the chip needs for one conversion of both signals
    #[must_use]
    pub const fn conversion_time_us(self) -> u32 {
        let bus = self.bus_resolution.conversion_time_us();
        let shunt = self.shunt_resolution.conversion_time_us();
        match self.mode {
            Mode::PowerDown | Mode::AdcOff => 0,
            Mode::ShuntTriggered | Mode::ShuntContinuous => shunt,
            Mode::BusTriggered | Mode::BusContinuous => bus,
            Mode::ShuntAndBusTriggered | Mode::ShuntAndBusContinuous => bus + shunt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_datasheet() {
        let reset_value = 0b0011_1001_1001_1111;

        assert_eq!(Configuration::default().as_bits(), reset_value);
        assert_eq!(
            Configuration::from_bits(reset_value),
            Configuration::default()
        );
    }

    #[test]
    fn ups_words() {
        assert_eq!(Configuration::UPS_32V_2A.as_bits(), 0x3EEF);
        assert_eq!(Configuration::UPS_16V_5A.as_bits(), 0x0EEF);

        assert_eq!(
            Configuration::from_bits(0x3EEF),
            Configuration::UPS_32V_2A
        );
        assert_eq!(
            Configuration::from_bits(0x0EEF),
            Configuration::UPS_16V_5A
        );
    }

    #[test]
    fn field_offsets() {
        let zero = Configuration::from_bits(0);
        assert_eq!(zero.as_bits(), 0);

        assert_eq!(
            Configuration {
                bus_voltage_range: BusVoltageRange::Range32V,
                ..zero
            }
            .as_bits(),
            1 << 13
        );
        assert_eq!(
            Configuration {
                gain: Gain::Div8_320mV,
                ..zero
            }
            .as_bits(),
            0b11 << 11
        );
        assert_eq!(
            Configuration {
                bus_resolution: AdcResolution::Avg128,
                ..zero
            }
            .as_bits(),
            0b1111 << 7
        );
        assert_eq!(
            Configuration {
                shunt_resolution: AdcResolution::Avg128,
                ..zero
            }
            .as_bits(),
            0b1111 << 3
        );
        assert_eq!(
            Configuration {
                mode: Mode::ShuntAndBusContinuous,
                ..zero
            }
            .as_bits(),
            0b111
        );
    }

    #[test]
    fn decoding_is_stable() {
        // Redundant encodings (12 bit resolution, reset and unused bits) collapse to one value,
        // after which encoding and decoding must agree.
        for val in 0..=u16::MAX {
            let conf = Configuration::from_bits(val);
            assert_eq!(Configuration::from_bits(conf.as_bits()), conf);
        }
    }

    #[test]
    fn conversion_time() {
        assert_eq!(Configuration::UPS_32V_2A.conversion_time_us(), 34_040);
        assert_eq!(
            Configuration {
                mode: Mode::AdcOff,
                ..Configuration::UPS_32V_2A
            }
            .conversion_time_us(),
            0
        );
    }
}
