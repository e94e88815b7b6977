//! Calibration constants used by the UPS HATs
//!
//! The calibration register tells the INA219 how to turn the shunt voltage into current and
//! power. Together with the shunt resistor it fixes the value of one count in the current and
//! power registers. The constants below follow the LSB selection procedure of section 8.5 of the
//! datasheet:
//!
//! 1. `max_possible_current = shunt_range / r_shunt`
//! 2. pick a `max_expected_current`
//! 3. `current_lsb` between `max_expected_current / 32767` and `max_expected_current / 4096`,
//!    rounded to a convenient value
//! 4. `calibration = trunc(0.04096 / (current_lsb * r_shunt))`
//! 5. `power_lsb = 20 * current_lsb`
//!
//! They are fixed per board and not recomputed at runtime.

use crate::configuration::Configuration;

/// Value of the calibration register and the scale of the readings it results in
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Calibration {
    /// Value written to the calibration register
    pub register_bits: u16,
    /// Current represented by one count of the current register in mA
    pub current_lsb_ma: f64,
    /// Power represented by one count of the power register in W
    pub power_lsb_w: f64,
}

impl Calibration {
    /// 0.1Ω shunt, ±320mV range, 2A expected.
    ///
    /// * max possible current: 3.2A
    /// * LSB range: 61µA ..= 488µA, 100µA chosen
    /// * calibration: `trunc(0.04096 / (0.0001 * 0.1))` = 4096
    /// * power LSB: 2mW
    pub const SHUNT_100MOHM_2A: Self = Self {
        register_bits: 4096,
        current_lsb_ma: 0.1,
        power_lsb_w: 0.002,
    };

    /// 0.01Ω shunt, ±80mV range, 5A expected.
    ///
    /// Values as shipped by the board vendor. The register value is close to, but not exactly,
    /// `trunc(0.04096 / (0.0001524 * 0.01))` = 26876.
    pub const SHUNT_10MOHM_5A: Self = Self {
        register_bits: 26868,
        current_lsb_ma: 0.1524,
        power_lsb_w: 0.003_048,
    };

    /// Current in mA for a decoded current register value
    #[must_use]
    pub fn current_ma(&self, counts: i32) -> f64 {
        f64::from(counts) * self.current_lsb_ma
    }

    /// Power in W for a decoded power register value
    #[must_use]
    pub fn power_w(&self, counts: i32) -> f64 {
        f64::from(counts) * self.power_lsb_w
    }
}

/// Everything written to the chip when it is set up: calibration and configuration
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Profile {
    /// Calibration register value and reading scales
    pub calibration: Calibration,
    /// Configuration register value
    pub configuration: Configuration,
}

impl Profile {
    /// 32V bus, 2A, 0.1Ω shunt. Counter overflow at 3.2A. Used by the UPS HAT (A) and (B).
    pub const CAL_32V_2A: Self = Self {
        calibration: Calibration::SHUNT_100MOHM_2A,
        configuration: Configuration::UPS_32V_2A,
    };

    /// 16V bus, 5A, 0.01Ω shunt. Used by the UPS HAT (D).
    pub const CAL_16V_5A: Self = Self {
        calibration: Calibration::SHUNT_10MOHM_5A,
        configuration: Configuration::UPS_16V_5A,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "{actual} is not close to {expected}"
        );
    }

    /// Calibration register value following step 4 of the datasheet procedure
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn datasheet_register(current_lsb_a: f64, r_shunt_ohm: f64) -> u16 {
        f64::trunc(0.04096 / (current_lsb_a * r_shunt_ohm)) as u16
    }

    #[test]
    fn constants_are_consistent_32v_2a() {
        let cal = Calibration::SHUNT_100MOHM_2A;

        // The LSB has to lie between the 15 bit and the 12 bit bound for 2A
        let lsb_a = cal.current_lsb_ma / 1000.0;
        assert!(lsb_a >= 2.0 / 32767.0);
        assert!(lsb_a <= 2.0 / 4096.0);

        // 0.04096 / (0.0001 * 0.1) suffers from rounding in f64, so allow one count
        let expected = datasheet_register(lsb_a, 0.1);
        assert!(cal.register_bits.abs_diff(expected) <= 1);
        assert_eq!(cal.register_bits, 0x1000);

        assert_close(cal.power_lsb_w, 20.0 * lsb_a);
    }

    #[test]
    fn constants_are_consistent_16v_5a() {
        let cal = Calibration::SHUNT_10MOHM_5A;
        assert_close(cal.power_lsb_w, 20.0 * cal.current_lsb_ma / 1000.0);
        assert_eq!(cal.register_bits, 26868);

        let expected = datasheet_register(cal.current_lsb_ma / 1000.0, 0.01);
        assert!(cal.register_bits.abs_diff(expected) <= 8);
    }

    #[test]
    fn scaling() {
        let cal = Calibration::SHUNT_100MOHM_2A;
        assert_close(cal.current_ma(100), 10.0);
        assert_close(cal.current_ma(-32767), -3276.7);
        assert_close(cal.power_w(500), 1.0);
        assert_close(cal.power_w(0), 0.0);
    }
}
