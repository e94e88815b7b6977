//! Hardware variants of the UPS HATs
//!
//! All boards use the same INA219 protocol. They differ in the shunt, the calibration written to
//! the chip and the battery pack, which sets the voltage window used for the battery percentage.

use crate::address::Address;
use crate::calibration::Profile;

/// Battery pack layout of a UPS HAT
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum Variant {
    /// Two 18650 cells in series, UPS HAT (A) and (B)
    #[default]
    TwoCell,
    /// One cell, UPS HAT (D)
    OneCell,
}

impl Variant {
    /// Chip setup used on this board
    #[must_use]
    pub const fn profile(self) -> Profile {
        match self {
            Self::TwoCell => Profile::CAL_32V_2A,
            Self::OneCell => Profile::CAL_16V_5A,
        }
    }

    /// Address the INA219 is strapped to on this board
    #[must_use]
    pub const fn default_address(self) -> Address {
        match self {
            Self::TwoCell => Address::UPS_HAT_AB,
            Self::OneCell => Address::UPS_HAT_D,
        }
    }

    /// Load voltage in V at which the pack is considered empty
    #[must_use]
    pub const fn empty_v(self) -> f64 {
        match self {
            Self::TwoCell => 6.0,
            Self::OneCell => 3.0,
        }
    }

    /// Voltage span in V between an empty and a full pack
    #[must_use]
    pub const fn span_v(self) -> f64 {
        match self {
            Self::TwoCell => 2.4,
            Self::OneCell => 1.2,
        }
    }

    /// Estimate the charge of the pack in percent from the load voltage
    ///
    /// The estimate is linear between [`Self::empty_v`] and `empty_v + span_v` and clamped to
    /// `0.0..=100.0`.
    ///
    /// # Example
    /// ```rust
    /// use waveshare_ups::Variant;
    ///
    /// assert_eq!(Variant::TwoCell.battery_percentage(8.4), 100.0);
    /// assert_eq!(Variant::TwoCell.battery_percentage(6.0), 0.0);
    /// assert_eq!(Variant::OneCell.battery_percentage(2.5), 0.0);
    /// ```
    #[must_use]
    pub fn battery_percentage(self, load_voltage: f64) -> f64 {
        let percentage = (load_voltage - self.empty_v()) / self.span_v() * 100.0;
        percentage.clamp(0.0, 100.0)
    }
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

    #[test]
    fn two_cell_percentage() {
        let v = Variant::TwoCell;
        assert_close(v.battery_percentage(8.4), 100.0);
        assert_close(v.battery_percentage(6.0), 0.0);
        assert_close(v.battery_percentage(7.2), 50.0);
        assert_close(v.battery_percentage(4.0), 0.0);
        assert_close(v.battery_percentage(9.0), 100.0);
    }

    #[test]
    fn one_cell_percentage() {
        let v = Variant::OneCell;
        assert_close(v.battery_percentage(4.2), 100.0);
        assert_close(v.battery_percentage(3.0), 0.0);
        assert_close(v.battery_percentage(3.6), 50.0);
        assert_close(v.battery_percentage(0.0), 0.0);
        assert_close(v.battery_percentage(5.0), 100.0);
    }

    #[test]
    fn percentage_never_leaves_range() {
        for variant in [Variant::TwoCell, Variant::OneCell] {
            for mv in (0..=20_000).step_by(7) {
                let p = variant.battery_percentage(f64::from(mv) / 1000.0);
                assert!((0.0..=100.0).contains(&p), "{variant:?} at {mv}mV gave {p}");
            }
        }
    }

    #[test]
    fn per_variant_constants() {
        assert_eq!(Variant::TwoCell.profile(), Profile::CAL_32V_2A);
        assert_eq!(Variant::OneCell.profile(), Profile::CAL_16V_5A);
        assert_eq!(Variant::TwoCell.default_address().as_byte(), 0x42);
        assert_eq!(Variant::OneCell.default_address().as_byte(), 0x43);
    }
}
