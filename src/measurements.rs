//! Values read from the INA219 and the snapshot handed to the host

use crate::variant::Variant;

/// One pass over the measurement registers, in the units and sign the chip reports
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Readings {
    /// Current through the shunt in mA, positive when the battery is discharging
    pub current_ma: f64,
    /// Bus voltage in V
    pub bus_voltage_v: f64,
    /// Power in W
    pub power_w: f64,
    /// Shunt voltage in mV
    pub shunt_voltage_mv: f64,
}

/// Immutable set of measurements taken during one poll
///
/// # Example
/// ```rust
/// use waveshare_ups::{Readings, Snapshot, Variant};
///
/// let snapshot = Snapshot::new(
///     Readings {
///         current_ma: 250.0,
///         bus_voltage_v: 8.4,
///         power_w: 2.1,
///         shunt_voltage_mv: 25.0,
///     },
///     Variant::TwoCell,
/// );
///
/// assert_eq!(snapshot.current(), -250.0);
/// assert!(!snapshot.is_charging());
/// assert_eq!(snapshot.battery_percentage(), 100.0);
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Snapshot {
    current: f64,
    load_voltage: f64,
    power: f64,
    shunt_voltage: f64,
    variant: Variant,
}

impl Snapshot {
    /// Derive a snapshot from the raw readings of a board of the given variant
    ///
    /// The current is negated so a positive value means the battery is being charged.
    #[must_use]
    pub fn new(readings: Readings, variant: Variant) -> Self {
        Self {
            current: -readings.current_ma,
            load_voltage: readings.bus_voltage_v,
            power: readings.power_w,
            shunt_voltage: readings.shunt_voltage_mv / 1000.0,
            variant,
        }
    }

    /// Battery current in mA, positive while charging and negative while discharging
    #[must_use]
    pub const fn current(&self) -> f64 {
        self.current
    }

    /// Voltage on the load side of the shunt in V
    #[must_use]
    pub const fn load_voltage(&self) -> f64 {
        self.load_voltage
    }

    /// Power in W
    #[must_use]
    pub const fn power(&self) -> f64 {
        self.power
    }

    /// Voltage across the shunt in V
    #[must_use]
    pub const fn shunt_voltage(&self) -> f64 {
        self.shunt_voltage
    }

    /// Voltage on the supply side of the shunt in V
    #[must_use]
    pub fn psu_voltage(&self) -> f64 {
        self.load_voltage + self.shunt_voltage
    }

    /// Estimated charge in percent, see [`Variant::battery_percentage`]
    #[must_use]
    pub fn battery_percentage(&self) -> f64 {
        self.variant.battery_percentage(self.load_voltage)
    }

    /// Whether the battery is charging, a current of zero counts as charging
    #[must_use]
    pub fn is_charging(&self) -> bool {
        self.current >= 0.0
    }

    /// Board variant the snapshot was taken on
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
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

    fn readings(current_ma: f64, bus_voltage_v: f64) -> Readings {
        Readings {
            current_ma,
            bus_voltage_v,
            power_w: 1.5,
            shunt_voltage_mv: 12.5,
        }
    }

    #[test]
    fn current_is_inverted() {
        let s = Snapshot::new(readings(10.0, 7.0), Variant::TwoCell);
        assert_close(s.current(), -10.0);
        assert!(!s.is_charging());

        let s = Snapshot::new(readings(-120.0, 7.0), Variant::TwoCell);
        assert_close(s.current(), 120.0);
        assert!(s.is_charging());

        let s = Snapshot::new(readings(0.0, 7.0), Variant::TwoCell);
        assert!(s.is_charging());
    }

    #[test]
    fn shunt_voltage_in_volts() {
        let s = Snapshot::new(readings(0.0, 7.0), Variant::TwoCell);
        assert_close(s.shunt_voltage(), 0.0125);
        assert_close(s.psu_voltage(), 7.0125);
        assert_close(s.power(), 1.5);
        assert_close(s.load_voltage(), 7.0);
    }

    #[test]
    fn percentage_depends_on_variant() {
        let two = Snapshot::new(readings(0.0, 4.2), Variant::TwoCell);
        let one = Snapshot::new(readings(0.0, 4.2), Variant::OneCell);

        assert_close(two.battery_percentage(), 0.0);
        assert_close(one.battery_percentage(), 100.0);
        assert_eq!(one.variant(), Variant::OneCell);
    }
}
