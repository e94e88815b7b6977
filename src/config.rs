//! Host side description of one UPS HAT
//!
//! # Example
//! ```rust
//! use core::time::Duration;
//! use waveshare_ups::{HatModel, UpsConfig, Variant};
//!
//! let config = UpsConfig::new(1, "D".parse::<HatModel>().unwrap())
//!     .with_update_interval(Duration::from_secs(30))
//!     .unwrap();
//!
//! assert_eq!(config.address.as_byte(), 0x43);
//! assert_eq!(config.variant(), Variant::OneCell);
//! ```

use crate::address::Address;
use crate::errors::ConfigError;
use crate::variant::Variant;
use core::str::FromStr;
use core::time::Duration;

/// Board model as printed on the HAT
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum HatModel {
    /// UPS HAT (A)
    #[default]
    A,
    /// UPS HAT (B)
    B,
    /// UPS HAT (D)
    D,
}

impl HatModel {
    /// Battery layout of this model
    #[must_use]
    pub const fn variant(self) -> Variant {
        match self {
            Self::A | Self::B => Variant::TwoCell,
            Self::D => Variant::OneCell,
        }
    }
}

impl FromStr for HatModel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "a" | "A" => Ok(Self::A),
            "b" | "B" => Ok(Self::B),
            "d" | "D" => Ok(Self::D),
            _ => Err(ConfigError::UnknownModel),
        }
    }
}

impl core::fmt::Display for HatModel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let letter = match self {
            Self::A => "A",
            Self::B => "B",
            Self::D => "D",
        };
        write!(f, "Model {letter}")
    }
}

/// Where to find a UPS HAT and how often to poll it
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UpsConfig {
    /// Number of the I2C bus, `1` for `/dev/i2c-1`
    pub bus: u8,
    /// Address of the INA219 on that bus
    pub address: Address,
    /// Board model
    pub model: HatModel,
    update_interval: Duration,
}

impl UpsConfig {
    /// Interval used unless another one is set
    pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(10);

    /// Shortest accepted interval
    pub const MIN_UPDATE_INTERVAL: Duration = Duration::from_secs(2);

    /// Describe a HAT of `model` on `bus` at the address the model ships with
    #[must_use]
    pub const fn new(bus: u8, model: HatModel) -> Self {
        Self {
            bus,
            address: model.variant().default_address(),
            model,
            update_interval: Self::DEFAULT_UPDATE_INTERVAL,
        }
    }

    /// Use another address, e.g. one found by a scan
    ///
    /// # Errors
    /// Returns [`ConfigError::Address`] if an INA219 can not have this address.
    pub fn with_address(self, address: u8) -> Result<Self, ConfigError> {
        Ok(Self {
            address: Address::from_byte(address)?,
            ..self
        })
    }

    /// Poll every `interval`
    ///
    /// # Errors
    /// Returns [`ConfigError::IntervalTooShort`] for intervals below
    /// [`Self::MIN_UPDATE_INTERVAL`].
    pub fn with_update_interval(self, interval: Duration) -> Result<Self, ConfigError> {
        if interval < Self::MIN_UPDATE_INTERVAL {
            return Err(ConfigError::IntervalTooShort {
                requested_s: interval.as_secs(),
                minimum_s: Self::MIN_UPDATE_INTERVAL.as_secs(),
            });
        }

        Ok(Self {
            update_interval: interval,
            ..self
        })
    }

    /// Time between two polls
    #[must_use]
    pub const fn update_interval(&self) -> Duration {
        self.update_interval
    }

    /// Battery layout of the configured model
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.model.variant()
    }
}

impl Default for UpsConfig {
    fn default() -> Self {
        Self::new(1, HatModel::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_model() {
        assert_eq!("a".parse(), Ok(HatModel::A));
        assert_eq!("B".parse(), Ok(HatModel::B));
        assert_eq!(" d ".parse(), Ok(HatModel::D));
        assert_eq!("c".parse::<HatModel>(), Err(ConfigError::UnknownModel));
        assert_eq!("".parse::<HatModel>(), Err(ConfigError::UnknownModel));
        assert_eq!(HatModel::D.to_string(), "Model D");
    }

    #[test]
    fn defaults() {
        let config = UpsConfig::default();
        assert_eq!(config.bus, 1);
        assert_eq!(config.address, Address::UPS_HAT_AB);
        assert_eq!(config.variant(), Variant::TwoCell);
        assert_eq!(config.update_interval(), Duration::from_secs(10));

        let config = UpsConfig::new(0, HatModel::B);
        assert_eq!(config.variant(), Variant::TwoCell);
    }

    #[test]
    fn interval_is_checked() {
        let config = UpsConfig::default();
        assert_eq!(
            config.with_update_interval(Duration::from_millis(1500)),
            Err(ConfigError::IntervalTooShort {
                requested_s: 1,
                minimum_s: 2
            })
        );
        assert_eq!(
            config
                .with_update_interval(Duration::from_secs(2))
                .map(|c| c.update_interval()),
            Ok(Duration::from_secs(2))
        );
    }

    #[test]
    fn address_is_checked() {
        let config = UpsConfig::new(1, HatModel::A);
        assert!(matches!(
            config.with_address(0x20),
            Err(ConfigError::Address(_))
        ));
        assert_eq!(
            config.with_address(0x41).map(|c| c.address.as_byte()),
            Ok(0x41)
        );
    }
}
