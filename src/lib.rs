#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! Battery monitor for the Waveshare UPS HATs
//!
//! The HATs carry an INA219 current/power monitor on the battery rail. This crate configures the
//! chip, reads its registers and turns the raw values into a [`Snapshot`] holding current, load
//! voltage, power, shunt voltage and an estimated battery percentage.
//!
//! There are two layers:
//! * The register driver ([`SyncIna219`] / [`AsyncIna219`]) talks to the chip through an
//!   `embedded-hal` I2C bus.
//! * The poll functions ([`sync::poll`] / [`nonblocking::poll`]) open a bus, build the driver,
//!   read one snapshot and close the bus again, whatever the outcome.
//!
//! # Example
//! ```rust,no_run
//! # #[cfg(feature = "linux")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use waveshare_ups::linux::LinuxBuses;
//! use waveshare_ups::{sync, Variant};
//!
//! let mut buses = LinuxBuses::default();
//! let variant = Variant::TwoCell;
//! let snapshot = sync::poll(&mut buses, 1, variant.default_address(), variant)?;
//!
//! println!("Battery at {:.1}%", snapshot.battery_percentage());
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "linux"))]
//! # fn main() {}
//! ```

pub mod address;
pub mod bus;
pub mod calibration;
pub mod config;
pub mod configuration;
pub mod errors;
pub mod measurements;
pub mod register;
pub mod variant;

#[cfg(feature = "linux")]
pub mod linux;


/// Driver, discovery and poll functions working on an `embedded-hal-async` bus
#[cfg(feature = "async")]
#[path = "async/mod.rs"]
pub mod nonblocking;

/// Driver, discovery and poll functions working on a blocking `embedded-hal` bus
#[cfg(feature = "sync")]
pub mod sync {
    mod discovery {
        include!(concat!(env!("OUT_DIR"), "/blocking_discovery.rs"));
    }
    mod driver {
        include!(concat!(env!("OUT_DIR"), "/blocking_driver.rs"));
    }
    mod ups {
        include!(concat!(env!("OUT_DIR"), "/blocking_ups.rs"));
    }

    pub use discovery::scan;
    pub use driver::Ina219;
    pub use ups::{poll, Ups};
}

#[cfg(feature = "async")]
pub use nonblocking::Ina219 as AsyncIna219;
#[cfg(feature = "sync")]
pub use sync::Ina219 as SyncIna219;

pub use address::Address;
pub use calibration::Profile;
pub use config::{HatModel, UpsConfig};
pub use errors::PollError;
pub use measurements::{Readings, Snapshot};
pub use register::Register;
pub use variant::Variant;
