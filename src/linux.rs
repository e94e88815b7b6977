//! Numbered I2C buses on Linux
//!
//! Bus `n` is the character device `/dev/i2c-n`, driven through [`linux_embedded_hal::I2cdev`].

use crate::bus::{OpenBus, Responders};
use linux_embedded_hal::I2cdev;
use std::io;
use std::path::PathBuf;

/// Buses the UPS HATs show up on, in the order they are searched
pub const SEARCHED_BUSES: [u8; 2] = [1, 0];

/// Opens `/dev/i2c-N` for bus `N`
#[derive(Debug, Clone)]
pub struct LinuxBuses {
    dev_dir: PathBuf,
}

impl Default for LinuxBuses {
    fn default() -> Self {
        Self::with_dev_dir("/dev")
    }
}

impl LinuxBuses {
    /// Look for the bus devices below `dev_dir` instead of `/dev`
    pub fn with_dev_dir(dev_dir: impl Into<PathBuf>) -> Self {
        Self {
            dev_dir: dev_dir.into(),
        }
    }

    /// Path of the device node for bus `bus`
    #[must_use]
    pub fn path(&self, bus: u8) -> PathBuf {
        self.dev_dir.join(format!("i2c-{bus}"))
    }

    /// Scan the buses in [`SEARCHED_BUSES`] for responding devices
    ///
    /// Buses that do not exist are skipped. Returns one entry per existing bus.
    pub fn detect(&mut self) -> Vec<(u8, Responders)> {
        let mut found = Vec::new();

        for bus in SEARCHED_BUSES {
            match self.open(bus) {
                Ok(mut i2c) => {
                    let responders = crate::sync::scan(&mut i2c);
                    log::debug!("{} devices on I2C bus {bus}", responders.len());
                    found.push((bus, responders));
                }
                Err(err) => log::debug!("skipping I2C bus {bus}: {err}"),
            }
        }

        found
    }
}

impl OpenBus<I2cdev> for LinuxBuses {
    type Error = io::Error;

    fn open(&mut self, bus: u8) -> Result<I2cdev, Self::Error> {
        I2cdev::new(self.path(bus)).map_err(io::Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_bus_is_not_found() {
        let mut buses = LinuxBuses::with_dev_dir("/nonexistent-dev");
        assert_eq!(buses.path(3), PathBuf::from("/nonexistent-dev/i2c-3"));

        let err = buses.open(3).err().expect("bus 3 does not exist");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn open_keeps_os_error() {
        let dev_dir = std::env::temp_dir().join(format!("waveshare-ups-{}", std::process::id()));
        let mut buses = LinuxBuses::with_dev_dir(&dev_dir);
        std::fs::create_dir_all(buses.path(7)).unwrap();

        // A directory can not be opened for writing
        let err = buses.open(7).err().expect("bus 7 is a directory");
        std::fs::remove_dir_all(&dev_dir).unwrap();

        assert_eq!(err.raw_os_error(), Some(21));
        assert_ne!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn poll_on_missing_bus() {
        use crate::errors::PollError;
        use crate::Variant;

        let mut buses = LinuxBuses::with_dev_dir("/nonexistent-dev");
        let variant = Variant::OneCell;
        let result = crate::sync::poll(&mut buses, 9, variant.default_address(), variant);

        assert!(matches!(
            result,
            Err(PollError::BusUnavailable { bus: 9, .. })
        ));
    }

    #[test]
    fn detect_skips_missing_buses() {
        let mut buses = LinuxBuses::with_dev_dir("/nonexistent-dev");
        assert!(buses.detect().is_empty());
    }
}
