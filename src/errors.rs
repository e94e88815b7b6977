//! Errors that can be returned by the driver and the poll functions

use core::fmt::{Debug, Display, Formatter};

/// Setting up the INA219 failed
///
/// Contains the I2C device so it can be reused or closed by the caller.
#[derive(Debug)]
pub struct InitializationError<I2C, I2cErr> {
    /// What went wrong
    pub reason: I2cErr,
    /// The I2C device the driver was created with
    pub device: I2C,
}

impl<I2C, I2cErr> InitializationError<I2C, I2cErr> {
    pub(crate) const fn new(reason: I2cErr, device: I2C) -> Self {
        Self { reason, device }
    }
}

impl<I2C, I2cErr: Debug> Display for InitializationError<I2C, I2cErr> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "Writing calibration failed: {:?}", self.reason)
    }
}

#[cfg(feature = "std")]
impl<I2C, I2cErr> std::error::Error for InitializationError<I2C, I2cErr>
where
    I2C: Debug,
    I2cErr: Debug + std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.reason)
    }
}

/// A poll did not produce a snapshot
///
/// Polls fail as a whole, there are no partial snapshots. A failed poll means the measurement is
/// unavailable for this cycle; the next poll may well succeed.
#[derive(Debug)]
pub enum PollError<OpenErr, I2cErr> {
    /// The numbered I2C bus could not be opened, no register was touched
    BusUnavailable {
        /// Number of the bus that was requested
        bus: u8,
        /// Error reported while opening it
        source: OpenErr,
    },
    /// A transaction with the INA219 failed, e.g. nothing acknowledged the address
    DeviceUnresponsive(I2cErr),
}

impl<O, E> From<E> for PollError<O, E> {
    fn from(value: E) -> Self {
        Self::DeviceUnresponsive(value)
    }
}

impl<O: Debug, E: Debug> Display for PollError<O, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BusUnavailable { bus, source } => {
                write!(f, "I2C bus {bus} is unavailable: {source:?}")
            }
            Self::DeviceUnresponsive(err) => write!(f, "Device did not respond: {err:?}"),
        }
    }
}

#[cfg(feature = "std")]
impl<O, E> std::error::Error for PollError<O, E>
where
    O: Debug + std::error::Error + 'static,
    E: Debug + std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::BusUnavailable { source, .. } => Some(source),
            Self::DeviceUnresponsive(err) => Some(err),
        }
    }
}

/// Host configuration that can not be used
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ConfigError {
    /// The HAT model letter is not one of `a`, `b` or `d`
    UnknownModel,
    /// The update interval is shorter than the minimum, in seconds
    IntervalTooShort {
        /// Requested interval
        requested_s: u64,
        /// Smallest accepted interval
        minimum_s: u64,
    },
    /// The address is not one an INA219 can have
    Address(crate::address::OutOfRange),
}

impl From<crate::address::OutOfRange> for ConfigError {
    fn from(value: crate::address::OutOfRange) -> Self {
        Self::Address(value)
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownModel => write!(f, "Unknown HAT model, expected one of a, b or d"),
            Self::IntervalTooShort {
                requested_s,
                minimum_s,
            } => write!(
                f,
                "Update interval of {requested_s}s is shorter than the minimum of {minimum_s}s"
            ),
            Self::Address(err) => write!(f, "Invalid address: {err}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Address(err) => Some(err),
            Self::UnknownModel | Self::IntervalTooShort { .. } => None,
        }
    }
}
