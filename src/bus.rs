//! Opening numbered I2C buses and handing them back
//!
//! A poll opens its bus through [`OpenBus`] and keeps it in a [`BusGuard`]. The guard returns the
//! bus to [`OpenBus::close`] when it goes out of scope, so every poll closes its bus exactly once
//! whether it succeeds, fails or panics.

use crate::address::Address;
use core::ops::{Deref, DerefMut, RangeInclusive};

/// Source of I2C buses addressed by number, like `/dev/i2c-1` on Linux
pub trait OpenBus<B> {
    /// Error returned when the bus does not exist or can not be opened
    type Error;

    /// Open bus number `bus`
    ///
    /// # Errors
    /// Returns an error if the bus is not present on this host.
    fn open(&mut self, bus: u8) -> Result<B, Self::Error>;

    /// Release a bus returned by [`Self::open`]
    ///
    /// The default drops it, which closes OS handles.
    fn close(&mut self, bus: B) {
        drop(bus);
    }
}

impl<B, T: OpenBus<B> + ?Sized> OpenBus<B> for &mut T {
    type Error = T::Error;

    fn open(&mut self, bus: u8) -> Result<B, Self::Error> {
        T::open(self, bus)
    }

    fn close(&mut self, bus: B) {
        T::close(self, bus);
    }
}

/// An open bus that is closed again when the guard is dropped
pub struct BusGuard<'a, O, B>
where
    O: OpenBus<B>,
{
    opener: &'a mut O,
    number: u8,
    bus: Option<B>,
}

impl<'a, O, B> BusGuard<'a, O, B>
where
    O: OpenBus<B>,
{
    /// Open bus `number` through `opener`
    ///
    /// # Errors
    /// Returns the opener's error if the bus can not be opened. Nothing needs closing then.
    pub fn open(opener: &'a mut O, number: u8) -> Result<Self, O::Error> {
        let bus = opener.open(number)?;
        log::trace!("opened I2C bus {number}");

        Ok(Self {
            opener,
            number,
            bus: Some(bus),
        })
    }

    /// Number of the guarded bus
    #[must_use]
    pub const fn number(&self) -> u8 {
        self.number
    }
}

impl<O, B> Deref for BusGuard<'_, O, B>
where
    O: OpenBus<B>,
{
    type Target = B;

    fn deref(&self) -> &B {
        // Only `drop` takes the bus out
        self.bus.as_ref().unwrap_or_else(|| unreachable!())
    }
}

impl<O, B> DerefMut for BusGuard<'_, O, B>
where
    O: OpenBus<B>,
{
    fn deref_mut(&mut self) -> &mut B {
        self.bus.as_mut().unwrap_or_else(|| unreachable!())
    }
}

impl<O, B> Drop for BusGuard<'_, O, B>
where
    O: OpenBus<B>,
{
    fn drop(&mut self) {
        if let Some(bus) = self.bus.take() {
            self.opener.close(bus);
            log::trace!("closed I2C bus {}", self.number);
        }
    }
}

/// Set of 7 bit addresses that acknowledged a probe
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct Responders(u128);

impl Responders {
    /// Addresses probed by a scan, the reserved ones at both ends are skipped
    pub const SCANNED: RangeInclusive<u8> = 3..=127;

    /// Record that `address` acknowledged, addresses above 127 are ignored
    pub fn insert(&mut self, address: u8) {
        if address < 128 {
            self.0 |= 1 << address;
        }
    }

    /// Whether `address` acknowledged
    #[must_use]
    pub const fn contains(self, address: u8) -> bool {
        address < 128 && self.0 & (1 << address) != 0
    }

    /// Number of responding addresses
    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Whether nothing responded
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Responding addresses in ascending order
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..128).filter(move |address| self.contains(*address))
    }

    /// Responding addresses an INA219 could be strapped to
    pub fn ina219_candidates(self) -> impl Iterator<Item = Address> {
        self.iter().filter_map(|byte| Address::from_byte(byte).ok())
    }
}
