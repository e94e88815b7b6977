use super::driver::Ina219;
use crate::address::Address;
use crate::bus::{BusGuard, OpenBus};
use crate::config::UpsConfig;
use crate::errors::PollError;
use crate::measurements::Snapshot;
use crate::variant::Variant;
use embedded_hal_async::i2c::I2c;

/// Take one snapshot of the UPS HAT at `address` on bus number `bus`
///
/// The bus is opened through `opener`, the chip is set up with the profile of `variant` and all
/// measurement registers are read once. The bus is handed back to [`OpenBus::close`] before this
/// returns, on success as well as on failure.
///
/// # Errors
/// * [`PollError::BusUnavailable`] if the bus can not be opened. No register is touched.
/// * [`PollError::DeviceUnresponsive`] if any transaction fails. No snapshot is returned.
pub async fn poll<O, I2C>(
    opener: &mut O,
    bus: u8,
    address: Address,
    variant: Variant,
) -> Result<Snapshot, PollError<O::Error, I2C::Error>>
where
    O: OpenBus<I2C>,
    I2C: I2c,
{
    let mut guard = match BusGuard::open(opener, bus) {
        Ok(guard) => guard,
        Err(source) => {
            log::warn!("I2C bus {bus} is unavailable");
            return Err(PollError::BusUnavailable { bus, source });
        }
    };

    let result = read_snapshot(&mut *guard, address, variant).await;
    if result.is_err() {
        log::warn!("no response from {address} on I2C bus {bus}");
    }

    result.map_err(PollError::DeviceUnresponsive)
}

async fn read_snapshot<I2C: I2c>(
    i2c: &mut I2C,
    address: Address,
    variant: Variant,
) -> Result<Snapshot, I2C::Error> {
    let mut ina = Ina219::new(i2c, address, variant.profile())
        .await
        .map_err(|e| e.reason)?;
    let readings = ina.readings().await?;

    let snapshot = Snapshot::new(readings, variant);
    log::debug!(
        "{:?} at {address}: {:.3}V {:.1}mA {:.3}W {:.1}%",
        variant,
        snapshot.load_voltage(),
        snapshot.current(),
        snapshot.power(),
        snapshot.battery_percentage(),
    );
    Ok(snapshot)
}

/// A UPS HAT described by a [`UpsConfig`] together with the source of its bus
///
/// Every call to [`Self::poll`] opens the bus, reads a fresh snapshot and closes the bus again.
/// Scheduling the polls, e.g. every [`UpsConfig::update_interval`], is left to the caller.
pub struct Ups<O> {
    opener: O,
    config: UpsConfig,
}

impl<O> Ups<O> {
    /// Pair `opener` with the configuration of one HAT
    pub const fn new(opener: O, config: UpsConfig) -> Self {
        Self { opener, config }
    }

    /// Configuration of the HAT
    pub const fn config(&self) -> &UpsConfig {
        &self.config
    }

    /// Give back the bus source
    pub fn destroy(self) -> O {
        self.opener
    }

    /// Take one snapshot, see [`poll`]
    ///
    /// # Errors
    /// Returns a [`PollError`] if the bus can not be opened or the chip does not respond.
    pub async fn poll<I2C>(&mut self) -> Result<Snapshot, PollError<O::Error, I2C::Error>>
    where
        O: OpenBus<I2C>,
        I2C: I2c,
    {
        let UpsConfig { bus, address, .. } = self.config;
        poll(&mut self.opener, bus, address, self.config.variant()).await
    }
}
