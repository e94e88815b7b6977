use crate::bus::Responders;
use embedded_hal_async::i2c::I2c;

/// Probe every address in `3..=127` and collect the ones that acknowledge
///
/// Each probe writes a single zero byte. Any error, usually a missing acknowledge, counts as no
/// device. This is meant for setting up a host, not for every poll.
pub async fn scan<I2C: I2c>(i2c: &mut I2C) -> Responders {
    let mut found = Responders::default();

    for address in Responders::SCANNED {
        if i2c.write(address, &[0]).await.is_ok() {
            log::debug!("device at {address:#04x} acknowledged");
            found.insert(address);
        }
    }

    found
}
