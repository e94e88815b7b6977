use crate::address::Address;
use crate::calibration::{Calibration, Profile};
use crate::configuration::Configuration;
use crate::errors::InitializationError;
use crate::measurements::Readings;
use crate::register::{bytes_from_word, signed_from_register, word_from_bytes, Register};
use embedded_hal_async::i2c::I2c;

/// Register driver for the INA219 on a UPS HAT
///
/// A value of this type always belongs to a calibrated chip: [`Self::new`] writes the profile
/// before handing out the driver.
pub struct Ina219<I2C> {
    i2c: I2C,
    address: Address,
    calibration: Calibration,
}

impl<I2C> Ina219<I2C>
where
    I2C: I2c,
{
    /// Open the INA219 at `address` and apply `profile`
    ///
    /// # Errors
    /// Returns the I2C device together with the error if writing the profile fails.
    pub async fn new(
        i2c: I2C,
        address: Address,
        profile: Profile,
    ) -> Result<Self, InitializationError<I2C, I2C::Error>> {
        let mut new = Self::new_unchecked(i2c, address, profile.calibration);

        match new.apply_profile(profile).await {
            Ok(()) => Ok(new),
            Err(e) => Err(InitializationError::new(e, new.destroy())),
        }
    }

    /// Create a driver for a chip that already carries `calibration`
    ///
    /// Nothing is written to the device.
    pub const fn new_unchecked(i2c: I2C, address: Address, calibration: Calibration) -> Self {
        Self {
            i2c,
            address,
            calibration,
        }
    }

    /// Destroy the driver returning the underlying I2C device
    ///
    /// The chip keeps running with its current configuration.
    pub fn destroy(self) -> I2C {
        self.i2c
    }

    /// Calibration the readings are scaled with
    pub const fn calibration(&self) -> Calibration {
        self.calibration
    }

    /// Address of the chip on the bus
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Read a register
    ///
    /// # Errors
    /// Returns the I2C error if the transaction fails.
    pub async fn read(&mut self, register: Register) -> Result<u16, I2C::Error> {
        let mut buf = [0x00; 2];
        self.i2c
            .write_read(self.address.as_byte(), &[register.address()], &mut buf)
            .await?;

        let value = word_from_bytes(buf);
        log::trace!("{:?} -> {value:#06x}", register);
        Ok(value)
    }

    /// Write a register
    ///
    /// # Errors
    /// Returns the I2C error if the transaction fails.
    pub async fn write(&mut self, register: Register, value: u16) -> Result<(), I2C::Error> {
        let [high, low] = bytes_from_word(value);
        log::trace!("{:?} <- {value:#06x}", register);
        self.i2c
            .write(self.address.as_byte(), &[register.address(), high, low])
            .await
    }

    /// Write the calibration register followed by the configuration register
    ///
    /// The scale used for current and power readings is taken from `profile` as well.
    ///
    /// # Errors
    /// Returns the I2C error if a write fails.
    pub async fn apply_profile(&mut self, profile: Profile) -> Result<(), I2C::Error> {
        self.calibration = profile.calibration;
        self.write_calibration().await?;
        self.write(Register::Configuration, profile.configuration.as_bits())
            .await
    }

    /// Configure for up to 32V and 2A with a 0.1Ω shunt, see [`Profile::CAL_32V_2A`]
    ///
    /// # Errors
    /// Returns the I2C error if a write fails.
    pub async fn apply_calibration_32v_2a(&mut self) -> Result<(), I2C::Error> {
        self.apply_profile(Profile::CAL_32V_2A).await
    }

    /// Configure for up to 16V and 5A with a 0.01Ω shunt, see [`Profile::CAL_16V_5A`]
    ///
    /// # Errors
    /// Returns the I2C error if a write fails.
    pub async fn apply_calibration_16v_5a(&mut self) -> Result<(), I2C::Error> {
        self.apply_profile(Profile::CAL_16V_5A).await
    }

    /// Read back the configuration register
    ///
    /// # Errors
    /// Returns the I2C error if the read fails.
    pub async fn configuration(&mut self) -> Result<Configuration, I2C::Error> {
        Ok(Configuration::from_bits(
            self.read(Register::Configuration).await?,
        ))
    }

    /// Read back the raw calibration register
    ///
    /// # Errors
    /// Returns the I2C error if the read fails.
    pub async fn calibration_register(&mut self) -> Result<u16, I2C::Error> {
        self.read(Register::Calibration).await
    }

    /// Voltage across the shunt in mV
    ///
    /// # Errors
    /// Returns the I2C error if a transaction fails.
    pub async fn shunt_voltage_mv(&mut self) -> Result<f64, I2C::Error> {
        self.write_calibration().await?;
        let value = signed_from_register(self.read(Register::ShuntVoltage).await?);
        Ok(f64::from(value) * 0.01)
    }

    /// Voltage on the load side of the shunt in V
    ///
    /// # Errors
    /// Returns the I2C error if a transaction fails.
    pub async fn bus_voltage_v(&mut self) -> Result<f64, I2C::Error> {
        self.write_calibration().await?;
        // The first read after the calibration write is discarded
        self.read(Register::BusVoltage).await?;
        let value = self.read(Register::BusVoltage).await? >> 3;
        Ok(f64::from(value) * 0.004)
    }

    /// Current through the shunt in mA, as reported by the chip
    ///
    /// # Errors
    /// Returns the I2C error if the read fails.
    pub async fn current_ma(&mut self) -> Result<f64, I2C::Error> {
        let value = signed_from_register(self.read(Register::Current).await?);
        Ok(self.calibration.current_ma(value))
    }

    /// Power in W
    ///
    /// # Errors
    /// Returns the I2C error if a transaction fails.
    pub async fn power_w(&mut self) -> Result<f64, I2C::Error> {
        self.write_calibration().await?;
        let value = signed_from_register(self.read(Register::Power).await?);
        Ok(self.calibration.power_w(value))
    }

    /// Read current, bus voltage, power and shunt voltage, in that order
    ///
    /// # Errors
    /// Returns the first I2C error, no partial readings are returned.
    pub async fn readings(&mut self) -> Result<Readings, I2C::Error> {
        let current_ma = self.current_ma().await?;
        let bus_voltage_v = self.bus_voltage_v().await?;
        let power_w = self.power_w().await?;
        let shunt_voltage_mv = self.shunt_voltage_mv().await?;

        Ok(Readings {
            current_ma,
            bus_voltage_v,
            power_w,
            shunt_voltage_mv,
        })
    }

    // The chip drops its calibration after some conversions, so it is rewritten before reads
    // that depend on it
    async fn write_calibration(&mut self) -> Result<(), I2C::Error> {
        self.write(Register::Calibration, self.calibration.register_bits)
            .await
    }
}
