use linux_embedded_hal::I2cdev;
use std::error::Error;
use waveshare_ups::{Register, SyncIna219, Variant};

fn main() -> Result<(), Box<dyn Error>> {
    let variant = Variant::TwoCell;
    let device = I2cdev::new("/dev/i2c-1")?;
    let mut ina = SyncIna219::new(device, variant.default_address(), variant.profile())
        .map_err(|e| e.reason)?;

    println!("Configuration: {:?}", ina.configuration()?);

    for register in [
        Register::Configuration,
        Register::ShuntVoltage,
        Register::BusVoltage,
        Register::Power,
        Register::Current,
        Register::Calibration,
    ] {
        println!("{register:?}: {:#06x}", ina.read(register)?);
    }

    println!("Readings: {:?}", ina.readings()?);

    Ok(())
}
