use std::error::Error;
use waveshare_ups::linux::LinuxBuses;
use waveshare_ups::sync::Ups;
use waveshare_ups::{HatModel, UpsConfig};

fn main() -> Result<(), Box<dyn Error>> {
    // Usage: poll [MODEL] [BUS]
    let mut args = std::env::args().skip(1);
    let model = args.next().as_deref().unwrap_or("A").parse::<HatModel>()?;
    let bus = args.next().map_or(Ok(1), |bus| bus.parse())?;

    let config = UpsConfig::new(bus, model);
    println!("Polling {model} at {} on /dev/i2c-{bus}", config.address);

    let mut ups = Ups::new(LinuxBuses::default(), config);
    loop {
        match ups.poll() {
            Ok(snapshot) => {
                println!("Load Voltage:  {:>6.3} V", snapshot.load_voltage());
                println!("Current:       {:>6.3} A", snapshot.current() / 1000.0);
                println!("Power:         {:>6.3} W", snapshot.power());
                println!("Percent:       {:>5.1} %", snapshot.battery_percentage());
                println!(
                    "State:         {}",
                    if snapshot.is_charging() { "charging" } else { "discharging" }
                );
                println!();
            }
            Err(err) => println!("Measurement unavailable: {err}"),
        }

        std::thread::sleep(config.update_interval());
    }
}
