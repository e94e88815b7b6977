use waveshare_ups::linux::LinuxBuses;

fn main() {
    let found = LinuxBuses::default().detect();
    if found.is_empty() {
        println!("No I2C bus found");
    }

    for (bus, responders) in found {
        let addresses: Vec<String> = responders.iter().map(|a| format!("{a:#04x}")).collect();
        println!("/dev/i2c-{bus}: {}", addresses.join(" "));

        for address in responders.ina219_candidates() {
            println!("  possible UPS HAT at {address}");
        }
    }
}
