#![no_std]
#![no_main]

use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_stm32::gpio::Pin;
use intersection_controller::clock::EmbassyClock;
use intersection_controller::io::stm32::PortA;
use intersection_controller::{Clock, Intersection, IntersectionConfig, PinMap, TrafficModel};
use panic_halt as _;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let peripherals = embassy_stm32::init(Default::default());

    // PA13 and PA14 double as SWD; once they are outputs a debug probe can no
    // longer attach. PA15 is not wired to anything.
    let port = PortA::new([
        Some(peripherals.PA0.degrade()),
        Some(peripherals.PA1.degrade()),
        Some(peripherals.PA2.degrade()),
        Some(peripherals.PA3.degrade()),
        Some(peripherals.PA4.degrade()),
        Some(peripherals.PA5.degrade()),
        Some(peripherals.PA6.degrade()),
        Some(peripherals.PA7.degrade()),
        Some(peripherals.PA8.degrade()),
        Some(peripherals.PA9.degrade()),
        Some(peripherals.PA10.degrade()),
        Some(peripherals.PA11.degrade()),
        Some(peripherals.PA12.degrade()),
        Some(peripherals.PA13.degrade()),
        Some(peripherals.PA14.degrade()),
        None,
    ]);

    let clock = EmbassyClock;
    let traffic = TrafficModel::seeded(clock.now_ms());
    let config = IntersectionConfig::DEFAULT;

    // Without working outputs there is nothing sensible to show; panic-halt
    // leaves the intersection dark.
    let mut intersection = match Intersection::new(port, clock, traffic, PinMap::PORT_A, config) {
        Ok(intersection) => intersection,
        Err(error) => {
            defmt::error!("invalid intersection configuration: {}", error);
            panic!();
        }
    };
    if let Err(error) = intersection.start() {
        defmt::error!("intersection failed to start: {}", error);
        panic!();
    }

    intersection.run().await
}
