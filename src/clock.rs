/*
 * The time source of the controller.
 *
 * The controller sleeps between ticks and needs one value to seed its random
 * generator, nothing more. Keeping the timer behind a trait lets the tests run
 * a full cycle in simulated time.
 */

#[allow(async_fn_in_trait)]
pub trait Clock {
    /// Sleep for `ms` milliseconds. Not cancellable.
    async fn delay_ms(&mut self, ms: u32);

    fn now_ms(&self) -> u64;
}

#[cfg(feature = "firmware")]
pub use embassy::EmbassyClock;

#[cfg(feature = "firmware")]
mod embassy {
    use embassy_time::{Instant, Timer};

    use super::Clock;

    /// The Embassy time driver. The controller is the only task, so waiting
    /// on the timer is the same as blocking the thread.
    pub struct EmbassyClock;

    impl Clock for EmbassyClock {
        async fn delay_ms(&mut self, ms: u32) {
            Timer::after_millis(u64::from(ms)).await;
        }

        fn now_ms(&self) -> u64 {
            Instant::now().as_millis()
        }
    }
}
