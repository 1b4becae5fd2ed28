//! Asynchronous timer abstraction providing the timing primitives required by
//! the acquisition and display loops, and the timeout race built on it.
use crate::error::TimedOut;
use futures_util::future::{select, Either};
use futures_util::{pin_mut, Future};

/// Timer trait abstraction; must remain thread-safe when applicable.
pub trait DashTimer {
    /// Asynchronously wait for `millis` milliseconds.
    fn delay_ms<'a>(&'a mut self, millis: u32) -> impl Future<Output = ()> + 'a;
}

/// Run `future` until it completes or `millis` elapse, whichever comes first.
///
/// The future is polled before the timer, so an already-ready future wins
/// even with a zero timeout.
pub async fn with_timeout<T: DashTimer, F: Future>(
    timer: &mut T,
    millis: u32,
    future: F,
) -> Result<F::Output, TimedOut> {
    let delay = timer.delay_ms(millis);
    pin_mut!(future);
    pin_mut!(delay);

    match select(future, delay).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(((), _)) => Err(TimedOut),
    }
}

//==================================================================================EMBASSY
/// [`DashTimer`] backed by the `embassy-time` driver of the target.
#[cfg(feature = "embassy")]
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbassyTimer;

#[cfg(feature = "embassy")]
impl DashTimer for EmbassyTimer {
    async fn delay_ms(&mut self, millis: u32) {
        embassy_time::Timer::after(embassy_time::Duration::from_millis(millis as u64)).await;
    }
}
