//! Rule evaluation & delivery engine.
//!
//! Pure evaluators (mode, countdown, weather) feed the composer; the
//! drainer and dispatch loop tie them to the stores and the transport.

pub mod cache;
pub mod compose;
pub mod countdown;
pub mod dispatch;
pub mod drain;
pub mod mode;
pub mod weather;

#[cfg(test)]
mod testutil;

pub use cache::{new_forecast_cache, ForecastCache};
pub use compose::ComposedDigest;
pub use dispatch::{run_dispatch, DispatchReport};
pub use drain::{drain_queue, DrainReport};
pub use mode::Mode;
