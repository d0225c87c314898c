//! Broadcast job: formatting and the sequential delivery loop.

mod dispatcher;
mod format;
mod transport;

pub use dispatcher::{BroadcastSettings, Broadcaster};
pub use transport::{
    DeliveryError, DeliveryFailureKind, RenderMode, Sleeper, TokioSleeper, Transport,
};
