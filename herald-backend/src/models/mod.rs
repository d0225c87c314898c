pub mod subscriber;

pub use subscriber::Subscriber;
