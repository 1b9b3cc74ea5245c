pub mod dispatch_service;
pub mod message_port;
pub mod prefix;

#[cfg(test)]
pub mod test_port;

pub use dispatch_service::{DispatchOutcome, DispatchSettings, Dispatcher};
pub use message_port::{IncomingMessage, MessagePort};
pub use prefix::PrefixMatcher;
