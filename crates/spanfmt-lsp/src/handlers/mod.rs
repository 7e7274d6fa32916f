mod configuration;
mod formatting;
mod lifecycle;
mod notifications;

pub use configuration::*;
pub use formatting::*;
pub use lifecycle::*;
pub use notifications::*;
