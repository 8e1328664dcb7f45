pub mod event;
pub mod replay;
pub mod reporter;

pub use event::HostEvent;
pub use replay::replay_events;
pub use reporter::SummaryPrinter;
