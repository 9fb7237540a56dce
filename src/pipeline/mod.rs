pub mod classifier;
pub mod polling;
pub mod processor;

pub use classifier::{classify, AlertPolicy};
pub use polling::{start_polling, IterationStats, Poller};
pub use processor::AlertProcessor;
