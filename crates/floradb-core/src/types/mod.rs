mod id;
mod owner;
mod timestamp;

pub use id::Id;
pub use owner::OwnerId;
pub use timestamp::{Timestamp, TimestampError};
