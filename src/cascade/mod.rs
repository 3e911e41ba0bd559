//! Cascades of retweet events

mod model;
mod prefix;

pub use model::{Cascade, CascadeId, Event, UserId, earliest_event_by_user};
pub use prefix::generate_prefix_cascades;
