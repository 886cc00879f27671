mod builder;
mod naming;
mod timefmt;
mod variables;

pub use builder::{BuildRecordBuilder, RecordConfig};
pub use naming::NamingConvention;
