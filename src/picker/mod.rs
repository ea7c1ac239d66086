pub mod session;

pub use session::{CommittedDateTime, PickerSession};
