pub mod test_app;

pub use test_app::{MockApi, RecordedRequest, unreachable_transport};
