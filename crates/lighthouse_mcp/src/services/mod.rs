mod dispatcher;
pub use dispatcher::{PAGESPEED_ENDPOINT, PageSpeedClient};

pub mod report;

mod validation;
pub use validation::Validate;
