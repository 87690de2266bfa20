mod lighthouse_error;
pub use lighthouse_error::{
    DispatchError, DispatchResult, LighthouseResult, LighthouseServerError, McpResult,
    StartupError, StartupResult,
};
