pub mod gate;
pub mod response;

pub use gate::{access_gate, authenticate, AuthFailure, GateDecision, GatePaths, PathClass};
pub use response::{ApiResponse, ApiResult};
