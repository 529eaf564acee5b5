//! Request extraction, response envelope and error mapping shared by
//! every HTTP module.

pub mod error;
pub mod extract;
pub mod response;

pub use error::{ApiError, ApiResult};
pub use extract::{JsonBody, QueryParams, RequestRejection};
pub use response::{ApiEnvelope, ErrorDetail};
