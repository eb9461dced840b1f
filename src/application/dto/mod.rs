/// Data Transfer Objects for application layer
///
/// Explicit configuration values built once by the caller and passed by
/// value into each use case.
mod output_format;
mod report_request;
mod report_response;
mod validate_request;
mod validate_response;

pub use output_format::OutputFormat;
pub use report_request::ReportRequest;
pub use report_response::ReportResponse;
pub use validate_request::ValidateRequest;
pub use validate_response::ValidateResponse;
