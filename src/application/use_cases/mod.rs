/// Use cases module containing application business logic orchestration
mod generate_report;
mod validate_licenses;

#[cfg(test)]
mod test_support;

pub use generate_report::GenerateReportUseCase;
pub use validate_licenses::ValidateLicensesUseCase;
