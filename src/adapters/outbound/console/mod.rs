/// Console adapters for operator-facing progress output
mod progress_reporter;

pub use progress_reporter::StderrProgressReporter;
