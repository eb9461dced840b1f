/// Mock implementations for testing
mod mock_graph_provider;
mod mock_progress_reporter;
mod mock_results_store;

pub use mock_graph_provider::MockGraphProvider;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_results_store::MockResultsStore;
