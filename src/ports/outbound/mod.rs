/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (resolver, file system, console).
pub mod artifact_graph_provider;
pub mod formatter;
pub mod output_presenter;
pub mod progress_reporter;
pub mod results_store;

pub use artifact_graph_provider::{ArtifactGraphProvider, DependencyDeclaration, ResolvedArtifact};
pub use formatter::ReportFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use results_store::ResultsStore;
