/// Filesystem adapters: graph manifest input, results store, report output
mod file_writer;
mod graph_manifest;
mod results_codec;
mod results_store;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use graph_manifest::{ManifestGraphProvider, GRAPH_MANIFEST_FILE_NAME};
pub use results_codec::{ResultsReader, ResultsWriter, RESULTS_FORMAT_VERSION, RESULTS_HEADER_TAG};
pub use results_store::{FileSystemResultsStore, RESULTS_FILE_NAME, SETTINGS_FILE_NAME};
