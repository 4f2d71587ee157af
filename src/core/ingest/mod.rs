//! Document ingestion around the splitter.
//!
//! Everything that touches the outside world lives here, keeping
//! the splitter itself free of I/O:
//!
//! - [`source`]: the parser seam and a local file reader
//! - [`sink`]: the hand-off seam for an embedding/indexing consumer
//! - [`walker`]: file discovery with glob filtering
//! - [`pipeline`]: concurrent orchestration across files

pub mod pipeline;
pub mod sink;
pub mod source;
pub mod walker;

pub use pipeline::IngestPipeline;
pub use sink::{CollectingSink, DocumentSink, JsonLinesSink};
pub use source::{DocumentParser, FileInputReader, ParsedSource};
pub use walker::InputWalker;
