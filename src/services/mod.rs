pub mod pipeline;
pub mod sample_source;

pub use pipeline::{
    ChecksumStatus, CompressSummary, CompressionPipeline, DecompressSummary, InspectReport,
};
pub use sample_source::{PngSampleSource, SampleSource};
