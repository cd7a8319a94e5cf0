//! Engine services: detection adapters, the cross-modal combiner, and the
//! synthetic feed

pub mod cross_modal;
pub mod feed;
pub mod keyword_heuristic;
pub mod text_detector;

pub use cross_modal::CrossModalCombiner;
pub use feed::SampleFeed;
pub use text_detector::TextDetector;
