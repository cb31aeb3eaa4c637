// Library exports for courtchart

pub mod auth;
pub mod benchmark;
pub mod config;
pub mod data;
pub mod envelope;
pub mod error;
pub mod resolve;
pub mod select;
pub mod tracker;
pub mod transport;

// Normalization pipeline
pub mod ir;
pub mod runtime;
pub mod transform;

// Rendering
pub mod dispatch;
pub mod graph;
pub mod palette;
pub mod scale;
pub mod table;
pub mod ticks;

pub use envelope::{AnalysisResult, Archetype};
pub use error::{EngineError, ErrorKind};
pub use ir::{CanonicalChartSpec, EmptyState, Outcome, Variant};
pub use runtime::{normalize, normalize_str};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
    Csv,
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            format: OutputFormat::Png,
        }
    }
}
