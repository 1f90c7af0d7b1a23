//! Analysis view-model derivation.
//!
//! # Architecture
//!
//! This module keeps a clean separation between:
//! - **DTO** (`dto.rs`) - the response shape the analysis service returns
//! - **Domain** (`domain.rs`) - the normalized view model the host renders
//! - **Builder** (`builder.rs`) - the only conversion from DTO to domain
//! - **Timeline** (`timeline.rs`) - section layout from structure labels
//! - **Insight** (`insight.rs`) - prose summary composition
//!
//! # Usage
//!
//! ```ignore
//! use audio_insight::analysis::{build, AnalysisType, RawAnalysisResult};
//!
//! let raw = RawAnalysisResult::from_json(&body)?;
//! let view = build(&raw, AnalysisType::MusicTheory)?;
//! for section in &view.sections {
//!     println!("{} {:.1}s - {:.1}s", section.name, section.start, section.end);
//! }
//! ```

pub mod builder;
pub mod domain;
pub mod dto;
pub mod insight;
pub mod timeline;

pub use builder::{AnalysisViewModelBuilder, UNKNOWN_INSTRUMENT, build};
pub use domain::{
    AnalysisError, AnalysisType, AnalysisViewModel, ArrangementReport, GeneralReport,
    ProductionReport, Section, TheoryReport, ThematicReport,
};
pub use dto::RawAnalysisResult;
pub use timeline::{DEFAULT_TRACK_DURATION_SECS, DurationSource, TimelineOptions};
