//! Scholardocs
//!
//! Academic record documents (official transcripts, two-sided student ID
//! cards and admission letters) edited as typed records and exported as PNG
//! images.
//!
//! # Features
//!
//! - **Typed records**: one tagged update enum per document, applied through a
//!   data store that notifies subscribers synchronously
//! - **Derived fields**: total credits and credit-weighted GPA
//! - **Sample generator**: consistent random records from constant catalogs
//! - **Export**: supersampled rasterization onto an opaque background, PNG
//!   encoding and delivery to a pluggable download sink
//!
//! # Example
//!
//! ```
//! use scholardocs::export::MemorySink;
//! use scholardocs::model::TranscriptUpdate;
//! use scholardocs::{StudioConfig, TranscriptWorkflow};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> scholardocs::Result<()> {
//! let mut workflow = TranscriptWorkflow::with_sample(&StudioConfig::default())?;
//! workflow.edit(TranscriptUpdate::StudentName("Emily Johnson".into()));
//!
//! let sink = MemorySink::new();
//! let file = workflow.export(&sink).await?;
//! assert_eq!(file.suggested_filename, "Transcript_Emily_Johnson.png");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod gpa;
pub mod model;
pub mod rendering;
pub mod sample;
pub mod store;
pub mod workflow;

pub use config::{ExportOptions, StudioConfig, UploadLimits};
pub use error::{Error, ExportFailure, Result};
pub use export::{DownloadSink, ExportPipeline, ExportState, ExportedImage};
pub use model::{AdmissionLetter, DocumentKind, Record, StudentIdCard, Transcript};
pub use rendering::{CaptureTarget, Render, RenderSurface};
pub use sample::{SampleGenerator, DEFAULT_CATALOGS};
pub use store::DataStore;
pub use workflow::{AdmissionWorkflow, IdCardWorkflow, TranscriptWorkflow, Workflow};
