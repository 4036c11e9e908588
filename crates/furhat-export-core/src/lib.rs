//! Furhat Export Core Library
//!
//! Converts Furhat robot dialog logs into PDF transcripts and Excel
//! spreadsheets written next to each log.

pub mod convert;
pub mod error;
pub mod font;
pub mod layout;
pub mod log;
pub mod palette;
pub mod sink;
pub mod transcript;
pub mod walk;

// Re-export commonly used items at crate root
pub use convert::{ConversionReport, ExportOptions, convert_file};
pub use error::{ExportError, Result};
pub use font::{FontSet, FontStyle, TextMeasure};
pub use log::{DIALOG_LOG_FILE, parse_log, repair_log_text};
pub use palette::{PALETTE, ParticipantColors, Rgb};
pub use sink::{PdfSink, SpreadsheetSink, TranscriptSink};
pub use transcript::{DialogEntry, SessionHeader, SkippedEvents, Transcript};
pub use walk::{WalkSummary, export_all, export_tree, find_dialog_logs};
