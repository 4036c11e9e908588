//! Output destinations for a converted transcript.
//!
//! Both sinks buffer everything in memory and only touch the filesystem in
//! `save`, so a conversion that stops early leaves no partial files behind.

pub mod pdf;
pub mod xlsx;

use std::path::{Path, PathBuf};

pub use pdf::*;
pub use xlsx::*;

use crate::{
    error::Result,
    palette::Rgb,
    transcript::{DialogEntry, SessionHeader},
};

pub trait TranscriptSink {
    /// Extension of the file written next to the dialog log
    const EXTENSION: &'static str;

    fn append_header(&mut self, header: &SessionHeader);
    fn append_entry(&mut self, entry: &DialogEntry, color: Rgb);
    fn save(self, path: &Path) -> Result<()>;

    fn output_path(input: &Path) -> PathBuf {
        input.with_extension(Self::EXTENSION)
    }
}
