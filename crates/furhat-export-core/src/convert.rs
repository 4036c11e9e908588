use std::path::{Path, PathBuf};

use crate::{
    error::{ExportError, Result},
    font::FontSet,
    log::parse_log,
    palette::ParticipantColors,
    sink::{PdfSink, SpreadsheetSink, TranscriptSink},
    transcript::{SkippedEvents, Transcript},
};

#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub fonts: FontSet,
}

/// Outcome of converting one dialog log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub pdf_path: PathBuf,
    pub xlsx_path: PathBuf,
    pub rows: usize,
    pub skipped: SkippedEvents,
    /// Speakers with their palette index in order of first appearance,
    /// always starting with the robot
    pub speakers: Vec<(String, usize)>,
    /// Some text could not be drawn with the PDF fonts
    pub unencodable_text: bool,
}

/// Convert a dialog log into a PDF transcript and a spreadsheet beside it.
///
/// Nothing is written when the log cannot be parsed or holds no events.
pub fn convert_file(input: &Path, options: &ExportOptions) -> Result<ConversionReport> {
    let text = std::fs::read_to_string(input)?;
    let records = parse_log(&text).map_err(|source| ExportError::Parse {
        path: input.to_path_buf(),
        source,
    })?;
    let transcript =
        Transcript::from_records(&records).map_err(|e| ExportError::InsufficientData {
            path: input.to_path_buf(),
            records: e.records,
        })?;

    let mut colors = ParticipantColors::new();
    let mut pdf = PdfSink::new(&options.fonts);
    let mut sheet = SpreadsheetSink::new();

    pdf.append_header(&transcript.header);
    sheet.append_header(&transcript.header);

    let fonts = &options.fonts;
    let unencodable_text = transcript
        .header
        .title_lines()
        .iter()
        .any(|line| !fonts.can_encode(line))
        || transcript.entries.iter().any(|entry| {
            !fonts.can_encode(&entry.speaker_label()) || !fonts.can_encode(&entry.text)
        });
    if unencodable_text {
        tracing::warn!(
            path = %input.display(),
            "Some characters cannot be drawn with the PDF font and are left out; provide DejaVuSans.ttf or --font"
        );
    }

    for entry in &transcript.entries {
        let color = colors.color_for(&entry.participant);
        pdf.append_entry(entry, color);
        sheet.append_entry(entry, color);
    }

    let rows = sheet.rows().len();
    let pdf_path = PdfSink::output_path(input);
    let xlsx_path = SpreadsheetSink::output_path(input);

    pdf.save(&pdf_path)?;
    tracing::info!(path = %pdf_path.display(), "Saved PDF transcript");
    sheet.save(&xlsx_path)?;
    tracing::info!(path = %xlsx_path.display(), "Saved spreadsheet");

    let speakers: Vec<(String, usize)> = colors
        .iter()
        .map(|(participant, index)| (participant.to_string(), index))
        .collect();
    for (participant, index) in &speakers {
        tracing::debug!(participant = %participant, color = index, "Speaker color");
    }

    Ok(ConversionReport {
        input: input.to_path_buf(),
        pdf_path,
        xlsx_path,
        rows,
        skipped: transcript.skipped,
        speakers,
        unencodable_text,
    })
}
