use std::path::Path;

use rust_xlsxwriter::{Format, FormatAlign, Workbook};

use crate::{
    error::Result,
    palette::Rgb,
    sink::TranscriptSink,
    transcript::{DialogEntry, SessionHeader},
};

pub const SHEET_NAME: &str = "Dialog Data";
pub const COLUMN_HEADERS: [&str; 3] = ["Time", "User", "Text"];

const COLUMN_WIDTHS: [f64; 3] = [20.0, 16.0, 80.0];

/// One worksheet row, in sheet order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetRow<'a> {
    /// Centered text merged over the first two columns
    Title(&'a str),
    Blank,
    ColumnHeaders,
    Entry(&'a [String; 3]),
}

/// Spreadsheet with one row per dialog entry, written with `rust_xlsxwriter`
#[derive(Debug, Default)]
pub struct SpreadsheetSink {
    title_lines: [String; 3],
    rows: Vec<[String; 3]>,
}

impl SpreadsheetSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Data rows as `[time, user, text]`
    pub fn rows(&self) -> &[[String; 3]] {
        &self.rows
    }

    /// Title block, a blank row, the column headers, then one row per entry
    pub fn sheet_rows(&self) -> Vec<SheetRow<'_>> {
        self.title_lines
            .iter()
            .map(|line| SheetRow::Title(line))
            .chain([SheetRow::Blank, SheetRow::ColumnHeaders])
            .chain(self.rows.iter().map(SheetRow::Entry))
            .collect()
    }
}

impl TranscriptSink for SpreadsheetSink {
    const EXTENSION: &'static str = "xlsx";

    fn append_header(&mut self, header: &SessionHeader) {
        self.title_lines = header.title_lines();
    }

    fn append_entry(&mut self, entry: &DialogEntry, _color: Rgb) {
        self.rows.push([
            entry.timestamp.clone(),
            entry.participant.clone(),
            entry.single_line_text(),
        ]);
    }

    fn save(self, path: &Path) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        for (col, width) in COLUMN_WIDTHS.into_iter().enumerate() {
            worksheet.set_column_width(col as u16, width)?;
        }

        let centered = Format::new().set_align(FormatAlign::Center);
        for (row, sheet_row) in self.sheet_rows().into_iter().enumerate() {
            let row = row as u32;
            match sheet_row {
                SheetRow::Title(line) => {
                    worksheet.merge_range(row, 0, row, 1, line, &centered)?;
                }
                SheetRow::Blank => {}
                SheetRow::ColumnHeaders => {
                    for (col, name) in COLUMN_HEADERS.into_iter().enumerate() {
                        worksheet.write_string(row, col as u16, name)?;
                    }
                }
                SheetRow::Entry(cells) => {
                    for (col, value) in cells.iter().enumerate() {
                        worksheet.write_string(row, col as u16, value)?;
                    }
                }
            }
        }

        workbook.save(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    use crate::palette::PALETTE;
    use pretty_assertions::assert_eq;

    fn entry(participant: &str, text: &str) -> DialogEntry {
        DialogEntry {
            timestamp: "2024-01-01T00:00:01".to_string(),
            participant: participant.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn rows_replace_newlines() {
        let mut sink = SpreadsheetSink::new();
        sink.append_entry(&entry("Robot", "Hi\nthere"), PALETTE[0]);
        sink.append_entry(&entry("Alice", "Hello"), PALETTE[1]);

        assert_eq!(
            sink.rows(),
            &[
                [
                    "2024-01-01T00:00:01".to_string(),
                    "Robot".to_string(),
                    "Hi there".to_string(),
                ],
                [
                    "2024-01-01T00:00:01".to_string(),
                    "Alice".to_string(),
                    "Hello".to_string(),
                ],
            ]
        );
    }

    fn demo_header() -> SessionHeader {
        SessionHeader {
            session_name: "Demo".to_string(),
            start_time: "2024-01-01T00:00:00".to_string(),
            end_time: "2024-01-01T00:00:05".to_string(),
        }
    }

    fn read_part(path: &Path, name: &str) -> String {
        let file = std::fs::File::open(path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut part = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut part)
            .unwrap();
        part
    }

    #[test]
    fn rows_follow_title_block_blank_and_headers() {
        let mut sink = SpreadsheetSink::new();
        sink.append_header(&demo_header());
        sink.append_entry(&entry("Robot", "Hi"), PALETTE[0]);

        let data = [
            "2024-01-01T00:00:01".to_string(),
            "Robot".to_string(),
            "Hi".to_string(),
        ];
        assert_eq!(
            sink.sheet_rows(),
            vec![
                SheetRow::Title("Title: Demo"),
                SheetRow::Title("Session Start Time: 2024-01-01T00:00:00"),
                SheetRow::Title("Session End Time: 2024-01-01T00:00:05"),
                SheetRow::Blank,
                SheetRow::ColumnHeaders,
                SheetRow::Entry(&data),
            ]
        );
    }

    #[test]
    fn workbook_has_named_sheet_merged_titles_and_header_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dialog.xlsx");

        let mut sink = SpreadsheetSink::new();
        sink.append_header(&demo_header());
        sink.append_entry(&entry("Robot", "Hi"), PALETTE[0]);
        sink.save(&path).unwrap();

        let workbook = read_part(&path, "xl/workbook.xml");
        assert!(workbook.contains(r#"name="Dialog Data""#));

        let sheet = read_part(&path, "xl/worksheets/sheet1.xml");
        for merged in ["A1:B1", "A2:B2", "A3:B3"] {
            assert!(sheet.contains(&format!(r#"<mergeCell ref="{merged}"/>"#)));
        }
        assert!(!sheet.contains(r#"r="A4""#));
        assert!(sheet.contains(r#"<row r="5""#));
        assert!(sheet.contains(r#"r="C5""#));
        assert!(sheet.contains(r#"<row r="6""#));
        assert!(sheet.contains(r#"r="C6""#));
        assert!(!sheet.contains(r#"<row r="7""#));

        let strings = read_part(&path, "xl/sharedStrings.xml");
        for text in ["Title: Demo", "Time", "User", "Text", "Robot", "Hi"] {
            assert!(strings.contains(&format!("<t>{text}</t>")), "missing {text}");
        }
    }

    #[test]
    fn writes_an_xlsx_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dialog.xlsx");

        let mut sink = SpreadsheetSink::new();
        sink.append_header(&SessionHeader {
            session_name: "Demo".to_string(),
            start_time: "2024-01-01T00:00:00".to_string(),
            end_time: "2024-01-01T00:00:05".to_string(),
        });
        sink.append_entry(&entry("Robot", "Hi"), PALETTE[0]);
        sink.save(&path).unwrap();

        // xlsx files are zip archives
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
