//! Page layout for the PDF transcript.
//!
//! Coordinates are PDF points with the origin in the bottom-left corner of an
//! A4 page. The layout only positions text; drawing happens in the PDF sink.

use crate::{
    font::{FontStyle, TextMeasure},
    palette::Rgb,
    transcript::{DialogEntry, SessionHeader},
};

pub const PAGE_WIDTH: f32 = 595.2756;
pub const PAGE_HEIGHT: f32 = 841.8898;

pub const LEFT_MARGIN: f32 = 50.0;
pub const RIGHT_MARGIN: f32 = 25.0;
pub const BOTTOM_MARGIN: f32 = 50.0;
/// Baseline of the first line on continuation pages
pub const PAGE_TOP: f32 = 800.0;
pub const LINE_HEIGHT: f32 = 20.0;

pub const TITLE_SIZE: f32 = 16.0;
pub const BODY_SIZE: f32 = 12.0;

const TITLE_Y: f32 = 800.0;
const START_TIME_Y: f32 = 780.0;
const END_TIME_Y: f32 = 765.0;
/// Baseline of the first entry, one blank line below the header block
const FIRST_ENTRY_Y: f32 = 745.0 - LINE_HEIGHT;

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub style: FontStyle,
    pub size: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub runs: Vec<TextRun>,
}

/// Greedy word-wrapping layout with automatic page breaks
pub struct TranscriptLayout<'a, M: TextMeasure> {
    measure: &'a M,
    pages: Vec<Page>,
    x: f32,
    y: f32,
}

impl<'a, M: TextMeasure> TranscriptLayout<'a, M> {
    pub fn new(measure: &'a M) -> Self {
        Self {
            measure,
            pages: vec![Page::default()],
            x: LEFT_MARGIN,
            y: FIRST_ENTRY_Y,
        }
    }

    fn max_width() -> f32 {
        PAGE_WIDTH - RIGHT_MARGIN
    }

    /// Title centered at the top of the first page, then start and end times
    pub fn header(&mut self, header: &SessionHeader) {
        let [title, start, end] = header.title_lines();
        let title_width = self
            .measure
            .text_width(&title, FontStyle::Bold, TITLE_SIZE);

        self.push(TextRun {
            x: PAGE_WIDTH / 2.0 - title_width / 2.0,
            y: TITLE_Y,
            text: title,
            style: FontStyle::Bold,
            size: TITLE_SIZE,
            color: Rgb::BLACK,
        });
        self.push(body_run(LEFT_MARGIN, START_TIME_Y, start, Rgb::BLACK));
        self.push(body_run(LEFT_MARGIN, END_TIME_Y, end, Rgb::BLACK));
    }

    /// Speaker label in the participant color followed by the wrapped message
    pub fn entry(&mut self, entry: &DialogEntry, color: Rgb) {
        self.break_page_if_full();

        let label = entry.speaker_label();
        let label_width = self
            .measure
            .text_width(&label, FontStyle::Regular, BODY_SIZE);
        self.push(body_run(self.x, self.y, label, color));
        self.x += label_width;

        for word in entry.text.split_whitespace() {
            let token = format!("{word} ");
            let width = self
                .measure
                .text_width(&token, FontStyle::Regular, BODY_SIZE);
            if self.x + width > Self::max_width() {
                self.new_line();
                self.break_page_if_full();
            }
            self.push(body_run(self.x, self.y, token, Rgb::BLACK));
            self.x += width;
        }

        self.new_line();
    }

    pub fn finish(self) -> Vec<Page> {
        self.pages
    }

    fn new_line(&mut self) {
        self.x = LEFT_MARGIN;
        self.y -= LINE_HEIGHT;
    }

    fn break_page_if_full(&mut self) {
        if self.y < BOTTOM_MARGIN {
            self.pages.push(Page::default());
            self.x = LEFT_MARGIN;
            self.y = PAGE_TOP;
        }
    }

    fn push(&mut self, run: TextRun) {
        if let Some(page) = self.pages.last_mut() {
            page.runs.push(run);
        }
    }
}

fn body_run(x: f32, y: f32, text: String, color: Rgb) -> TextRun {
    TextRun {
        x,
        y,
        text,
        style: FontStyle::Regular,
        size: BODY_SIZE,
        color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PALETTE;
    use pretty_assertions::assert_eq;

    /// Every character is `size / 2` points wide
    struct HalfEm;

    impl TextMeasure for HalfEm {
        fn text_width(&self, text: &str, _style: FontStyle, size: f32) -> f32 {
            text.chars().count() as f32 * size / 2.0
        }
    }

    fn header() -> SessionHeader {
        SessionHeader {
            session_name: "S".to_string(),
            start_time: "2024-01-01T00:00:00".to_string(),
            end_time: "2024-01-01T00:00:05".to_string(),
        }
    }

    fn entry(participant: &str, text: &str) -> DialogEntry {
        DialogEntry {
            timestamp: "t".to_string(),
            participant: participant.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn header_block_positions() {
        let mut layout = TranscriptLayout::new(&HalfEm);
        layout.header(&header());
        let pages = layout.finish();

        assert_eq!(pages.len(), 1);
        let runs = &pages[0].runs;
        assert_eq!(runs.len(), 3);
        // "Title: S" is 8 chars of 8pt each
        assert_eq!(runs[0].x, PAGE_WIDTH / 2.0 - 32.0);
        assert_eq!(runs[0].y, 800.0);
        assert_eq!(runs[0].style, FontStyle::Bold);
        assert_eq!(runs[1].text, "Session Start Time: 2024-01-01T00:00:00");
        assert_eq!((runs[1].x, runs[1].y), (50.0, 780.0));
        assert_eq!((runs[2].x, runs[2].y), (50.0, 765.0));
    }

    #[test]
    fn entry_draws_colored_label_then_black_words() {
        let mut layout = TranscriptLayout::new(&HalfEm);
        layout.entry(&entry("Robot", "Hi there"), PALETTE[0]);
        let runs = layout.finish().remove(0).runs;

        let placed: Vec<_> = runs
            .iter()
            .map(|r| (r.text.as_str(), r.x, r.y, r.color))
            .collect();
        // "t Robot: " is 9 chars of 6pt
        assert_eq!(
            placed,
            vec![
                ("t Robot: ", 50.0, 725.0, PALETTE[0]),
                ("Hi ", 104.0, 725.0, Rgb::BLACK),
                ("there ", 122.0, 725.0, Rgb::BLACK),
            ]
        );
    }

    #[test]
    fn every_entry_ends_with_a_line_break() {
        let mut layout = TranscriptLayout::new(&HalfEm);
        layout.entry(&entry("Robot", ""), PALETTE[0]);
        layout.entry(&entry("Alice", "Hello"), PALETTE[1]);
        let runs = layout.finish().remove(0).runs;

        assert_eq!(runs[0].y, 725.0);
        assert_eq!(runs[1].y, 705.0);
        assert_eq!(runs[1].x, 50.0);
    }

    #[test]
    fn long_messages_wrap_at_right_margin() {
        // 100 words of 6pt each ("ab " = 18pt) overflow a 520pt line
        let text = vec!["ab"; 100].join(" ");
        let mut layout = TranscriptLayout::new(&HalfEm);
        layout.entry(&entry("Robot", &text), PALETTE[0]);
        let runs = layout.finish().remove(0).runs;

        for run in &runs {
            let width = HalfEm.text_width(&run.text, run.style, run.size);
            assert!(run.x + width <= PAGE_WIDTH - RIGHT_MARGIN);
        }
        let wrapped: Vec<_> = runs.iter().filter(|r| r.y < 725.0).collect();
        assert!(!wrapped.is_empty());
        assert_eq!(wrapped[0].x, LEFT_MARGIN);
        assert_eq!(wrapped[0].y, 705.0);
    }

    #[test]
    fn breaks_page_before_drawing_below_bottom_margin() {
        let mut layout = TranscriptLayout::new(&HalfEm);
        // Lines at 725, 705, ..., 65 fit; the 35th entry starts a new page
        for _ in 0..35 {
            layout.entry(&entry("Robot", "Hi"), PALETTE[0]);
        }
        let pages = layout.finish();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].runs.len(), 34 * 2);
        assert!(pages[0].runs.iter().all(|r| r.y >= BOTTOM_MARGIN));
        assert_eq!(pages[1].runs[0].y, PAGE_TOP);
        assert_eq!(pages[1].runs[0].x, LEFT_MARGIN);
    }

    #[test]
    fn wraps_onto_new_page_mid_message() {
        let mut layout = TranscriptLayout::new(&HalfEm);
        for _ in 0..33 {
            layout.entry(&entry("Robot", "Hi"), PALETTE[0]);
        }
        // Cursor is now at y = 65; the wrap drops it to 45
        let text = vec!["ab"; 40].join(" ");
        layout.entry(&entry("Robot", &text), PALETTE[0]);
        let pages = layout.finish();

        assert_eq!(pages.len(), 2);
        assert!(pages[0].runs.iter().all(|r| r.y >= BOTTOM_MARGIN));
        assert_eq!(pages[1].runs[0].y, PAGE_TOP);
        assert_eq!(pages[1].runs[0].text, "ab ");
    }
}
