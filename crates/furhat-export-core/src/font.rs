//! Fonts used for the PDF transcript and their text metrics.
//!
//! DejaVu Sans is embedded when its TrueType files sit in the working
//! directory. Otherwise the standard Helvetica faces are used, which every PDF
//! viewer ships but which only cover Latin-1; other characters are dropped
//! from the page.

use std::{path::Path, sync::Arc};

use crate::error::{ExportError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
}

/// Width of rendered text in PDF points
pub trait TextMeasure {
    fn text_width(&self, text: &str, style: FontStyle, size: f32) -> f32;
}

/// A TrueType font kept in memory for measuring and embedding
#[derive(Debug, Clone)]
pub struct TrueTypeFont {
    data: Arc<[u8]>,
    units_per_em: f32,
}

impl TrueTypeFont {
    pub fn load(path: &Path) -> Result<Self> {
        let data: Arc<[u8]> = std::fs::read(path)
            .map_err(|e| ExportError::Font {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
            .into();
        let face = ttf_parser::Face::parse(&data, 0).map_err(|e| ExportError::Font {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let units_per_em = f32::from(face.units_per_em());

        Ok(Self {
            data,
            units_per_em,
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn has_glyphs(&self, text: &str) -> bool {
        let Ok(face) = ttf_parser::Face::parse(&self.data, 0) else {
            return false;
        };
        text.chars()
            .filter(|c| !c.is_whitespace())
            .all(|c| face.glyph_index(c).is_some())
    }

    fn width(&self, text: &str, size: f32) -> f32 {
        // Validated in `load`
        let Ok(face) = ttf_parser::Face::parse(&self.data, 0) else {
            return 0.0;
        };
        let units: u32 = text
            .chars()
            .map(|c| {
                face.glyph_index(c)
                    .and_then(|glyph| face.glyph_hor_advance(glyph))
                    .map_or(0, u32::from)
            })
            .sum();
        units as f32 * size / self.units_per_em
    }
}

#[derive(Debug, Clone, Default)]
pub enum FontSet {
    /// Helvetica and Helvetica-Bold
    #[default]
    Builtin,
    TrueType {
        regular: TrueTypeFont,
        bold: TrueTypeFont,
    },
}

impl FontSet {
    /// Load TrueType fonts from disk; the bold face falls back to the regular one
    pub fn load(regular: &Path, bold: Option<&Path>) -> Result<Self> {
        let regular = TrueTypeFont::load(regular)?;
        let bold = match bold {
            Some(path) => TrueTypeFont::load(path)?,
            None => regular.clone(),
        };
        Ok(FontSet::TrueType { regular, bold })
    }

    /// Use `DejaVuSans.ttf` (and `DejaVuSans-Bold.ttf` if present) from `dir`,
    /// or the built-in Helvetica faces when the regular file is absent
    pub fn discover(dir: &Path) -> Result<Self> {
        let regular = dir.join(DEJAVU_SANS);
        if !regular.is_file() {
            return Ok(FontSet::Builtin);
        }
        let bold = dir.join(DEJAVU_SANS_BOLD);
        FontSet::load(&regular, bold.is_file().then_some(bold.as_path()))
    }

    /// Whether every visible character of `text` can be drawn with these fonts
    pub fn can_encode(&self, text: &str) -> bool {
        match self {
            FontSet::Builtin => text.chars().all(is_latin1),
            FontSet::TrueType { regular, bold } => {
                regular.has_glyphs(text) && bold.has_glyphs(text)
            }
        }
    }
}

pub const DEJAVU_SANS: &str = "DejaVuSans.ttf";
pub const DEJAVU_SANS_BOLD: &str = "DejaVuSans-Bold.ttf";

fn is_latin1(c: char) -> bool {
    (c as u32) <= 0xff
}

impl TextMeasure for FontSet {
    fn text_width(&self, text: &str, style: FontStyle, size: f32) -> f32 {
        match (self, style) {
            (FontSet::Builtin, style) => helvetica_width(text, style, size),
            (FontSet::TrueType { regular, .. }, FontStyle::Regular) => regular.width(text, size),
            (FontSet::TrueType { bold, .. }, FontStyle::Bold) => bold.width(text, size),
        }
    }
}

// Advance widths for ' ' through '~' in 1/1000 em (Adobe core font metrics)
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0'..'?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P'..'_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`'..'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 'p'..'~'
];

const FALLBACK_WIDTH: u16 = 556;

fn helvetica_width(text: &str, style: FontStyle, size: f32) -> f32 {
    let table = match style {
        FontStyle::Regular => &HELVETICA_WIDTHS,
        FontStyle::Bold => &HELVETICA_BOLD_WIDTHS,
    };
    let units: u32 = text
        .chars()
        .map(|c| {
            let code = c as u32;
            if (0x20..0x7f).contains(&code) {
                u32::from(table[(code - 0x20) as usize])
            } else if is_latin1(c) {
                u32::from(FALLBACK_WIDTH)
            } else {
                // Not drawn by the PDF writer
                0
            }
        })
        .sum();
    units as f32 * size / 1000.0
}
