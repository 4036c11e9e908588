use std::{fs::File, io::BufWriter, path::Path};

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Pt,
};

use crate::{
    error::Result,
    font::{FontSet, FontStyle},
    layout::{PAGE_HEIGHT, PAGE_WIDTH, Page, TextRun, TranscriptLayout},
    palette::Rgb,
    sink::TranscriptSink,
    transcript::{DialogEntry, SessionHeader},
};

const LAYER_NAME: &str = "Transcript";

/// Paginated transcript rendered with `printpdf`
pub struct PdfSink<'a> {
    fonts: &'a FontSet,
    layout: TranscriptLayout<'a, FontSet>,
    title: String,
}

impl<'a> PdfSink<'a> {
    pub fn new(fonts: &'a FontSet) -> Self {
        Self {
            fonts,
            layout: TranscriptLayout::new(fonts),
            title: String::new(),
        }
    }

    fn register_fonts(
        &self,
        doc: &PdfDocumentReference,
    ) -> Result<(IndirectFontRef, IndirectFontRef)> {
        let fonts = match self.fonts {
            FontSet::Builtin => (
                doc.add_builtin_font(BuiltinFont::Helvetica)?,
                doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
            ),
            FontSet::TrueType { regular, bold } => (
                doc.add_external_font(regular.data())?,
                doc.add_external_font(bold.data())?,
            ),
        };
        Ok(fonts)
    }
}

impl TranscriptSink for PdfSink<'_> {
    const EXTENSION: &'static str = "pdf";

    fn append_header(&mut self, header: &SessionHeader) {
        self.title = header.session_name.clone();
        self.layout.header(header);
    }

    fn append_entry(&mut self, entry: &DialogEntry, color: Rgb) {
        self.layout.entry(entry, color);
    }

    fn save(self, path: &Path) -> Result<()> {
        let (width, height) = (Mm::from(Pt(PAGE_WIDTH)), Mm::from(Pt(PAGE_HEIGHT)));
        let (doc, first_page, first_layer) =
            PdfDocument::new(&self.title, width, height, LAYER_NAME);
        let (regular, bold) = self.register_fonts(&doc)?;

        let pages = self.layout.finish();
        for (index, page) in pages.iter().enumerate() {
            let layer = if index == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page, layer) = doc.add_page(width, height, LAYER_NAME);
                doc.get_page(page).get_layer(layer)
            };
            draw_page(&layer, page, &regular, &bold);
        }

        let mut writer = BufWriter::new(File::create(path)?);
        doc.save(&mut writer)?;
        Ok(())
    }
}

fn draw_page(
    layer: &PdfLayerReference,
    page: &Page,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    for TextRun {
        x,
        y,
        text,
        style,
        size,
        color,
    } in &page.runs
    {
        let (r, g, b) = color.unit();
        layer.set_fill_color(Color::Rgb(printpdf::Rgb::new(r, g, b, None)));
        let font = match style {
            FontStyle::Regular => regular,
            FontStyle::Bold => bold,
        };
        layer.use_text(text.as_str(), *size, Mm::from(Pt(*x)), Mm::from(Pt(*y)), font);
    }
}
