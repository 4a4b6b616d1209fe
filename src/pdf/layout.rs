use crate::fonts::{FontStyle, text_width};
use crate::model::{ClaimForm, PageSetup};

pub const TITLE: &str = "Insurance Claim Form";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Title,
    SectionHeader,
    Field,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLine {
    pub kind: LineKind,
    pub text: String,
    pub x: f32,
    /// Baseline in PDF user space (origin bottom-left).
    pub baseline_y: f32,
    pub font_size: f32,
    pub bold: bool,
}

impl PlacedLine {
    pub(crate) fn font_style(&self) -> FontStyle {
        if self.bold { FontStyle::Bold } else { FontStyle::Regular }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageLayout {
    pub lines: Vec<PlacedLine>,
}

#[derive(Clone, Copy)]
enum Align {
    Left,
    Center(f32), // cell width
}

/// Vertical cursor over the page sequence. `y` is measured down from the
/// page top; a new page is started only when a line is about to be placed.
struct Cursor<'a> {
    setup: &'a PageSetup,
    done: Vec<PageLayout>,
    current: PageLayout,
    y: f32,
}

impl<'a> Cursor<'a> {
    fn new(setup: &'a PageSetup) -> Self {
        Self {
            setup,
            done: Vec::new(),
            current: PageLayout::default(),
            y: setup.margin_top,
        }
    }

    fn gap(&mut self, h: f32) {
        self.y += h;
    }

    fn place(&mut self, kind: LineKind, text: String, style: FontStyle, font_size: f32, align: Align) {
        let sp = self.setup;
        let h = sp.line_height;
        let at_top = (self.y - sp.margin_top).abs() < 0.01;
        if self.y + h > sp.break_trigger() && !at_top {
            log::debug!(
                "page {} full at y={:.1}pt, breaking before {:?}",
                self.done.len() + 1,
                self.y,
                kind
            );
            self.done.push(std::mem::take(&mut self.current));
            self.y = sp.margin_top;
        }

        let x = match align {
            Align::Left => sp.margin_left + sp.cell_padding,
            Align::Center(cell_w) => {
                sp.margin_left + (cell_w - text_width(style, &text, font_size)) / 2.0
            }
        };
        let baseline_from_top = self.y + 0.5 * h + 0.3 * font_size;

        self.current.lines.push(PlacedLine {
            kind,
            text,
            x,
            baseline_y: sp.page_height - baseline_from_top,
            font_size,
            bold: style == FontStyle::Bold,
        });
        self.y += h;
    }

    fn finish(mut self) -> Vec<PageLayout> {
        self.done.push(self.current);
        self.done
    }
}

/// Position every line of the form onto pages.
pub fn layout(form: &ClaimForm, setup: &PageSetup) -> Vec<PageLayout> {
    let mut cursor = Cursor::new(setup);

    cursor.place(
        LineKind::Title,
        TITLE.to_string(),
        FontStyle::Bold,
        setup.title_font_size,
        Align::Center(setup.title_width),
    );
    cursor.gap(setup.title_gap);

    for section in &form.sections {
        cursor.place(
            LineKind::SectionHeader,
            section.name.clone(),
            FontStyle::Regular,
            setup.body_font_size,
            Align::Left,
        );
        for field in &section.fields {
            cursor.place(
                LineKind::Field,
                field.line_text(),
                FontStyle::Regular,
                setup.body_font_size,
                Align::Left,
            );
        }
        cursor.gap(setup.section_gap);
    }

    cursor.finish()
}
