pub mod layout;

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::document::Document;
use crate::error::Error;
use crate::fonts::{FontEntry, FontStyle, register_font, to_winansi_bytes};
use crate::model::{ClaimForm, PageSetup};

use layout::{PageLayout, TITLE, layout};

const PRODUCER: &str = concat!("claimform-pdf ", env!("CARGO_PKG_VERSION"));

/// Render a claim form on the default A4 page setup.
pub fn render(form: &ClaimForm) -> Result<Document, Error> {
    render_with(form, &PageSetup::default())
}

pub fn render_with(form: &ClaimForm, setup: &PageSetup) -> Result<Document, Error> {
    let t0 = std::time::Instant::now();

    // Phase 1: position lines
    let pages = layout(form, setup);
    let t_layout = t0.elapsed();

    // Phase 2: write objects
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let info_id = alloc();

    let fonts: Vec<FontEntry> = [FontStyle::Regular, FontStyle::Bold]
        .into_iter()
        .map(|style| register_font(&mut pdf, style, &mut alloc))
        .collect();

    let n = pages.len();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    let mut dropped_chars = 0usize;
    for (i, page) in pages.iter().enumerate() {
        let (content, dropped) = page_content(page);
        dropped_chars += dropped;
        let raw = content.finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        pdf.stream(content_ids[i], &compressed).filter(Filter::FlateDecode);
        log::debug!("page {}: {} lines", i + 1, page.lines.len());
    }
    if dropped_chars > 0 {
        log::warn!("{dropped_chars} characters have no WinAnsi mapping and were omitted");
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);
    pdf.document_info(info_id)
        .title(TextStr(TITLE))
        .producer(TextStr(PRODUCER));

    for i in 0..n {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, setup.page_width, setup.page_height))
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = page.resources();
        let mut font_dict = resources.fonts();
        for entry in &fonts {
            font_dict.pair(Name(entry.style.pdf_name().as_bytes()), entry.font_ref);
        }
    }

    let bytes = pdf.finish();
    let t_total = t0.elapsed();

    log::info!(
        "Render phases: layout={:.1}ms, assembly={:.1}ms, total={:.1}ms ({} sections, {} fields, {} pages, {} bytes)",
        t_layout.as_secs_f64() * 1000.0,
        (t_total - t_layout).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        form.sections.len(),
        form.field_count(),
        n,
        bytes.len(),
    );

    Ok(Document::new(bytes, n))
}

/// Build one page's content stream; also returns the count of chars that
/// could not be encoded.
fn page_content(page: &PageLayout) -> (Content, usize) {
    let mut content = Content::new();
    let mut dropped = 0;
    for line in &page.lines {
        let (bytes, lost) = to_winansi_bytes(&line.text);
        dropped += lost;
        content
            .begin_text()
            .set_font(Name(line.font_style().pdf_name().as_bytes()), line.font_size)
            .next_line(line.x, line.baseline_y)
            .show(Str(&bytes))
            .end_text();
    }
    (content, dropped)
}
