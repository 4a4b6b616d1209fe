mod document;
mod error;
mod fonts;
mod model;
pub mod pdf;
pub mod session;
pub mod validate;

pub use document::Document;
pub use error::Error;
pub use model::{ClaimForm, Field, MM, PageSetup, PageSize, Section};
pub use pdf::{render, render_with};
pub use session::ClaimSession;

use std::path::Path;
use std::time::Instant;

/// Parse a JSON object of `{section: {label: value}}` into a form, keeping
/// the source order of sections and fields.
pub fn parse_claim_form(json: &str) -> Result<ClaimForm, Error> {
    Ok(serde_json::from_str(json)?)
}

pub fn parse_claim_session(json: &str) -> Result<ClaimSession, Error> {
    Ok(serde_json::from_str(json)?)
}

pub fn write_claim_form_pdf(
    form: &ClaimForm,
    setup: &PageSetup,
    output: &Path,
) -> Result<Document, Error> {
    let t0 = Instant::now();

    let doc = pdf::render_with(form, setup)?;
    let t_render = t0.elapsed();

    doc.write_to(output)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes, {} pages)",
        t_render.as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        doc.as_bytes().len(),
        doc.page_count(),
    );

    Ok(doc)
}
