#![allow(dead_code)]

use claimform_pdf::{ClaimForm, Section};

/// Inflate every FlateDecode stream in the file, in file order. Page content
/// streams are the only compressed streams, written in page order.
pub fn content_streams(pdf: &[u8]) -> Vec<Vec<u8>> {
    let mut out = Vec::new();
    let mut pos = 0;
    while let Some(start) = find(pdf, b"stream\n", pos) {
        let body_start = start + b"stream\n".len();
        let Some(end) = find(pdf, b"\nendstream", body_start) else {
            break;
        };
        if let Ok(raw) = miniz_oxide::inflate::decompress_to_vec_zlib(&pdf[body_start..end]) {
            out.push(raw);
        }
        pos = end + b"\nendstream".len();
    }
    out
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|i| i + from)
}

/// Text shown on each page, one entry per `Tj`.
pub fn page_texts(pdf: &[u8]) -> Vec<Vec<String>> {
    content_streams(pdf)
        .iter()
        .map(|stream| shown_strings(stream))
        .collect()
}

pub fn all_lines(pdf: &[u8]) -> Vec<String> {
    page_texts(pdf).into_iter().flatten().collect()
}

/// Number of page objects (`/Type /Page`, not `/Type /Pages`).
pub fn page_object_count(pdf: &[u8]) -> usize {
    let needle = b"/Type /Page";
    let mut count = 0;
    let mut pos = 0;
    while let Some(i) = find(pdf, needle, pos) {
        if pdf.get(i + needle.len()) != Some(&b's') {
            count += 1;
        }
        pos = i + needle.len();
    }
    count
}

pub fn looks_like_pdf(pdf: &[u8]) -> bool {
    let text = String::from_utf8_lossy(pdf);
    pdf.starts_with(b"%PDF-") && text.trim_end().ends_with("%%EOF")
}

fn shown_strings(stream: &[u8]) -> Vec<String> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < stream.len() {
        match stream[i] {
            b'(' => {
                let (bytes, next) = literal_string(stream, i + 1);
                out.push(winansi_to_string(&bytes));
                i = next;
            }
            b'<' if stream.get(i + 1) != Some(&b'<') => {
                let end = stream[i..]
                    .iter()
                    .position(|&b| b == b'>')
                    .map(|p| p + i)
                    .unwrap_or(stream.len());
                let hex: Vec<u8> = stream[i + 1..end]
                    .iter()
                    .copied()
                    .filter(|b| b.is_ascii_hexdigit())
                    .collect();
                let bytes = hex
                    .chunks(2)
                    .map(|pair| {
                        let s = std::str::from_utf8(pair).unwrap();
                        let s = if s.len() == 1 { format!("{s}0") } else { s.to_string() };
                        u8::from_str_radix(&s, 16).unwrap()
                    })
                    .collect::<Vec<u8>>();
                out.push(winansi_to_string(&bytes));
                i = end + 1;
            }
            _ => i += 1,
        }
    }
    out
}

fn literal_string(s: &[u8], mut i: usize) -> (Vec<u8>, usize) {
    let mut out = Vec::new();
    let mut depth = 0;
    while i < s.len() {
        let b = s[i];
        match b {
            b'\\' => {
                i += 1;
                match s.get(i) {
                    Some(b'n') => out.push(b'\n'),
                    Some(b'r') => out.push(b'\r'),
                    Some(b't') => out.push(b'\t'),
                    Some(b'b') => out.push(0x08),
                    Some(b'f') => out.push(0x0C),
                    Some(d @ b'0'..=b'7') => {
                        let mut val = (d - b'0') as u32;
                        let mut digits = 1;
                        while digits < 3 {
                            match s.get(i + 1) {
                                Some(d2 @ b'0'..=b'7') => {
                                    val = val * 8 + (d2 - b'0') as u32;
                                    i += 1;
                                    digits += 1;
                                }
                                _ => break,
                            }
                        }
                        out.push(val as u8);
                    }
                    Some(&other) => out.push(other),
                    None => break,
                }
            }
            b'(' => {
                depth += 1;
                out.push(b);
            }
            b')' if depth == 0 => return (out, i + 1),
            b')' => {
                depth -= 1;
                out.push(b);
            }
            _ => out.push(b),
        }
        i += 1;
    }
    (out, i)
}

fn winansi_to_string(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x80 => '\u{20AC}',
            0x91 => '\u{2018}',
            0x92 => '\u{2019}',
            0x93 => '\u{201C}',
            0x94 => '\u{201D}',
            0x96 => '\u{2013}',
            0x97 => '\u{2014}',
            _ => b as char,
        })
        .collect()
}

/// A form with `sections` sections of `fields` fields each.
pub fn generated_form(sections: usize, fields: usize) -> ClaimForm {
    let mut form = ClaimForm::new();
    for s in 0..sections {
        let mut section = Section::new(format!("Section {s}"));
        for f in 0..fields {
            section = section.field(format!("Label {s}.{f}"), format!("value {s}.{f}"));
        }
        form.push(section);
    }
    form
}

/// The lines a form should produce, in reading order.
pub fn expected_lines(form: &ClaimForm) -> Vec<String> {
    let mut lines = vec!["Insurance Claim Form".to_string()];
    for section in &form.sections {
        lines.push(section.name.clone());
        lines.extend(section.fields.iter().map(|f| f.line_text()));
    }
    lines
}
