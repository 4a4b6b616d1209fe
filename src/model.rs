use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};

/// Points per millimetre.
pub const MM: f32 = 72.0 / 25.4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub label: String,
    pub value: String,
}

impl Field {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// The text shown on the field's line.
    pub fn line_text(&self) -> String {
        format!("{}: {}", self.label, self.value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub fields: Vec<Field>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(Field::new(label, value));
        self
    }
}

/// Ordered sections of one claim submission. Order is preserved exactly as
/// inserted; duplicate section names are kept as-is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClaimForm {
    pub sections: Vec<Section>,
}

impl ClaimForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn field_count(&self) -> usize {
        self.sections.iter().map(|s| s.fields.len()).sum()
    }
}

/// Stringify a scalar JSON value for display. Containers are rejected.
fn display_value<E: de::Error>(value: serde_json::Value) -> Result<String, E> {
    use serde_json::Value;
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        Value::Array(_) => Err(de::Error::invalid_type(
            de::Unexpected::Seq,
            &"a string, number, boolean or null",
        )),
        Value::Object(_) => Err(de::Error::invalid_type(
            de::Unexpected::Map,
            &"a string, number, boolean or null",
        )),
    }
}

struct SectionFields(Vec<Field>);

impl<'de> Deserialize<'de> for SectionFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldsVisitor;

        impl<'de> Visitor<'de> for FieldsVisitor {
            type Value = SectionFields;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of field labels to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut fields = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((label, value)) = map.next_entry::<String, serde_json::Value>()? {
                    fields.push(Field {
                        label,
                        value: display_value(value)?,
                    });
                }
                Ok(SectionFields(fields))
            }
        }

        deserializer.deserialize_map(FieldsVisitor)
    }
}

// Map entries are consumed in document order, so section and field order
// follow the source text.
impl<'de> Deserialize<'de> for ClaimForm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FormVisitor;

        impl<'de> Visitor<'de> for FormVisitor {
            type Value = ClaimForm;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of section names to field maps")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut form = ClaimForm::new();
                while let Some((name, fields)) = map.next_entry::<String, SectionFields>()? {
                    form.push(Section {
                        name,
                        fields: fields.0,
                    });
                }
                Ok(form)
            }
        }

        deserializer.deserialize_map(FormVisitor)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// Width and height in points.
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (210.0 * MM, 297.0 * MM),
            PageSize::Letter => (612.0, 792.0),
        }
    }

    /// Page size from `CLAIMFORM_PAGE_SIZE`, if set and recognised.
    pub fn from_env() -> Option<Self> {
        let val = std::env::var("CLAIMFORM_PAGE_SIZE").ok()?;
        match val.parse() {
            Ok(size) => Some(size),
            Err(e) => {
                log::warn!("Ignoring CLAIMFORM_PAGE_SIZE: {e}");
                None
            }
        }
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" | "us-letter" => Ok(PageSize::Letter),
            other => Err(format!("unknown page size '{other}' (expected a4 or letter)")),
        }
    }
}

/// Page geometry and line metrics, all in points.
#[derive(Clone, Debug, PartialEq)]
pub struct PageSetup {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_left: f32,
    pub margin_top: f32,
    pub margin_right: f32,
    /// Distance from the bottom edge at which content triggers a new page.
    pub break_margin: f32,
    /// Horizontal padding between a line's cell edge and its text.
    pub cell_padding: f32,
    pub line_height: f32,
    pub title_font_size: f32,
    pub body_font_size: f32,
    /// Width of the cell the title is centred in.
    pub title_width: f32,
    pub title_gap: f32,
    pub section_gap: f32,
}

impl PageSetup {
    pub fn new(size: PageSize) -> Self {
        let (page_width, page_height) = size.dimensions();
        Self {
            page_width,
            page_height,
            margin_left: 10.0 * MM,
            margin_top: 10.0 * MM,
            margin_right: 10.0 * MM,
            break_margin: 15.0 * MM,
            cell_padding: 1.0 * MM,
            line_height: 10.0 * MM,
            title_font_size: 12.0,
            body_font_size: 10.0,
            title_width: 200.0 * MM,
            title_gap: 10.0 * MM,
            section_gap: 5.0 * MM,
        }
    }

    /// y (from page top) past which the next line no longer fits.
    pub fn break_trigger(&self) -> f32 {
        self.page_height - self.break_margin
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::new(PageSize::A4)
    }
}
