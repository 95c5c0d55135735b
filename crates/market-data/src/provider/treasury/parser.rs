//! Streaming decoder for the Treasury yield curve Atom feed.
//!
//! Only `m:properties` children are read; everything else in the document
//! (links, titles, author blocks) is skipped. Namespace prefixes are ignored
//! and elements are matched on their local name.

use std::str::FromStr;

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use rust_decimal::Decimal;

use crate::models::{CurveRates, YieldCurveEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Date,
    OneMonth,
    ThreeMonth,
    SixMonth,
    OneYear,
    TwoYear,
    FiveYear,
    TenYear,
    ThirtyYear,
}

impl Field {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"NEW_DATE" => Some(Self::Date),
            b"BC_1MONTH" => Some(Self::OneMonth),
            b"BC_3MONTH" => Some(Self::ThreeMonth),
            b"BC_6MONTH" => Some(Self::SixMonth),
            b"BC_1YEAR" => Some(Self::OneYear),
            b"BC_2YEAR" => Some(Self::TwoYear),
            b"BC_5YEAR" => Some(Self::FiveYear),
            b"BC_10YEAR" => Some(Self::TenYear),
            b"BC_30YEAR" => Some(Self::ThirtyYear),
            _ => None,
        }
    }

    fn rate_slot(self, rates: &mut CurveRates) -> Option<&mut Option<Decimal>> {
        match self {
            Self::Date => None,
            Self::OneMonth => Some(&mut rates.one_month),
            Self::ThreeMonth => Some(&mut rates.three_month),
            Self::SixMonth => Some(&mut rates.six_month),
            Self::OneYear => Some(&mut rates.one_year),
            Self::TwoYear => Some(&mut rates.two_year),
            Self::FiveYear => Some(&mut rates.five_year),
            Self::TenYear => Some(&mut rates.ten_year),
            Self::ThirtyYear => Some(&mut rates.thirty_year),
        }
    }
}

#[derive(Default)]
struct EntryBuilder {
    raw_date: String,
    rates: CurveRates,
}

impl EntryBuilder {
    fn set(&mut self, field: Field, text: &str) -> Result<(), String> {
        let text = text.trim();
        if field == Field::Date {
            self.raw_date = text.to_string();
            return Ok(());
        }
        let value = if text.is_empty() {
            None
        } else {
            Some(
                Decimal::from_str(text)
                    .map_err(|e| format!("invalid rate '{}' in {:?}: {}", text, field, e))?,
            )
        };
        if let Some(slot) = field.rate_slot(&mut self.rates) {
            *slot = value;
        }
        Ok(())
    }

    fn finish(self) -> Option<YieldCurveEntry> {
        if self.raw_date.is_empty() {
            return None;
        }
        Some(YieldCurveEntry::new(self.raw_date, self.rates))
    }
}

/// Decode a yearly Treasury feed document.
///
/// Entries without a `NEW_DATE` are dropped. Empty or `m:null` rate elements
/// decode as `None`. A document whose root is not an Atom `feed`, malformed
/// XML, or a non-numeric rate is an error.
pub fn parse_yield_curve(xml: &str) -> Result<Vec<YieldCurveEntry>, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut saw_root = false;
    let mut depth = 0usize;
    let mut current: Option<EntryBuilder> = None;
    let mut field: Option<Field> = None;
    let mut text = String::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("malformed XML at byte {}: {}", reader.buffer_position(), e))?;

        match event {
            Event::Start(e) => {
                depth += 1;
                let name = e.local_name();
                if !saw_root {
                    if name.as_ref() != b"feed" {
                        return Err(format!(
                            "unexpected root element '{}'",
                            String::from_utf8_lossy(name.as_ref())
                        ));
                    }
                    saw_root = true;
                    continue;
                }
                if name.as_ref() == b"properties" {
                    current = Some(EntryBuilder::default());
                } else if current.is_some() {
                    field = Field::from_local_name(name.as_ref());
                    text.clear();
                }
            }
            Event::Empty(e) => {
                if !saw_root {
                    // `<feed/>` is a valid, empty year.
                    if e.local_name().as_ref() == b"feed" {
                        return Ok(entries);
                    }
                    return Err("unexpected empty root element".to_string());
                }
                if let (Some(builder), Some(f)) = (
                    current.as_mut(),
                    Field::from_local_name(e.local_name().as_ref()),
                ) {
                    builder.set(f, "")?;
                }
            }
            Event::Text(t) => {
                if field.is_some() {
                    let unescaped = t.unescape().map_err(|e| e.to_string())?;
                    text.push_str(&unescaped);
                }
            }
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                let name = e.local_name();
                if name.as_ref() == b"properties" {
                    if let Some(entry) = current.take().and_then(EntryBuilder::finish) {
                        entries.push(entry);
                    }
                } else if let (Some(builder), Some(f)) = (current.as_mut(), field) {
                    if Field::from_local_name(name.as_ref()) == Some(f) {
                        builder.set(f, &text)?;
                        field = None;
                        text.clear();
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err("document has no root element".to_string());
    }
    if depth != 0 {
        return Err("unexpected end of document".to_string());
    }
    Ok(entries)
}
