use std::fs;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::ImportError;

/// One column of a record group: element name plus its first-level text.
/// `value` is `None` when the element carries no text at all.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub value: Option<String>,
}

/// A top-level document element. The name denotes the target table, each
/// child element one column.
#[derive(Debug, Clone)]
pub struct RecordGroup {
    pub name: String,
    pub fields: Vec<Field>,
}

/// A fully validated source document. Parsing happens up front so a
/// malformed file is rejected before any database work starts.
#[derive(Debug)]
pub struct Document {
    groups: Vec<RecordGroup>,
}

impl Document {
    /// Read and parse the document at `path`. A missing file is reported
    /// as `NotFound`, distinct from a well-formedness failure.
    pub fn load(path: &Path) -> Result<Self, ImportError> {
        if !path.exists() {
            return Err(ImportError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let xml = fs::read_to_string(path)
            .map_err(|e| ImportError::parse(vec![format!("cannot read {}: {}", path.display(), e)]))?;
        Self::parse_str(&xml)
    }

    /// Parse document text: root → record groups → fields, taking only
    /// each field element's own text (nested markup is skipped).
    pub fn parse_str(xml: &str) -> Result<Self, ImportError> {
        let mut reader = Reader::from_str(xml);
        let mut groups: Vec<RecordGroup> = Vec::new();
        let mut depth = 0usize; // 1 = root, 2 = group, 3 = field
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    depth += 1;
                    match depth {
                        2 => groups.push(RecordGroup {
                            name: element_name(e.name().as_ref()),
                            fields: Vec::new(),
                        }),
                        3 => {
                            if let Some(group) = groups.last_mut() {
                                group.fields.push(Field {
                                    name: element_name(e.name().as_ref()),
                                    value: None,
                                });
                            }
                        }
                        _ => {}
                    }
                }
                Ok(Event::Empty(e)) => match depth + 1 {
                    2 => groups.push(RecordGroup {
                        name: element_name(e.name().as_ref()),
                        fields: Vec::new(),
                    }),
                    3 => {
                        if let Some(group) = groups.last_mut() {
                            group.fields.push(Field {
                                name: element_name(e.name().as_ref()),
                                value: None,
                            });
                        }
                    }
                    _ => {}
                },
                Ok(Event::Text(t)) if depth == 3 => {
                    let text = t
                        .unescape()
                        .map_err(|e| parse_error(&reader, e.into()))?;
                    append_field_text(&mut groups, &text);
                }
                Ok(Event::CData(t)) if depth == 3 => {
                    let text = String::from_utf8_lossy(&t).to_string();
                    append_field_text(&mut groups, &text);
                }
                Ok(Event::End(_)) => depth = depth.saturating_sub(1),
                Ok(Event::Eof) => break,
                Err(e) => return Err(parse_error(&reader, e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(Document { groups })
    }

    /// Record groups in document order.
    pub fn groups(&self) -> impl Iterator<Item = &RecordGroup> {
        self.groups.iter()
    }
}

fn element_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

fn append_field_text(groups: &mut [RecordGroup], text: &str) {
    if let Some(field) = groups.last_mut().and_then(|g| g.fields.last_mut()) {
        field.value.get_or_insert_with(String::new).push_str(text);
    }
}

fn parse_error(reader: &Reader<&[u8]>, e: quick_xml::Error) -> ImportError {
    ImportError::parse(vec![format!(
        "{} at byte {}",
        e,
        reader.buffer_position()
    )])
}
