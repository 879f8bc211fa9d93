//! Payload serialization for write requests.
//!
//! Renders selected fields of an entity as a minimal Atom entry:
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <entry xmlns:d="..." xmlns:m="..." xmlns="http://www.w3.org/2005/Atom">
//!   <category term="SP.Group" scheme="http://schemas.microsoft.com/ado/2007/08/dataservices/scheme"/>
//!   <content type="application/xml">
//!     <m:properties>
//!       <d:Title>Engineering</d:Title>
//!     </m:properties>
//!   </content>
//! </entry>
//! ```

use std::io;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesText, Event};
use spodata_model::{EntityObject, TypeRegistry};

use crate::error::{AtomError, AtomResult};
use crate::vocabulary::{ATOM_NS, DATA_NS, METADATA_NS, SCHEME};

/// Serialize the named fields of `entity` into an Atom entry payload.
///
/// Fields are written in the order given, named by their wire name. Absent
/// fields and fields without a text representation are left out.
///
/// # Errors
///
/// Returns [`AtomError::UnmappedType`] if the entity's native type is not
/// registered in `registry`.
pub fn entity_to_payload(
    registry: &TypeRegistry,
    entity: &dyn EntityObject,
    fields: &[&str],
) -> AtomResult<String> {
    let wire_type = registry
        .wire_name_of_value(entity)
        .ok_or_else(|| AtomError::UnmappedType(entity.type_name().to_owned()))?;

    let mut properties = Vec::with_capacity(fields.len());
    for &field in fields {
        match entity.field_kind(field) {
            None => {
                tracing::warn!(wire_type, field, "payload field does not exist, skipping");
            }
            Some(kind) if !kind.is_text_representable() => {
                tracing::debug!(
                    wire_type,
                    field,
                    %kind,
                    "payload field has no text form, skipping"
                );
            }
            Some(_) => {
                if let Some(text) = entity.field_text(field) {
                    properties.push((field, text));
                }
            }
        }
    }

    let mut buf = Vec::with_capacity(512);
    write_payload(&mut buf, wire_type, &properties)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

fn write_payload(
    buf: &mut Vec<u8>,
    wire_type: &str,
    properties: &[(&str, String)],
) -> io::Result<()> {
    let mut writer = Writer::new(buf);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    writer
        .create_element("entry")
        .with_attribute(("xmlns:d", DATA_NS))
        .with_attribute(("xmlns:m", METADATA_NS))
        .with_attribute(("xmlns", ATOM_NS))
        .write_inner_content(|w| {
            w.create_element("category")
                .with_attribute(("term", wire_type))
                .with_attribute(("scheme", SCHEME))
                .write_empty()?;
            w.create_element("content")
                .with_attribute(("type", "application/xml"))
                .write_inner_content(|w| {
                    w.create_element("m:properties").write_inner_content(|w| {
                        for (field, text) in properties {
                            w.create_element(format!("d:{field}"))
                                .write_text_content(BytesText::new(text))?;
                        }
                        Ok(())
                    })?;
                    Ok(())
                })?;
            Ok(())
        })?;

    Ok(())
}
