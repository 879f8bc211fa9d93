//! XML front end: drives a [`Binder`] from a quick-xml namespace-aware reader.

use std::borrow::Cow;

use quick_xml::NsReader;
use quick_xml::events::{BytesRef, BytesStart, BytesText, Event};
use quick_xml::name::ResolveResult;
use spodata_model::TypeRegistry;

use crate::dispatch::Binder;
use crate::document::Document;
use crate::error::{AtomError, AtomResult};
use crate::node::XmlAttribute;
use crate::options::ParseOptions;
use crate::vocabulary::XML_NS;

/// Parse an OData Atom document.
///
/// `content_type` is the response's declared content type. It is advisory
/// only and never changes how the document is parsed.
///
/// # Errors
///
/// Returns [`AtomError::MalformedInput`] if the XML is not well-formed, or
/// [`AtomError::Binding`] if hydration finds a field or link contract
/// violation the coercion policy does not absorb.
///
/// # Example
///
/// ```
/// use spodata_atom::{ParseOptions, parse};
/// use spodata_model::sharepoint::{self, SpGroup};
///
/// let xml = br#"<entry xmlns="http://www.w3.org/2005/Atom"
///     xmlns:d="http://schemas.microsoft.com/ado/2007/08/dataservices"
///     xmlns:m="http://schemas.microsoft.com/ado/2007/08/dataservices/metadata">
///   <id>https://contoso/_api/Web/SiteGroups/GetById(5)</id>
///   <category term="SP.Group" scheme="http://schemas.microsoft.com/ado/2007/08/dataservices/scheme"/>
///   <content type="application/xml">
///     <m:properties><d:Id m:type="Edm.Int32">5</d:Id><d:Title>Owners</d:Title></m:properties>
///   </content>
/// </entry>"#;
///
/// let document = parse(xml, Some("application/atom+xml"), sharepoint::registry(), ParseOptions::default())?;
/// let group: SpGroup = document.into_entity()?.expect("an entity");
/// assert_eq!(group.id, 5);
/// assert_eq!(group.title.as_deref(), Some("Owners"));
/// # Ok::<(), spodata_atom::AtomError>(())
/// ```
pub fn parse(
    input: &[u8],
    content_type: Option<&str>,
    registry: &TypeRegistry,
    options: ParseOptions,
) -> AtomResult<Document> {
    tracing::debug!(
        content_type = content_type.unwrap_or("<none>"),
        bytes = input.len(),
        policy = %options.policy,
        "parsing Atom document"
    );

    let mut reader = NsReader::from_reader(input);
    reader.config_mut().trim_text(false);
    let mut binder = Binder::new(registry, options);

    loop {
        let (resolved, event) = reader.read_resolved_event()?;
        let namespace = namespace_of(resolved)?;
        match event {
            Event::Start(e) => {
                let attributes = attributes_of(&reader, &e)?;
                binder.start_element(namespace.as_deref(), &local_name_of(&e)?, &attributes)?;
            }
            Event::Empty(e) => {
                let attributes = attributes_of(&reader, &e)?;
                binder.start_element(namespace.as_deref(), &local_name_of(&e)?, &attributes)?;
                binder.end_element()?;
            }
            Event::End(_) => binder.end_element()?,
            Event::Text(e) => binder.characters(&text_of(&e)?),
            Event::CData(e) => {
                let text = std::str::from_utf8(&e)
                    .map_err(|err| AtomError::MalformedInput(err.to_string()))?;
                binder.characters(text);
            }
            Event::GeneralRef(e) => binder.characters(&reference_of(&e)?),
            Event::Eof => break,
            // Declaration, comments, processing instructions, doctype.
            _ => {}
        }
    }

    binder.finish()
}

fn namespace_of(resolved: ResolveResult<'_>) -> AtomResult<Option<String>> {
    match resolved {
        ResolveResult::Bound(ns) => std::str::from_utf8(ns.into_inner())
            .map(|s| Some(s.to_owned()))
            .map_err(|err| AtomError::MalformedInput(err.to_string())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(AtomError::MalformedInput(format!(
            "undeclared namespace prefix {}",
            String::from_utf8_lossy(&prefix)
        ))),
    }
}

fn local_name_of(e: &BytesStart<'_>) -> AtomResult<String> {
    std::str::from_utf8(e.local_name().into_inner())
        .map(str::to_owned)
        .map_err(|err| AtomError::MalformedInput(err.to_string()))
}

fn attributes_of(reader: &NsReader<&[u8]>, e: &BytesStart<'_>) -> AtomResult<Vec<XmlAttribute>> {
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let raw_key = attr.key.as_ref();
        if raw_key == b"xmlns" || raw_key.starts_with(b"xmlns:") {
            continue;
        }
        let namespace = if raw_key == b"xml:base" {
            Some(XML_NS.to_owned())
        } else {
            let (resolved, _) = reader.resolve_attribute(attr.key);
            namespace_of(resolved)?
        };
        let local = std::str::from_utf8(attr.key.local_name().into_inner())
            .map_err(|err| AtomError::MalformedInput(err.to_string()))?;
        let raw_value = std::str::from_utf8(&attr.value)
            .map_err(|err| AtomError::MalformedInput(err.to_string()))?;
        let value = quick_xml::escape::unescape(raw_value)
            .map_err(|err| AtomError::MalformedInput(err.to_string()))?;
        attributes.push(XmlAttribute::new(namespace.as_deref(), local, value));
    }
    Ok(attributes)
}

fn text_of<'a>(e: &'a BytesText<'_>) -> AtomResult<Cow<'a, str>> {
    e.decode()
        .map_err(|err| AtomError::MalformedInput(err.to_string()))
}

fn reference_of(e: &BytesRef<'_>) -> AtomResult<String> {
    if let Some(ch) = e
        .resolve_char_ref()
        .map_err(|err| AtomError::MalformedInput(err.to_string()))?
    {
        return Ok(ch.to_string());
    }
    let name = e
        .decode()
        .map_err(|err| AtomError::MalformedInput(err.to_string()))?;
    quick_xml::escape::resolve_predefined_entity(&name)
        .map(str::to_owned)
        .ok_or_else(|| AtomError::MalformedInput(format!("unknown entity reference &{name};")))
}
