//! Streaming OData v3 Atom binder.
//!
//! Turns an Atom XML response into typed values and renders entities back
//! into write payloads.
//!
//! # Key components
//!
//! - [`parse`]: read a document with quick-xml and bind it through a [`Binder`]
//! - [`Binder`]: the streaming node dispatcher, usable with any event source
//! - [`Document`]: the parsed root value and its shape-checked extractors
//! - [`entity_to_payload`]: serialize selected entity fields for a write request
//! - [`encode_odata_url`]: encode request paths the way SharePoint expects
//!
//! # Wire conventions
//!
//! - Atom namespace: `http://www.w3.org/2005/Atom`
//! - Data namespace (`d:`): `http://schemas.microsoft.com/ado/2007/08/dataservices`
//! - Metadata namespace (`m:`): `http://schemas.microsoft.com/ado/2007/08/dataservices/metadata`
//! - Data elements without `m:type` are `Edm.String`

mod dispatch;
mod document;
mod error;
mod hydrate;
mod node;
mod options;
mod payload;
mod reader;
mod url;
pub mod vocabulary;

pub use dispatch::Binder;
pub use document::Document;
pub use error::{AtomError, AtomResult};
pub use node::XmlAttribute;
pub use options::ParseOptions;
pub use payload::entity_to_payload;
pub use reader::parse;
pub use url::encode_odata_url;
