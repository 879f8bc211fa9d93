//! URL helpers for OData request paths.

/// Encode an OData request URL.
///
/// Only spaces are encoded (as `%20`). Every other character, including the
/// quotes and parentheses of OData key and function syntax, is left as is.
///
/// ```
/// assert_eq!(
///     spodata_atom::encode_odata_url("Web/GetFolderByServerRelativeUrl('Shared Documents')"),
///     "Web/GetFolderByServerRelativeUrl('Shared%20Documents')"
/// );
/// ```
#[must_use]
pub fn encode_odata_url(url: &str) -> String {
    url.replace(' ', "%20")
}
