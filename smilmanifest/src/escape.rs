//! Échappement XML des valeurs d'attributs

/// Escapes the five reserved XML characters.
///
/// `&` is replaced first so the entities produced by the other substitutions
/// are left intact. `None` yields an empty string. Input must be raw text:
/// already escaped text is escaped again.
///
/// ```
/// use smilmanifest::escape_xml;
///
/// assert_eq!(escape_xml("A & B"), "A &amp; B");
/// assert_eq!(escape_xml(None::<&str>), "");
/// ```
pub fn escape_xml<'a>(text: impl Into<Option<&'a str>>) -> String {
    match text.into() {
        Some(text) => text
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;"),
        None => String::new(),
    }
}
