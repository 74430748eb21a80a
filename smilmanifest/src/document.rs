//! Écriture structurée du document SMIL
//!
//! Les valeurs d'attributs sont reçues déjà échappées par [`crate::escape_xml`]
//! et insérées telles quelles : le writer ne les échappe pas une seconde fois.

use crate::{ManifestError, Result};
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

const INDENT_SIZE: usize = 4;

/// Attribut dont la valeur est déjà échappée
fn raw_attr<'a>(key: &'a str, escaped: &'a str) -> Attribute<'a> {
    Attribute::from((key.as_bytes(), escaped.as_bytes()))
}

/// Writer SMIL : `<smil><head>…</head><body><switch>…</switch></body></smil>`
pub(crate) struct SmilWriter {
    writer: Writer<Vec<u8>>,
}

impl SmilWriter {
    pub(crate) fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE),
        }
    }

    fn emit(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| ManifestError::Render(e.to_string()))
    }

    fn start(&mut self, name: &str) -> Result<()> {
        self.emit(Event::Start(BytesStart::new(name)))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.emit(Event::End(BytesEnd::new(name)))
    }

    /// Prologue, en-tête de métadonnées et ouverture de `<body><switch>`
    ///
    /// `meta` contient des paires (nom, contenu échappé).
    pub(crate) fn open(&mut self, meta: &[(&str, &str)]) -> Result<()> {
        self.emit(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        self.start("smil")?;
        self.start("head")?;
        for (name, content) in meta {
            let mut element = BytesStart::new("meta");
            element.push_attribute(raw_attr("name", name));
            element.push_attribute(raw_attr("content", content));
            self.emit(Event::Empty(element))?;
        }
        self.end("head")?;
        self.start("body")?;
        self.start("switch")
    }

    /// Ouvre un bloc `<seq>`
    pub(crate) fn open_sequence(&mut self, id: &str, title: &str) -> Result<()> {
        let mut element = BytesStart::new("seq");
        element.push_attribute(raw_attr("id", id));
        element.push_attribute(raw_attr("title", title));
        self.emit(Event::Start(element))
    }

    pub(crate) fn close_sequence(&mut self) -> Result<()> {
        self.end("seq")
    }

    /// Entrée `<video src dur title/>`
    pub(crate) fn video(&mut self, src: &str, dur: &str, title: &str) -> Result<()> {
        let mut element = BytesStart::new("video");
        element.push_attribute(raw_attr("src", src));
        element.push_attribute(raw_attr("dur", dur));
        element.push_attribute(raw_attr("title", title));
        self.emit(Event::Empty(element))
    }

    /// Ferme `</switch></body></smil>` et renvoie le texte du document
    pub(crate) fn finish(mut self) -> Result<String> {
        self.end("switch")?;
        self.end("body")?;
        self.end("smil")?;

        let mut bytes = self.writer.into_inner();
        bytes.push(b'\n');
        String::from_utf8(bytes).map_err(|e| ManifestError::Render(e.to_string()))
    }
}
