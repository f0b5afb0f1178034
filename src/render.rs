use crate::drawio::Diagram;
use crate::error::XmlWriteError;
use crate::xml::write_document;
use std::io;
use std::path::Path;

/// Serializes `diagram` as a complete `.drawio` document.
pub fn render_drawio(diagram: &Diagram) -> Result<String, XmlWriteError> {
    write_document(&diagram.to_element())
}

pub fn write_output_drawio(document: &str, output: &Path) -> io::Result<()> {
    std::fs::write(output, document)
}
