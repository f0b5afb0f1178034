use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use log::debug;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{ConvertError, PayloadError};
use crate::xml::Element;

/// Archive entry written by XMind 8 and later "Zen" releases.
pub const JSON_ENTRY: &str = "content.json";
/// Archive entry written by legacy XMind releases.
pub const XML_ENTRY: &str = "content.xml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    Json,
    Xml,
}

impl SourceEncoding {
    pub fn entry_name(self) -> &'static str {
        match self {
            Self::Json => JSON_ENTRY,
            Self::Xml => XML_ENTRY,
        }
    }
}

/// Parsed payload of an XMind archive, tagged by the encoding it was read from.
#[derive(Debug, Clone)]
pub enum RawDocument {
    Json(serde_json::Value),
    Xml(Element),
}

impl RawDocument {
    pub fn encoding(&self) -> SourceEncoding {
        match self {
            Self::Json(_) => SourceEncoding::Json,
            Self::Xml(_) => SourceEncoding::Xml,
        }
    }
}

/// Opens the archive at `path` and parses whichever payload it carries,
/// preferring `content.json` over `content.xml`.
pub fn read_source(path: &Path) -> Result<RawDocument, ConvertError> {
    let file = File::open(path).map_err(|err| ConvertError::ContainerOpen(err.into()))?;
    read_archive(file)
}

pub fn read_archive<R: Read + Seek>(reader: R) -> Result<RawDocument, ConvertError> {
    let mut archive = ZipArchive::new(reader).map_err(ConvertError::ContainerOpen)?;
    for encoding in [SourceEncoding::Json, SourceEncoding::Xml] {
        let entry = encoding.entry_name();
        let Some(bytes) = read_entry(&mut archive, entry)? else {
            continue;
        };
        debug!(entry = entry, bytes = bytes.len(); "Found payload entry");
        return parse_payload(encoding, bytes)
            .map_err(|source| ConvertError::Parse { entry, source });
    }
    Err(ConvertError::UnsupportedFormat)
}

fn read_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    entry: &'static str,
) -> Result<Option<Vec<u8>>, ConvertError> {
    let mut file = match archive.by_name(entry) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(err) => {
            return Err(ConvertError::Parse {
                entry,
                source: err.into(),
            });
        }
    };
    let mut bytes = Vec::with_capacity(file.size() as usize);
    file.read_to_end(&mut bytes).map_err(|err| ConvertError::Parse {
        entry,
        source: err.into(),
    })?;
    Ok(Some(bytes))
}

pub fn parse_payload(
    encoding: SourceEncoding,
    bytes: Vec<u8>,
) -> Result<RawDocument, PayloadError> {
    match encoding {
        SourceEncoding::Json => Ok(RawDocument::Json(serde_json::from_slice(&bytes)?)),
        SourceEncoding::Xml => {
            let text = String::from_utf8(bytes)?;
            Ok(RawDocument::Xml(Element::parse(&text)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    fn archive(entries: &[(&str, &str)]) -> Cursor<Vec<u8>> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        let mut cursor = writer.finish().unwrap();
        cursor.set_position(0);
        cursor
    }

    #[test]
    fn prefers_json_payload_when_both_are_present() {
        let doc = read_archive(archive(&[
            (XML_ENTRY, "<xmap-content/>"),
            (JSON_ENTRY, "[]"),
        ]))
        .unwrap();
        assert_eq!(doc.encoding(), SourceEncoding::Json);
    }

    #[test]
    fn falls_back_to_xml_payload() {
        let doc = read_archive(archive(&[
            ("meta.xml", "<meta/>"),
            (XML_ENTRY, "<xmap-content/>"),
        ]))
        .unwrap();
        assert_eq!(doc.encoding(), SourceEncoding::Xml);
    }

    #[test]
    fn archive_without_known_entry_is_unsupported() {
        let err = read_archive(archive(&[("manifest.json", "{}")])).unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedFormat));
    }

    #[test]
    fn malformed_payloads_are_parse_failures() {
        let err = read_archive(archive(&[(JSON_ENTRY, "[{")])).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::Parse {
                entry: JSON_ENTRY,
                source: PayloadError::Json(_)
            }
        ));

        let err = read_archive(archive(&[(XML_ENTRY, "<a><b></a>")])).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::Parse {
                entry: XML_ENTRY,
                source: PayloadError::Xml(_)
            }
        ));
    }

    #[test]
    fn non_archive_bytes_fail_to_open() {
        let err = read_archive(Cursor::new(b"not a zip file".to_vec())).unwrap_err();
        assert!(matches!(err, ConvertError::ContainerOpen(_)));
    }

    #[test]
    fn missing_file_fails_to_open() {
        let err = read_source(Path::new("/definitely/not/here.xmind")).unwrap_err();
        assert!(matches!(err, ConvertError::ContainerOpen(_)));
    }
}
