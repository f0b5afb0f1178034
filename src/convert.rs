//! Per-file conversion pipeline and the batch driver over a directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::config::Config;
use crate::drawio::{Diagram, build_diagram};
use crate::error::ConvertError;
use crate::layout::{LayoutConfig, compute_layout};
use crate::layout_dump::{LayoutDump, write_layout_dump};
use crate::render::{render_drawio, write_output_drawio};
use crate::source::{RawDocument, SourceEncoding, read_source};
use crate::theme::Theme;
use crate::topic::{RootTopic, Topic, root_topic};

pub const INPUT_EXTENSION: &str = "xmind";
pub const OUTPUT_EXTENSION: &str = "drawio";
pub const LAYOUT_DUMP_EXTENSION: &str = "layout.json";

/// Result of converting one source document in memory.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub encoding: SourceEncoding,
    pub diagram: Diagram,
    pub layout: LayoutDump,
}

pub fn convert_document(
    document: &RawDocument,
    config: &LayoutConfig,
    theme: &Theme,
) -> Result<Conversion, ConvertError> {
    let (diagram, layout) = match root_topic(document)? {
        RootTopic::Json(topic) => convert_topic(topic, config, theme),
        RootTopic::Xml(topic) => convert_topic(topic, config, theme),
    };
    Ok(Conversion {
        encoding: document.encoding(),
        diagram,
        layout,
    })
}

fn convert_topic<T: Topic>(
    root: T,
    config: &LayoutConfig,
    theme: &Theme,
) -> (Diagram, LayoutDump) {
    let layout = compute_layout(root, config);
    let dump = LayoutDump::from_layout(&layout, config);
    debug!(
        topics = layout.topic_count(),
        callouts = layout.callout_count(),
        width = dump.width,
        height = dump.height;
        "Computed layout"
    );
    (build_diagram(&layout, config, theme), dump)
}

pub fn convert_file(
    path: &Path,
    config: &LayoutConfig,
    theme: &Theme,
) -> Result<Conversion, ConvertError> {
    let document = read_source(path)?;
    debug!(file:% = path.display(), encoding:? = document.encoding(); "Parsed source");
    convert_document(&document, config, theme)
}

pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let mut name = input
        .file_stem()
        .map(|stem| stem.to_os_string())
        .unwrap_or_else(|| "diagram".into());
    name.push(".");
    name.push(OUTPUT_EXTENSION);
    output_dir.join(name)
}

/// `.xmind` files directly inside `dir`, sorted by path.
pub fn find_inputs(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_input = path.is_file()
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == INPUT_EXTENSION);
        if is_input {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

/// Converts `input` and writes the result into `config.output_dir`.
///
/// Every output is serialized before the first file is created. If the layout
/// dump cannot be written, the `.drawio` written just before it is removed.
pub fn convert_to_file(input: &Path, config: &Config) -> Result<PathBuf, ConvertError> {
    let conversion = convert_file(input, &config.layout, &config.theme)?;
    let document = render_drawio(&conversion.diagram)?;
    let dump = if config.dump_layout {
        Some(conversion.layout.to_json().map_err(io::Error::from)?)
    } else {
        None
    };

    let output = output_path_for(input, &config.output_dir);
    write_output_drawio(&document, &output)?;
    if let Some(dump) = dump {
        let dump_path = output.with_extension(LAYOUT_DUMP_EXTENSION);
        if let Err(err) = write_layout_dump(&dump_path, &dump) {
            if let Err(cleanup) = fs::remove_file(&output) {
                warn!(output:% = output.display(), error:% = cleanup; "Cannot remove output");
            }
            return Err(err.into());
        }
    }
    Ok(output)
}

#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub result: Result<PathBuf, ConvertError>,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn found(&self) -> usize {
        self.outcomes.len()
    }

    pub fn converted(&self) -> impl Iterator<Item = &Path> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().ok().map(PathBuf::as_path))
    }

    pub fn failed(&self) -> impl Iterator<Item = (&Path, &ConvertError)> {
        self.outcomes.iter().filter_map(|outcome| {
            outcome
                .result
                .as_ref()
                .err()
                .map(|err| (outcome.input.as_path(), err))
        })
    }
}

/// Converts every `.xmind` file in `config.input_dir`.
///
/// Both directories are created when missing. A file that fails is recorded
/// in the report and the batch moves on; only directory-level I/O errors
/// abort the run.
pub fn convert_directory(config: &Config) -> io::Result<BatchReport> {
    fs::create_dir_all(&config.input_dir)?;
    fs::create_dir_all(&config.output_dir)?;

    let inputs = find_inputs(&config.input_dir)?;
    info!(dir:% = config.input_dir.display(), files = inputs.len(); "Scanned input directory");

    let mut report = BatchReport::default();
    for input in inputs {
        let result = convert_to_file(&input, config);
        match &result {
            Ok(output) => {
                info!(input:% = input.display(), output:% = output.display(); "Converted")
            }
            Err(err) => {
                warn!(input:% = input.display(), kind = err.kind(); "Conversion failed: {err}")
            }
        }
        report.outcomes.push(FileOutcome { input, result });
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::Element;
    use serde_json::json;

    #[test]
    fn output_keeps_base_name() {
        let out = output_path_for(Path::new("in/My Map.xmind"), Path::new("out"));
        assert_eq!(out, Path::new("out/My Map.drawio"));
        let out = output_path_for(Path::new("in/v1.2.xmind"), Path::new("out"));
        assert_eq!(out, Path::new("out/v1.2.drawio"));
    }

    #[test]
    fn xml_documents_never_produce_callouts() {
        let root = Element::parse(
            r#"<xmap-content xmlns="urn:xmind:xmap:xmlns:content:2.0">
                <sheet><topic><title>Root</title></topic></sheet>
            </xmap-content>"#,
        )
        .unwrap();
        let conversion = convert_document(
            &RawDocument::Xml(root),
            &LayoutConfig::default(),
            &Theme::default(),
        )
        .unwrap();
        assert_eq!(conversion.encoding, SourceEncoding::Xml);
        assert_eq!(conversion.diagram.vertices().count(), 1);
        assert_eq!(conversion.diagram.edges().count(), 0);
    }

    #[test]
    fn failed_layout_dump_leaves_no_output_behind() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("m.xmind");
        let file = fs::File::create(&input).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        writer
            .start_file("content.json", zip::write::SimpleFileOptions::default())
            .unwrap();
        std::io::Write::write_all(&mut writer, br#"[{"rootTopic":{"title":"m"}}]"#).unwrap();
        writer.finish().unwrap();

        let config = Config {
            input_dir: dir.path().to_path_buf(),
            output_dir: dir.path().join("out"),
            dump_layout: true,
            ..Config::default()
        };
        // A directory squatting on the dump path makes the second write fail.
        fs::create_dir_all(config.output_dir.join("m.layout.json")).unwrap();

        let err = convert_to_file(&input, &config).unwrap_err();
        assert!(matches!(err, ConvertError::Write(_)));
        assert!(!config.output_dir.join("m.drawio").exists());
    }

    #[test]
    fn missing_root_topic_surfaces_as_error() {
        let err = convert_document(
            &RawDocument::Json(json!([])),
            &LayoutConfig::default(),
            &Theme::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::MissingRootTopic));
    }
}
