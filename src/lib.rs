#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod convert;
pub mod drawio;
pub mod error;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod source;
pub mod theme;
pub mod topic;
pub mod xml;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, load_config};
pub use convert::{BatchReport, Conversion, convert_directory, convert_document, convert_file};
pub use drawio::{Diagram, build_diagram};
pub use error::ConvertError;
pub use layout::{LayoutConfig, compute_layout};
pub use render::render_drawio;
pub use source::{RawDocument, SourceEncoding, read_source};
pub use theme::Theme;
pub use topic::{Topic, root_topic};
