//! draw.io graph model built from a positioned topic tree.
//!
//! The builder walks the tree depth-first: a topic's vertex comes first, then
//! each attached child subtree followed by the connector into it, then the
//! topic's callouts, each followed by its dashed connector. Ids are handed out
//! by one [`IdAllocator`] in exactly that order.

use crate::layout::{LayoutConfig, TopicLayout};
use crate::theme::Theme;
use crate::topic::Topic;
use crate::xml::Element;

/// Id of the model's root cell.
pub const ROOT_CELL_ID: &str = "0";
/// Id of the default layer every generated cell belongs to.
pub const LAYER_CELL_ID: &str = "1";
/// First id available to generated cells.
pub const FIRST_GENERATED_ID: u64 = 2;

/// Monotonic cell id counter for one document.
#[derive(Debug)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self {
            next: FIRST_GENERATED_ID,
        }
    }

    pub fn next_id(&mut self) -> String {
        let id = self.next;
        self.next += 1;
        id.to_string()
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexKind {
    Topic { level: usize },
    Callout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Child,
    Callout,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub id: String,
    pub kind: VertexKind,
    pub value: String,
    pub style: &'static str,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: String,
    pub kind: EdgeKind,
    pub source: String,
    pub target: String,
    pub style: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Vertex(Vertex),
    Edge(Edge),
}

impl Cell {
    fn to_element(&self) -> Element {
        match self {
            Cell::Vertex(vertex) => Element::new("mxCell")
                .with_attr("id", vertex.id.as_str())
                .with_attr("value", vertex.value.as_str())
                .with_attr("style", vertex.style)
                .with_attr("vertex", "1")
                .with_attr("parent", LAYER_CELL_ID)
                .with_child(
                    Element::new("mxGeometry")
                        .with_attr("x", format_number(vertex.x))
                        .with_attr("y", format_number(vertex.y))
                        .with_attr("width", format_number(vertex.width))
                        .with_attr("height", format_number(vertex.height))
                        .with_attr("as", "geometry"),
                ),
            Cell::Edge(edge) => Element::new("mxCell")
                .with_attr("id", edge.id.as_str())
                .with_attr("value", "")
                .with_attr("style", edge.style)
                .with_attr("edge", "1")
                .with_attr("parent", LAYER_CELL_ID)
                .with_attr("source", edge.source.as_str())
                .with_attr("target", edge.target.as_str())
                .with_child(
                    Element::new("mxGeometry")
                        .with_attr("relative", "1")
                        .with_attr("as", "geometry"),
                ),
        }
    }
}

/// Generated cells of one page, in emission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagram {
    pub cells: Vec<Cell>,
}

impl Diagram {
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.cells.iter().filter_map(|cell| match cell {
            Cell::Vertex(vertex) => Some(vertex),
            Cell::Edge(_) => None,
        })
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.cells.iter().filter_map(|cell| match cell {
            Cell::Edge(edge) => Some(edge),
            Cell::Vertex(_) => None,
        })
    }

    /// Wraps the cells in `mxfile > diagram > mxGraphModel > root`, after the
    /// two reserved structural cells.
    pub fn to_element(&self) -> Element {
        let mut root = Element::new("root")
            .with_child(Element::new("mxCell").with_attr("id", ROOT_CELL_ID))
            .with_child(
                Element::new("mxCell")
                    .with_attr("id", LAYER_CELL_ID)
                    .with_attr("parent", ROOT_CELL_ID),
            );
        root.children.extend(self.cells.iter().map(Cell::to_element));

        let model = Element::new("mxGraphModel")
            .with_attr("dx", "1426")
            .with_attr("dy", "782")
            .with_attr("grid", "1")
            .with_attr("gridSize", "10")
            .with_attr("guides", "1")
            .with_child(root);

        Element::new("mxfile")
            .with_attr("host", "app.diagrams.net")
            .with_attr("version", "21.0.0")
            .with_child(
                Element::new("diagram")
                    .with_attr("name", "Page-1")
                    .with_child(model),
            )
    }
}

pub struct DiagramBuilder<'a> {
    config: &'a LayoutConfig,
    theme: &'a Theme,
    ids: IdAllocator,
    cells: Vec<Cell>,
}

impl<'a> DiagramBuilder<'a> {
    pub fn new(config: &'a LayoutConfig, theme: &'a Theme) -> Self {
        Self {
            config,
            theme,
            ids: IdAllocator::new(),
            cells: Vec::new(),
        }
    }

    pub fn build<T: Topic>(mut self, layout: &TopicLayout<T>) -> Diagram {
        self.emit_topic(layout);
        Diagram { cells: self.cells }
    }

    fn emit_topic<T: Topic>(&mut self, node: &TopicLayout<T>) -> String {
        let id = self.ids.next_id();
        self.cells.push(Cell::Vertex(Vertex {
            id: id.clone(),
            kind: VertexKind::Topic { level: node.level },
            value: node.topic.display_title().to_string(),
            style: self.theme.topic_style(node.level),
            x: node.x,
            y: node.y,
            width: self.config.box_width,
            height: self.config.box_height,
        }));

        for child in &node.children {
            let child_id = self.emit_topic(child);
            self.push_edge(EdgeKind::Child, &id, child_id);
        }

        for callout in &node.callouts {
            let callout_id = self.ids.next_id();
            self.cells.push(Cell::Vertex(Vertex {
                id: callout_id.clone(),
                kind: VertexKind::Callout,
                value: callout.topic.title().unwrap_or_default().to_string(),
                style: self.theme.callout,
                x: callout.x,
                y: callout.y,
                width: self.config.callout_width,
                height: self.config.callout_height,
            }));
            self.push_edge(EdgeKind::Callout, &id, callout_id);
        }

        id
    }

    fn push_edge(&mut self, kind: EdgeKind, source: &str, target: String) {
        let style = match kind {
            EdgeKind::Child => self.theme.connector,
            EdgeKind::Callout => self.theme.callout_connector,
        };
        self.cells.push(Cell::Edge(Edge {
            id: self.ids.next_id(),
            kind,
            source: source.to_string(),
            target,
            style,
        }));
    }
}

pub fn build_diagram<T: Topic>(
    layout: &TopicLayout<T>,
    config: &LayoutConfig,
    theme: &Theme,
) -> Diagram {
    DiagramBuilder::new(config, theme).build(layout)
}

fn format_number(value: f64) -> String {
    value.to_string()
}
