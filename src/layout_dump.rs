use crate::layout::{LayoutConfig, TopicLayout};
use crate::topic::Topic;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct LayoutDump {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
    pub topics: Vec<TopicDump>,
    pub callouts: Vec<CalloutDump>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopicDump {
    pub index: usize,
    pub parent: Option<usize>,
    pub title: String,
    pub level: usize,
    pub x: f64,
    pub y: f64,
    pub subtree_height: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalloutDump {
    pub owner: usize,
    pub title: String,
    pub x: f64,
    pub y: f64,
}

impl LayoutDump {
    pub fn from_layout<T: Topic>(layout: &TopicLayout<T>, config: &LayoutConfig) -> Self {
        let (min_x, min_y, max_x, max_y) = layout.bounds(config);
        let mut dump = LayoutDump {
            min_x,
            min_y,
            width: max_x - min_x,
            height: max_y - min_y,
            topics: Vec::new(),
            callouts: Vec::new(),
        };
        dump.collect(layout, None);
        dump
    }

    fn collect<T: Topic>(&mut self, node: &TopicLayout<T>, parent: Option<usize>) {
        let index = self.topics.len();
        self.topics.push(TopicDump {
            index,
            parent,
            title: node.topic.display_title().to_string(),
            level: node.level,
            x: node.x,
            y: node.y,
            subtree_height: node.subtree_height,
        });
        for callout in &node.callouts {
            self.callouts.push(CalloutDump {
                owner: index,
                title: callout.topic.title().unwrap_or_default().to_string(),
                x: callout.x,
                y: callout.y,
            });
        }
        for child in &node.children {
            self.collect(child, Some(index));
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn write_layout_dump(path: &Path, json: &str) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(json.as_bytes())?;
    writer.flush()
}
