//! Right-growing tree layout for mind-map topics.
//!
//! Pass one measures every subtree bottom-up; pass two walks the measured
//! tree top-down, centering each band of children on its parent and stacking
//! callouts above their owner.

use crate::topic::Topic;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub origin_x: f64,
    pub origin_y: f64,
    pub x_spacing: f64,
    pub min_y_spacing: f64,
    pub box_width: f64,
    pub box_height: f64,
    pub callout_width: f64,
    pub callout_height: f64,
    pub callout_offset_x: f64,
    pub callout_offset_y: f64,
    pub callout_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin_x: 400.0,
            origin_y: 300.0,
            x_spacing: 250.0,
            min_y_spacing: 120.0,
            box_width: 120.0,
            box_height: 60.0,
            callout_width: 200.0,
            callout_height: 60.0,
            callout_offset_x: -50.0,
            callout_offset_y: -80.0,
            callout_spacing: 70.0,
        }
    }
}

/// A topic with its computed position and the positioned subtree below it.
#[derive(Debug, Clone)]
pub struct TopicLayout<T> {
    pub topic: T,
    pub level: usize,
    pub x: f64,
    pub y: f64,
    /// Vertical band reserved for this topic, its callouts and descendants.
    pub subtree_height: f64,
    pub children: Vec<TopicLayout<T>>,
    pub callouts: Vec<CalloutLayout<T>>,
}

#[derive(Debug, Clone)]
pub struct CalloutLayout<T> {
    pub topic: T,
    pub x: f64,
    pub y: f64,
}

impl<T> TopicLayout<T> {
    /// Number of topics in this subtree, `self` included.
    pub fn topic_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(TopicLayout::topic_count)
            .sum::<usize>()
    }

    /// Number of callouts anywhere in this subtree.
    pub fn callout_count(&self) -> usize {
        self.callouts.len()
            + self
                .children
                .iter()
                .map(TopicLayout::callout_count)
                .sum::<usize>()
    }

    /// Axis-aligned extent `(min_x, min_y, max_x, max_y)` of every box in the
    /// subtree, callouts included.
    pub fn bounds(&self, config: &LayoutConfig) -> (f64, f64, f64, f64) {
        let mut bounds = (
            self.x,
            self.y,
            self.x + config.box_width,
            self.y + config.box_height,
        );
        for callout in &self.callouts {
            bounds.0 = bounds.0.min(callout.x);
            bounds.1 = bounds.1.min(callout.y);
            bounds.2 = bounds.2.max(callout.x + config.callout_width);
            bounds.3 = bounds.3.max(callout.y + config.callout_height);
        }
        for child in &self.children {
            let (min_x, min_y, max_x, max_y) = child.bounds(config);
            bounds.0 = bounds.0.min(min_x);
            bounds.1 = bounds.1.min(min_y);
            bounds.2 = bounds.2.max(max_x);
            bounds.3 = bounds.3.max(max_y);
        }
        bounds
    }
}

/// Lays out the tree below `root`, anchoring the root at the configured origin.
pub fn compute_layout<T: Topic>(root: T, config: &LayoutConfig) -> TopicLayout<T> {
    let mut layout = measure_subtree(root, 0, config);
    assign_positions(&mut layout, config.origin_x, config.origin_y, config);
    layout
}

/// Height of the band a topic needs: its own row plus stacked callouts, or
/// the combined bands of its children when those are taller.
fn combine_heights(callouts: usize, children: &[f64], config: &LayoutConfig) -> f64 {
    let base = config.min_y_spacing + callouts as f64 * config.callout_spacing;
    if children.is_empty() {
        return base;
    }
    base.max(children.iter().sum())
}

fn measure_subtree<T: Topic>(topic: T, level: usize, config: &LayoutConfig) -> TopicLayout<T> {
    let children: Vec<TopicLayout<T>> = topic
        .attached()
        .into_iter()
        .map(|child| measure_subtree(child, level + 1, config))
        .collect();
    let callouts: Vec<CalloutLayout<T>> = topic
        .callouts()
        .into_iter()
        .map(|callout| CalloutLayout {
            topic: callout,
            x: 0.0,
            y: 0.0,
        })
        .collect();
    let child_heights: Vec<f64> = children.iter().map(|child| child.subtree_height).collect();
    let subtree_height = combine_heights(callouts.len(), &child_heights, config);
    TopicLayout {
        topic,
        level,
        x: 0.0,
        y: 0.0,
        subtree_height,
        children,
        callouts,
    }
}

fn assign_positions<T>(node: &mut TopicLayout<T>, x: f64, y: f64, config: &LayoutConfig) {
    node.x = x;
    node.y = y;

    let total: f64 = node.children.iter().map(|child| child.subtree_height).sum();
    let mut cursor = y - total / 2.0;
    for child in &mut node.children {
        let child_height = child.subtree_height;
        assign_positions(
            child,
            x + config.x_spacing,
            cursor + child_height / 2.0,
            config,
        );
        cursor += child_height;
    }

    for (idx, callout) in node.callouts.iter_mut().enumerate() {
        callout.x = x + config.callout_offset_x;
        callout.y = y + config.callout_offset_y - idx as f64 * config.callout_spacing;
    }
}
