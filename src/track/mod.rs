//! Building the repeating track: one canonical cycle plus presentation clones.

use crate::config::CloneStrategy;
use crate::error::RenderError;
use crate::host::Host;

pub type RenderFn<T, N> = Box<dyn Fn(&T, usize) -> anyhow::Result<N>>;

/// Items plus how to turn them into host nodes.
pub struct Content<T, N> {
    items: Vec<T>,
    render: RenderFn<T, N>,
    separator: Option<N>,
    wrapper_class: Option<String>,
}

impl<T, N> Content<T, N> {
    pub fn new(items: Vec<T>, render: impl Fn(&T, usize) -> anyhow::Result<N> + 'static) -> Self {
        Self { items, render: Box::new(render), separator: None, wrapper_class: None }
    }

    pub fn with_separator(mut self, separator: N) -> Self {
        self.separator = Some(separator);
        self
    }

    pub fn with_wrapper_class(mut self, class: impl Into<String>) -> Self {
        self.wrapper_class = Some(class.into());
        self
    }

    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn wrapper_class(&self) -> Option<&str> {
        self.wrapper_class.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Item(usize),
    Separator,
    /// Stand-in for an item whose render function failed.
    Placeholder(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackNode<N> {
    pub node: N,
    pub role: NodeRole,
    /// 0 for the canonical cycle, 1.. for clones.
    pub cycle: usize,
}

impl<N> TrackNode<N> {
    pub fn is_clone(&self) -> bool {
        self.cycle > 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track<N> {
    nodes: Vec<TrackNode<N>>,
    cycle_len: usize,
    clones: usize,
    centered: bool,
    wrapper_class: Option<String>,
}

impl<N> Track<N> {
    pub fn empty() -> Self {
        Self { nodes: Vec::new(), cycle_len: 0, clones: 0, centered: true, wrapper_class: None }
    }

    pub fn nodes(&self) -> &[TrackNode<N>] {
        &self.nodes
    }

    pub fn canonical(&self) -> &[TrackNode<N>] {
        &self.nodes[..self.cycle_len]
    }

    pub fn cycle_len(&self) -> usize {
        self.cycle_len
    }

    pub fn clones(&self) -> usize {
        self.clones
    }

    pub fn is_centered(&self) -> bool {
        self.centered
    }

    pub fn wrapper_class(&self) -> Option<&str> {
        self.wrapper_class.as_deref()
    }
}

/// Render one cycle. A failing item becomes a placeholder; the rest still render.
pub fn render_cycle<T, H: Host>(content: &Content<T, H::Node>, host: &H) -> Vec<TrackNode<H::Node>> {
    let mut nodes = Vec::with_capacity(content.items.len() * 2);
    for (index, item) in content.items.iter().enumerate() {
        match (content.render)(item, index) {
            Ok(node) => nodes.push(TrackNode { node, role: NodeRole::Item(index), cycle: 0 }),
            Err(e) => {
                let error = RenderError::new(index, format!("{e:#}"));
                log::warn!("{error}");
                nodes.push(TrackNode {
                    node: host.error_placeholder(&error),
                    role: NodeRole::Placeholder(index),
                    cycle: 0,
                });
            }
        }
        if let Some(sep) = &content.separator {
            nodes.push(TrackNode { node: sep.clone(), role: NodeRole::Separator, cycle: 0 });
        }
    }
    nodes
}

/// One cycle's width: every child is followed by a gap, including the wrap-around one.
pub fn cycle_width(widths: &[f32], gap: f32) -> f32 {
    widths.iter().sum::<f32>() + widths.len() as f32 * gap
}

pub fn should_center(node_count: usize, cycle_width: f32, container_width: f32, center_if_short: bool) -> bool {
    node_count == 0 || cycle_width <= 0.0 || (center_if_short && cycle_width < container_width)
}

/// Minimal clone count `c` with `(c + 1) * cycle >= container + cycle` under `Auto`.
pub fn clone_count(strategy: CloneStrategy, cycle_width: f32, container_width: f32) -> usize {
    match strategy {
        CloneStrategy::Exact(n) => n as usize,
        CloneStrategy::Auto if cycle_width > 0.0 => (container_width / cycle_width).ceil().max(0.0) as usize,
        CloneStrategy::Auto => 0,
    }
}

/// Canonical cycle followed by `clones` presentation copies made by the host.
pub fn assemble<H: Host>(
    host: &H,
    canonical: Vec<TrackNode<H::Node>>,
    clones: usize,
    centered: bool,
    wrapper_class: Option<String>,
) -> Track<H::Node> {
    let clones = if centered { 0 } else { clones };
    let cycle_len = canonical.len();
    let mut nodes = Vec::with_capacity(cycle_len * (clones + 1));
    for cycle in 1..=clones {
        for original in &canonical {
            nodes.push(TrackNode {
                node: host.presentation_clone(&original.node),
                role: original.role,
                cycle,
            });
        }
    }
    nodes.splice(0..0, canonical);
    Track { nodes, cycle_len, clones, centered, wrapper_class }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::mock::{MockHost, MockNode};

    fn words(items: &[&str]) -> Content<String, MockNode> {
        Content::new(items.iter().map(|s| s.to_string()).collect(), |s: &String, _| {
            Ok(MockNode::new(s, s.len() as f32 * 10.0))
        })
    }

    // ── clone math ──────────────────────────────────────────────────────

    #[test]
    fn auto_clones_cover_container_plus_one_cycle() {
        assert_eq!(clone_count(CloneStrategy::Auto, 400.0, 1000.0), 3);
        for (w, c) in [(400.0, 1000.0), (250.0, 1000.0), (999.0, 1000.0), (1500.0, 1000.0)] {
            let n = clone_count(CloneStrategy::Auto, w, c);
            assert!((n as f32 + 1.0) * w >= c + w, "w={w} c={c} n={n}");
            if n > 0 {
                assert!((n as f32) * w < c + w, "not minimal: w={w} c={c} n={n}");
            }
        }
    }

    #[test]
    fn exact_strategy_is_taken_verbatim() {
        assert_eq!(clone_count(CloneStrategy::Exact(5), 400.0, 1000.0), 5);
    }

    #[test]
    fn zero_width_cycle_needs_no_clones() {
        assert_eq!(clone_count(CloneStrategy::Auto, 0.0, 1000.0), 0);
    }

    #[test]
    fn centering_rules() {
        assert!(should_center(0, 0.0, 1000.0, false));
        assert!(should_center(3, 800.0, 1000.0, true));
        assert!(!should_center(3, 800.0, 1000.0, false));
        assert!(!should_center(3, 1200.0, 1000.0, true));
    }

    #[test]
    fn cycle_width_adds_one_gap_per_child() {
        assert_eq!(cycle_width(&[100.0, 100.0, 100.0], 10.0), 330.0);
        assert_eq!(cycle_width(&[], 10.0), 0.0);
    }

    // ── rendering ───────────────────────────────────────────────────────

    #[test]
    fn separator_follows_every_item() {
        let host = MockHost::new(1000.0);
        let content = words(&["a", "b"]).with_separator(MockNode::new("|", 5.0));
        let roles: Vec<_> = render_cycle(&content, &host).iter().map(|n| n.role).collect();
        assert_eq!(
            roles,
            vec![NodeRole::Item(0), NodeRole::Separator, NodeRole::Item(1), NodeRole::Separator]
        );
    }

    #[test]
    fn failing_item_becomes_placeholder_only() {
        let host = MockHost::new(1000.0);
        let content = Content::new(vec![1, 2, 3], |n: &i32, _| {
            if *n == 2 {
                anyhow::bail!("broken image");
            }
            Ok(MockNode::new(&n.to_string(), 50.0))
        });
        let nodes = render_cycle(&content, &host);
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[1].role, NodeRole::Placeholder(1));
        assert!(nodes[1].node.label.contains("broken image"));
        assert_eq!(nodes[2].role, NodeRole::Item(2));
    }

    // ── assembly ────────────────────────────────────────────────────────

    #[test]
    fn clones_are_marked_and_stripped() {
        let host = MockHost::new(1000.0);
        let content = words(&["x", "y"]);
        let canonical = render_cycle(&content, &host);
        let track = assemble(&host, canonical, 2, false, Some("ticker".into()));
        assert_eq!(track.nodes().len(), 6);
        assert_eq!(track.canonical().len(), 2);
        assert!(track.canonical().iter().all(|n| !n.is_clone() && !n.node.presentation));
        assert!(track.nodes()[2..].iter().all(|n| n.is_clone() && n.node.presentation));
        assert_eq!(track.nodes()[5].cycle, 2);
        assert_eq!(track.wrapper_class(), Some("ticker"));
    }

    #[test]
    fn centered_track_has_no_clones() {
        let host = MockHost::new(1000.0);
        let canonical = render_cycle(&words(&["x"]), &host);
        let track = assemble(&host, canonical, 4, true, None);
        assert!(track.is_centered());
        assert_eq!(track.clones(), 0);
        assert_eq!(track.nodes().len(), 1);
    }
}
