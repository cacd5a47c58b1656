use crate::display_width::{display_width, truncate_width};
use crate::force_layout;
use crate::map_ast::{ConceptMap, Relation};

#[derive(Debug, Clone, PartialEq)]
pub struct MapLayout {
    pub nodes: Vec<NodeLayout>,
    pub edges: Vec<EdgeLayout>,
    pub width: usize,
    pub height: usize,
    /// Links dropped because an endpoint id is not in the node set.
    pub skipped_links: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeLayout {
    pub id: String,
    pub concept: String,
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    pub center_x: usize,
    pub center_y: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLayout {
    pub from_id: String,
    pub to_id: String,
    pub relation: Relation,
}

const DEFAULT_WIDTH: usize = 100;
const MAX_LABEL_WIDTH: usize = 32;
const BOX_HEIGHT: usize = 3;
// Terminal cells are roughly twice as tall as wide.
const ROW_ASPECT: f64 = 0.5;

pub fn compute(map: &ConceptMap) -> Result<MapLayout, String> {
    compute_with_max_width(map, DEFAULT_WIDTH)
}

/// Fit the force-directed positions onto a character grid at most
/// `max_width` columns wide. Box corners land on the scaled node
/// positions; the caller renders from there.
pub fn compute_with_max_width(map: &ConceptMap, max_width: usize) -> Result<MapLayout, String> {
    if map.nodes.is_empty() {
        return Err("no nodes found".to_string());
    }

    let labels: Vec<String> = map
        .nodes
        .iter()
        .map(|n| truncate_width(&n.concept, MAX_LABEL_WIDTH))
        .collect();
    let max_box = labels
        .iter()
        .map(|label| display_width(label) + 4)
        .max()
        .unwrap_or(0);
    if max_box > max_width {
        return Err(format!("curiosity map too wide for {max_width} columns"));
    }
    let avail = max_width - max_box;

    let positions = force_layout::compute(&map.nodes, &map.links);

    let min_x = fold_coord(map, &positions, f64::min, |p| p.x);
    let max_x = fold_coord(map, &positions, f64::max, |p| p.x);
    let min_y = fold_coord(map, &positions, f64::min, |p| p.y);
    let max_y = fold_coord(map, &positions, f64::max, |p| p.y);

    // One uniform scale serves both axes; rows are compressed for cell
    // aspect. A degenerate span collapses to column zero instead of
    // amplifying float noise.
    let denom = (max_x - min_x).max((max_y - min_y) * ROW_ASPECT);
    let scale = if denom <= f64::EPSILON {
        0.0
    } else {
        avail as f64 / denom
    };

    let mut nodes = Vec::new();
    for (node, label) in map.nodes.iter().zip(labels) {
        let p = positions[&node.id];
        let x = ((p.x - min_x) * scale).round() as usize;
        let y = ((p.y - min_y) * scale * ROW_ASPECT).round() as usize;
        let w = display_width(&label) + 4;
        nodes.push(NodeLayout {
            id: node.id.clone(),
            concept: label,
            x,
            y,
            width: w,
            height: BOX_HEIGHT,
            center_x: x + w / 2,
            center_y: y + 1,
        });
    }

    let mut edges = Vec::new();
    let mut skipped_links = 0;
    for link in &map.links {
        if positions.contains_key(&link.from) && positions.contains_key(&link.to) {
            edges.push(EdgeLayout {
                from_id: link.from.clone(),
                to_id: link.to.clone(),
                relation: link.relation,
            });
        } else {
            skipped_links += 1;
        }
    }

    let width = nodes.iter().map(|n| n.x + n.width).max().unwrap_or(0);
    let height = nodes.iter().map(|n| n.y + n.height).max().unwrap_or(0);

    Ok(MapLayout {
        nodes,
        edges,
        width,
        height,
        skipped_links,
    })
}

fn fold_coord(
    map: &ConceptMap,
    positions: &std::collections::HashMap<String, force_layout::Point>,
    fold: fn(f64, f64) -> f64,
    coord: fn(force_layout::Point) -> f64,
) -> f64 {
    map.nodes
        .iter()
        .map(|n| coord(positions[&n.id]))
        .reduce(fold)
        .unwrap_or(0.0)
}
