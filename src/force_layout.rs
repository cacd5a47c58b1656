use std::collections::HashMap;

use crate::map_ast::{LateralLink, NodeDecl};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Tuning knobs for the force simulation. `Default` matches the stock
/// curiosity-map rendering: an 800x600 canvas and 50 passes.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub iterations: usize,
    pub canvas_area: f64,
    pub min_radius: f64,
    pub radius_per_node: f64,
    pub repulsion_strength: f64,
    pub attraction_strength: f64,
    pub max_force: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: 50,
            canvas_area: 800.0 * 600.0,
            min_radius: 200.0,
            radius_per_node: 30.0,
            repulsion_strength: 1.0,
            attraction_strength: 0.5,
            max_force: 100.0,
        }
    }
}

pub fn compute(nodes: &[NodeDecl], links: &[LateralLink]) -> HashMap<String, Point> {
    compute_with_config(nodes, links, &LayoutConfig::default())
}

/// Place every node in 2-D with a fixed-iteration spring/repulsion
/// simulation. Deterministic for a given node/link ordering; coordinates
/// are unbounded and carry no unit, the consumer picks a viewport.
pub fn compute_with_config(
    nodes: &[NodeDecl],
    links: &[LateralLink],
    config: &LayoutConfig,
) -> HashMap<String, Point> {
    let n = nodes.len();
    if n == 0 {
        return HashMap::new();
    }

    // Start on a circle that grows with the node count so dense maps
    // begin less cramped.
    let radius = config.min_radius.max(n as f64 * config.radius_per_node);
    let mut positions: Vec<Point> = (0..n)
        .map(|i| {
            let angle = (i as f64 / n as f64) * 2.0 * std::f64::consts::PI;
            Point {
                x: angle.cos() * radius,
                y: angle.sin() * radius,
            }
        })
        .collect();

    let index: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.id.as_str(), i))
        .collect();

    // Ideal edge length for the assumed canvas.
    let k = (config.canvas_area / n as f64).sqrt();

    for _ in 0..config.iterations {
        // Every unordered pair repels.
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = positions[i].x - positions[j].x;
                let dy = positions[i].y - positions[j].y;
                let distance = (dx * dx + dy * dy).sqrt().max(1.0);

                let force = (k * k / distance).min(config.max_force) * config.repulsion_strength;
                let fx = dx / distance * force;
                let fy = dy / distance * force;

                positions[i].x += fx;
                positions[i].y += fy;
                positions[j].x -= fx;
                positions[j].y -= fy;
            }
        }

        // Linked endpoints attract. Links naming an unknown node are
        // skipped; the simulation never fails on them.
        for link in links {
            let (Some(&a), Some(&b)) = (index.get(link.from.as_str()), index.get(link.to.as_str()))
            else {
                continue;
            };

            let dx = positions[a].x - positions[b].x;
            let dy = positions[a].y - positions[b].y;
            let distance = (dx * dx + dy * dy).sqrt().max(1.0);

            let force =
                (distance * distance / k).min(config.max_force) * config.attraction_strength;
            let fx = dx / distance * force;
            let fy = dy / distance * force;

            positions[a].x -= fx;
            positions[a].y -= fy;
            positions[b].x += fx;
            positions[b].y += fy;
        }
    }

    nodes
        .iter()
        .zip(positions)
        .map(|(node, point)| (node.id.clone(), point))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map_ast::Relation;
    use pretty_assertions::assert_eq;

    fn node(id: &str) -> NodeDecl {
        NodeDecl {
            id: id.to_string(),
            concept: id.to_string(),
        }
    }

    fn link(id: &str, from: &str, to: &str) -> LateralLink {
        LateralLink {
            id: id.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            relation: Relation::Association,
        }
    }

    fn dist(positions: &HashMap<String, Point>, a: &str, b: &str) -> f64 {
        let pa = positions[a];
        let pb = positions[b];
        ((pa.x - pb.x).powi(2) + (pa.y - pb.y).powi(2)).sqrt()
    }

    fn all_finite(positions: &HashMap<String, Point>) -> bool {
        positions.values().all(|p| p.x.is_finite() && p.y.is_finite())
    }

    #[test]
    fn empty_input_empty_mapping() {
        let positions = compute(&[], &[]);
        assert!(positions.is_empty());
    }

    #[test]
    fn single_node_at_circle_start() {
        let positions = compute(&[node("solo")], &[]);
        assert_eq!(positions.len(), 1);
        let p = positions["solo"];
        assert_eq!(p.x, 200.0, "radius floor, angle zero");
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn one_entry_per_node() {
        let nodes: Vec<NodeDecl> = (0..7).map(|i| node(&format!("n{i}"))).collect();
        let positions = compute(&nodes, &[link("e1", "n0", "n3")]);
        assert_eq!(positions.len(), 7);
        for n in &nodes {
            assert!(positions.contains_key(&n.id));
        }
    }

    #[test]
    fn deterministic_across_calls() {
        let nodes = vec![node("a"), node("b"), node("c"), node("d")];
        let links = vec![link("e1", "a", "b"), link("e2", "c", "d")];
        let first = compute(&nodes, &links);
        let second = compute(&nodes, &links);
        assert_eq!(first, second);
    }

    #[test]
    fn self_loop_is_harmless() {
        let nodes = vec![node("a"), node("b")];
        let positions = compute(&nodes, &[link("e1", "a", "a")]);
        assert!(all_finite(&positions));
        // A zero-length link exerts no pull, so the result matches the
        // link-free layout exactly.
        assert_eq!(positions, compute(&nodes, &[]));
    }

    #[test]
    fn dangling_link_is_skipped() {
        let nodes = vec![node("a"), node("b")];
        let with_dangling = compute(&nodes, &[link("e1", "a", "ghost")]);
        assert!(all_finite(&with_dangling));
        assert_eq!(with_dangling, compute(&nodes, &[]));
    }

    #[test]
    fn distinct_nodes_never_coincide() {
        let nodes: Vec<NodeDecl> = (0..5).map(|i| node(&format!("n{i}"))).collect();
        let positions = compute(&nodes, &[]);
        let points: Vec<Point> = nodes.iter().map(|n| positions[&n.id]).collect();
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                assert_ne!(points[i], points[j], "nodes {i} and {j} collided");
            }
        }
    }

    #[test]
    fn linked_nodes_end_up_closer() {
        let nodes = vec![node("A"), node("B"), node("C")];
        let linked = compute(&nodes, &[link("e1", "A", "B")]);
        let unlinked = compute(&nodes, &[]);

        assert!(dist(&linked, "A", "B") < dist(&linked, "A", "C"));
        assert!(dist(&linked, "A", "B") < dist(&linked, "B", "C"));
        assert!(dist(&linked, "A", "B") < dist(&unlinked, "A", "B"));
    }

    #[test]
    fn three_node_scenario() {
        let nodes = vec![node("n1"), node("n2"), node("n3")];
        let links = vec![LateralLink {
            id: "e1".to_string(),
            from: "n1".to_string(),
            to: "n2".to_string(),
            relation: Relation::Analogy,
        }];
        let positions = compute(&nodes, &links);

        assert_eq!(positions.len(), 3);
        assert!(all_finite(&positions));
        assert!(dist(&positions, "n1", "n2") < dist(&positions, "n1", "n3"));
    }

    #[test]
    fn chain_stays_finite() {
        let nodes: Vec<NodeDecl> = (0..10).map(|i| node(&format!("n{i}"))).collect();
        let links: Vec<LateralLink> = (0..9)
            .map(|i| link(&format!("e{i}"), &format!("n{i}"), &format!("n{}", i + 1)))
            .collect();
        let positions = compute(&nodes, &links);
        assert_eq!(positions.len(), 10);
        assert!(all_finite(&positions));
    }

    #[test]
    fn more_iterations_spread_further() {
        let nodes = vec![node("a"), node("b")];
        let short = compute_with_config(
            &nodes,
            &[],
            &LayoutConfig {
                iterations: 10,
                ..LayoutConfig::default()
            },
        );
        let long = compute_with_config(
            &nodes,
            &[],
            &LayoutConfig {
                iterations: 50,
                ..LayoutConfig::default()
            },
        );
        assert!(dist(&short, "a", "b") < dist(&long, "a", "b"));
    }

    #[test]
    fn stronger_repulsion_spreads_further() {
        let nodes = vec![node("a"), node("b")];
        let normal = compute(&nodes, &[]);
        let strong = compute_with_config(
            &nodes,
            &[],
            &LayoutConfig {
                repulsion_strength: 2.0,
                ..LayoutConfig::default()
            },
        );
        assert!(dist(&normal, "a", "b") < dist(&strong, "a", "b"));
    }

    #[test]
    fn initial_circle_grows_with_node_count() {
        // 20 nodes push the start radius past the floor: 20 * 30 = 600.
        let nodes: Vec<NodeDecl> = (0..20).map(|i| node(&format!("n{i}"))).collect();
        let positions = compute_with_config(
            &nodes,
            &[],
            &LayoutConfig {
                iterations: 0,
                ..LayoutConfig::default()
            },
        );
        let p = positions["n0"];
        assert_eq!(p.x, 600.0);
        assert_eq!(p.y, 0.0);
    }
}
