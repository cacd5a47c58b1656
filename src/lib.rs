pub mod display_width;
pub mod force_layout;
pub mod map_ast;
pub mod map_layout;
pub mod map_parser;
pub mod map_renderer;

use map_ast::ConceptMap;

pub fn render(input: &str) -> Result<String, String> {
    render_with_options(input, None)
}

pub fn render_with_options(input: &str, max_width: Option<usize>) -> Result<String, String> {
    let map = parse_checked(input)?;
    let layout = match max_width {
        Some(w) => map_layout::compute_with_max_width(&map, w)?,
        None => map_layout::compute(&map)?,
    };
    Ok(map_renderer::render(&layout))
}

/// The raw layout mapping: one `id<TAB>x<TAB>y` line per node, in input
/// order.
pub fn coordinates(input: &str) -> Result<String, String> {
    let map = parse_checked(input)?;
    let positions = force_layout::compute(&map.nodes, &map.links);

    let mut out = String::new();
    for node in &map.nodes {
        let p = positions[&node.id];
        out.push_str(&format!("{}\t{:.1}\t{:.1}\n", node.id, p.x, p.y));
    }
    Ok(out)
}

fn parse_checked(input: &str) -> Result<ConceptMap, String> {
    let trimmed = input.trim_start();
    if !trimmed.starts_with("curiosity") {
        let first_word = trimmed.split_whitespace().next().unwrap_or("(empty)");
        return Err(format!("unknown map type: {first_word}"));
    }
    map_parser::parse_map(input)
}
