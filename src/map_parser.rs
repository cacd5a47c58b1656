use winnow::prelude::*;
use winnow::ascii::{line_ending, space0};
use winnow::combinator::{alt, opt, repeat};
use winnow::token::take_while;

use crate::map_ast::*;

/// Parse the `curiosity` text format:
///
/// ```text
/// curiosity
///     yeast[Wild yeast cultures]
///     yeast -->|analogy| consensus[Leaderless agreement]
///     consensus --> flocking & murmuration
/// ```
pub fn parse_map(input: &str) -> Result<ConceptMap, String> {
    let mut rest = input;
    let map = concept_map(&mut rest).map_err(|_| syntax_error(rest))?;
    if !rest.trim().is_empty() {
        return Err(syntax_error(rest));
    }
    Ok(map)
}

fn syntax_error(rest: &str) -> String {
    let context = rest.lines().next().unwrap_or("").trim();
    let context_display = if context.chars().count() > 40 {
        format!("{}...", context.chars().take(40).collect::<String>())
    } else {
        context.to_string()
    };
    format!("syntax error in curiosity map: unexpected `{context_display}`")
}

fn concept_map(input: &mut &str) -> winnow::Result<ConceptMap> {
    space0.parse_next(input)?;
    "curiosity".parse_next(input)?;
    space0.parse_next(input)?;
    opt(line_ending).parse_next(input)?;

    let mut nodes: Vec<NodeDecl> = Vec::new();
    let mut links: Vec<LateralLink> = Vec::new();

    let lines: Vec<Option<MapLine>> = repeat(0.., map_line).parse_next(input)?;
    for line in lines.into_iter().flatten() {
        collect_line(line, &mut nodes, &mut links);
    }

    Ok(ConceptMap { nodes, links })
}

#[derive(Debug)]
enum MapLine {
    Link(Vec<(NodeDecl, NodeDecl, Relation)>),
    Node(NodeDecl),
}

fn collect_line(line: MapLine, nodes: &mut Vec<NodeDecl>, links: &mut Vec<LateralLink>) {
    match line {
        MapLine::Link(items) => {
            for (from, to, relation) in items {
                let id = format!("e{}", links.len() + 1);
                links.push(LateralLink {
                    id,
                    from: from.id.clone(),
                    to: to.id.clone(),
                    relation,
                });
                add_node(nodes, from);
                add_node(nodes, to);
            }
        }
        MapLine::Node(decl) => add_node(nodes, decl),
    }
}

fn add_node(nodes: &mut Vec<NodeDecl>, decl: NodeDecl) {
    if !nodes.iter().any(|n| n.id == decl.id) {
        nodes.push(decl);
    }
}

fn map_line(input: &mut &str) -> winnow::Result<Option<MapLine>> {
    space0.parse_next(input)?;

    if input.is_empty() {
        return Err(winnow::error::ParserError::from_input(input));
    }

    alt((
        blank_line.map(|_| None),
        link_line.map(Some),
        node_line.map(Some),
    ))
    .parse_next(input)
}

fn blank_line(input: &mut &str) -> winnow::Result<()> {
    line_ending.void().parse_next(input)
}

fn identifier<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_').parse_next(input)
}

fn node_ref(input: &mut &str) -> winnow::Result<NodeDecl> {
    let id = identifier.parse_next(input)?;
    let concept = opt(bracketed_concept).parse_next(input)?;
    Ok(NodeDecl {
        id: id.to_string(),
        concept: concept.unwrap_or_else(|| id.to_string()),
    })
}

fn bracketed_concept(input: &mut &str) -> winnow::Result<String> {
    "[".parse_next(input)?;
    let text = quoted_inner('"', ']').parse_next(input)?;
    "]".parse_next(input)?;
    Ok(text)
}

fn quoted_inner(quote: char, closer: char) -> impl FnMut(&mut &str) -> winnow::Result<String> {
    move |input: &mut &str| {
        if input.starts_with(quote) {
            let _q: char = winnow::token::any.parse_next(input)?;
            let text = take_while(1.., move |c: char| c != quote).parse_next(input)?;
            let result = text.to_string();
            let _q2: char = winnow::token::any.parse_next(input)?;
            Ok(result)
        } else {
            let text = take_while(1.., move |c: char| c != closer).parse_next(input)?;
            Ok(text.to_string())
        }
    }
}

fn relation_tag(input: &mut &str) -> winnow::Result<Relation> {
    "|".parse_next(input)?;
    let word = take_while(1.., |c: char| c != '|' && c != '\n' && c != '\r').parse_next(input)?;
    "|".parse_next(input)?;
    match Relation::parse(word.trim()) {
        Some(relation) => Ok(relation),
        None => Err(winnow::error::ParserError::from_input(input)),
    }
}

fn link_line(input: &mut &str) -> winnow::Result<MapLine> {
    let from = node_ref.parse_next(input)?;
    space0.parse_next(input)?;
    "-->".parse_next(input)?;
    let relation = opt(relation_tag)
        .parse_next(input)?
        .unwrap_or(Relation::Association);
    space0.parse_next(input)?;
    let first_to = node_ref.parse_next(input)?;

    let mut targets = vec![first_to];
    loop {
        space0.parse_next(input)?;
        if opt("&").parse_next(input)?.is_none() {
            break;
        }
        space0.parse_next(input)?;
        targets.push(node_ref.parse_next(input)?);
    }
    opt(line_ending).parse_next(input)?;

    Ok(MapLine::Link(
        targets
            .into_iter()
            .map(|to| (from.clone(), to, relation))
            .collect(),
    ))
}

fn node_line(input: &mut &str) -> winnow::Result<MapLine> {
    let decl = node_ref.parse_next(input)?;
    space0.parse_next(input)?;
    opt(line_ending).parse_next(input)?;
    Ok(MapLine::Node(decl))
}
