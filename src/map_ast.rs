#[derive(Debug, Clone, PartialEq)]
pub struct ConceptMap {
    pub nodes: Vec<NodeDecl>,
    pub links: Vec<LateralLink>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeDecl {
    pub id: String,
    pub concept: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LateralLink {
    pub id: String,
    pub from: String,
    pub to: String,
    pub relation: Relation,
}

/// Category of a lateral link between two concepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Analogy,
    Pattern,
    Contrast,
    Association,
}

impl Relation {
    pub fn as_str(self) -> &'static str {
        match self {
            Relation::Analogy => "analogy",
            Relation::Pattern => "pattern",
            Relation::Contrast => "contrast",
            Relation::Association => "association",
        }
    }

    pub fn parse(s: &str) -> Option<Relation> {
        match s {
            "analogy" => Some(Relation::Analogy),
            "pattern" => Some(Relation::Pattern),
            "contrast" => Some(Relation::Contrast),
            "association" => Some(Relation::Association),
            _ => None,
        }
    }
}
