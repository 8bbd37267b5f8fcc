//! Static council catalog.
//!
//! Loaded once on first access and shared for the life of the process.

use once_cell::sync::Lazy;

use super::{CouncilMember, CouncilMemberId};

struct Persona {
    id: &'static str,
    name: &'static str,
    title: &'static str,
    tags: &'static [&'static str],
    sample_line: &'static str,
}

const PERSONAS: &[Persona] = &[
    Persona {
        id: "hook-smith",
        name: "The Hook Smith",
        title: "Attention Engineer",
        tags: &["hooks", "headlines", "pattern interrupts"],
        sample_line: "If the first line doesn't stop the scroll, nothing else gets read.",
    },
    Persona {
        id: "offer-architect",
        name: "The Offer Architect",
        title: "Value Stack Designer",
        tags: &["offers", "pricing", "guarantees"],
        sample_line: "Make the offer so good they feel stupid saying no.",
    },
    Persona {
        id: "storyteller",
        name: "The Storyteller",
        title: "Narrative Strategist",
        tags: &["stories", "transformation", "emotion"],
        sample_line: "Show them the before, the after, and the bridge between.",
    },
    Persona {
        id: "proof-analyst",
        name: "The Proof Analyst",
        title: "Evidence Curator",
        tags: &["proof", "case studies", "numbers"],
        sample_line: "A claim without a number is just an opinion.",
    },
    Persona {
        id: "closer",
        name: "The Closer",
        title: "Conversion Specialist",
        tags: &["cta", "urgency", "scarcity"],
        sample_line: "Tell them exactly what to do next, and why today.",
    },
    Persona {
        id: "audience-whisperer",
        name: "The Audience Whisperer",
        title: "Customer Psychologist",
        tags: &["audience", "pain points", "objections"],
        sample_line: "Enter the conversation already happening in their head.",
    },
    Persona {
        id: "brand-voice",
        name: "The Brand Voice",
        title: "Tone Director",
        tags: &["tone", "brand", "positioning"],
        sample_line: "Sound like one person talking to one person.",
    },
    Persona {
        id: "growth-gladiator",
        name: "The Growth Gladiator",
        title: "Launch Tactician",
        tags: &["launches", "funnels", "scaling"],
        sample_line: "Test the angle small, then pour fuel on what wins.",
    },
];

static STANDARD: Lazy<CouncilCatalog> = Lazy::new(|| {
    let members = PERSONAS
        .iter()
        .filter_map(|p| {
            let id = CouncilMemberId::new(p.id).ok()?;
            CouncilMember::new(
                id,
                p.name,
                p.title,
                p.tags.iter().map(|t| t.to_string()).collect(),
                p.sample_line,
            )
            .ok()
        })
        .collect();
    CouncilCatalog::new(members)
});

/// Catalog of personas a user can seat on their council.
#[derive(Debug, Clone)]
pub struct CouncilCatalog {
    members: Vec<CouncilMember>,
}

impl CouncilCatalog {
    pub fn new(members: Vec<CouncilMember>) -> Self {
        Self { members }
    }

    /// The built-in catalog.
    pub fn standard() -> &'static CouncilCatalog {
        &STANDARD
    }

    pub fn members(&self) -> &[CouncilMember] {
        &self.members
    }

    pub fn get(&self, id: &CouncilMemberId) -> Option<&CouncilMember> {
        self.members.iter().find(|m| m.id() == id)
    }

    pub fn contains(&self, id: &CouncilMemberId) -> bool {
        self.get(id).is_some()
    }

    /// Members with the given expertise tag, in catalog order.
    pub fn with_expertise<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a CouncilMember> {
        self.members.iter().filter(move |m| m.has_expertise(tag))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_catalog_loads_every_persona() {
        assert_eq!(CouncilCatalog::standard().len(), PERSONAS.len());
    }

    #[test]
    fn standard_catalog_ids_are_unique() {
        let ids: HashSet<_> = CouncilCatalog::standard()
            .members()
            .iter()
            .map(|m| m.id().clone())
            .collect();
        assert_eq!(ids.len(), CouncilCatalog::standard().len());
    }

    #[test]
    fn every_persona_has_expertise() {
        for member in CouncilCatalog::standard().members() {
            assert!(!member.expertise_tags().is_empty(), "{}", member.id());
        }
    }

    #[test]
    fn lookup_by_id() {
        let id = CouncilMemberId::new("closer").unwrap();
        let member = CouncilCatalog::standard().get(&id).unwrap();
        assert_eq!(member.name(), "The Closer");
        assert!(!CouncilCatalog::standard().contains(&CouncilMemberId::new("nobody").unwrap()));
    }

    #[test]
    fn filter_by_expertise() {
        let names: Vec<_> = CouncilCatalog::standard()
            .with_expertise("urgency")
            .map(|m| m.name())
            .collect();
        assert_eq!(names, vec!["The Closer"]);
    }
}
