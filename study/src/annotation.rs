use itertools::Itertools;
use tracing::debug;

use crate::{Lookup, component::{ANNOTATION_FILE, Component, ComponentKind}, keys};

enum Part {
    Key(&'static str),
    Text(&'static str),
}

use Part::{Key, Text};

type Pair = (&'static str, &'static [Part]);

const EXPERIMENT_TOP: &[Pair] = &[
    ("Study Type", &[Key("Study Type")]),
    ("Organism", &[Key("Study Organism")]),
    ("Imaging Method", &[Key("Experiment Imaging Method")]),
];

const SCREEN_TOP: &[Pair] = &[
    ("Study Type", &[Key("Study Type")]),
    ("Organism", &[Key("Study Organism")]),
    ("Screen Type", &[Key("Screen Type")]),
    ("Screen Technology Type", &[Key("Screen Technology Type")]),
    ("Imaging Method", &[Key("Screen Imaging Method")]),
];

const PUBLICATION: &[Pair] = &[
    ("Publication Title", &[Key("Title")]),
    ("Publication Authors", &[Key("Author List")]),
    ("Pubmed ID", &[Key("PubMed ID"), Text(" https://www.ncbi.nlm.nih.gov/pubmed/"), Key("PubMed ID")]),
    ("PMC ID", &[Key("PMC ID")]),
    ("Publication DOI", &[Key("DOI"), Text(" https://dx.doi.org/"), Key("DOI")]),
];

const BOTTOM: &[Pair] = &[
    ("License", &[Key("Study License"), Text(" "), Key("Study License URL")]),
    ("Copyright", &[Key("Study Copyright")]),
    ("Data Publisher", &[Key("Study Data Publisher")]),
    ("Data DOI", &[Key("Study Data DOI"), Text(" https://dx.doi.org/"), Key("Study Data DOI")]),
    ("Annotation File", &[Key(ANNOTATION_FILE)]),
];

/// The name, description and key/value map published for a screen or experiment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub name: String,
    pub description: String,
    pub map: Vec<(String, String)>,
}

impl Annotation {
    pub fn new(component: &Component) -> Self {
        let kind = component.kind;
        let description = format!(
            "Publication Title\n{}\n\n{} Description\n{}",
            component.lookup(keys::PUBLICATION_TITLE).unwrap_or_default(),
            kind,
            component.lookup(&format!("{kind} Description")).unwrap_or_default(),
        );

        let top = match kind {
            ComponentKind::Experiment => EXPERIMENT_TOP,
            ComponentKind::Screen => SCREEN_TOP,
        };

        let mut map = Vec::new();
        add_pairs(&mut map, top, component);
        for publication in &component.publications {
            add_pairs(&mut map, PUBLICATION, publication);
        }
        add_pairs(&mut map, BOTTOM, component);

        Self {
            name: component.name().to_string(),
            description,
            map,
        }
    }

    pub fn report(&self) -> String {
        let map = self.map.iter()
            .map(|(key, value)| format!("{key}\t{value}"))
            .join("\n");
        format!("description:\n{}\n\nmap:\n{}\n", self.description, map)
    }
}

fn add_pairs(map: &mut Vec<(String, String)>, pairs: &[Pair], source: &impl Lookup) {
    for (key, parts) in pairs {
        match render(parts, source) {
            Ok(value) => map.push((key.to_string(), value)),
            Err(missing) => debug!("Missing {missing}"),
        }
    }
}

/// Fill in the parts, or name the first key with no value.
fn render(parts: &[Part], source: &impl Lookup) -> Result<String, &'static str> {
    parts.iter()
        .map(|part| match part {
            Key(key) => source.lookup(key).ok_or(*key),
            Text(text) => Ok(*text),
        })
        .collect()
}
