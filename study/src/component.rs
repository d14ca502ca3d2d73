use std::fmt::Display;

use derive_new::new;

use crate::{Fields, Lookup, keys, publication::Publication};

pub const ANNOTATION_FILE: &str = "Annotation File";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ComponentKind {
    Experiment,
    Screen,
}

impl ComponentKind {
    /// Experiments are always read before screens.
    pub const ALL: [ComponentKind; 2] = [ComponentKind::Experiment, ComponentKind::Screen];

    pub fn mandatory_keys(self) -> &'static [&'static str] {
        match self {
            Self::Experiment => keys::EXPERIMENT_MANDATORY,
            Self::Screen => keys::SCREEN_MANDATORY,
        }
    }

    pub fn optional_keys(self) -> &'static [&'static str] {
        match self {
            Self::Experiment => keys::EXPERIMENT_OPTIONAL,
            Self::Screen => keys::SCREEN_OPTIONAL,
        }
    }

    /// `Comment[IDR <kind> Name]`
    pub fn name_key(self) -> &'static str {
        self.mandatory_keys()[0]
    }

    /// The study key holding how many components of this kind there are.
    pub fn count_key(self) -> String {
        format!("Study {}s Number", self)
    }
}

impl Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Experiment => write!(f, "Experiment"),
            Self::Screen => write!(f, "Screen"),
        }
    }
}

/// An experiment or screen of a study. `fields` holds the component's own
/// values with the study's values merged over them.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Component {
    pub kind: ComponentKind,
    pub fields: Fields,
    pub publications: Vec<Publication>,
    #[new(default)]
    pub annotation_file: Option<String>,
}

impl Component {
    pub fn name(&self) -> &str {
        self.fields.get(self.kind.name_key())
            .map(String::as_str)
            .unwrap_or_default()
    }
}

impl Lookup for Component {
    fn lookup(&self, key: &str) -> Option<&str> {
        if key == ANNOTATION_FILE {
            return self.annotation_file.as_deref();
        }
        self.fields.get(key).map(String::as_str)
    }
}
