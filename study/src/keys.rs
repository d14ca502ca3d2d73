pub const STUDY_ACCESSION: &str = "Comment[IDR Study Accession]";
pub const PUBLICATION_TITLE: &str = "Study Publication Title";
pub const AUTHOR_LIST: &str = "Study Author List";
pub const PUBMED_ID: &str = "Study PubMed ID";
pub const PMC_ID: &str = "Study PMC ID";
pub const DOI: &str = "Study DOI";

pub const STUDY_MANDATORY: &[&str] = &[
    STUDY_ACCESSION,
    "Study Title",
    "Study Description",
    "Study Type",
    PUBLICATION_TITLE,
    AUTHOR_LIST,
    "Study Organism",
];

pub const STUDY_OPTIONAL: &[&str] = &[
    "Study Publication Preprint",
    PUBMED_ID,
    PMC_ID,
    DOI,
    "Study Copyright",
    "Study License",
    "Study License URL",
    "Study Data Publisher",
    "Study Data DOI",
    "Study Experiments Number",
    "Study Screens Number",
];

pub const EXPERIMENT_MANDATORY: &[&str] = &[
    "Comment[IDR Experiment Name]",
    "Experiment Description",
    "Experiment Imaging Method",
    "Experiment Number",
];

pub const EXPERIMENT_OPTIONAL: &[&str] = &[
    "Experiment Data DOI",
    "Experiment Data Publisher",
];

pub const SCREEN_MANDATORY: &[&str] = &[
    "Comment[IDR Screen Name]",
    "Screen Description",
    "Screen Imaging Method",
    "Screen Number",
    "Screen Type",
];

pub const SCREEN_OPTIONAL: &[&str] = &[
    "Screen Data DOI",
    "Screen Data Publisher",
    "Screen Technology Type",
];
