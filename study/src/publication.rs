use derive_new::new;

use crate::{Error, Fields, Lookup, Result, keys};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Publication {
    pub title: String,
    pub authors: String,
    #[new(default)]
    pub pubmed_id: Option<String>,
    #[new(default)]
    pub pmc_id: Option<String>,
    /// The bare DOI, without its `https://doi.org/` prefix, so reports link it
    /// once as `<doi> https://dx.doi.org/<doi>`.
    #[new(default)]
    pub doi: Option<String>,
}

impl Lookup for Publication {
    fn lookup(&self, key: &str) -> Option<&str> {
        match key {
            "Title" => Some(self.title.as_str()),
            "Author List" => Some(self.authors.as_str()),
            "PubMed ID" => self.pubmed_id.as_deref(),
            "PMC ID" => self.pmc_id.as_deref(),
            "DOI" => self.doi.as_deref(),
            _ => None,
        }
    }
}

/// Pair the tab separated titles and author lists, then attach ids by position.
pub fn from_study(fields: &Fields) -> Result<Vec<Publication>> {
    let titles = split(fields, keys::PUBLICATION_TITLE)?;
    let authors = split(fields, keys::AUTHOR_LIST)?;
    if titles.len() != authors.len() {
        return Err(Error::MismatchedPublications(titles.len(), authors.len()));
    }

    let mut publications = titles.into_iter()
        .zip(authors)
        .map(|(title, authors)| Publication::new(title.to_string(), authors.to_string()))
        .collect::<Vec<_>>();

    attach_ids(fields, keys::PUBMED_ID, &mut publications, pubmed_id, |p, id| p.pubmed_id = Some(id))?;
    attach_ids(fields, keys::PMC_ID, &mut publications, pmc_id, |p, id| p.pmc_id = Some(id))?;
    attach_ids(fields, keys::DOI, &mut publications, doi, |p, id| p.doi = Some(id))?;

    Ok(publications)
}

fn split<'a>(fields: &'a Fields, key: &'static str) -> Result<Vec<&'a str>> {
    fields.get(key)
        .map(|v| v.split('\t').collect())
        .ok_or(Error::MissingKey(key))
}

fn attach_ids(
    fields: &Fields,
    key: &'static str,
    publications: &mut [Publication],
    validate: impl Fn(&str) -> Option<&str>,
    set: impl Fn(&mut Publication, String),
) -> Result<()> {
    let Some(value) = fields.get(key) else {
        return Ok(());
    };

    for (i, id) in value.split('\t').enumerate() {
        if id.is_empty() {
            continue;
        }
        let id = validate(id)
            .ok_or_else(|| Error::InvalidId(key, id.to_string()))?;
        let publication = publications.get_mut(i)
            .ok_or_else(|| Error::UnmatchedId(key, id.to_string()))?;
        set(publication, id.to_string());
    }

    Ok(())
}

fn starts_with_digit(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_digit())
}

fn pubmed_id(id: &str) -> Option<&str> {
    starts_with_digit(id).then_some(id)
}

fn pmc_id(id: &str) -> Option<&str> {
    id.strip_prefix("PMC")
        .filter(|digits| starts_with_digit(digits))
        .map(|_| id)
}

/// `http(s)://(dx.)doi.org/<doi>` yields the bare `<doi>`.
fn doi(id: &str) -> Option<&str> {
    let rest = id.strip_prefix("https://")
        .or_else(|| id.strip_prefix("http://"))?;
    let rest = rest.strip_prefix("dx.").unwrap_or(rest);
    rest.strip_prefix("doi.org/")
}
