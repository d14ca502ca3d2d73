use thiserror::Error;

/// Return the string stored under the given key, if there is one
pub fn get_str<'a>(table: &'a toml::Table, key: &str) -> Result<Option<&'a str>> {
    table.get(key)
        .map(|v| v.as_str().ok_or(Error::UnexpectedType(key.to_string(), "string")))
        .transpose()
}

/// Return the array of strings stored under the given key, if there is one
pub fn get_strings(table: &toml::Table, key: &str) -> Result<Option<Vec<String>>> {
    let Some(value) = table.get(key) else {
        return Ok(None);
    };

    value.as_array()
        .ok_or(Error::UnexpectedType(key.to_string(), "array"))?
        .iter()
        .enumerate()
        .map(|(i, v)| v.as_str()
            .map(str::to_string)
            .ok_or(Error::UnexpectedType(format!("{}[{}]", key, i), "string")))
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Expected {0} to be of type {1}")]
    UnexpectedType(String, &'static str)
}
