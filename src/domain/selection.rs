//! User selection of snapshot ids for the update phase

use crate::error::SelectionError;
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

/// One or more non-negative integers separated by single commas
static SELECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+,)*[0-9]+$").unwrap());

/// Ordered list of ids the user asked to update
///
/// Order and duplicates are kept as given; ids are not checked against any
/// snapshot here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<usize>,
}

impl Selection {
    /// Parses a raw `--update` argument such as `" 1, 2 ,3 "`
    ///
    /// Whitespace around each id is ignored; whitespace inside an id
    /// (`"1 2"`) is rejected.
    pub fn parse(raw: &str) -> Result<Self, SelectionError> {
        let normalized = normalize(raw);
        if !SELECTION_RE.is_match(&normalized) {
            return Err(SelectionError::Malformed {
                input: raw.to_string(),
            });
        }

        let ids = normalized
            .split(',')
            .map(|part| {
                part.parse::<usize>().map_err(|_| SelectionError::Overflow {
                    value: part.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { ids })
    }

    /// Requested ids in the order given
    pub fn ids(&self) -> &[usize] {
        &self.ids
    }
}

impl FromStr for Selection {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selection::parse(s)
    }
}

fn normalize(raw: &str) -> String {
    raw.split(',')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(",")
}
