//! Paths through the key tree, written `m/44'/60'/2'/0/1'`.

use crate::{ChildNumber, Error, Result};
use core::{
    fmt::{self, Display},
    str::FromStr,
};

/// Marker for the master key at the start of every textual path.
const MASTER: &str = "m";

/// Sequence of [`ChildNumber`] steps applied from some starting key.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DerivationPath(Vec<ChildNumber>);

impl DerivationPath {
    pub fn iter(&self) -> impl Iterator<Item = ChildNumber> + '_ {
        self.0.iter().copied()
    }

    /// Number of derivation steps, which is also the depth reached from the
    /// starting key.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, child_number: ChildNumber) {
        self.0.push(child_number)
    }
}

impl Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASTER)?;
        self.iter().try_for_each(|child_number| write!(f, "/{child_number}"))
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(path: &str) -> Result<DerivationPath> {
        let steps = match path.strip_prefix(MASTER) {
            Some("") => return Ok(DerivationPath::default()),
            Some(rest) => rest.strip_prefix('/'),
            None => None,
        };

        let steps = steps.ok_or_else(|| Error::DerivationPath(format!("`{path}` does not start at `{MASTER}`")))?;
        steps.split('/').map(str::parse::<ChildNumber>).collect()
    }
}

impl FromIterator<ChildNumber> for DerivationPath {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = ChildNumber>,
    {
        DerivationPath(iter.into_iter().collect())
    }
}

impl Extend<ChildNumber> for DerivationPath {
    fn extend<T>(&mut self, iter: T)
    where
        T: IntoIterator<Item = ChildNumber>,
    {
        self.0.extend(iter)
    }
}

impl IntoIterator for DerivationPath {
    type Item = ChildNumber;
    type IntoIter = std::vec::IntoIter<ChildNumber>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
