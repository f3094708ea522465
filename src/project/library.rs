//! Library references as stored in project settings: `haxelib|<name>|<version>`.

use std::fmt;
use std::str::FromStr;

use smol_str::SmolStr;
use thiserror::Error;

const PREFIX: &str = "haxelib";
const SEPARATOR: char = '|';

/// A library dependency, e.g. `haxelib|lime|8.1.2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LibraryRef {
    pub name: SmolStr,
    pub version: SmolStr,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryParseError {
    #[error("expected 3 `|`-separated fields, found {0}")]
    FieldCount(usize),
    #[error("unknown library source `{0}`, expected `haxelib`")]
    UnknownSource(String),
    #[error("library name is empty")]
    EmptyName,
}

impl LibraryRef {
    pub fn new(name: impl Into<SmolStr>, version: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for LibraryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{SEPARATOR}{}{SEPARATOR}{}", self.name, self.version)
    }
}

impl FromStr for LibraryRef {
    type Err = LibraryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(SEPARATOR).collect();
        let [source, name, version] = fields.as_slice() else {
            return Err(LibraryParseError::FieldCount(fields.len()));
        };
        if *source != PREFIX {
            return Err(LibraryParseError::UnknownSource((*source).to_owned()));
        }
        if name.is_empty() {
            return Err(LibraryParseError::EmptyName);
        }
        Ok(LibraryRef::new(*name, *version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_display() {
        assert_eq!(LibraryRef::new("lime", "8.1.2").to_string(), "haxelib|lime|8.1.2");
    }

    #[test]
    fn test_pipe_is_a_literal_separator() {
        let lib: LibraryRef = "haxelib|a|1.0".parse().unwrap();
        assert_eq!(lib, LibraryRef::new("a", "1.0"));
    }

    #[test]
    fn test_empty_version_allowed() {
        let lib: LibraryRef = "haxelib|openfl|".parse().unwrap();
        assert_eq!(lib.version, "");
    }

    #[rstest]
    #[case("", LibraryParseError::FieldCount(1))]
    #[case("haxelib", LibraryParseError::FieldCount(1))]
    #[case("haxelib|a", LibraryParseError::FieldCount(2))]
    #[case("haxelib|a|1.0|extra", LibraryParseError::FieldCount(4))]
    #[case("git|a|1.0", LibraryParseError::UnknownSource("git".to_owned()))]
    #[case("haxelib||1.0", LibraryParseError::EmptyName)]
    fn test_rejects(#[case] input: &str, #[case] expected: LibraryParseError) {
        assert_eq!(input.parse::<LibraryRef>().unwrap_err(), expected);
    }
}
