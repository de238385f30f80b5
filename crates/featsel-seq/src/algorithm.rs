// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use std::str::FromStr;

/// Which way the outer step moves a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Start from no features and add one per outer step.
    Forward,
    /// Start from all features and remove one per outer step.
    Backward,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Forward => write!(f, "Forward"),
            Direction::Backward => write!(f, "Backward"),
        }
    }
}

/// The four sequential selection strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionAlgorithm {
    /// Sequential forward selection.
    Sfs,
    /// Sequential backward selection.
    Sbs,
    /// Sequential floating forward selection.
    Sffs,
    /// Sequential floating backward selection.
    Sfbs,
}

impl SelectionAlgorithm {
    pub const ALL: [SelectionAlgorithm; 4] = [
        SelectionAlgorithm::Sfs,
        SelectionAlgorithm::Sbs,
        SelectionAlgorithm::Sffs,
        SelectionAlgorithm::Sfbs,
    ];

    #[inline]
    pub fn direction(&self) -> Direction {
        match self {
            SelectionAlgorithm::Sfs | SelectionAlgorithm::Sffs => Direction::Forward,
            SelectionAlgorithm::Sbs | SelectionAlgorithm::Sfbs => Direction::Backward,
        }
    }

    /// Returns `true` for the variants with a conditioning loop.
    #[inline]
    pub fn is_floating(&self) -> bool {
        matches!(self, SelectionAlgorithm::Sffs | SelectionAlgorithm::Sfbs)
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            SelectionAlgorithm::Sfs => "SFS",
            SelectionAlgorithm::Sbs => "SBS",
            SelectionAlgorithm::Sffs => "SFFS",
            SelectionAlgorithm::Sfbs => "SFBS",
        }
    }
}

impl std::fmt::Display for SelectionAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a name matches none of the algorithms.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown selection algorithm '{0}', expected one of SFS, SBS, SFFS, SFBS")]
pub struct ParseAlgorithmError(String);

impl FromStr for SelectionAlgorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SelectionAlgorithm::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseAlgorithmError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("sfs".parse(), Ok(SelectionAlgorithm::Sfs));
        assert_eq!("SBS".parse(), Ok(SelectionAlgorithm::Sbs));
        assert_eq!("SfFs".parse(), Ok(SelectionAlgorithm::Sffs));
        assert_eq!(" SFBS ".parse(), Ok(SelectionAlgorithm::Sfbs));
    }

    #[test]
    fn test_parse_rejects_unknown_names() {
        let err = "GA".parse::<SelectionAlgorithm>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown selection algorithm 'GA', expected one of SFS, SBS, SFFS, SFBS"
        );
    }

    #[test]
    fn test_shape() {
        assert_eq!(SelectionAlgorithm::Sfs.direction(), Direction::Forward);
        assert_eq!(SelectionAlgorithm::Sfbs.direction(), Direction::Backward);
        assert!(!SelectionAlgorithm::Sbs.is_floating());
        assert!(SelectionAlgorithm::Sffs.is_floating());
        for a in SelectionAlgorithm::ALL {
            assert_eq!(a.to_string().parse(), Ok(a));
        }
    }
}
