//! Similarity facets.
//!
//! Each facet is one precomputed similarity dimension with its own
//! matrix file.

use std::fmt;
use std::str::FromStr;

/// One similarity dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Facet {
    Tags,
    Genres,
    ProductionCompanies,
    Keywords,
    Cast,
}

impl Facet {
    /// Number of facets
    pub const COUNT: usize = 5;

    /// Every facet, in the order a recommendation round visits them
    pub const ALL: [Facet; Facet::COUNT] = [
        Facet::Tags,
        Facet::Genres,
        Facet::ProductionCompanies,
        Facet::Keywords,
        Facet::Cast,
    ];

    /// Dense index in `0..COUNT`
    pub fn index(self) -> usize {
        match self {
            Facet::Tags => 0,
            Facet::Genres => 1,
            Facet::ProductionCompanies => 2,
            Facet::Keywords => 3,
            Facet::Cast => 4,
        }
    }

    /// Identifier used in file names and on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            Facet::Tags => "tags",
            Facet::Genres => "genres",
            Facet::ProductionCompanies => "production_companies",
            Facet::Keywords => "keywords",
            Facet::Cast => "cast",
        }
    }

    /// Name of the matrix file for this facet
    pub fn file_name(self) -> String {
        format!("similarity_{}.bin", self.as_str())
    }

    /// Completes the heading "Best recommendations ..."
    pub fn caption(self) -> &'static str {
        match self {
            Facet::Tags => "are",
            Facet::Genres => "on the basis of genres are",
            Facet::ProductionCompanies => "from the same production company are",
            Facet::Keywords => "on the basis of keywords are",
            Facet::Cast => "on the basis of cast are",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Facet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "tags" => Ok(Facet::Tags),
            "genres" | "genre" => Ok(Facet::Genres),
            "production_companies" | "production_company" | "company" => {
                Ok(Facet::ProductionCompanies)
            }
            "keywords" | "keyword" => Ok(Facet::Keywords),
            "cast" => Ok(Facet::Cast),
            other => Err(format!(
                "unknown facet '{}' (expected one of: tags, genres, production_companies, keywords, cast)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_are_dense() {
        for (i, facet) in Facet::ALL.iter().enumerate() {
            assert_eq!(facet.index(), i);
        }
    }

    #[test]
    fn test_parse_round_trips_display() {
        for facet in Facet::ALL {
            assert_eq!(facet.to_string().parse::<Facet>(), Ok(facet));
        }
        assert_eq!("Production-Company".parse::<Facet>(), Ok(Facet::ProductionCompanies));
        assert!("budget".parse::<Facet>().is_err());
    }

    #[test]
    fn test_file_name() {
        assert_eq!(Facet::Cast.file_name(), "similarity_cast.bin");
    }
}
