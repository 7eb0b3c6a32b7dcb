//! Dataset Schema Module
//! Canonical column names, MBTI codes and temperament groups.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Name of the identifier column every dataset must carry.
pub const COUNTRY_COLUMN: &str = "Country";

/// The 16 MBTI codes in the order the dataset usually lists them.
pub const MBTI_TYPES: [&str; 16] = [
    "INFJ", "ISFJ", "INTP", "ISFP", "ENTP", "INFP", "ENTJ", "ISTP", "INTJ", "ESFP", "ESTJ",
    "ENFP", "ESTP", "ISTJ", "ENFJ", "ESFJ",
];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("CSV has no '{0}' column")]
    MissingIdentifier(String),
    #[error("No parseable ratio in any type column; check the file format")]
    NoNumericValues,
    #[error("Dataset has no '{0}' column")]
    MissingTypeColumn(String),
    #[error("{group} group is missing columns: {missing:?}")]
    MissingGroupMembers {
        group: TemperamentGroup,
        missing: Vec<String>,
    },
}

/// Named 4-type subsets. ST overlaps SJ and SP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperamentGroup {
    NF,
    NT,
    SJ,
    SP,
    ST,
}

impl TemperamentGroup {
    pub const ALL: [TemperamentGroup; 5] = [
        TemperamentGroup::NF,
        TemperamentGroup::NT,
        TemperamentGroup::SJ,
        TemperamentGroup::SP,
        TemperamentGroup::ST,
    ];

    pub fn members(self) -> [&'static str; 4] {
        match self {
            TemperamentGroup::NF => ["INFJ", "INFP", "ENFJ", "ENFP"],
            TemperamentGroup::NT => ["INTJ", "INTP", "ENTJ", "ENTP"],
            TemperamentGroup::SJ => ["ISTJ", "ISFJ", "ESTJ", "ESFJ"],
            TemperamentGroup::SP => ["ISTP", "ISFP", "ESTP", "ESFP"],
            TemperamentGroup::ST => ["ISTJ", "ESTJ", "ISTP", "ESTP"],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TemperamentGroup::NF => "NF",
            TemperamentGroup::NT => "NT",
            TemperamentGroup::SJ => "SJ",
            TemperamentGroup::SP => "SP",
            TemperamentGroup::ST => "ST",
        }
    }

    /// Short tab label used by the card page.
    pub fn label(self) -> &'static str {
        match self {
            TemperamentGroup::NF => "🌸 NF",
            TemperamentGroup::NT => "🧠 NT",
            TemperamentGroup::SJ => "🧾 SJ",
            TemperamentGroup::SP => "🎒 SP",
            TemperamentGroup::ST => "🧭 ST",
        }
    }
}

impl fmt::Display for TemperamentGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TemperamentGroup {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemperamentGroup::ALL
            .into_iter()
            .find(|g| g.name() == s)
            .ok_or(())
    }
}

/// Check whether a string is one of the 16 canonical codes.
pub fn is_mbti_code(code: &str) -> bool {
    MBTI_TYPES.contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mbti_types_are_the_full_cartesian_product() {
        let mut expected = Vec::new();
        for a in ['E', 'I'] {
            for b in ['S', 'N'] {
                for c in ['T', 'F'] {
                    for d in ['J', 'P'] {
                        expected.push(format!("{a}{b}{c}{d}"));
                    }
                }
            }
        }
        let mut actual: Vec<String> = MBTI_TYPES.iter().map(|s| s.to_string()).collect();
        actual.sort();
        expected.sort();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_group_members_are_valid_codes() {
        for group in TemperamentGroup::ALL {
            for member in group.members() {
                assert!(is_mbti_code(member), "{group}: {member}");
            }
        }
    }

    #[test]
    fn test_st_overlaps_sj_and_sp() {
        let st = TemperamentGroup::ST.members();
        let sj = TemperamentGroup::SJ.members();
        let sp = TemperamentGroup::SP.members();
        assert_eq!(st.iter().filter(|m| sj.contains(m)).count(), 2);
        assert_eq!(st.iter().filter(|m| sp.contains(m)).count(), 2);
    }

    #[test]
    fn test_group_from_str() {
        assert_eq!("NT".parse::<TemperamentGroup>(), Ok(TemperamentGroup::NT));
        assert!("INTJ".parse::<TemperamentGroup>().is_err());
        assert!("nt".parse::<TemperamentGroup>().is_err());
    }

    #[test]
    fn test_missing_members_message() {
        let err = SchemaError::MissingGroupMembers {
            group: TemperamentGroup::SP,
            missing: vec!["ESFP".to_string()],
        };
        assert_eq!(err.to_string(), "SP group is missing columns: [\"ESFP\"]");
    }
}
