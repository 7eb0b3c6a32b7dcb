//! Data Processor Module
//! Stateless rankings and aggregations over a loaded `CountryTable`.

use super::loader::CountryTable;
use super::schema::{SchemaError, TemperamentGroup, COUNTRY_COLUMN};
use polars::prelude::*;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("Country '{0}' is not in the dataset")]
    UnknownCountry(String),
}

/// What to rank countries by.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RatioKey {
    /// A single type column.
    Column(String),
    /// Sum of a temperament group's four member columns.
    Group(TemperamentGroup),
}

impl FromStr for RatioKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<TemperamentGroup>() {
            Ok(group) => RatioKey::Group(group),
            Err(()) => RatioKey::Column(s.to_string()),
        })
    }
}

impl fmt::Display for RatioKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatioKey::Column(name) => f.write_str(name),
            RatioKey::Group(group) => write!(f, "{}", group),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountryRatio {
    pub country: String,
    pub ratio: f64,
}

/// One row of a top-K selection.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    /// 1-based position.
    pub rank: usize,
    pub country: String,
    pub ratio: f64,
    pub percent: f64,
}

/// One type's share in a single country.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeShare {
    pub code: String,
    pub ratio: f64,
    pub percent: f64,
}

/// `round(ratio * 100, 2)`, halves rounded away from zero.
pub fn to_percent(ratio: f64) -> f64 {
    (ratio * 100.0 * 100.0).round() / 100.0
}

/// Per-country sum of a group's member columns, in row order. Not clamped.
pub fn group_sum(
    table: &CountryTable,
    group: TemperamentGroup,
) -> Result<Vec<CountryRatio>, ProcessorError> {
    let sums = group_values(table, group)?;
    Ok(table
        .countries()
        .iter()
        .zip(sums)
        .map(|(country, ratio)| CountryRatio {
            country: country.clone(),
            ratio,
        })
        .collect())
}

fn group_values(table: &CountryTable, group: TemperamentGroup) -> Result<Vec<f64>, SchemaError> {
    let missing: Vec<String> = group
        .members()
        .iter()
        .filter(|m| !table.has_type_column(m))
        .map(|m| m.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(SchemaError::MissingGroupMembers { group, missing });
    }

    let mut sums = vec![0.0; table.row_count()];
    for member in group.members() {
        for (sum, v) in sums.iter_mut().zip(table.ratios(member)?) {
            *sum += v;
        }
    }
    Ok(sums)
}

/// `Country` plus one derived column per temperament group.
pub fn group_frame(table: &CountryTable) -> Result<DataFrame, ProcessorError> {
    let mut columns = vec![Column::new(
        COUNTRY_COLUMN.into(),
        table.countries().to_vec(),
    )];
    for group in TemperamentGroup::ALL {
        columns.push(Column::new(group.name().into(), group_values(table, group)?));
    }
    Ok(DataFrame::new(columns)?)
}

fn key_values(table: &CountryTable, key: &RatioKey) -> Result<Vec<f64>, SchemaError> {
    match key {
        RatioKey::Column(name) => table.ratios(name),
        RatioKey::Group(group) => group_values(table, *group),
    }
}

/// The `k` highest-ratio countries for `key`.
///
/// Sorted by ratio descending, ties by country name ascending. Asking for more
/// rows than exist returns every row.
pub fn top_k(
    table: &CountryTable,
    key: &RatioKey,
    k: usize,
) -> Result<Vec<RankedEntry>, ProcessorError> {
    let values = key_values(table, key)?;

    let mut pairs: Vec<(&String, f64)> = table.countries().iter().zip(values).collect();
    pairs.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    Ok(pairs
        .into_iter()
        .take(k)
        .enumerate()
        .map(|(i, (country, ratio))| RankedEntry {
            rank: i + 1,
            country: country.clone(),
            ratio,
            percent: to_percent(ratio),
        })
        .collect())
}

/// All type ratios of one country, largest first (ties by code).
pub fn country_profile(
    table: &CountryTable,
    country: &str,
) -> Result<Vec<TypeShare>, ProcessorError> {
    let row = table
        .row_index(country)
        .ok_or_else(|| ProcessorError::UnknownCountry(country.to_string()))?;

    let mut shares = Vec::with_capacity(table.type_columns().len());
    for code in table.type_columns() {
        let ratio = table.ratios(code)?[row];
        shares.push(TypeShare {
            code: code.clone(),
            ratio,
            percent: to_percent(ratio),
        });
    }

    shares.sort_by(|a, b| {
        b.ratio
            .total_cmp(&a.ratio)
            .then_with(|| a.code.cmp(&b.code))
    });
    Ok(shares)
}

/// Country names sorted alphabetically, for selectors.
pub fn sorted_countries(table: &CountryTable) -> Vec<String> {
    let mut names = table.countries().to_vec();
    names.sort();
    names
}

/// `preferred` if the table has it, otherwise the first name alphabetically.
pub fn default_country(table: &CountryTable, preferred: &str) -> Option<String> {
    if table.row_index(preferred).is_some() {
        return Some(preferred.to_string());
    }
    sorted_countries(table).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::MBTI_TYPES;

    fn full_table() -> CountryTable {
        let countries = vec![
            "Japan".to_string(),
            "Korea, Republic of".to_string(),
            "Brazil".to_string(),
            "Albania".to_string(),
        ];
        let columns = MBTI_TYPES
            .iter()
            .enumerate()
            .map(|(i, code)| {
                let base = 0.01 * (i as f64 + 1.0);
                let values = match *code {
                    "INFP" => vec![0.11, 0.15, 0.09, 0.11],
                    "ENFP" => vec![0.10, 0.12, 0.13, 0.08],
                    _ => vec![base, base / 2.0, base / 3.0, base / 4.0],
                };
                (code.to_string(), values)
            })
            .collect();
        CountryTable::from_columns(countries, columns).unwrap()
    }

    #[test]
    fn test_to_percent_boundaries() {
        assert_eq!(to_percent(0.3333), 33.33);
        assert_eq!(to_percent(1.0), 100.0);
        assert_eq!(to_percent(0.0), 0.0);
        assert_eq!(to_percent(0.125), 12.5);
    }

    #[test]
    fn test_top_k_ranks_by_value_not_file_order() {
        let table = full_table();
        let top = top_k(&table, &RatioKey::Column("INFP".to_string()), 10).unwrap();

        assert_eq!(top.len(), 4);
        assert_eq!(top[0].country, "Korea, Republic of");
        assert_eq!(top[0].rank, 1);
        assert_eq!(top[0].percent, 15.0);
        // Albania and Japan tie at 0.11; alphabetical order decides.
        assert_eq!(top[1].country, "Albania");
        assert_eq!(top[2].country, "Japan");
        assert_eq!(top[3].country, "Brazil");
    }

    #[test]
    fn test_top_k_length_and_order_for_every_column() {
        let table = full_table();
        for code in table.type_columns() {
            for k in [0, 1, 3, 4, 50] {
                let top = top_k(&table, &RatioKey::Column(code.clone()), k).unwrap();
                assert_eq!(top.len(), k.min(table.row_count()));
                for pair in top.windows(2) {
                    assert!(pair[0].ratio >= pair[1].ratio);
                    if pair[0].ratio == pair[1].ratio {
                        assert!(pair[0].country < pair[1].country);
                    }
                }
            }
        }
    }

    #[test]
    fn test_top_k_unknown_column() {
        let table = full_table();
        let err = top_k(&table, &RatioKey::Column("XXXX".to_string()), 3).unwrap_err();
        assert!(matches!(
            err,
            ProcessorError::Schema(SchemaError::MissingTypeColumn(_))
        ));
    }

    #[test]
    fn test_group_sum_is_exact_member_sum() {
        let table = full_table();
        for group in TemperamentGroup::ALL {
            let sums = group_sum(&table, group).unwrap();
            for (row, entry) in sums.iter().enumerate() {
                let expected: f64 = group
                    .members()
                    .iter()
                    .map(|m| table.ratios(m).unwrap()[row])
                    .sum();
                assert_eq!(entry.ratio, expected);
                assert_eq!(entry.country, table.countries()[row]);
            }
        }
    }

    #[test]
    fn test_group_sum_ignores_non_members() {
        let table = full_table();
        let before = group_sum(&table, TemperamentGroup::NT).unwrap();

        let columns = table
            .type_columns()
            .iter()
            .map(|code| {
                let mut values = table.ratios(code).unwrap();
                if !TemperamentGroup::NT.members().contains(&code.as_str()) {
                    values.iter_mut().for_each(|v| *v += 0.5);
                }
                (code.clone(), values)
            })
            .collect();
        let changed = CountryTable::from_columns(table.countries().to_vec(), columns).unwrap();

        assert_eq!(group_sum(&changed, TemperamentGroup::NT).unwrap(), before);
    }

    #[test]
    fn test_group_sum_is_not_clamped() {
        let table = CountryTable::from_columns(
            vec!["Noisy".to_string()],
            vec![
                ("INFJ".to_string(), vec![0.4]),
                ("INFP".to_string(), vec![0.4]),
                ("ENFJ".to_string(), vec![0.2]),
                ("ENFP".to_string(), vec![0.25]),
            ],
        )
        .unwrap();
        let sums = group_sum(&table, TemperamentGroup::NF).unwrap();
        assert!(sums[0].ratio > 1.0);
    }

    #[test]
    fn test_group_sum_missing_members() {
        let table = CountryTable::from_columns(
            vec!["Japan".to_string()],
            vec![
                ("INTJ".to_string(), vec![0.1]),
                ("INTP".to_string(), vec![0.1]),
            ],
        )
        .unwrap();
        match group_sum(&table, TemperamentGroup::NT) {
            Err(ProcessorError::Schema(SchemaError::MissingGroupMembers { group, missing })) => {
                assert_eq!(group, TemperamentGroup::NT);
                assert_eq!(missing, vec!["ENTJ", "ENTP"]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_top_k_by_group() {
        let table = full_table();
        let top = top_k(&table, &RatioKey::Group(TemperamentGroup::NF), 2).unwrap();
        let sums = group_sum(&table, TemperamentGroup::NF).unwrap();
        let best = sums
            .iter()
            .max_by(|a, b| a.ratio.total_cmp(&b.ratio))
            .unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].country, best.country);
        assert_eq!(top[0].ratio, best.ratio);
    }

    #[test]
    fn test_group_frame_columns() {
        let table = full_table();
        let frame = group_frame(&table).unwrap();
        let names: Vec<String> = frame
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, vec!["Country", "NF", "NT", "SJ", "SP", "ST"]);
        assert_eq!(frame.height(), 4);

        let st: Vec<f64> = frame
            .column("ST")
            .unwrap()
            .f64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        let expected: Vec<f64> = group_sum(&table, TemperamentGroup::ST)
            .unwrap()
            .into_iter()
            .map(|c| c.ratio)
            .collect();
        assert_eq!(st, expected);
    }

    #[test]
    fn test_ratio_key_parsing() {
        assert_eq!(
            "SJ".parse::<RatioKey>().unwrap(),
            RatioKey::Group(TemperamentGroup::SJ)
        );
        assert_eq!(
            "ISTJ".parse::<RatioKey>().unwrap(),
            RatioKey::Column("ISTJ".to_string())
        );
        assert_eq!(RatioKey::Group(TemperamentGroup::SP).to_string(), "SP");
    }

    #[test]
    fn test_country_profile_sorted() {
        let table = full_table();
        let profile = country_profile(&table, "Korea, Republic of").unwrap();
        assert_eq!(profile.len(), 16);
        assert_eq!(profile[0].code, "INFP");
        assert_eq!(profile[0].percent, 15.0);
        assert_eq!(profile[1].code, "ENFP");
        for pair in profile.windows(2) {
            assert!(pair[0].ratio >= pair[1].ratio);
        }
    }

    #[test]
    fn test_country_profile_unknown() {
        let table = full_table();
        assert!(matches!(
            country_profile(&table, "Atlantis"),
            Err(ProcessorError::UnknownCountry(_))
        ));
    }

    #[test]
    fn test_default_country() {
        let table = full_table();
        assert_eq!(
            default_country(&table, "Korea, Republic of").as_deref(),
            Some("Korea, Republic of")
        );
        assert_eq!(default_country(&table, "Atlantis").as_deref(), Some("Albania"));
        assert_eq!(
            sorted_countries(&table),
            vec!["Albania", "Brazil", "Japan", "Korea, Republic of"]
        );
    }
}
