// Data preparation for the population bar chart: pick the selected year's
// column, filter by sex, and total population per single year of age.

use crate::selection::{Gender, Year};
use crate::table::Table;
use anyhow::{Context, Result};
use std::collections::HashMap;

/// Population summed per age for one (year, gender) selection, ordered by
/// age. Ages are kept as the source strings for axis labelling; ordering is
/// numeric when every age parses as a number, lexical otherwise.
pub fn population_by_age(
    table: &Table,
    year: Year,
    gender: Gender,
) -> Result<(Vec<String>, Vec<f64>)> {
    let age_idx = table.column_index("age")?;
    let sex_idx = table.column_index("sex")?;
    let pop_col = year.population_column();
    let pop_idx = table.column_index(&pop_col)?;

    let mut totals: HashMap<String, f64> = HashMap::new();
    for (i, row) in table.rows.iter().enumerate() {
        if let Some(code) = gender.sex_code() {
            if row.get(sex_idx).map(String::as_str) != Some(code) {
                continue;
            }
        }

        let age = row.get(age_idx).cloned().unwrap_or_default();
        let raw = row.get(pop_idx).map(String::as_str).unwrap_or("");
        let value = raw.trim().parse::<f64>().with_context(|| {
            format!(
                "Failed to parse value '{}' in column '{}' (data row {})",
                raw,
                pop_col,
                i + 1
            )
        })?;
        *totals.entry(age).or_insert(0.0) += value;
    }

    if totals.is_empty() {
        anyhow::bail!(
            "No rows matched gender '{}' in population table",
            gender.title()
        );
    }

    let mut ages: Vec<String> = totals.keys().cloned().collect();
    sort_categories(&mut ages);

    let values = ages.iter().map(|age| totals[age]).collect();
    Ok((ages, values))
}

/// Sort category labels numerically when possible, lexically otherwise.
fn sort_categories(categories: &mut [String]) {
    let all_numeric = categories.iter().all(|c| c.parse::<f64>().is_ok());
    if all_numeric {
        categories.sort_by(|a, b| {
            let fa = a.parse::<f64>().unwrap_or(0.0);
            let fb = b.parse::<f64>().unwrap_or(0.0);
            fa.partial_cmp(&fb).unwrap_or(std::cmp::Ordering::Equal)
        });
    } else {
        categories.sort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;

    fn sample() -> Table {
        Table::from_reader(
            "age,sex,population_2011,population_2022\n\
             0,M,100,110\n\
             0,F,90,95\n\
             1,M,80,85\n\
             1,F,70,75\n\
             10,M,60,65\n\
             10,F,50,55\n"
                .as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn test_both_genders_sums_sexes() {
        let table = sample();
        let (ages, values) = population_by_age(&table, Year::Y2022, Gender::Both).unwrap();
        assert_eq!(ages, vec!["0", "1", "10"]);
        assert_eq!(values, vec![205.0, 160.0, 120.0]);
    }

    #[test]
    fn test_gender_filter() {
        let table = sample();
        let (_, values) = population_by_age(&table, Year::Y2011, Gender::Female).unwrap();
        assert_eq!(values, vec![90.0, 70.0, 50.0]);
    }

    #[test]
    fn test_ages_sorted_numerically() {
        // "10" must come after "1", not between "0" and "1"
        let table = sample();
        let (ages, _) = population_by_age(&table, Year::Y2011, Gender::Male).unwrap();
        assert_eq!(ages, vec!["0", "1", "10"]);
    }

    #[test]
    fn test_missing_year_column() {
        let table =
            Table::from_reader("age,sex,population_2011\n0,M,100\n".as_bytes()).unwrap();
        assert!(population_by_age(&table, Year::Y2022, Gender::Both).is_err());
    }

    #[test]
    fn test_no_matching_rows() {
        let table =
            Table::from_reader("age,sex,population_2011,population_2022\n0,X,1,1\n".as_bytes())
                .unwrap();
        assert!(population_by_age(&table, Year::Y2022, Gender::Male).is_err());
    }
}
