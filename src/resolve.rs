// Column resolution: translate a (gender, age group) selection into the
// concrete density and population column names of the per-year tables.
//
// Column naming follows the source CSVs: `{gender}_{age_group}_per_sq_km`
// and `{gender}_{age_group}_population`, with the gender prefix dropped for
// the overall figures and the age-group infix dropped for "all ages".

use crate::selection::{AgeGroup, Gender, AGE_GROUPS, GENDERS};
use crate::table::Table;
use anyhow::{Context, Result};

/// Overall density column, used whenever "Both Genders" is selected.
pub const PERSON_DENSITY: &str = "person_per_sq_km";

/// Overall population column for the (Both Genders, All Ages) selection.
pub const TOTAL_POPULATION: &str = "population";

/// Name of the synthesized male+female column for a specific age group.
pub const COMBINED_POPULATION: &str = "combined_population";

/// Density column to colour the map by.
///
/// For "Both Genders" this is always the overall per-person density: the
/// source data carries no combined per-age-group density, so the age group
/// is ignored on this path. `render_map` warns when that substitution
/// happens.
pub fn density_column(gender: Gender, age_group: AgeGroup) -> String {
    match (gender, age_group) {
        (Gender::Both, _) => PERSON_DENSITY.to_string(),
        (g, AgeGroup::All) => format!("{}_per_sq_km", g.key()),
        (g, a) => format!("{}_{}_per_sq_km", g.key(), a.key()),
    }
}

/// Population column for tooltips and captions.
///
/// For (Both Genders, specific age group) no precomputed column exists; the
/// male and female variants are summed element-wise and written into the
/// table as `combined_population`, overwriting any previous one. All other
/// selections resolve to a column that must already be present.
pub fn population_column(gender: Gender, age_group: AgeGroup, table: &mut Table) -> Result<String> {
    match (gender, age_group) {
        (Gender::Both, AgeGroup::All) => {
            table.column_index(TOTAL_POPULATION)?;
            Ok(TOTAL_POPULATION.to_string())
        }
        (Gender::Both, a) => {
            let male_col = format!("male_{}_population", a.key());
            let female_col = format!("female_{}_population", a.key());
            let male = table.numeric_column(&male_col)?;
            let female = table.numeric_column(&female_col)?;
            let combined: Vec<f64> = male.iter().zip(&female).map(|(m, f)| m + f).collect();
            table.set_column(COMBINED_POPULATION, combined)?;
            Ok(COMBINED_POPULATION.to_string())
        }
        (g, AgeGroup::All) => {
            let name = format!("{}_population", g.key());
            table.column_index(&name)?;
            Ok(name)
        }
        (g, a) => {
            let name = format!("{}_{}_population", g.key(), a.key());
            table.column_index(&name)?;
            Ok(name)
        }
    }
}

/// Human-readable label for the resolved population column, used in the
/// map legend. The synthesized combined column reads simply "Population".
pub fn population_label(gender: Gender, age_group: AgeGroup, column: &str) -> String {
    if gender == Gender::Both && age_group != AgeGroup::All {
        "Population".to_string()
    } else {
        title_case(column)
    }
}

/// Population columns a selection reads from, before any synthesis.
fn population_source_columns(gender: Gender, age_group: AgeGroup) -> Vec<String> {
    match (gender, age_group) {
        (Gender::Both, AgeGroup::All) => vec![TOTAL_POPULATION.to_string()],
        (Gender::Both, a) => vec![
            format!("male_{}_population", a.key()),
            format!("female_{}_population", a.key()),
        ],
        (g, AgeGroup::All) => vec![format!("{}_population", g.key())],
        (g, a) => vec![format!("{}_{}_population", g.key(), a.key())],
    }
}

/// Check every column the resolver can ever address against the table, so a
/// renamed or dropped CSV column fails at load time with the selection that
/// would hit it, instead of mid-render.
pub fn verify_schema(table: &Table) -> Result<()> {
    for gender in GENDERS {
        for age_group in AGE_GROUPS {
            let density = density_column(gender, age_group);
            table.column_index(&density).with_context(|| {
                format!(
                    "Density column for ({}, {}) missing from table",
                    gender.title(),
                    age_group.key()
                )
            })?;

            for column in population_source_columns(gender, age_group) {
                table.column_index(&column).with_context(|| {
                    format!(
                        "Population column for ({}, {}) missing from table",
                        gender.title(),
                        age_group.key()
                    )
                })?;
            }
        }
    }
    Ok(())
}

/// Underscores to spaces, each word capitalized: "male_population"
/// becomes "Male Population".
fn title_case(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
