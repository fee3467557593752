// User-facing selections: year, gender and age group.
//
// These are the values the original dashboard exposed as sidebar widgets.
// Making them enums (and clap ValueEnums) means an out-of-range selection
// cannot reach the column resolver at all.

use clap::ValueEnum;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Gender {
    #[value(name = "both")]
    Both,
    #[value(name = "male")]
    Male,
    #[value(name = "female")]
    Female,
}

pub const GENDERS: [Gender; 3] = [Gender::Both, Gender::Male, Gender::Female];

impl Gender {
    /// Lowercase prefix used in density/population column names.
    /// "person" is only meaningful for the overall density column.
    pub fn key(&self) -> &'static str {
        match self {
            Gender::Both => "person",
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// Value of the `sex` column in the long-format population table,
    /// `None` when no filter applies.
    pub fn sex_code(&self) -> Option<&'static str> {
        match self {
            Gender::Both => None,
            Gender::Male => Some("M"),
            Gender::Female => Some("F"),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Gender::Both => "Both Genders",
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum AgeGroup {
    #[value(name = "all")]
    All,
    #[value(name = "early_childhood")]
    EarlyChildhood,
    #[value(name = "middle_childhood")]
    MiddleChildhood,
    #[value(name = "teens")]
    Teens,
    #[value(name = "young_adults")]
    YoungAdults,
    #[value(name = "middle_aged_adults")]
    MiddleAgedAdults,
    #[value(name = "seniors_elderly")]
    SeniorsElderly,
}

pub const AGE_GROUPS: [AgeGroup; 7] = [
    AgeGroup::All,
    AgeGroup::EarlyChildhood,
    AgeGroup::MiddleChildhood,
    AgeGroup::Teens,
    AgeGroup::YoungAdults,
    AgeGroup::MiddleAgedAdults,
    AgeGroup::SeniorsElderly,
];

impl AgeGroup {
    /// Snake_case infix used in column names.
    pub fn key(&self) -> &'static str {
        match self {
            AgeGroup::All => "all",
            AgeGroup::EarlyChildhood => "early_childhood",
            AgeGroup::MiddleChildhood => "middle_childhood",
            AgeGroup::Teens => "teens",
            AgeGroup::YoungAdults => "young_adults",
            AgeGroup::MiddleAgedAdults => "middle_aged_adults",
            AgeGroup::SeniorsElderly => "seniors_elderly",
        }
    }

    /// Human-readable label, matching the original selector options.
    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::All => "All Ages",
            AgeGroup::EarlyChildhood => "Early Childhood (0\u{2013}5)",
            AgeGroup::MiddleChildhood => "Middle Childhood (6\u{2013}12)",
            AgeGroup::Teens => "Teens (13\u{2013}18)",
            AgeGroup::YoungAdults => "Young Adults (19\u{2013}39)",
            AgeGroup::MiddleAgedAdults => "Middle Aged Adults (40\u{2013}59)",
            AgeGroup::SeniorsElderly => "Seniors/Elderly (60+)",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Year {
    #[value(name = "2011")]
    Y2011,
    #[value(name = "2022")]
    Y2022,
}

impl Year {
    /// File name of the per-year density table inside the data directory.
    pub fn density_file(&self) -> String {
        format!("df_uk_population_density_{}.csv", self)
    }

    /// Name of this year's column in the long-format population table.
    pub fn population_column(&self) -> String {
        format!("population_{}", self)
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Year::Y2011 => f.write_str("2011"),
            Year::Y2022 => f.write_str("2022"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_keys() {
        assert_eq!(Gender::Male.key(), "male");
        assert_eq!(Gender::Female.key(), "female");
        assert_eq!(Gender::Both.sex_code(), None);
        assert_eq!(Gender::Male.sex_code(), Some("M"));
    }

    #[test]
    fn test_age_group_keys() {
        assert_eq!(AgeGroup::Teens.key(), "teens");
        assert_eq!(AgeGroup::SeniorsElderly.key(), "seniors_elderly");
        assert_eq!(AgeGroup::SeniorsElderly.label(), "Seniors/Elderly (60+)");
    }

    #[test]
    fn test_year_names() {
        assert_eq!(Year::Y2022.to_string(), "2022");
        assert_eq!(
            Year::Y2011.density_file(),
            "df_uk_population_density_2011.csv"
        );
        assert_eq!(Year::Y2022.population_column(), "population_2022");
    }
}
