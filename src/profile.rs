//! User profile sent to the planning endpoints.
//!
//! A [`Profile`] is built fresh from a submitted [`ProfileForm`] on every
//! request and serialised verbatim as the request body. Numeric inputs are
//! clamped to the ranges the form offers.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

pub const WEIGHT_RANGE_KG: RangeInclusive<f64> = 30.0..=200.0;
pub const HEIGHT_RANGE_CM: RangeInclusive<f64> = 100.0..=250.0;
pub const WORKOUT_FREQUENCY_RANGE: RangeInclusive<u8> = 1..=7;

const DEFAULT_WEIGHT_KG: f64 = 70.0;
const DEFAULT_HEIGHT_CM: f64 = 175.0;
const DEFAULT_WORKOUT_FREQUENCY: u8 = 3;

/// Format used on the wire for `date_of_birth`.
const WIRE_DATE_FORMAT: &str = "%Y/%m/%d";
/// Format produced by HTML `<input type="date">`.
const FORM_DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors turning a submitted form into a [`Profile`].
#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("{field}: '{value}' is not one of the available options")]
    UnknownChoice { field: &'static str, value: String },

    #[error("{field}: '{value}' is not a number")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Date of Birth: '{0}' is not a valid date")]
    InvalidDate(String),
}

/// Defines a closed set of labelled options.
///
/// The label is both the display text and the wire value.
macro_rules! choice {
    (
        $(#[$meta:meta])*
        $name:ident ($field:literal, default $default:ident) {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];
            pub const FIELD: &'static str = $field;

            #[must_use]
            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = ProfileError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|choice| choice.label() == s)
                    .ok_or_else(|| ProfileError::UnknownChoice {
                        field: $field,
                        value: s.to_string(),
                    })
            }
        }
    };
}

choice! {
    PrimaryGoal ("Primary Goal", default BuildMuscle) {
        BuildMuscle => "Build Muscle",
        LoseWeight => "Lose Weight",
        EatHealthier => "Eat Healthier",
    }
}

choice! {
    /// Diet type.
    EatingStyle ("Diet Type", default None) {
        None => "None",
        Vegan => "Vegan",
        Keto => "Keto",
        Paleo => "Paleo",
        Vegetarian => "Vegetarian",
        Balanced => "Balanced",
    }
}

choice! {
    /// Where the user trains.
    WorkoutType ("Workout Location", default Gym) {
        Gym => "Gym",
        Home => "Home",
    }
}

choice! {
    CaffeineIntake ("Caffeine Intake", default None) {
        None => "None",
        Occasionally => "Occasionally",
        Daily => "Daily",
    }
}

choice! {
    SugarIntake ("Sugar Intake", default None) {
        None => "None",
        Occasionally => "Occasionally",
        CraveIt => "Crave it",
        Daily => "Daily",
    }
}

/// Profile record as sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub primary_goal: PrimaryGoal,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub is_meat_eater: bool,
    pub is_lactose_intolerant: bool,
    pub allergies: Vec<String>,
    pub eating_style: EatingStyle,
    pub caffeine_consumption: CaffeineIntake,
    pub sugar_consumption: SugarIntake,
    pub workout_type: WorkoutType,
    pub workout_frequency: u8,
    #[serde(serialize_with = "serialize_date_of_birth")]
    pub date_of_birth: NaiveDate,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            primary_goal: PrimaryGoal::default(),
            weight_kg: DEFAULT_WEIGHT_KG,
            height_cm: DEFAULT_HEIGHT_CM,
            is_meat_eater: true,
            is_lactose_intolerant: false,
            allergies: Vec::new(),
            eating_style: EatingStyle::default(),
            caffeine_consumption: CaffeineIntake::default(),
            sugar_consumption: SugarIntake::default(),
            workout_type: WorkoutType::default(),
            workout_frequency: DEFAULT_WORKOUT_FREQUENCY,
            date_of_birth: default_date_of_birth(),
        }
    }
}

fn default_date_of_birth() -> NaiveDate {
    NaiveDate::from_ymd_opt(1995, 1, 1).unwrap_or_default()
}

/// `YYYY/MM/DD`, the backend's date format.
#[must_use]
pub fn format_date_of_birth(date: NaiveDate) -> String {
    date.format(WIRE_DATE_FORMAT).to_string()
}

fn serialize_date_of_birth<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_date_of_birth(*date))
}

/// Split a comma separated allergy list.
///
/// Items are trimmed and empty items dropped, so `""` gives `[]`.
#[must_use]
pub fn parse_allergies(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Profile form as submitted by the browser.
///
/// Every field is raw text. Empty fields fall back to the form defaults;
/// checkboxes are present only when ticked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub weight_kg: String,
    #[serde(default)]
    pub height_cm: String,
    #[serde(default)]
    pub primary_goal: String,
    #[serde(default)]
    pub eating_style: String,
    #[serde(default)]
    pub workout_type: String,
    #[serde(default)]
    pub workout_frequency: String,
    #[serde(default)]
    pub is_meat_eater: Option<String>,
    #[serde(default)]
    pub is_lactose_intolerant: Option<String>,
    #[serde(default)]
    pub caffeine_consumption: String,
    #[serde(default)]
    pub sugar_consumption: String,
    #[serde(default)]
    pub allergies: String,
}

impl ProfileForm {
    /// The form as first shown, prefilled with defaults.
    #[must_use]
    pub fn initial() -> Self {
        Self::from(&Profile::default())
    }

    /// Validate and clamp the submission.
    pub fn to_profile(&self) -> Result<Profile, ProfileError> {
        let defaults = Profile::default();

        let date_of_birth = match self.date_of_birth.trim() {
            "" => defaults.date_of_birth,
            raw => NaiveDate::parse_from_str(raw, FORM_DATE_FORMAT)
                .or_else(|_| NaiveDate::parse_from_str(raw, WIRE_DATE_FORMAT))
                .map_err(|_| ProfileError::InvalidDate(raw.to_string()))?,
        };

        let weight_kg = parse_clamped("Weight (kg)", &self.weight_kg, &WEIGHT_RANGE_KG)?
            .unwrap_or(defaults.weight_kg);
        let height_cm = parse_clamped("Height (cm)", &self.height_cm, &HEIGHT_RANGE_CM)?
            .unwrap_or(defaults.height_cm);
        let workout_frequency = parse_frequency(&self.workout_frequency)?
            .unwrap_or(defaults.workout_frequency);

        Ok(Profile {
            primary_goal: parse_choice(&self.primary_goal)?,
            weight_kg,
            height_cm,
            is_meat_eater: is_ticked(self.is_meat_eater.as_deref()),
            is_lactose_intolerant: is_ticked(self.is_lactose_intolerant.as_deref()),
            allergies: parse_allergies(&self.allergies),
            eating_style: parse_choice(&self.eating_style)?,
            caffeine_consumption: parse_choice(&self.caffeine_consumption)?,
            sugar_consumption: parse_choice(&self.sugar_consumption)?,
            workout_type: parse_choice(&self.workout_type)?,
            workout_frequency,
            date_of_birth,
        })
    }
}

impl From<&Profile> for ProfileForm {
    fn from(profile: &Profile) -> Self {
        let tick = |on: bool| on.then(|| "on".to_string());
        Self {
            date_of_birth: profile.date_of_birth.format(FORM_DATE_FORMAT).to_string(),
            weight_kg: profile.weight_kg.to_string(),
            height_cm: profile.height_cm.to_string(),
            primary_goal: profile.primary_goal.label().to_string(),
            eating_style: profile.eating_style.label().to_string(),
            workout_type: profile.workout_type.label().to_string(),
            workout_frequency: profile.workout_frequency.to_string(),
            is_meat_eater: tick(profile.is_meat_eater),
            is_lactose_intolerant: tick(profile.is_lactose_intolerant),
            caffeine_consumption: profile.caffeine_consumption.label().to_string(),
            sugar_consumption: profile.sugar_consumption.label().to_string(),
            allergies: profile.allergies.join(", "),
        }
    }
}

fn parse_choice<T>(raw: &str) -> Result<T, ProfileError>
where
    T: FromStr<Err = ProfileError> + Default,
{
    if raw.trim().is_empty() {
        Ok(T::default())
    } else {
        raw.parse()
    }
}

fn parse_clamped(
    field: &'static str,
    raw: &str,
    range: &RangeInclusive<f64>,
) -> Result<Option<f64>, ProfileError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let value: f64 = raw
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| ProfileError::InvalidNumber {
            field,
            value: raw.to_string(),
        })?;
    Ok(Some(value.clamp(*range.start(), *range.end())))
}

// The value is clamped to 1..=7 before the cast.
#[allow(clippy::cast_sign_loss)]
fn parse_frequency(raw: &str) -> Result<Option<u8>, ProfileError> {
    let range = f64::from(*WORKOUT_FREQUENCY_RANGE.start())
        ..=f64::from(*WORKOUT_FREQUENCY_RANGE.end());
    let value = parse_clamped("Workouts per Week", raw, &range)?;
    Ok(value.map(|v| v.round() as u8))
}

fn is_ticked(value: Option<&str>) -> bool {
    matches!(value, Some(v) if !v.is_empty() && v != "false" && v != "off")
}
