//! Form selection set and the fixed option lists it is drawn from.
//!
//! The catalog ships with built-in defaults and can be replaced field by
//! field from the `[catalog]` table of `config.toml`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SelectionError;

/// One dropdown (or multiselect) on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionField {
    Language,
    Brand,
    Segment,
    Barrier,
    Objective,
    Specialty,
    Persona,
    Length,
    Tone,
}

impl SelectionField {
    /// Every field, in form order.
    pub const ALL: [SelectionField; 9] = [
        SelectionField::Language,
        SelectionField::Brand,
        SelectionField::Segment,
        SelectionField::Barrier,
        SelectionField::Objective,
        SelectionField::Specialty,
        SelectionField::Persona,
        SelectionField::Length,
        SelectionField::Tone,
    ];

    /// Form field name.
    pub fn key(self) -> &'static str {
        match self {
            SelectionField::Language => "language",
            SelectionField::Brand => "brand",
            SelectionField::Segment => "segment",
            SelectionField::Barrier => "barriers",
            SelectionField::Objective => "objective",
            SelectionField::Specialty => "specialty",
            SelectionField::Persona => "persona",
            SelectionField::Length => "length",
            SelectionField::Tone => "tone",
        }
    }

    /// Human-readable label shown next to the control.
    pub fn label(self) -> &'static str {
        match self {
            SelectionField::Language => "Language",
            SelectionField::Brand => "Brand",
            SelectionField::Segment => "RACE segment",
            SelectionField::Barrier => "Objection barriers",
            SelectionField::Objective => "Call objective",
            SelectionField::Specialty => "HCP specialty",
            SelectionField::Persona => "HCP persona",
            SelectionField::Length => "Response length",
            SelectionField::Tone => "Response tone",
        }
    }

    /// Whether more than one value may be chosen.
    pub fn is_multi(self) -> bool {
        matches!(self, SelectionField::Barrier)
    }
}

impl fmt::Display for SelectionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Current form choices. Read fresh on every submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub language: String,
    pub brand: String,
    pub segment: String,
    #[serde(default)]
    pub barriers: Vec<String>,
    pub objective: String,
    pub specialty: String,
    pub persona: String,
    pub length: String,
    pub tone: String,
}

impl Selection {
    /// Values chosen for a field. Single-select fields yield one value.
    pub fn values(&self, field: SelectionField) -> Vec<&str> {
        let single = match field {
            SelectionField::Language => &self.language,
            SelectionField::Brand => &self.brand,
            SelectionField::Segment => &self.segment,
            SelectionField::Objective => &self.objective,
            SelectionField::Specialty => &self.specialty,
            SelectionField::Persona => &self.persona,
            SelectionField::Length => &self.length,
            SelectionField::Tone => &self.tone,
            SelectionField::Barrier => {
                return self.barriers.iter().map(String::as_str).collect();
            }
        };
        vec![single.as_str()]
    }
}

/// A brand the representative can detail, with optional reference assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandEntry {
    pub name: String,
    /// Path (relative to the assets directory) of the brand's reference PDF.
    #[serde(default)]
    pub reference_document: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// The fixed option lists for every selection field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionCatalog {
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    #[serde(default = "default_brands")]
    pub brands: Vec<BrandEntry>,
    #[serde(default = "default_segments")]
    pub segments: Vec<String>,
    #[serde(default = "default_barriers")]
    pub barriers: Vec<String>,
    #[serde(default = "default_objectives")]
    pub objectives: Vec<String>,
    #[serde(default = "default_specialties")]
    pub specialties: Vec<String>,
    #[serde(default = "default_personas")]
    pub personas: Vec<String>,
    #[serde(default = "default_lengths")]
    pub lengths: Vec<String>,
    #[serde(default = "default_tones")]
    pub tones: Vec<String>,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn default_languages() -> Vec<String> {
    strings(&["English", "Arabic"])
}

fn default_brands() -> Vec<BrandEntry> {
    vec![BrandEntry {
        name: "Shingrix".to_string(),
        reference_document: Some("Shingrix.pdf".to_string()),
        image_url: Some(
            "https://www.oma-apteekki.fi/WebRoot/NA/Shops/na/67D6/48DA/D0B0/D959/ECAF/0A3C/0E02/D573/3ad67c4e-e1fb-4476-a8a0-873423d8db42_3Dimage.png"
                .to_string(),
        ),
    }]
}

fn default_segments() -> Vec<String> {
    strings(&["Reach", "Act", "Convert", "Engage"])
}

fn default_barriers() -> Vec<String> {
    strings(&[
        "No time for rep visits",
        "Cost and reimbursement concerns",
        "Safety and side-effect concerns",
        "Prefers a competitor product",
        "Low perceived disease risk",
        "Patient hesitancy",
    ])
}

fn default_objectives() -> Vec<String> {
    strings(&[
        "Raise awareness",
        "Handle an objection",
        "Secure a prescribing commitment",
        "Schedule a follow-up visit",
    ])
}

fn default_specialties() -> Vec<String> {
    strings(&[
        "General Practitioner",
        "Internal Medicine",
        "Geriatrics",
        "Pharmacist",
        "Oncology",
    ])
}

fn default_personas() -> Vec<String> {
    strings(&[
        "Skeptical scientist",
        "Busy pragmatist",
        "Relationship builder",
        "Early adopter",
    ])
}

fn default_lengths() -> Vec<String> {
    strings(&["Short", "Medium", "Long"])
}

fn default_tones() -> Vec<String> {
    strings(&["Professional", "Friendly", "Persuasive", "Scientific"])
}

impl Default for OptionCatalog {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            brands: default_brands(),
            segments: default_segments(),
            barriers: default_barriers(),
            objectives: default_objectives(),
            specialties: default_specialties(),
            personas: default_personas(),
            lengths: default_lengths(),
            tones: default_tones(),
        }
    }
}

impl OptionCatalog {
    /// Allowed values for a field, in display order.
    pub fn options(&self, field: SelectionField) -> Vec<&str> {
        let list = match field {
            SelectionField::Language => &self.languages,
            SelectionField::Segment => &self.segments,
            SelectionField::Barrier => &self.barriers,
            SelectionField::Objective => &self.objectives,
            SelectionField::Specialty => &self.specialties,
            SelectionField::Persona => &self.personas,
            SelectionField::Length => &self.lengths,
            SelectionField::Tone => &self.tones,
            SelectionField::Brand => {
                return self.brands.iter().map(|b| b.name.as_str()).collect();
            }
        };
        list.iter().map(String::as_str).collect()
    }

    pub fn brand(&self, name: &str) -> Option<&BrandEntry> {
        self.brands.iter().find(|b| b.name == name)
    }

    /// First option of every single-select field, no barriers.
    ///
    /// Returns `None` when a single-select list is empty.
    pub fn default_selection(&self) -> Option<Selection> {
        Some(Selection {
            language: self.languages.first()?.clone(),
            brand: self.brands.first()?.name.clone(),
            segment: self.segments.first()?.clone(),
            barriers: Vec::new(),
            objective: self.objectives.first()?.clone(),
            specialty: self.specialties.first()?.clone(),
            persona: self.personas.first()?.clone(),
            length: self.lengths.first()?.clone(),
            tone: self.tones.first()?.clone(),
        })
    }

    /// Check that every value in the selection comes from its option list.
    pub fn validate(&self, selection: &Selection) -> Result<(), SelectionError> {
        for field in SelectionField::ALL {
            let allowed = self.options(field);
            for value in selection.values(field) {
                if !allowed.contains(&value) {
                    return Err(SelectionError::NotInCatalog {
                        field,
                        value: value.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Reject catalogs where a single-select field has nothing to choose.
    pub fn check_complete(&self) -> Result<(), SelectionError> {
        for field in SelectionField::ALL {
            if !field.is_multi() && self.options(field).is_empty() {
                return Err(SelectionError::EmptyOptionList(field));
            }
        }
        Ok(())
    }
}
