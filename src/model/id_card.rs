//! Student ID card record

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{DocumentKind, EmbeddedImage, Record};

/// Shown when neither a listed nor a custom university was chosen.
pub const DEFAULT_UNIVERSITY: &str = "Zhejiang University";
/// Shown when "custom" was chosen but no name was typed.
pub const CUSTOM_UNIVERSITY_PLACEHOLDER: &str = "University Name";

/// University selection: a catalog entry, or the custom option that
/// defers to `custom_university`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "name")]
pub enum UniversityChoice {
    #[default]
    Unset,
    Listed(String),
    Custom,
}

/// Which face of the card is on the render surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardSide {
    #[default]
    Front,
    Back,
}

impl CardSide {
    pub fn token(self) -> &'static str {
        match self {
            CardSide::Front => "front",
            CardSide::Back => "back",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentIdCard {
    pub student_name: String,
    pub student_id: String,
    pub university: UniversityChoice,
    pub custom_university: String,
    pub major: String,
    pub year: String,
    pub issue_date: String,
    pub expiration_date: String,
    pub student_photo: Option<EmbeddedImage>,
    pub student_signature: String,
}

impl StudentIdCard {
    /// Blank card issued on `today`, expiring four years later.
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            student_name: String::new(),
            student_id: String::new(),
            university: UniversityChoice::Unset,
            custom_university: String::new(),
            major: String::new(),
            year: String::new(),
            issue_date: iso(today),
            expiration_date: iso(four_years_after(today)),
            student_photo: None,
            student_signature: String::new(),
        }
    }

    /// Name printed on the card.
    pub fn university_name(&self) -> &str {
        match &self.university {
            UniversityChoice::Custom if self.custom_university.is_empty() => {
                CUSTOM_UNIVERSITY_PLACEHOLDER
            }
            UniversityChoice::Custom => &self.custom_university,
            UniversityChoice::Listed(name) if !name.is_empty() => name,
            UniversityChoice::Listed(_) | UniversityChoice::Unset => DEFAULT_UNIVERSITY,
        }
    }

    /// True when both dates parse and the card expires before it was issued.
    ///
    /// Such cards are stored and rendered as-is.
    pub fn is_expiry_before_issue(&self) -> bool {
        match (parse_iso(&self.issue_date), parse_iso(&self.expiration_date)) {
            (Some(issue), Some(exp)) => exp < issue,
            _ => false,
        }
    }
}

pub(crate) fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub(crate) fn parse_iso(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Feb 29 rolls back to Feb 28 when the target year has no leap day.
pub(crate) fn four_years_after(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(48)).unwrap_or(date)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdCardUpdate {
    StudentName(String),
    StudentId(String),
    University(UniversityChoice),
    CustomUniversity(String),
    Major(String),
    Year(String),
    IssueDate(String),
    ExpirationDate(String),
    StudentPhoto(Option<EmbeddedImage>),
    StudentSignature(String),
}

impl Record for StudentIdCard {
    type Update = IdCardUpdate;

    const KIND: DocumentKind = DocumentKind::StudentIdCard;

    fn apply(&mut self, update: IdCardUpdate) {
        match update {
            IdCardUpdate::StudentName(v) => self.student_name = v,
            IdCardUpdate::StudentId(v) => self.student_id = v,
            IdCardUpdate::University(v) => self.university = v,
            IdCardUpdate::CustomUniversity(v) => self.custom_university = v,
            IdCardUpdate::Major(v) => self.major = v,
            IdCardUpdate::Year(v) => self.year = v,
            IdCardUpdate::IssueDate(v) => self.issue_date = v,
            IdCardUpdate::ExpirationDate(v) => self.expiration_date = v,
            IdCardUpdate::StudentPhoto(v) => self.student_photo = v,
            IdCardUpdate::StudentSignature(v) => self.student_signature = v,
        }
    }

    fn primary_label(&self) -> &str {
        &self.student_name
    }
}
