//! Admission letter record

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::id_card::iso;
use super::{DocumentKind, EmbeddedImage, Record};

pub const DEFAULT_MESSAGE: &str = "We are delighted to inform you of your acceptance to our university. \
We look forward to welcoming you to our academic community.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Degree {
    #[default]
    #[serde(rename = "Bachelor of Science")]
    BachelorOfScience,
    #[serde(rename = "Bachelor of Arts")]
    BachelorOfArts,
    #[serde(rename = "Master of Science")]
    MasterOfScience,
    #[serde(rename = "Master of Arts")]
    MasterOfArts,
    #[serde(rename = "Doctor of Philosophy")]
    DoctorOfPhilosophy,
}

impl Degree {
    pub const ALL: [Degree; 5] = [
        Degree::BachelorOfScience,
        Degree::BachelorOfArts,
        Degree::MasterOfScience,
        Degree::MasterOfArts,
        Degree::DoctorOfPhilosophy,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Degree::BachelorOfScience => "Bachelor of Science",
            Degree::BachelorOfArts => "Bachelor of Arts",
            Degree::MasterOfScience => "Master of Science",
            Degree::MasterOfArts => "Master of Arts",
            Degree::DoctorOfPhilosophy => "Doctor of Philosophy",
        }
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// `letter_number` is decorative; nothing checks it for uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionLetter {
    pub student_name: String,
    pub university: String,
    pub major: String,
    pub degree: Degree,
    pub admission_year: String,
    pub start_date: String,
    pub dean: String,
    pub letter_number: String,
    pub issue_date: String,
    pub custom_message: String,
    pub school_logo: Option<EmbeddedImage>,
}

impl AdmissionLetter {
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            student_name: String::new(),
            university: String::new(),
            major: String::new(),
            degree: Degree::default(),
            admission_year: today.year().to_string(),
            start_date: String::new(),
            dean: String::new(),
            letter_number: String::new(),
            issue_date: iso(today),
            custom_message: DEFAULT_MESSAGE.to_string(),
            school_logo: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionUpdate {
    StudentName(String),
    University(String),
    Major(String),
    Degree(Degree),
    AdmissionYear(String),
    StartDate(String),
    Dean(String),
    LetterNumber(String),
    IssueDate(String),
    CustomMessage(String),
    SchoolLogo(Option<EmbeddedImage>),
}

impl Record for AdmissionLetter {
    type Update = AdmissionUpdate;

    const KIND: DocumentKind = DocumentKind::AdmissionLetter;

    fn apply(&mut self, update: AdmissionUpdate) {
        match update {
            AdmissionUpdate::StudentName(v) => self.student_name = v,
            AdmissionUpdate::University(v) => self.university = v,
            AdmissionUpdate::Major(v) => self.major = v,
            AdmissionUpdate::Degree(v) => self.degree = v,
            AdmissionUpdate::AdmissionYear(v) => self.admission_year = v,
            AdmissionUpdate::StartDate(v) => self.start_date = v,
            AdmissionUpdate::Dean(v) => self.dean = v,
            AdmissionUpdate::LetterNumber(v) => self.letter_number = v,
            AdmissionUpdate::IssueDate(v) => self.issue_date = v,
            AdmissionUpdate::CustomMessage(v) => self.custom_message = v,
            AdmissionUpdate::SchoolLogo(v) => self.school_logo = v,
        }
    }

    fn primary_label(&self) -> &str {
        &self.student_name
    }
}
