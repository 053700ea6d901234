//! Document records and their field-level updates
//!
//! Each record type pairs with a tagged update enum (one variant per editable
//! field) so that edits are checked at compile time instead of being keyed by
//! arbitrary field names.

pub mod admission;
pub mod grade;
pub mod id_card;
pub mod image;
pub mod transcript;

pub use admission::{AdmissionLetter, AdmissionUpdate, Degree};
pub use grade::Grade;
pub use id_card::{CardSide, IdCardUpdate, StudentIdCard, UniversityChoice};
pub use image::{ingest_image, EmbeddedImage};
pub use transcript::{Course, CourseField, StudentInfo, Transcript, TranscriptUpdate};

use std::fmt;

/// Which of the three document workflows a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Transcript,
    StudentIdCard,
    AdmissionLetter,
}

impl DocumentKind {
    /// Token used as the first segment of exported file names
    pub fn file_token(self) -> &'static str {
        match self {
            DocumentKind::Transcript => "Transcript",
            DocumentKind::StudentIdCard => "StudentID",
            DocumentKind::AdmissionLetter => "AdmissionLetter",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_token())
    }
}

/// A record owned by one workflow's data store.
///
/// `apply` performs no validation: every value is stored exactly as given.
pub trait Record: Clone + fmt::Debug + Send + Sync + 'static {
    /// Tagged single-field update
    type Update: fmt::Debug;

    const KIND: DocumentKind;

    /// Shallow-merge one field into the record, leaving all others untouched.
    fn apply(&mut self, update: Self::Update);

    /// The human-identifying field used in exported file names.
    fn primary_label(&self) -> &str;
}
