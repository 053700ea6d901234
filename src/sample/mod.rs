//! Random but internally consistent sample records
//!
//! Every generated record satisfies the model's invariants at generation time:
//! ISO dates, scores inside the band of their grade, and credits taken from the
//! course catalog rather than drawn independently.

pub mod catalog;

pub use catalog::{CatalogCourse, Catalogs, DEFAULT_CATALOGS};

use chrono::{Datelike, Local, NaiveDate};
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::model::id_card::{four_years_after, iso};
use crate::model::{
    admission, AdmissionLetter, Course, Grade, Record, StudentIdCard, StudentInfo, Transcript,
    UniversityChoice,
};

pub const STUDENT_ID_RANGE: std::ops::RangeInclusive<u32> = 100_000..=999_999;
pub const LETTER_SERIAL_RANGE: std::ops::RangeInclusive<u32> = 1_000..=9_999;

/// Records that can be produced by the sample generator.
pub trait Sample: Record {
    fn sample<R: Rng + ?Sized>(catalogs: &Catalogs, today: NaiveDate, rng: &mut R) -> Self;
}

/// Entry point for "randomize". Holds no state between calls apart from the
/// catalogs and an optional pinned date.
#[derive(Debug, Clone, Copy)]
pub struct SampleGenerator {
    catalogs: &'static Catalogs,
    today: Option<NaiveDate>,
}

impl Default for SampleGenerator {
    fn default() -> Self {
        Self::new(&DEFAULT_CATALOGS)
    }
}

impl SampleGenerator {
    pub fn new(catalogs: &'static Catalogs) -> Self {
        Self { catalogs, today: None }
    }

    /// Pin "today" instead of reading the local clock on each call.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn catalogs(&self) -> &'static Catalogs {
        self.catalogs
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Generate a record using the thread-local random source.
    pub fn generate<T: Sample>(&self) -> T {
        self.generate_with(&mut rand::rng())
    }

    pub fn generate_with<T: Sample, R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        T::sample(self.catalogs, self.today(), rng)
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, items: &[&'static str]) -> String {
    items.choose(rng).copied().unwrap_or_default().to_string()
}

fn student_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.random_range(STUDENT_ID_RANGE).to_string()
}

/// A course from the catalog with a random grade and a score inside that grade's band.
pub fn sample_course<R: Rng + ?Sized>(
    catalogs: &Catalogs,
    entry: &CatalogCourse,
    id: String,
    rng: &mut R,
) -> Course {
    let grade = catalogs.sample_grades.choose(rng).copied().unwrap_or(Grade::A);
    let score = rng.random_range(grade.score_band());
    Course {
        id,
        name: entry.name.to_string(),
        credit: entry.credit,
        grade: grade.letter().to_string(),
        score,
        semester: entry.semester.to_string(),
    }
}

impl Sample for Transcript {
    fn sample<R: Rng + ?Sized>(catalogs: &Catalogs, _today: NaiveDate, rng: &mut R) -> Self {
        let courses = catalogs
            .courses
            .iter()
            .enumerate()
            .map(|(i, entry)| sample_course(catalogs, entry, format!("course-{i}"), rng))
            .collect();

        // Admission and graduation bracket the catalog's Fall 2021 .. Spring 2023 terms.
        let birth = NaiveDate::from_ymd_opt(
            rng.random_range(2002..=2004),
            rng.random_range(1..=12),
            rng.random_range(1..=28),
        );

        Transcript {
            student_info: StudentInfo {
                student_name: pick(rng, catalogs.student_names),
                student_id: student_id(rng),
                university: pick(rng, catalogs.universities),
                major: pick(rng, catalogs.majors),
                admission_date: "2021-09-01".to_string(),
                graduation_date: "2025-05-15".to_string(),
                date_of_birth: birth.map(iso).unwrap_or_default(),
            },
            courses,
        }
    }
}

impl Sample for StudentIdCard {
    fn sample<R: Rng + ?Sized>(catalogs: &Catalogs, today: NaiveDate, rng: &mut R) -> Self {
        let name = pick(rng, catalogs.student_names);
        let year = today.year() + rng.random_range(0..4);
        StudentIdCard {
            student_signature: name.clone(),
            student_name: name,
            student_id: student_id(rng),
            university: UniversityChoice::Listed(pick(rng, catalogs.universities)),
            custom_university: String::new(),
            major: pick(rng, catalogs.majors),
            year: year.to_string(),
            issue_date: iso(today),
            expiration_date: iso(four_years_after(today)),
            student_photo: None,
        }
    }
}

impl Sample for AdmissionLetter {
    fn sample<R: Rng + ?Sized>(catalogs: &Catalogs, today: NaiveDate, rng: &mut R) -> Self {
        let year = today.year();
        AdmissionLetter {
            student_name: pick(rng, catalogs.student_names),
            university: pick(rng, catalogs.universities),
            major: pick(rng, catalogs.majors),
            degree: catalogs.degrees.choose(rng).copied().unwrap_or_default(),
            admission_year: year.to_string(),
            start_date: format!("{year}-08-28"),
            dean: pick(rng, catalogs.deans),
            letter_number: format!("ADM-{year}-{}", rng.random_range(LETTER_SERIAL_RANGE)),
            issue_date: iso(today),
            custom_message: admission::DEFAULT_MESSAGE.to_string(),
            school_logo: None,
        }
    }
}
