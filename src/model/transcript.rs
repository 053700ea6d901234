//! Transcript record: student information plus an ordered course list

use serde::{Deserialize, Serialize};

use super::{DocumentKind, Record};

/// One line of the academic record.
///
/// `grade` is kept as entered; the calculator resolves unknown letters to zero
/// points instead of rejecting them. `grade` and `score` are not re-synced on edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub name: String,
    pub credit: u32,
    pub grade: String,
    pub score: u32,
    pub semester: String,
}

impl Course {
    /// The course appended by "add course": three credits, an A at 90.
    pub fn blank(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            credit: 3,
            grade: "A".to_string(),
            score: 90,
            semester: "Spring 2024".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentInfo {
    pub student_name: String,
    pub student_id: String,
    pub university: String,
    pub major: String,
    pub admission_date: String,
    pub graduation_date: String,
    pub date_of_birth: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcript {
    pub student_info: StudentInfo,
    pub courses: Vec<Course>,
}

impl Transcript {
    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// An id of the form `course-<n>` not used by any current course.
    pub fn next_course_id(&self) -> String {
        let next = self
            .courses
            .iter()
            .filter_map(|c| c.id.strip_prefix("course-")?.parse::<u64>().ok())
            .max()
            .map_or(0, |n| n + 1);
        let mut candidate = next;
        loop {
            let id = format!("course-{candidate}");
            if self.course(&id).is_none() {
                return id;
            }
            candidate += 1;
        }
    }
}

/// Single-field edit of one course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseField {
    Name(String),
    Credit(u32),
    Grade(String),
    Score(u32),
    Semester(String),
}

impl CourseField {
    /// Credit from raw form input, taking its leading integer; anything else becomes 0.
    pub fn credit_from_input(input: &str) -> Self {
        CourseField::Credit(parse_count(input))
    }

    /// Score from raw form input, taking its leading integer; anything else becomes 0.
    pub fn score_from_input(input: &str) -> Self {
        CourseField::Score(parse_count(input))
    }
}

/// Leading integer of `input` ("3.5" -> 3, "4abc" -> 4). No digits or a
/// negative sign give 0; values past `u32::MAX` saturate.
fn parse_count(input: &str) -> u32 {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if negative || digits == 0 {
        return 0;
    }
    rest[..digits].parse().unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptUpdate {
    StudentName(String),
    StudentId(String),
    University(String),
    Major(String),
    AdmissionDate(String),
    GraduationDate(String),
    DateOfBirth(String),
    /// Append a course to the end of the list
    AddCourse(Course),
    /// Edit one field of the course with the given id (no-op when absent)
    EditCourse { id: String, field: CourseField },
    /// Remove the course with the given id (no-op when absent)
    RemoveCourse(String),
    /// Replace the whole course list
    Courses(Vec<Course>),
}

impl Record for Transcript {
    type Update = TranscriptUpdate;

    const KIND: DocumentKind = DocumentKind::Transcript;

    fn apply(&mut self, update: TranscriptUpdate) {
        let info = &mut self.student_info;
        match update {
            TranscriptUpdate::StudentName(v) => info.student_name = v,
            TranscriptUpdate::StudentId(v) => info.student_id = v,
            TranscriptUpdate::University(v) => info.university = v,
            TranscriptUpdate::Major(v) => info.major = v,
            TranscriptUpdate::AdmissionDate(v) => info.admission_date = v,
            TranscriptUpdate::GraduationDate(v) => info.graduation_date = v,
            TranscriptUpdate::DateOfBirth(v) => info.date_of_birth = v,
            TranscriptUpdate::AddCourse(course) => self.courses.push(course),
            TranscriptUpdate::EditCourse { id, field } => {
                if let Some(course) = self.courses.iter_mut().find(|c| c.id == id) {
                    match field {
                        CourseField::Name(v) => course.name = v,
                        CourseField::Credit(v) => course.credit = v,
                        CourseField::Grade(v) => course.grade = v,
                        CourseField::Score(v) => course.score = v,
                        CourseField::Semester(v) => course.semester = v,
                    }
                }
            }
            TranscriptUpdate::RemoveCourse(id) => self.courses.retain(|c| c.id != id),
            TranscriptUpdate::Courses(courses) => self.courses = courses,
        }
    }

    fn primary_label(&self) -> &str {
        &self.student_info.student_name
    }
}
