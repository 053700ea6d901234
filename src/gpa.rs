//! Derived transcript fields: total credits and grade point average
//!
//! All functions here are total over any course slice and never mutate it.

use crate::model::{Course, Grade};

/// Grade points for a letter. Unknown or malformed letters count as 0.0.
pub fn grade_points(grade: &str) -> f64 {
    Grade::from_letter(grade).map_or(0.0, Grade::points)
}

/// Sum of all course credits, including courses whose grade is unknown.
pub fn total_credits(courses: &[Course]) -> u64 {
    courses.iter().map(|c| u64::from(c.credit)).sum()
}

/// Credit-weighted GPA on the 4.0 scale, formatted with two fraction digits.
///
/// Exact halves round up (`0.125` shows as `0.13`). Returns `"0.00"` when
/// there are no credits.
///
/// ```
/// use scholardocs::model::Course;
///
/// let mut a = Course::blank("a");
/// a.credit = 4;
/// let mut b = Course::blank("b");
/// b.grade = "B".into();
/// assert_eq!(scholardocs::gpa::compute_gpa(&[a, b]), "3.57");
/// ```
pub fn compute_gpa(courses: &[Course]) -> String {
    let credits = total_credits(courses);
    if credits == 0 {
        return "0.00".to_string();
    }
    // points in tenths are integral, so the average is rounded without float error
    let tenths: u64 = courses
        .iter()
        .map(|c| {
            let points = Grade::from_letter(&c.grade).map_or(0, Grade::points_tenths);
            u64::from(c.credit) * u64::from(points)
        })
        .sum();
    let hundredths = (tenths * 20 + credits) / (credits * 2);
    format!("{}.{:02}", hundredths / 100, hundredths % 100)
}
