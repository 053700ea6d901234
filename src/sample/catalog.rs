//! Constant lookup tables the sample generator draws from

use crate::model::{Degree, Grade};

/// A course together with the credit load and term it is always offered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogCourse {
    pub name: &'static str,
    pub credit: u32,
    pub semester: &'static str,
}

/// Process-wide immutable catalogs. Build one with struct literals to
/// generate samples from other data.
#[derive(Debug, Clone, Copy)]
pub struct Catalogs {
    pub student_names: &'static [&'static str],
    pub universities: &'static [&'static str],
    pub majors: &'static [&'static str],
    pub degrees: &'static [Degree],
    pub deans: &'static [&'static str],
    pub courses: &'static [CatalogCourse],
    /// Grades a generated course may receive
    pub sample_grades: &'static [Grade],
}

impl Catalogs {
    /// Credit the catalog lists for `name`, if it is a catalog course.
    pub fn credit_for(&self, name: &str) -> Option<u32> {
        self.courses.iter().find(|c| c.name == name).map(|c| c.credit)
    }
}

pub static DEFAULT_CATALOGS: Catalogs = Catalogs {
    student_names: &[
        "John Smith",
        "Emily Johnson",
        "Michael Brown",
        "Sarah Davis",
        "David Wilson",
        "Jessica Miller",
        "Michael Johnson",
        "Sarah Williams",
        "Emily Davis",
        "James Wilson",
        "Ashley Miller",
        "Christopher Taylor",
        "Jessica Anderson",
    ],
    universities: &[
        "Harvard University",
        "Stanford University",
        "Massachusetts Institute of Technology",
        "Yale University",
        "Princeton University",
        "Columbia University",
        "University of Pennsylvania",
        "Cornell University",
        "Brown University",
        "Dartmouth College",
        "Zhejiang University",
    ],
    majors: &[
        "Computer Science",
        "Business Administration",
        "Psychology",
        "Biology",
        "Economics",
        "Engineering",
        "English Literature",
        "Political Science",
        "Mathematics",
        "Chemistry",
        "Faculty of Economics and Management",
    ],
    degrees: &Degree::ALL,
    deans: &[
        "Dr. Robert Johnson",
        "Dr. Sarah Williams",
        "Dr. Michael Davis",
        "Dr. Jennifer Brown",
        "Dr. David Miller",
    ],
    courses: &[
        CatalogCourse { name: "Calculus I", credit: 4, semester: "Fall 2021" },
        CatalogCourse { name: "English Composition", credit: 3, semester: "Fall 2021" },
        CatalogCourse { name: "Introduction to Psychology", credit: 3, semester: "Fall 2021" },
        CatalogCourse { name: "Computer Science Fundamentals", credit: 4, semester: "Fall 2021" },
        CatalogCourse { name: "Statistics", credit: 3, semester: "Spring 2022" },
        CatalogCourse { name: "Data Structures", credit: 4, semester: "Spring 2022" },
        CatalogCourse { name: "Microeconomics", credit: 3, semester: "Spring 2022" },
        CatalogCourse { name: "Physics I", credit: 4, semester: "Fall 2022" },
        CatalogCourse { name: "Database Systems", credit: 3, semester: "Fall 2022" },
        CatalogCourse { name: "Software Engineering", credit: 3, semester: "Spring 2023" },
    ],
    sample_grades: &[
        Grade::APlus,
        Grade::A,
        Grade::AMinus,
        Grade::BPlus,
        Grade::B,
        Grade::BMinus,
        Grade::CPlus,
        Grade::C,
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_populated() {
        let c = &DEFAULT_CATALOGS;
        assert!(!c.student_names.is_empty());
        assert_eq!(c.courses.len(), 10);
        assert_eq!(c.credit_for("Calculus I"), Some(4));
        assert_eq!(c.credit_for("Underwater Basket Weaving"), None);
        assert!(c.courses.iter().all(|course| course.credit > 0));
    }
}
