//! Official transcript layout

use crate::gpa::{compute_gpa, total_credits};
use crate::model::{CardSide, Grade, Transcript};
use crate::rendering::layout::{fit_scale, line_height, DisplayList, LayoutBuilder, Rect};
use crate::rendering::paint::Color;
use crate::rendering::Render;

const WIDTH: u32 = 640;
const MARGIN: i32 = 32;
const ROW_HEIGHT: u32 = 20;
const LINE: i32 = 14;

const CERTIFICATION: &str = "This is to certify that the above is a true and complete record of the \
academic work completed by the student named herein.";

fn badge_color(grade: &str) -> Color {
    match Grade::from_letter(grade) {
        Some(Grade::APlus | Grade::A | Grade::AMinus) => Color::GREEN_700,
        Some(Grade::BPlus | Grade::B | Grade::BMinus) => Color::BLUE_700,
        Some(Grade::CPlus | Grade::C | Grade::CMinus) => Color::YELLOW_800,
        Some(_) | None => Color::RED_600,
    }
}

impl Render for Transcript {
    fn layout(&self, _side: CardSide) -> DisplayList {
        let info = &self.student_info;
        let content_w = WIDTH - 2 * MARGIN as u32;
        let mut b = LayoutBuilder::new(WIDTH);
        let mut y = MARGIN;

        // Header
        let seal = Rect::new((WIDTH as i32 - 64) / 2, y, 64, 64);
        b.disc(seal, Color::BLUE_900);
        b.text_centered(seal.x, seal.width, seal.y + 28, "SEAL", 1, Color::WHITE);
        y = seal.bottom() + 12;

        let uni_scale = fit_scale(&info.university, content_w, 3);
        b.text_centered(MARGIN, content_w, y, &info.university, uni_scale, Color::BLUE_900);
        y += line_height(uni_scale) as i32 + 10;
        b.text_centered(MARGIN, content_w, y, "OFFICIAL TRANSCRIPT", 2, Color::BLUE_800);
        y += line_height(2) as i32 + 6;
        b.text_centered(
            MARGIN,
            content_w,
            y,
            "This document contains the complete academic record",
            1,
            Color::GRAY_600,
        );
        y += line_height(1) as i32 + 12;
        b.hline(MARGIN, y, content_w, 2, Color::BLUE_900);
        y += 18;

        // Student information / academic program
        let col_w = content_w / 2;
        let right_col = MARGIN + col_w as i32;
        b.text(MARGIN, y, "STUDENT INFORMATION", 1, Color::BLUE_800);
        b.text(right_col, y, "ACADEMIC PROGRAM", 1, Color::BLUE_800);
        y += LINE;
        b.hline(MARGIN, y - 4, col_w - 16, 1, Color::BLUE_200);
        b.hline(right_col, y - 4, col_w - 16, 1, Color::BLUE_200);
        let left = [
            format!("Name: {}", info.student_name),
            format!("Student ID: {}", info.student_id),
            format!("Date of Birth: {}", info.date_of_birth),
        ];
        let right = [
            format!("Major: {}", info.major),
            format!("Admitted: {}", info.admission_date),
            format!("Graduated: {}", info.graduation_date),
        ];
        for (l, r) in left.iter().zip(right.iter()) {
            b.text(MARGIN, y, l, 1, Color::GRAY_900);
            b.text(right_col, y, r, 1, Color::GRAY_900);
            y += LINE;
        }
        y += 12;

        // Academic record table
        b.text(MARGIN, y, "ACADEMIC RECORD", 1, Color::BLUE_800);
        y += LINE;
        b.hline(MARGIN, y - 4, content_w, 2, Color::BLUE_200);
        let cols: [(u32, &str); 4] = [(content_w - 240, "Course Title"), (70, "Credits"), (70, "Grade"), (100, "Term")];
        let header = Rect::new(MARGIN, y, content_w, ROW_HEIGHT);
        b.fill(header, Color::GRAY_200);
        let mut x = MARGIN;
        for (w, title) in cols {
            b.stroke(Rect::new(x, y, w, ROW_HEIGHT), 1, Color::GRAY_400);
            b.text(x + 6, y + 6, title, 1, Color::GRAY_900);
            x += w as i32;
        }
        y += ROW_HEIGHT as i32;

        for (i, course) in self.courses.iter().enumerate() {
            if i % 2 == 1 {
                b.fill(Rect::new(MARGIN, y, content_w, ROW_HEIGHT), Color::GRAY_50);
            }
            let credit = course.credit.to_string();
            let cells = [
                (course.name.as_str(), Color::GRAY_900),
                (credit.as_str(), Color::GRAY_900),
                (course.grade.as_str(), badge_color(&course.grade)),
                (course.semester.as_str(), Color::GRAY_700),
            ];
            let mut x = MARGIN;
            for ((w, _), (text, color)) in cols.iter().zip(cells) {
                b.stroke(Rect::new(x, y, *w, ROW_HEIGHT), 1, Color::GRAY_400);
                if x == MARGIN {
                    b.text(x + 6, y + 6, text, 1, color);
                } else {
                    b.text_centered(x, *w, y + 6, text, 1, color);
                }
                x += *w as i32;
            }
            y += ROW_HEIGHT as i32;
        }
        y += 20;

        // Summary and certification
        b.text(MARGIN, y, "ACADEMIC SUMMARY", 1, Color::BLUE_800);
        b.text(right_col, y, "CERTIFICATION", 1, Color::BLUE_800);
        y += LINE + 4;
        let summary_top = y;
        b.text(
            MARGIN,
            y,
            &format!("Total Credits Earned: {}", total_credits(&self.courses)),
            1,
            Color::GRAY_900,
        );
        y += LINE;
        b.text(MARGIN, y, "Cumulative GPA:", 1, Color::GRAY_900);
        b.text(MARGIN + 102, y - 4, &compute_gpa(&self.courses), 2, Color::GRAY_900);
        y += LINE + 8;

        let cert_end = b.paragraph(right_col, summary_top, col_w, CERTIFICATION, 1, Color::GRAY_700);
        b.text(right_col, cert_end + 4, "Registrar: Office of the Registrar", 1, Color::GRAY_700);
        y = y.max(cert_end + 4 + LINE) + 16;

        // Security footer
        b.hline(MARGIN, y, content_w, 1, Color::GRAY_300);
        y += 10;
        b.text_centered(
            MARGIN,
            content_w,
            y,
            "*** OFFICIAL TRANSCRIPT - ISSUED DIRECTLY TO STUDENT ***",
            1,
            Color::GRAY_500,
        );
        y += LINE;
        b.text_centered(
            MARGIN,
            content_w,
            y,
            "This transcript is printed on security paper and contains anti-fraud features",
            1,
            Color::GRAY_500,
        );
        y += LINE + MARGIN;

        b.stroke(Rect::new(0, 0, WIDTH, y as u32), 2, Color::BLUE_900);
        b.finish(y as u32)
    }
}
