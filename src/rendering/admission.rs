//! Admission letter layout

use crate::model::{AdmissionLetter, CardSide};
use crate::rendering::layout::{fit_scale, line_height, DisplayList, LayoutBuilder, Rect};
use crate::rendering::paint::{Color, ImageFit};
use crate::rendering::Render;

const WIDTH: u32 = 672;
const MARGIN: i32 = 32;

const NEXT_STEPS: [&str; 4] = [
    "- Confirm your enrollment by the deadline specified in your enrollment packet",
    "- Submit your enrollment deposit to secure your place",
    "- Complete housing and meal plan applications if applicable",
    "- Attend orientation sessions before classes begin",
];

const CLOSING: &str = "We look forward to welcoming you to our academic community. Should you have \
any questions, please do not hesitate to contact our Admissions Office.";

impl Render for AdmissionLetter {
    fn layout(&self, _side: CardSide) -> DisplayList {
        let content_w = WIDTH - 2 * MARGIN as u32;
        let mut b = LayoutBuilder::new(WIDTH);
        let mut y = MARGIN;

        // Letterhead: uploaded logo or the default seal
        let logo = Rect::new((WIDTH as i32 - 80) / 2, y, 80, 80);
        match &self.school_logo {
            Some(img) => b.image(logo, img, ImageFit::Contain),
            None => {
                b.disc(logo, Color::BLUE_800);
                b.text_centered(logo.x, logo.width, logo.y + 36, "SEAL", 1, Color::WHITE);
            }
        }
        y = logo.bottom() + 16;

        let uni_scale = fit_scale(&self.university, content_w, 3);
        b.text_centered(MARGIN, content_w, y, &self.university, uni_scale, Color::BLUE_900);
        y += line_height(uni_scale) as i32 + 10;
        b.text_centered(MARGIN, content_w, y, "OFFICE OF ADMISSIONS", 2, Color::BLUE_700);
        y += line_height(2) as i32 + 16;
        b.hline(MARGIN, y, content_w, 2, Color::BLUE_800);
        y += 20;

        // Reference block
        let right = MARGIN + content_w as i32;
        b.text_right(right, y, &format!("Reference: {}", self.letter_number), 1, Color::GRAY_600);
        y += 14;
        b.text_right(right, y, &self.issue_date, 1, Color::GRAY_600);
        y += 28;

        // Salutation and body
        b.text(MARGIN, y, &format!("Dear {},", self.student_name), 2, Color::GRAY_900);
        y += line_height(2) as i32 + 16;
        let congratulations = format!(
            "Congratulations! We are pleased to inform you that you have been accepted for admission to {}.",
            self.university
        );
        y = b.paragraph(MARGIN, y, content_w, &congratulations, 1, Color::BLUE_800) + 12;

        // Admission details panel
        let details = Rect::new(MARGIN, y, content_w, 76);
        b.fill(details, Color::BLUE_50);
        b.fill(Rect::new(details.x, details.y, 4, details.height), Color::BLUE_400);
        b.text(details.x + 20, details.y + 14, "ADMISSION DETAILS", 1, Color::BLUE_800);
        let half = details.x + 20 + (content_w / 2) as i32;
        let rows = [
            (format!("Program: {}", self.degree), format!("Academic Year: {}", self.admission_year)),
            (format!("Major: {}", self.major), format!("Start Date: {}", self.start_date)),
        ];
        let mut row_y = details.y + 34;
        for (left, right_text) in &rows {
            b.text(details.x + 20, row_y, left, 1, Color::GRAY_900);
            b.text(half, row_y, right_text, 1, Color::GRAY_900);
            row_y += 16;
        }
        y = details.bottom() + 16;

        y = b.paragraph(MARGIN, y, content_w, &self.custom_message, 1, Color::GRAY_900) + 12;

        // Next steps panel
        let steps_h = 30 + NEXT_STEPS.len() as u32 * 14;
        let steps = Rect::new(MARGIN, y, content_w, steps_h);
        b.fill(steps, Color::YELLOW_50);
        b.stroke(steps, 1, Color::YELLOW_200);
        b.text(steps.x + 14, steps.y + 10, "NEXT STEPS:", 1, Color::YELLOW_800);
        let mut step_y = steps.y + 26;
        for step in NEXT_STEPS {
            b.text(steps.x + 14, step_y, step, 1, Color::YELLOW_800);
            step_y += 14;
        }
        y = steps.bottom() + 16;

        y = b.paragraph(MARGIN, y, content_w, CLOSING, 1, Color::GRAY_600) + 16;

        // Signature block
        b.hline(MARGIN, y, content_w, 1, Color::GRAY_200);
        y += 24;
        let sig_top = y;
        b.text(MARGIN, y, "Sincerely,", 1, Color::GRAY_600);
        y += 40;
        b.hline(MARGIN, y, 192, 1, Color::GRAY_400);
        y += 8;
        b.text(MARGIN, y, &self.dean, 1, Color::GRAY_900);
        y += 14;
        b.text(MARGIN, y, "Dean of Admissions", 1, Color::GRAY_600);
        y += 18;
        b.text(MARGIN, y, &self.university, 1, Color::GRAY_600);
        y += 14;

        let seal = Rect::new(right - 96, sig_top, 64, 64);
        b.disc(seal, Color::BLUE_200);
        b.disc(seal.inset(3), Color::WHITE);
        b.text_centered(seal.x, seal.width, seal.y + 28, "SEAL", 1, Color::BLUE_600);
        b.text_right(right, seal.bottom() + 8, "Official University Seal", 1, Color::GRAY_500);
        y = y.max(seal.bottom() + 22) + MARGIN;

        b.finish(y as u32)
    }
}
