//! Two-sided student ID card layout

use crate::model::{CardSide, StudentIdCard};
use crate::rendering::layout::{fit_scale, DisplayList, LayoutBuilder, Rect};
use crate::rendering::paint::{Color, ImageFit};
use crate::rendering::Render;

const WIDTH: u32 = 320;
const FRONT_HEIGHT: u32 = 208;
const BACK_HEIGHT: u32 = 240;
const DEFAULT_FACULTY: &str = "Faculty of Economics and Management";

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

impl Render for StudentIdCard {
    const TWO_SIDED: bool = true;

    fn layout(&self, side: CardSide) -> DisplayList {
        match side {
            CardSide::Front => front(self),
            CardSide::Back => back(self),
        }
    }
}

fn front(card: &StudentIdCard) -> DisplayList {
    let mut b = LayoutBuilder::new(WIDTH);

    // Header band
    b.fill(Rect::new(0, 0, WIDTH, 48), Color::RED_600);
    let uni = card.university_name();
    let uni_scale = fit_scale(uni, WIDTH - 16, 2);
    b.text_centered(0, WIDTH, 12, uni, uni_scale, Color::WHITE);
    b.text_centered(0, WIDTH, 32, "INTERNATIONAL STUDENT ID CARD", 1, Color::WHITE);

    // Photo
    let photo = Rect::new(16, 64, 80, 96);
    b.fill(photo, Color::GRAY_200);
    match &card.student_photo {
        Some(img) => b.image(photo, img, ImageFit::Cover),
        None => b.text_centered(photo.x, photo.width, photo.y + 44, "PHOTO", 1, Color::GRAY_500),
    }

    // Identity fields
    let x = photo.right() + 16;
    let value_w = WIDTH - x as u32 - 12;
    let fields = [
        ("NAME", or_default(&card.student_name, "Student Name")),
        ("STUDENT ID", or_default(&card.student_id, "INT000000")),
        ("FACULTY", or_default(&card.major, DEFAULT_FACULTY)),
    ];
    let mut y = 66;
    for (label, value) in fields {
        b.text(x, y, label, 1, Color::GRAY_600);
        let below = b.paragraph(x, y + 11, value_w, value, 1, Color::GRAY_900);
        y = (y + 32).max(below + 6);
    }

    // Validity footer, pushed down when the fields run long
    let footer = (FRONT_HEIGHT as i32 - 30).max(y.max(photo.bottom()) + 6);
    let height = (footer + 30) as u32;
    b.text(16, footer, "ISSUE", 1, Color::GRAY_600);
    b.text(16, footer + 11, &card.issue_date, 1, Color::GRAY_900);
    b.text_right(WIDTH as i32 - 16, footer, "VALID", 1, Color::GRAY_600);
    b.text_right(WIDTH as i32 - 16, footer + 11, &card.expiration_date, 1, Color::GRAY_900);

    b.stroke(Rect::new(0, 0, WIDTH, height), 1, Color::GRAY_300);
    b.finish(height)
}

fn back(card: &StudentIdCard) -> DisplayList {
    let mut b = LayoutBuilder::new(WIDTH);
    let inner_w = WIDTH - 32;

    // Magnetic strip
    b.fill(Rect::new(0, 0, WIDTH, 12), Color::BLACK);

    b.text_centered(0, WIDTH, 26, "TERMS & CONDITIONS", 1, Color::GRAY_900);
    b.hline((WIDTH as i32 - 64) / 2, 38, 64, 1, Color::GRAY_300);

    let terms = format!(
        "This card is the property of {} and must be returned upon request.",
        card.university_name()
    );
    let mut y = b.paragraph(16, 48, inner_w, &terms, 1, Color::GRAY_700);
    y = b.paragraph(
        16,
        y + 4,
        inner_w,
        "Misuse of this card may result in disciplinary action. Report lost or stolen cards immediately.",
        1,
        Color::GRAY_700,
    );

    // Signature panel, anchored to the bottom edge
    let panel = Rect::new(16, (BACK_HEIGHT as i32 - 108).max(y + 6), inner_w, 96);
    b.fill(panel, Color::GRAY_50);
    b.stroke(panel, 1, Color::GRAY_200);
    b.text(panel.x + 10, panel.y + 8, "STUDENT SIGNATURE", 1, Color::GRAY_600);

    let line = Rect::new(panel.x + 10, panel.y + 22, panel.width - 20, 40);
    b.fill(line, Color::WHITE);
    b.stroke(line, 1, Color::GRAY_300);
    if card.student_signature.is_empty() {
        b.text_centered(line.x, line.width, line.y + 16, "Please sign here", 1, Color::GRAY_400);
    } else {
        let scale = fit_scale(&card.student_signature, line.width - 8, 2);
        let text_y = line.y + (line.height as i32 - 8 * scale as i32) / 2;
        b.text_centered(line.x, line.width, text_y, &card.student_signature, scale, Color::BLUE_900);
    }

    let dates_y = line.bottom() + 12;
    b.text(panel.x + 10, dates_y, &format!("ISSUED: {}", card.issue_date), 1, Color::GRAY_700);
    b.text_right(
        panel.right() - 10,
        dates_y,
        &format!("EXPIRES: {}", card.expiration_date),
        1,
        Color::GRAY_700,
    );

    let height = BACK_HEIGHT.max((panel.bottom() + 12) as u32);
    b.stroke(Rect::new(0, 0, WIDTH, height), 1, Color::GRAY_300);
    b.finish(height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::image::tests::png_bytes;
    use crate::model::ingest_image;
    use crate::rendering::paint::{PaintCommand, GLYPH_HEIGHT};
    use chrono::NaiveDate;

    fn card() -> StudentIdCard {
        StudentIdCard::blank(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap())
    }

    #[test]
    fn front_uses_placeholders_when_empty() {
        let list = card().layout(CardSide::Front);
        assert_eq!((list.extent.width, list.extent.height), (WIDTH, FRONT_HEIGHT));
        assert!(list.contains_text("PHOTO"));
        assert!(list.contains_text("Student Name"));
        assert!(list.contains_text("INT000000"));
        assert!(list.contains_text("Zhejiang University"));
        assert!(!list.has_image());
    }

    #[test]
    fn front_paints_photo_when_present() {
        let mut c = card();
        c.student_photo = Some(ingest_image(&png_bytes(4, 5, [1, 2, 3, 255]), &Default::default()).unwrap());
        let list = c.layout(CardSide::Front);
        assert!(list.has_image());
        assert!(!list.contains_text("PHOTO"));
    }

    fn text_pos(list: &DisplayList, needle: &str) -> (i32, i32) {
        list.commands
            .iter()
            .find_map(|c| match c {
                PaintCommand::Text { x, y, text, .. } if text == needle => Some((*x, *y)),
                _ => None,
            })
            .unwrap_or_else(|| panic!("no text {needle:?}"))
    }

    fn text_y(list: &DisplayList, needle: &str) -> i32 {
        text_pos(list, needle).1
    }

    #[test]
    fn long_values_push_following_fields_down() {
        let mut c = card();
        c.student_name = "Maximilian Alexander Fitzgerald Montgomery-Worthington de la Cruz Esquire".into();
        c.major = "Interdisciplinary Studies in Computational Linguistics and Cognitive Neuroscience".into();
        let list = c.layout(CardSide::Front);

        let (column, name_label) = text_pos(&list, "NAME");
        let id_label = text_y(&list, "STUDENT ID");
        let faculty_label = text_y(&list, "FACULTY");
        let issue_label = text_y(&list, "ISSUE");
        let value_lines = |from: i32, to: i32| {
            list.commands
                .iter()
                .filter_map(|cmd| match cmd {
                    PaintCommand::Text { x, y, .. } if *x == column && *y > from && *y < to => Some(*y),
                    _ => None,
                })
                .max()
        };

        let last_name_line = value_lines(name_label, id_label).unwrap();
        assert!(last_name_line - name_label >= 2 * 12, "name should wrap to 3+ lines");
        assert!(last_name_line + GLYPH_HEIGHT as i32 <= id_label);

        let last_faculty_line = value_lines(faculty_label, issue_label).unwrap();
        assert!(last_faculty_line + GLYPH_HEIGHT as i32 <= issue_label);
        assert!(list.extent.height > FRONT_HEIGHT);
        assert_eq!(issue_label + 30, list.extent.height as i32);
    }

    #[test]
    fn back_shows_signature_or_prompt() {
        let mut c = card();
        let list = c.layout(CardSide::Back);
        assert!(list.contains_text("Please sign here"));
        assert_eq!(list.extent.height, BACK_HEIGHT);

        c.student_signature = "Sarah Williams".into();
        let list = c.layout(CardSide::Back);
        assert!(list.contains_text("Sarah Williams"));
        assert!(list.contains_text("EXPIRES: 2030-09-01"));
    }
}
