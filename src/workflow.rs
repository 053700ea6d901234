//! One document workflow: data store, render surface and export pipeline
//!
//! The three workflows share nothing. Each owns its record, its surface and
//! the export guard on that surface's capture target.

use std::fmt;

use rand::Rng;

use crate::config::{StudioConfig, UploadLimits};
use crate::export::{DownloadSink, ExportPipeline, ExportedImage};
use crate::gpa;
use crate::model::{
    ingest_image, AdmissionLetter, AdmissionUpdate, CardSide, Course, CourseField, IdCardUpdate,
    StudentIdCard, Transcript, TranscriptUpdate,
};
use crate::rendering::{CaptureTarget, Render, RenderSurface};
use crate::sample::{Sample, SampleGenerator};
use crate::store::DataStore;
use crate::Result;

pub type TranscriptWorkflow = Workflow<Transcript>;
pub type IdCardWorkflow = Workflow<StudentIdCard>;
pub type AdmissionWorkflow = Workflow<AdmissionLetter>;

pub struct Workflow<R: Render> {
    store: DataStore<R>,
    surface: RenderSurface<R>,
    pipeline: ExportPipeline,
    generator: SampleGenerator,
    upload: UploadLimits,
}

impl<R: Render + Sample> Workflow<R> {
    /// Mount a workflow seeded with a freshly generated sample record.
    pub fn with_sample(config: &StudioConfig) -> Result<Self> {
        Self::with_generator(SampleGenerator::default(), config)
    }

    /// Mount with a specific generator (for pinned dates or other catalogs).
    pub fn with_generator(generator: SampleGenerator, config: &StudioConfig) -> Result<Self> {
        let mut workflow = Self::with_record(generator.generate(), config)?;
        workflow.generator = generator;
        Ok(workflow)
    }

    /// Replace the whole record with a new sample.
    pub fn randomize(&mut self) -> &R {
        let record = self.generator.generate();
        self.store.replace(record)
    }

    pub fn randomize_with<G: Rng + ?Sized>(&mut self, rng: &mut G) -> &R {
        let record = self.generator.generate_with(rng);
        self.store.replace(record)
    }
}

impl<R: Render> Workflow<R> {
    /// Mount a workflow around `record` and paint it.
    pub fn with_record(record: R, config: &StudioConfig) -> Result<Self> {
        let pipeline = ExportPipeline::new(config.export.clone())?;
        let mut store = DataStore::new(record);
        let surface = RenderSurface::attach(&mut store);
        Ok(Self {
            store,
            surface,
            pipeline,
            generator: SampleGenerator::default(),
            upload: config.upload,
        })
    }

    pub fn record(&self) -> &R {
        self.store.get()
    }

    pub fn store(&self) -> &DataStore<R> {
        &self.store
    }

    /// Apply one field edit. The surface has repainted when this returns.
    pub fn edit(&mut self, update: R::Update) -> &R {
        self.store.set(update)
    }

    pub fn edit_all<I>(&mut self, updates: I) -> &R
    where
        I: IntoIterator<Item = R::Update>,
    {
        self.store.set_all(updates)
    }

    pub fn replace(&mut self, record: R) -> &R {
        self.store.replace(record)
    }

    pub fn surface(&self) -> &RenderSurface<R> {
        &self.surface
    }

    pub fn capture_target(&self) -> CaptureTarget {
        self.surface.capture_target()
    }

    pub fn pipeline(&self) -> &ExportPipeline {
        &self.pipeline
    }

    /// Export what the surface currently shows.
    pub async fn export<S: DownloadSink>(&self, sink: &S) -> Result<ExportedImage> {
        self.pipeline
            .export_as_image(&self.surface.capture_target(), sink)
            .await
    }
}

impl Workflow<Transcript> {
    /// Append a blank course and return its id.
    pub fn add_course(&mut self) -> String {
        let id = self.record().next_course_id();
        self.edit(TranscriptUpdate::AddCourse(Course::blank(id.clone())));
        id
    }

    pub fn edit_course(&mut self, id: &str, field: CourseField) -> &Transcript {
        self.edit(TranscriptUpdate::EditCourse {
            id: id.to_string(),
            field,
        })
    }

    pub fn remove_course(&mut self, id: &str) -> &Transcript {
        self.edit(TranscriptUpdate::RemoveCourse(id.to_string()))
    }

    /// Cumulative GPA as shown on the transcript.
    pub fn gpa(&self) -> String {
        gpa::compute_gpa(&self.record().courses)
    }

    pub fn total_credits(&self) -> u64 {
        gpa::total_credits(&self.record().courses)
    }
}

impl Workflow<StudentIdCard> {
    /// Decode and store a photo. A rejected file leaves the current photo in place.
    pub fn upload_photo(&mut self, file: &[u8]) -> Result<()> {
        let photo = ingest_image(file, &self.upload)?;
        self.edit(IdCardUpdate::StudentPhoto(Some(photo)));
        Ok(())
    }

    pub fn clear_photo(&mut self) {
        self.edit(IdCardUpdate::StudentPhoto(None));
    }

    pub fn side(&self) -> CardSide {
        self.surface.side()
    }

    /// Flip the preview to `side`; subsequent exports capture that face.
    pub fn show_side(&mut self, side: CardSide) {
        self.surface.set_side(side);
    }

    /// A hidden preview is not painted and cannot be exported.
    pub fn set_preview_visible(&mut self, visible: bool) {
        self.surface.set_visible(visible);
    }
}

impl Workflow<AdmissionLetter> {
    /// Decode and store a school logo. A rejected file leaves the current logo in place.
    pub fn upload_logo(&mut self, file: &[u8]) -> Result<()> {
        let logo = ingest_image(file, &self.upload)?;
        self.edit(AdmissionUpdate::SchoolLogo(Some(logo)));
        Ok(())
    }

    pub fn clear_logo(&mut self) {
        self.edit(AdmissionUpdate::SchoolLogo(None));
    }
}

impl<R: Render> fmt::Debug for Workflow<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workflow")
            .field("kind", &R::KIND)
            .field("store", &self.store)
            .field("pipeline", &self.pipeline)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::image::tests::png_bytes;
    use crate::Error;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generator() -> SampleGenerator {
        SampleGenerator::default().with_today(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap())
    }

    #[test]
    fn course_editing_updates_derived_fields() {
        let mut wf = TranscriptWorkflow::with_record(Transcript::default(), &StudioConfig::default()).unwrap();
        let a = wf.add_course();
        let b = wf.add_course();
        assert_ne!(a, b);
        assert_eq!(wf.total_credits(), 6);
        assert_eq!(wf.gpa(), "4.00");

        wf.edit_course(&b, CourseField::Grade("C".into()));
        assert_eq!(wf.gpa(), "3.00");
        wf.edit_course(&b, CourseField::credit_from_input("abc"));
        assert_eq!(wf.total_credits(), 3);

        wf.remove_course(&a);
        assert_eq!(wf.record().courses.len(), 1);
        assert!(wf.surface().frame().unwrap().display.contains_text("Total Credits Earned: 0"));
    }

    #[test]
    fn randomize_repaints() {
        let mut wf = IdCardWorkflow::with_generator(generator(), &StudioConfig::default()).unwrap();
        let before = wf.surface().paint_count();
        let name = wf
            .randomize_with(&mut StdRng::seed_from_u64(7))
            .student_name
            .clone();
        assert_eq!(wf.surface().paint_count(), before + 1);
        assert_eq!(wf.surface().frame().unwrap().label, name);
    }

    #[test]
    fn rejected_upload_keeps_previous_photo() {
        let mut wf = IdCardWorkflow::with_generator(generator(), &StudioConfig::default()).unwrap();
        wf.upload_photo(&png_bytes(3, 4, [9, 9, 9, 255])).unwrap();
        let photo = wf.record().student_photo.clone();
        assert!(photo.is_some());

        let err = wf.upload_photo(b"not an image").unwrap_err();
        assert!(matches!(err, Error::InvalidUpload(_)));
        assert_eq!(wf.record().student_photo, photo);

        wf.clear_photo();
        assert!(wf.record().student_photo.is_none());
    }

    #[test]
    fn logo_upload_respects_limits() {
        let config = StudioConfig {
            upload: UploadLimits {
                max_dimension: 2,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut wf = AdmissionWorkflow::with_generator(generator(), &config).unwrap();
        assert!(wf.upload_logo(&png_bytes(3, 3, [0, 0, 0, 255])).is_err());
        assert!(wf.record().school_logo.is_none());
        wf.upload_logo(&png_bytes(2, 2, [0, 0, 0, 255])).unwrap();
        assert!(wf.surface().frame().unwrap().display.has_image());
    }
}
