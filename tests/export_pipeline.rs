use std::io;

use chrono::NaiveDate;
use tokio::sync::Notify;

use scholardocs::export::{DownloadSink, ExportedImage, MemorySink};
use scholardocs::model::{CardSide, Course, IdCardUpdate, StudentInfo, TranscriptUpdate};
use scholardocs::rendering::raster::render_png;
use scholardocs::rendering::BlockGlyphs;
use scholardocs::{
    Error, ExportFailure, ExportOptions, ExportState, IdCardWorkflow, StudentIdCard, StudioConfig,
    Transcript, TranscriptWorkflow,
};

fn fixture() -> Transcript {
    Transcript {
        student_info: StudentInfo {
            student_name: "Emily Johnson".into(),
            student_id: "482913".into(),
            university: "Stanford University".into(),
            major: "Computer Science".into(),
            admission_date: "2021-09-01".into(),
            graduation_date: "2025-05-15".into(),
            date_of_birth: "2003-04-17".into(),
        },
        courses: vec![Course::blank("course-0"), Course::blank("course-1")],
    }
}

fn transcript_workflow(record: Transcript) -> TranscriptWorkflow {
    TranscriptWorkflow::with_record(record, &StudioConfig::default()).expect("default config is valid")
}

/// Holds each delivery until the test opens the gate.
#[derive(Default)]
struct GatedSink {
    gate: Notify,
    inner: MemorySink,
}

impl DownloadSink for GatedSink {
    async fn deliver(&self, file: &ExportedImage) -> io::Result<()> {
        self.gate.notified().await;
        self.inner.deliver(file).await
    }
}

struct BrokenSink;

impl DownloadSink for BrokenSink {
    async fn deliver(&self, _file: &ExportedImage) -> io::Result<()> {
        Err(io::Error::other("popup blocked"))
    }
}

#[tokio::test]
async fn export_produces_png_at_twice_logical_size() {
    let wf = transcript_workflow(fixture());
    let sink = MemorySink::new();
    let file = wf.export(&sink).await.unwrap();

    let extent = wf.surface().frame().unwrap().display.extent;
    let decoded = image::load_from_memory(&file.bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (extent.width * 2, extent.height * 2));
    assert!(!decoded.color().has_alpha());

    assert_eq!(file.suggested_filename, "Transcript_Emily_Johnson.png");
    assert_eq!(sink.len(), 1);
    assert_eq!(wf.capture_target().export_state(), ExportState::Idle);
}

#[tokio::test]
async fn unpainted_target_fails_without_a_file() {
    let mut wf = IdCardWorkflow::with_record(
        StudentIdCard::blank(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()),
        &StudioConfig::default(),
    )
    .unwrap();
    wf.set_preview_visible(false);

    let sink = MemorySink::new();
    let err = wf.export(&sink).await.unwrap_err();
    assert!(matches!(err, Error::TargetNotReady(_)));
    assert_eq!(err.reason(), ExportFailure::TargetNotReady);
    assert!(sink.is_empty());
    assert_eq!(
        wf.capture_target().last_export_transitions(),
        vec![
            ExportState::Capturing,
            ExportState::Failed(ExportFailure::TargetNotReady),
            ExportState::Idle
        ]
    );

    wf.set_preview_visible(true);
    assert!(wf.export(&sink).await.is_ok());
}

#[tokio::test]
async fn concurrent_export_is_rejected_and_first_completes() {
    let wf = transcript_workflow(fixture());
    let sink = MemorySink::new();

    let (first, second) = tokio::join!(wf.export(&sink), wf.export(&sink));

    let first = first.expect("first export completes normally");
    assert!(matches!(second, Err(Error::ExportAlreadyInProgress)));
    assert_eq!(sink.files(), vec![first]);
    // the rejected call leaves the running export's history intact
    assert_eq!(
        wf.capture_target().last_export_transitions(),
        vec![
            ExportState::Capturing,
            ExportState::Encoding,
            ExportState::Downloading,
            ExportState::Idle
        ]
    );
}

#[tokio::test]
async fn export_is_unaffected_by_edits_made_while_in_flight() {
    let mut wf = transcript_workflow(fixture());
    let pipeline = wf.pipeline().clone();
    let target = wf.capture_target();
    let before = target.frame().unwrap();
    let expected = render_png(&before.display, pipeline.options(), &BlockGlyphs).unwrap();

    let sink = GatedSink::default();
    let export = pipeline.export_as_image(&target, &sink);
    let edit = async {
        let mut spins = 0;
        while target.export_state() != ExportState::Downloading {
            spins += 1;
            assert!(spins < 1_000, "export never reached the download phase");
            tokio::task::yield_now().await;
        }
        wf.edit(TranscriptUpdate::StudentName("Michael Brown".into()));
        wf.edit(TranscriptUpdate::RemoveCourse("course-1".into()));
        sink.gate.notify_one();
    };
    let (file, ()) = tokio::join!(export, edit);

    let file = file.unwrap();
    assert_eq!(file.suggested_filename, "Transcript_Emily_Johnson.png");
    assert_eq!(file.bytes, expected.png_data);
    assert_eq!(wf.surface().frame().unwrap().label, "Michael Brown");
}

#[tokio::test]
async fn download_and_rasterization_failures_are_distinct() {
    let wf = transcript_workflow(fixture());
    let err = wf.export(&BrokenSink).await.unwrap_err();
    assert!(matches!(err, Error::DownloadTriggerFailed(_)));
    assert_eq!(
        wf.capture_target().last_export_transitions(),
        vec![
            ExportState::Capturing,
            ExportState::Encoding,
            ExportState::Downloading,
            ExportState::Failed(ExportFailure::DownloadTriggerFailed),
            ExportState::Idle
        ]
    );

    let tiny = StudioConfig {
        export: ExportOptions {
            max_canvas_pixels: 64,
            ..Default::default()
        },
        ..Default::default()
    };
    let wf = TranscriptWorkflow::with_record(fixture(), &tiny).unwrap();
    let sink = MemorySink::new();
    let err = wf.export(&sink).await.unwrap_err();
    assert!(matches!(err, Error::RasterizationFailed(_)));
    assert!(sink.is_empty());
    assert_eq!(
        wf.capture_target().last_export_transitions(),
        vec![
            ExportState::Capturing,
            ExportState::Failed(ExportFailure::RasterizationFailed),
            ExportState::Idle
        ]
    );
}

#[tokio::test]
async fn empty_name_uses_placeholder_in_filename() {
    let mut record = fixture();
    record.student_info.student_name.clear();
    let wf = transcript_workflow(record);
    let file = wf.export(&MemorySink::new()).await.unwrap();
    assert_eq!(file.suggested_filename, "Transcript_Student.png");

    let mut card = IdCardWorkflow::with_record(
        StudentIdCard::blank(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()),
        &StudioConfig::default(),
    )
    .unwrap();
    card.show_side(CardSide::Back);
    let file = card.export(&MemorySink::new()).await.unwrap();
    assert_eq!(file.suggested_filename, "StudentID_Student_back.png");
    assert_eq!(file.side, Some(CardSide::Back));

    card.edit(IdCardUpdate::StudentName("Sarah Williams".into()));
    card.show_side(CardSide::Front);
    let file = card.export(&MemorySink::new()).await.unwrap();
    assert_eq!(file.suggested_filename, "StudentID_Sarah_Williams_front.png");
}
