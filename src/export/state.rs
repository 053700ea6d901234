//! Export state machine and the per-target in-flight guard

use std::fmt;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use log::debug;

use crate::error::ExportFailure;
use crate::rendering::surface::{lock, CaptureTarget, TargetShared};
use crate::{Error, Result};

/// Phase of the export running against one capture target.
///
/// `Idle -> Capturing -> Encoding -> Downloading -> Idle` on success; any
/// phase may move to `Failed(reason)` and then back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportState {
    #[default]
    Idle,
    Capturing,
    Encoding,
    Downloading,
    Failed(ExportFailure),
}

impl ExportState {
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            ExportState::Capturing | ExportState::Encoding | ExportState::Downloading
        )
    }
}

impl fmt::Display for ExportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportState::Idle => f.write_str("idle"),
            ExportState::Capturing => f.write_str("capturing"),
            ExportState::Encoding => f.write_str("encoding"),
            ExportState::Downloading => f.write_str("downloading"),
            ExportState::Failed(reason) => write!(f, "failed ({reason:?})"),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct ExportTracker {
    pub(crate) state: ExportState,
    pub(crate) history: Vec<ExportState>,
}

/// Exclusive claim on a capture target for the duration of one export.
///
/// Dropping the guard returns the target to `Idle` and releases the claim,
/// whether the export finished, failed, or its future was dropped.
pub(crate) struct ExportGuard {
    shared: Arc<TargetShared>,
}

impl ExportGuard {
    /// Claim `target`. A second claim while one is held is rejected and
    /// leaves the running export's state untouched.
    pub(crate) fn acquire(target: &CaptureTarget) -> Result<Self> {
        let shared = &target.shared;
        if shared
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(Error::ExportAlreadyInProgress);
        }
        lock(&shared.export).history.clear();
        Ok(Self {
            shared: shared.clone(),
        })
    }

    pub(crate) fn enter(&self, next: ExportState) {
        let mut tracker = lock(&self.shared.export);
        debug!("export: {} -> {}", tracker.state, next);
        tracker.state = next;
        tracker.history.push(next);
    }

    pub(crate) fn fail(&self, err: &Error) {
        self.enter(ExportState::Failed(err.reason()));
    }
}

impl Drop for ExportGuard {
    fn drop(&mut self) {
        self.enter(ExportState::Idle);
        self.shared.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Transcript;
    use crate::rendering::RenderSurface;

    #[test]
    fn second_claim_is_rejected_until_release() {
        let surface: RenderSurface<Transcript> = RenderSurface::new();
        let target = surface.capture_target();

        let guard = ExportGuard::acquire(&target).unwrap();
        guard.enter(ExportState::Capturing);
        assert!(matches!(
            ExportGuard::acquire(&target.clone()),
            Err(Error::ExportAlreadyInProgress)
        ));
        assert_eq!(target.export_state(), ExportState::Capturing);

        drop(guard);
        assert_eq!(target.export_state(), ExportState::Idle);
        assert!(ExportGuard::acquire(&target).is_ok());
    }

    #[test]
    fn failure_then_idle_is_recorded() {
        let surface: RenderSurface<Transcript> = RenderSurface::new();
        let target = surface.capture_target();
        {
            let guard = ExportGuard::acquire(&target).unwrap();
            guard.enter(ExportState::Capturing);
            guard.fail(&Error::RasterizationFailed("boom".into()));
        }
        assert_eq!(
            target.last_export_transitions(),
            vec![
                ExportState::Capturing,
                ExportState::Failed(ExportFailure::RasterizationFailed),
                ExportState::Idle,
            ]
        );
        assert!(!target.export_state().is_busy());
    }
}
