//! Render surface bound to a data store, and the capture target it exposes
//!
//! The surface subscribes to its store and repaints inside the change
//! notification, so the painted frame is never older than the record once a
//! store mutation returns.

use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::debug;

use crate::export::state::{ExportState, ExportTracker};
use crate::model::{CardSide, DocumentKind};
use crate::rendering::layout::DisplayList;
use crate::rendering::Render;
use crate::store::{DataStore, SubscriptionId};

pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One completed paint of the surface: the layout plus the identifying
/// fields export needs to name the file.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintedFrame {
    pub display: DisplayList,
    pub kind: DocumentKind,
    /// Primary identifying field as it was when painted
    pub label: String,
    /// Painted face, for two-sided documents only
    pub side: Option<CardSide>,
    /// Increments on every paint of this surface
    pub sequence: u64,
}

pub(crate) struct TargetShared {
    pub(crate) frame: Mutex<Option<Arc<PaintedFrame>>>,
    pub(crate) in_flight: AtomicBool,
    pub(crate) export: Mutex<ExportTracker>,
}

/// Handle to the capturable region of one render surface.
///
/// Clones share the surface's latest frame and its export guard.
#[derive(Clone)]
pub struct CaptureTarget {
    pub(crate) shared: Arc<TargetShared>,
}

impl CaptureTarget {
    fn new() -> Self {
        Self {
            shared: Arc::new(TargetShared {
                frame: Mutex::new(None),
                in_flight: AtomicBool::new(false),
                export: Mutex::new(ExportTracker::default()),
            }),
        }
    }

    /// The most recent frame, if the surface is painted.
    pub fn frame(&self) -> Option<Arc<PaintedFrame>> {
        lock(&self.shared.frame).clone()
    }

    /// True when a frame with a non-empty extent is available.
    pub fn is_ready(&self) -> bool {
        self.frame().is_some_and(|f| !f.display.extent.is_empty())
    }

    pub fn export_state(&self) -> ExportState {
        lock(&self.shared.export).state
    }

    /// States entered by the latest export on this target, in order.
    pub fn last_export_transitions(&self) -> Vec<ExportState> {
        lock(&self.shared.export).history.clone()
    }

    /// Whether two handles refer to the same surface.
    pub fn same_target(&self, other: &CaptureTarget) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl fmt::Debug for CaptureTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureTarget")
            .field("ready", &self.is_ready())
            .field("export_state", &self.export_state())
            .finish()
    }
}

struct PainterState<R> {
    record: Option<R>,
    side: CardSide,
    visible: bool,
    paints: u64,
}

struct Painter<R> {
    state: Mutex<PainterState<R>>,
    target: CaptureTarget,
}

impl<R: Render> Painter<R> {
    fn paint(&self, record: &R) {
        let mut st = lock(&self.state);
        st.record = Some(record.clone());
        self.repaint(&mut st);
    }

    fn repaint(&self, st: &mut PainterState<R>) {
        let frame = match (&st.record, st.visible) {
            (Some(record), true) => {
                st.paints += 1;
                let display = record.layout(st.side);
                debug!(
                    "{} repaint #{} ({}x{})",
                    R::KIND,
                    st.paints,
                    display.extent.width,
                    display.extent.height
                );
                Some(Arc::new(PaintedFrame {
                    display,
                    kind: R::KIND,
                    label: record.primary_label().to_string(),
                    side: R::TWO_SIDED.then_some(st.side),
                    sequence: st.paints,
                }))
            }
            _ => None,
        };
        *lock(&self.target.shared.frame) = frame;
    }
}

/// A read-only view of one workflow's record.
pub struct RenderSurface<R: Render> {
    painter: Arc<Painter<R>>,
    subscription: Option<SubscriptionId>,
}

impl<R: Render> Default for RenderSurface<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Render> RenderSurface<R> {
    /// An unbound surface. Nothing is painted until it is bound to a store.
    pub fn new() -> Self {
        Self {
            painter: Arc::new(Painter {
                state: Mutex::new(PainterState {
                    record: None,
                    side: CardSide::Front,
                    visible: true,
                    paints: 0,
                }),
                target: CaptureTarget::new(),
            }),
            subscription: None,
        }
    }

    /// Create a surface bound to `store` and paint the current record.
    pub fn attach(store: &mut DataStore<R>) -> Self {
        let mut surface = Self::new();
        surface.bind(store);
        surface
    }

    /// Subscribe to `store` and paint its current record immediately.
    pub fn bind(&mut self, store: &mut DataStore<R>) {
        if let Some(old) = self.subscription.take() {
            store.unsubscribe(old);
        }
        let painter = self.painter.clone();
        self.subscription = Some(store.subscribe(move |record: &R| painter.paint(record)));
        self.painter.paint(store.get());
    }

    /// Stop following `store`. The last frame stays painted.
    pub fn detach(&mut self, store: &mut DataStore<R>) -> bool {
        self.subscription.take().is_some_and(|id| store.unsubscribe(id))
    }

    pub fn is_bound(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn side(&self) -> CardSide {
        lock(&self.painter.state).side
    }

    /// Switch the displayed face and repaint.
    pub fn set_side(&self, side: CardSide) {
        let mut st = lock(&self.painter.state);
        st.side = side;
        self.painter.repaint(&mut st);
    }

    pub fn is_visible(&self) -> bool {
        lock(&self.painter.state).visible
    }

    /// Show or hide the surface. A hidden surface holds no frame.
    pub fn set_visible(&self, visible: bool) {
        let mut st = lock(&self.painter.state);
        st.visible = visible;
        self.painter.repaint(&mut st);
    }

    pub fn frame(&self) -> Option<Arc<PaintedFrame>> {
        self.painter.target.frame()
    }

    pub fn capture_target(&self) -> CaptureTarget {
        self.painter.target.clone()
    }

    pub fn paint_count(&self) -> u64 {
        lock(&self.painter.state).paints
    }
}
