//! Pointer activation: telling a click from a drag.
//!
//! A press only becomes a drag once the pointer has travelled strictly more
//! than the activation distance from where it went down. Releasing earlier
//! is a click and produces no drag events at all.
//!
//! Hit-testing stays with the caller: it passes the element under the
//! pointer into `over` / `release`.

use tracing::debug;

use super::config::{BoardConfig, DEFAULT_ACTIVATION_DISTANCE};
use crate::domain::{DragEvent, DragRef};

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Idle,
    Pressed { dragged: DragRef, x: f64, y: f64 },
    Active { dragged: DragRef },
}

/// Turns raw pointer input into `DragEvent`s.
///
/// # 例
/// ```ignore
/// let mut sensor = PointerSensor::new(5.0);
/// sensor.press(DragRef::task("t1"), 0.0, 0.0);
/// assert_eq!(sensor.moved(3.0, 0.0), None); // まだ click
/// let start = sensor.moved(6.0, 0.0);       // Some(DragEvent::Start { .. })
/// ```
#[derive(Debug, Clone)]
pub struct PointerSensor {
    activation_distance: f64,
    phase: Phase,
}

impl PointerSensor {
    pub fn new(activation_distance: f64) -> Self {
        Self {
            activation_distance,
            phase: Phase::Idle,
        }
    }

    pub fn from_config(config: &BoardConfig) -> Self {
        Self::new(config.activation_distance)
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Active { .. })
    }

    /// Pointer went down on `dragged`. A press during an active drag is ignored.
    pub fn press(&mut self, dragged: DragRef, x: f64, y: f64) {
        if self.is_active() {
            return;
        }
        self.phase = Phase::Pressed { dragged, x, y };
    }

    /// Pointer moved. Returns `Start` on the move that crosses the threshold.
    pub fn moved(&mut self, x: f64, y: f64) -> Option<DragEvent> {
        let Phase::Pressed {
            dragged,
            x: x0,
            y: y0,
        } = &self.phase
        else {
            return None;
        };

        let distance = (x - x0).hypot(y - y0);
        if distance <= self.activation_distance {
            return None;
        }

        let dragged = dragged.clone();
        debug!(%dragged, distance, "pointer drag activated");
        self.phase = Phase::Active {
            dragged: dragged.clone(),
        };
        Some(DragEvent::Start { dragged })
    }

    /// Element under the pointer changed. Only meaningful while active.
    pub fn over(&self, target: Option<DragRef>) -> Option<DragEvent> {
        match &self.phase {
            Phase::Active { dragged } => Some(DragEvent::Over {
                dragged: dragged.clone(),
                target,
            }),
            _ => None,
        }
    }

    /// Pointer went up over `target`. Returns `End` only for an active drag.
    pub fn release(&mut self, target: Option<DragRef>) -> Option<DragEvent> {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Active { dragged } => Some(DragEvent::End { dragged, target }),
            Phase::Pressed { dragged, .. } => {
                debug!(%dragged, "released before activation, treating as a click");
                None
            }
            Phase::Idle => None,
        }
    }

    /// Abort (Escape key, pointer lost). Returns `Cancel` for an active drag.
    pub fn cancel(&mut self) -> Option<DragEvent> {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Active { .. } => Some(DragEvent::Cancel),
            _ => None,
        }
    }
}

impl Default for PointerSensor {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVATION_DISTANCE)
    }
}
