//! Cycle controller
//!
//! Owns everything that lives for the whole session and runs one
//! sample-evaluate-render pass per call. The firmware calls
//! [`GateController::run_cycle`] in a tight loop.

use unigate_hal::{ByteStore, DelayNs, InputPin, OutputPin};

use crate::gate::{GateView, Row, RowState, TopologyMode};
use crate::outputs::OutputBuses;
use crate::sampler::Sampler;
use crate::state::{FamilyChange, FamilySelector, Session};
use crate::status::{Palette, StatusFrame};
use crate::traits::{DiagramSink, DisplayError, LedError, StatusSink};

/// Role of the row-4 pins for this session
pub enum RowFour<'a> {
    /// Display present: the free row-4 pin is the mode button
    ModeButton(&'a dyn InputPin),
    /// No display: all row-4 pins (including the released bus lines) are inputs
    Inputs(&'a [&'a dyn InputPin]),
}

/// Input pins grouped by row
pub struct InputBank<'a> {
    /// Rows 1 to 3
    pub rows: [&'a [&'a dyn InputPin]; 3],
    /// Row 4
    pub row4: RowFour<'a>,
}

/// Outcome of one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    /// State that was evaluated and rendered
    pub view: GateView,
    /// Family change caused by a button edge this cycle
    pub change: Option<FamilyChange>,
    /// Display update failure, if any
    pub display_fault: Option<DisplayError>,
    /// LED chain update failure, if any
    pub led_fault: Option<LedError>,
}

/// Top-level per-cycle driver
pub struct GateController<'a, D, P, S> {
    sampler: Sampler<D>,
    inputs: InputBank<'a>,
    outputs: OutputBuses<P>,
    selector: FamilySelector,
    store: S,
    session: Session,
    palette: Palette,
}

impl<'a, D, P, S> GateController<'a, D, P, S>
where
    D: DelayNs,
    P: OutputPin,
    S: ByteStore,
{
    /// Assemble the controller from its session-long parts
    pub fn new(
        sampler: Sampler<D>,
        inputs: InputBank<'a>,
        outputs: OutputBuses<P>,
        selector: FamilySelector,
        store: S,
        session: Session,
        palette: Palette,
    ) -> Self {
        Self {
            sampler,
            inputs,
            outputs,
            selector,
            store,
            session,
            palette,
        }
    }

    /// Boot-session facts
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Family selector
    pub fn selector(&self) -> &FamilySelector {
        &self.selector
    }

    /// Output buses
    pub fn outputs(&self) -> &OutputBuses<P> {
        &self.outputs
    }

    /// Run one cycle
    ///
    /// Order: sample rows, handle the mode button, evaluate, drive the output
    /// pins, then refresh the LEDs and (if given) the diagram. Render
    /// failures are reported, never retried.
    pub fn run_cycle(
        &mut self,
        status: &mut dyn StatusSink,
        diagram: Option<&mut dyn DiagramSink>,
    ) -> CycleReport {
        let mode = self.session.mode();
        let (rows, button) = self.sample(mode);

        let change = match button {
            Some(pressed) => self.selector.on_button(pressed, &mut self.store),
            None => None,
        };

        let view = GateView::evaluate(self.selector.family(), mode, rows);
        self.outputs.drive(view.outputs);

        let led_fault = status
            .show(&StatusFrame::compose(&view, &self.palette))
            .err();
        let display_fault = diagram.and_then(|sink| sink.present(&view).err());

        CycleReport {
            view,
            change,
            display_fault,
            led_fault,
        }
    }

    /// Debounced row values and, in display mode, the button level
    fn sample(&mut self, mode: TopologyMode) -> (RowState, Option<bool>) {
        let mut rows = RowState::default();
        for (row, pins) in [Row::One, Row::Two, Row::Three]
            .into_iter()
            .zip(self.inputs.rows)
        {
            rows.set(row, self.sampler.row_or(pins));
        }

        let mut button = None;
        match &self.inputs.row4 {
            RowFour::ModeButton(pin) if mode.has_mode_button() => {
                button = Some(self.sampler.read_stable(*pin));
            }
            RowFour::Inputs(pins) if mode.uses_row4() => {
                rows.set(Row::Four, self.sampler.row_or(pins));
            }
            // Pins wired for the other topology are left unread
            _ => {}
        }

        (rows, button)
    }
}
