//! Gate diagram panel
//!
//! Joins the diagram renderer to an SSD1306 so the cycle controller can
//! treat the display as a [`DiagramSink`].

use embedded_hal::i2c::I2c;
use unigate_core::gate::GateView;
use unigate_core::traits::{DiagramSink, DisplayError};
use unigate_display::{render, DiagramLayout};

use super::ssd1306::Ssd1306;

/// SSD1306 showing the live gate diagram
pub struct OledPanel<I2C> {
    display: Ssd1306<I2C>,
    layout: DiagramLayout,
}

impl<I2C: I2c> OledPanel<I2C> {
    /// Initialize the controller and blank the screen
    pub fn new(mut display: Ssd1306<I2C>, layout: DiagramLayout) -> Result<Self, DisplayError> {
        display.init().map_err(|_| DisplayError::Communication)?;
        display.flush().map_err(|_| DisplayError::Communication)?;
        Ok(Self { display, layout })
    }
}

impl<I2C: I2c> DiagramSink for OledPanel<I2C> {
    fn present(&mut self, view: &GateView) -> Result<(), DisplayError> {
        render(self.display.framebuffer_mut(), view, &self.layout);
        self.display
            .flush()
            .map_err(|_| DisplayError::Communication)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};
    use unigate_core::gate::{GateFamily, RowState, TopologyMode};
    use unigate_display::{Canvas, Framebuffer, BUFFER_LEN};

    /// Keeps the last data stream; stops acknowledging after `unplug_after`
    /// transactions
    #[derive(Default)]
    struct Sink {
        transactions: usize,
        last_stream: Vec<u8>,
        unplug_after: Option<usize>,
    }

    impl ErrorType for Sink {
        type Error = ErrorKind;
    }

    impl I2c for Sink {
        fn transaction(
            &mut self,
            _address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.unplug_after.is_some_and(|n| self.transactions >= n) {
                return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
            }
            self.transactions += 1;
            if operations.len() == 2 {
                self.last_stream.clear();
                if let Operation::Write(data) = &operations[1] {
                    self.last_stream.extend_from_slice(data);
                }
            }
            Ok(())
        }
    }

    fn view(family: GateFamily) -> GateView {
        GateView::evaluate(
            family,
            TopologyMode::ThreeInputWithDisplay,
            RowState::new(true, false, true, false),
        )
    }

    #[test]
    fn test_new_initializes_and_blanks() {
        let panel = OledPanel::new(Ssd1306::new(Sink::default(), 0x3C), DiagramLayout::DEFAULT)
            .unwrap();
        let sent = panel.display.release().last_stream;
        assert_eq!(sent.len(), BUFFER_LEN);
        assert!(sent.iter().all(|b| *b == 0));
    }

    #[test]
    fn test_present_streams_rendered_diagram() {
        let mut panel =
            OledPanel::new(Ssd1306::new(Sink::default(), 0x3C), DiagramLayout::DEFAULT).unwrap();
        let v = view(GateFamily::MajMin);
        panel.present(&v).unwrap();

        let mut expected = Framebuffer::new();
        expected.set_pixel(0, 0, true);
        render(&mut expected, &v, &DiagramLayout::DEFAULT);

        let sent = &panel.display.release().last_stream;
        assert_eq!(sent.len(), BUFFER_LEN);
        assert_eq!(sent.as_slice(), expected.as_bytes().as_slice());
    }

    #[test]
    fn test_unplugged_display_reports_communication_error() {
        let sink = Sink::default();
        let panel = OledPanel::new(Ssd1306::new(sink, 0x3C), DiagramLayout::DEFAULT).unwrap();
        let setup = panel.display.release().transactions;

        let sink = Sink {
            unplug_after: Some(setup),
            ..Default::default()
        };
        let mut panel = OledPanel::new(Ssd1306::new(sink, 0x3C), DiagramLayout::DEFAULT).unwrap();
        assert_eq!(
            panel.present(&view(GateFamily::AndNand)),
            Err(DisplayError::Communication)
        );
    }

    #[test]
    fn test_failed_init_is_reported() {
        let sink = Sink {
            unplug_after: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            OledPanel::new(Ssd1306::new(sink, 0x3C), DiagramLayout::DEFAULT),
            Err(DisplayError::Communication)
        ));
    }
}
