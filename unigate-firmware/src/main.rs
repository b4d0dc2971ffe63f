//! Unigate - Universal Logic Gate Firmware
//!
//! Main firmware binary for RP2040-based gate boards. Four input rows and
//! two triplicated output buses become a reconfigurable logic gate, with a
//! WS2812 status chain and an optional SSD1306 showing the gate diagram.
//!
//! Boot: LED warm-up sweep (display power-up time), restore the family from
//! flash, probe the display once. A display found at boot means three input
//! rows plus a mode button on row 4; no display means the bus pins join
//! row 4 and all four rows are inputs. The loop then runs forever.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{InterruptHandler, Pio};
use embassy_rp::pio_programs::ws2812::PioWs2812Program;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use unigate_core::controller::{CycleReport, GateController, InputBank, RowFour};
use unigate_core::gate::DisplayPresence;
use unigate_core::outputs::{OutputBus, OutputBuses};
use unigate_core::sampler::Sampler;
use unigate_core::state::{FamilySelector, LoadOutcome, PersistOutcome, Session};
use unigate_core::status::{Palette, WarmUp, LED_COUNT};
use unigate_core::traits::DiagramSink;
use unigate_display::DiagramLayout;
use unigate_drivers::bus::{BitBangI2c, Probe, DISPLAY_ADDRESSES};
use unigate_drivers::display::{OledPanel, Ssd1306};
use unigate_drivers::led::LedStrip;
use unigate_hal_rp2040::flash::FlashByteStore;
use unigate_hal_rp2040::gpio::{GpioFlex, GpioInput, GpioOutput};
use unigate_hal_rp2040::time::EmbassyClock;
use unigate_hal_rp2040::ws2812::Ws2812Chain;
use unigate_hal_rp2040::{InputPin, Pull};

use crate::config::GATE_CONFIG;

mod config;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => InterruptHandler<PIO0>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Unigate firmware v{} starting...", env!("CARGO_PKG_VERSION"));

    let p = embassy_rp::init(Default::default());
    let timing = GATE_CONFIG.timing;
    let palette = Palette::DEFAULT;

    // Status LEDs on PIO0 SM0
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let program = PioWs2812Program::new(&mut common);
    let chain: Ws2812Chain<'_, PIO0, 0, LED_COUNT> =
        Ws2812Chain::new(&mut common, sm0, p.DMA_CH0, p.PIN_16, &program);
    let mut leds = LedStrip::new(chain, EmbassyClock, Delay, timing.led_latch_guard_us);

    // Warm-up sweep; the display module powers up meanwhile
    let report = WarmUp::from_timing(&timing).run(&mut leds, &palette, &EmbassyClock, &mut Delay);
    if report.failed_frames > 0 {
        warn!(
            "LED chain rejected {}/{} warm-up frames",
            report.failed_frames, report.frames
        );
    }

    // Persisted family
    let mut store = FlashByteStore::new(p.FLASH, p.DMA_CH1);
    let (selector, outcome) =
        FamilySelector::load(&mut store, GATE_CONFIG.family_key, GATE_CONFIG.factory_default);
    match outcome {
        LoadOutcome::Restored => info!("Family restored: {}", selector.family()),
        LoadOutcome::ColdStart { stored } => info!(
            "No family stored (found {=u8:#x}), cold start with {}",
            stored,
            selector.family()
        ),
        LoadOutcome::Unreadable(e) => warn!(
            "Family store unreadable ({}), cold start with {}",
            e,
            selector.family()
        ),
    }

    // Single display probe; the answer holds for the whole session
    let bus = BitBangI2c::new(
        GpioFlex::new(p.PIN_10),
        GpioFlex::new(p.PIN_11),
        Delay,
        timing.bus_delay_us,
    );
    let mut panel = None;
    let mut released = None;
    let presence = match bus.probe(&DISPLAY_ADDRESSES) {
        Probe::Found { bus, address } => {
            info!("Display found at {=u8:#x}", address);
            match OledPanel::new(Ssd1306::new(bus, address), DiagramLayout::DEFAULT) {
                Ok(oled) => panel = Some(oled),
                Err(e) => warn!("Display init failed ({}), running without diagram", e),
            }
            DisplayPresence::Detected(address)
        }
        Probe::Absent { sda, scl } => {
            info!("No display, bus pins released to row 4");
            released = Some((sda, scl));
            DisplayPresence::Absent
        }
    };
    let session = Session::new(presence);
    info!("Topology: {} ({})", session.mode(), session.presence());

    // Input rows; the boards carry external pull-downs
    let in1 = [
        GpioInput::new(p.PIN_2, Pull::None),
        GpioInput::new(p.PIN_3, Pull::None),
        GpioInput::new(p.PIN_4, Pull::None),
    ];
    let in2 = [
        GpioInput::new(p.PIN_5, Pull::None),
        GpioInput::new(p.PIN_6, Pull::None),
    ];
    let in3 = [
        GpioInput::new(p.PIN_7, Pull::None),
        GpioInput::new(p.PIN_8, Pull::None),
    ];
    let in4a = GpioInput::new(p.PIN_9, Pull::None);

    let row1: [&dyn InputPin; 3] = [&in1[0], &in1[1], &in1[2]];
    let row2: [&dyn InputPin; 2] = [&in2[0], &in2[1]];
    let row3: [&dyn InputPin; 2] = [&in3[0], &in3[1]];
    let row4_pins: [&dyn InputPin; 3];
    let row4 = match &released {
        Some((sda, scl)) => {
            row4_pins = [&in4a, sda, scl];
            RowFour::Inputs(&row4_pins)
        }
        None => RowFour::ModeButton(&in4a),
    };

    let outputs = OutputBuses::new(
        OutputBus::new([
            GpioOutput::new(p.PIN_12),
            GpioOutput::new(p.PIN_13),
            GpioOutput::new(p.PIN_14),
        ]),
        OutputBus::new([
            GpioOutput::new(p.PIN_18),
            GpioOutput::new(p.PIN_19),
            GpioOutput::new(p.PIN_20),
        ]),
    );

    let mut controller = GateController::new(
        Sampler::new(Delay, timing.debounce_spacing_us),
        InputBank {
            rows: [&row1, &row2, &row3],
            row4,
        },
        outputs,
        selector,
        store,
        session,
        palette,
    );

    info!("Entering main loop");
    let mut faults = FaultLog::default();
    loop {
        let diagram = panel.as_mut().map(|oled| oled as &mut dyn DiagramSink);
        let report = controller.run_cycle(&mut leds, diagram);
        log_change(&report);
        faults.update(&report);
    }
}

/// Log a family change and what happened to the stored copy
fn log_change(report: &CycleReport) {
    let Some(change) = report.change else {
        return;
    };
    match change.persist {
        PersistOutcome::Failed(e) => warn!(
            "Family {} -> {}, not saved ({})",
            change.from, change.to, e
        ),
        persist => info!("Family {} -> {} ({})", change.from, change.to, persist),
    }
}

/// Render faults are logged when they appear and when they clear, not on
/// every cycle
#[derive(Default)]
struct FaultLog {
    display: bool,
    leds: bool,
}

impl FaultLog {
    fn update(&mut self, report: &CycleReport) {
        match (report.display_fault, self.display) {
            (Some(e), false) => warn!("Display update failed: {}", e),
            (None, true) => info!("Display updates recovered"),
            _ => {}
        }
        self.display = report.display_fault.is_some();

        match (report.led_fault, self.leds) {
            (Some(e), false) => warn!("LED update failed: {}", e),
            (None, true) => info!("LED updates recovered"),
            _ => {}
        }
        self.leds = report.led_fault.is_some();
    }
}
