//! Display drivers
//!
//! - `ssd1306`: the controller, its init sequence and full-frame flush
//! - `panel`: the gate diagram drawn onto an SSD1306

pub mod panel;
pub mod ssd1306;

pub use panel::OledPanel;
pub use ssd1306::Ssd1306;
