//! Software-timed I2C master
//!
//! Drives SDA and SCL through [`FlexPin`]s using open-drain emulation: a
//! line is released (high) by turning its pin into a pulled-up input and
//! asserted (low) by turning it into an output driving low. Every bit is
//! timed with fixed delays; there are no timeouts and no clock stretching.
//!
//! The same two pins double as plain logic inputs when no device is present,
//! so [`BitBangI2c::probe`] consumes the bus and either hands it back with
//! the address that answered or returns the bare pins, reconfigured as
//! unbiased inputs.

use embedded_hal::i2c::{self, ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use unigate_hal::{DelayNs, FlexPin, Pull};

/// Addresses an SSD1306 module may answer on, in probe order
pub const DISPLAY_ADDRESSES: [u8; 2] = [0x3C, 0x3D];

/// Bus errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Nobody acknowledged the address byte
    AddressNack,
    /// The device did not acknowledge a data byte
    DataNack,
}

impl i2c::Error for BusError {
    fn kind(&self) -> ErrorKind {
        match self {
            BusError::AddressNack => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address),
            BusError::DataNack => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data),
        }
    }
}

/// Result of probing for a device
pub enum Probe<SDA, SCL, D> {
    /// A device acknowledged; the bus stays in use
    Found {
        /// The bus, ready for transactions
        bus: BitBangI2c<SDA, SCL, D>,
        /// First candidate address that acknowledged
        address: u8,
    },
    /// Nobody answered; both pins are unbiased inputs again
    Absent {
        /// Data line pin
        sda: SDA,
        /// Clock line pin
        scl: SCL,
    },
}

/// Bit-banged I2C master
pub struct BitBangI2c<SDA, SCL, D> {
    sda: SDA,
    scl: SCL,
    delay: D,
    half_period_us: u32,
}

impl<SDA, SCL, D> BitBangI2c<SDA, SCL, D>
where
    SDA: FlexPin,
    SCL: FlexPin,
    D: DelayNs,
{
    /// Take the pins and leave both lines released
    pub fn new(sda: SDA, scl: SCL, delay: D, half_period_us: u32) -> Self {
        let mut bus = Self {
            sda,
            scl,
            delay,
            half_period_us,
        };
        bus.sda_high();
        bus.scl_high();
        bus
    }

    /// Try each candidate address with an empty write
    ///
    /// The first address to acknowledge wins. A single pass is made with no
    /// retries. If nobody answers, the pins are returned as plain inputs.
    pub fn probe(mut self, candidates: &[u8]) -> Probe<SDA, SCL, D> {
        for &address in candidates {
            if self.write(address, &[]).is_ok() {
                return Probe::Found { bus: self, address };
            }
        }
        let (sda, scl) = self.release();
        Probe::Absent { sda, scl }
    }

    /// Give the pins back as unbiased inputs
    pub fn release(mut self) -> (SDA, SCL) {
        self.sda.set_as_input(Pull::None);
        self.scl.set_as_input(Pull::None);
        (self.sda, self.scl)
    }

    fn wait(&mut self) {
        self.delay.delay_us(self.half_period_us);
    }

    fn sda_high(&mut self) {
        self.sda.set_as_input(Pull::Up);
    }

    fn sda_low(&mut self) {
        self.sda.drive_low();
    }

    fn scl_high(&mut self) {
        self.scl.set_as_input(Pull::Up);
    }

    fn scl_low(&mut self) {
        self.scl.drive_low();
    }

    /// START (or repeated START): SDA falls while SCL is high
    fn start(&mut self) {
        self.sda_high();
        self.scl_high();
        self.wait();
        self.sda_low();
        self.wait();
        self.scl_low();
        self.wait();
    }

    /// STOP: SDA rises while SCL is high
    fn stop(&mut self) {
        self.sda_low();
        self.wait();
        self.scl_high();
        self.wait();
        self.sda_high();
        self.wait();
    }

    /// One clock pulse with SDA already set up
    fn clock_pulse(&mut self) -> bool {
        self.scl_high();
        self.wait();
        let level = self.sda.is_high();
        self.scl_low();
        self.wait();
        level
    }

    /// Shift out one byte MSB first; returns whether it was acknowledged
    fn write_byte(&mut self, byte: u8) -> bool {
        for bit in (0..8).rev() {
            if byte & (1 << bit) != 0 {
                self.sda_high();
            } else {
                self.sda_low();
            }
            self.wait();
            self.clock_pulse();
        }

        // Ninth clock: release SDA, a low level is ACK
        self.sda_high();
        self.wait();
        !self.clock_pulse()
    }

    /// Shift in one byte MSB first, then ACK (`ack`) or NACK it
    fn read_byte(&mut self, ack: bool) -> u8 {
        self.sda_high();
        let mut byte = 0u8;
        for _ in 0..8 {
            self.wait();
            byte = (byte << 1) | u8::from(self.clock_pulse());
        }

        if ack {
            self.sda_low();
        } else {
            self.sda_high();
        }
        self.wait();
        self.clock_pulse();
        self.sda_high();
        byte
    }

    /// Address phase followed by every operation
    ///
    /// Consecutive operations in the same direction share one address phase;
    /// a change of direction issues a repeated START.
    fn run(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), BusError> {
        let mut reading: Option<bool> = None;

        for i in 0..operations.len() {
            let next_is_read = matches!(operations.get(i + 1), Some(Operation::Read(_)));
            let op = &mut operations[i];
            let is_read = matches!(op, Operation::Read(_));

            if reading != Some(is_read) {
                self.start();
                if !self.write_byte((address << 1) | u8::from(is_read)) {
                    return Err(BusError::AddressNack);
                }
                reading = Some(is_read);
            }

            match op {
                Operation::Write(bytes) => {
                    for &byte in bytes.iter() {
                        if !self.write_byte(byte) {
                            return Err(BusError::DataNack);
                        }
                    }
                }
                Operation::Read(buffer) => {
                    let len = buffer.len();
                    for (n, slot) in buffer.iter_mut().enumerate() {
                        // The final byte of a read run is NACKed
                        *slot = self.read_byte(n + 1 < len || next_is_read);
                    }
                }
            }
        }

        Ok(())
    }
}

impl<SDA, SCL, D> ErrorType for BitBangI2c<SDA, SCL, D> {
    type Error = BusError;
}

impl<SDA, SCL, D> I2c for BitBangI2c<SDA, SCL, D>
where
    SDA: FlexPin,
    SCL: FlexPin,
    D: DelayNs,
{
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if operations.is_empty() {
            return Ok(());
        }
        let result = self.run(address, operations);
        // The bus is always left idle, even after a NACK
        self.stop();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use embedded_hal::i2c::Error as _;
    use unigate_core::config::TimingConfig;
    use unigate_hal::InputPin;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Phase {
        Idle,
        Address,
        AddressAck,
        Receive,
        ReceiveAck,
        Transmit,
        TransmitAck,
    }

    /// Two open-drain lines with pull-ups and one simulated target device
    ///
    /// The target decodes START/STOP and clock edges the way a real device
    /// does, acknowledges the addresses in `acked`, records written bytes
    /// and answers reads from `tx`.
    struct Wire {
        acked: &'static [u8],
        tx: &'static [u8],

        master_sda_low: bool,
        master_scl_low: bool,
        sda_mode: Option<Pull>,
        scl_mode: Option<Pull>,
        target_sda_low: bool,
        sda: bool,
        scl: bool,

        phase: Phase,
        shift: u8,
        bits: u8,
        target_reading: bool,
        master_acked: bool,
        tx_index: usize,

        received: Vec<u8>,
        addressed: Vec<u8>,
        starts: usize,
        stops: usize,
        master_nacks: usize,
    }

    impl Wire {
        fn new(acked: &'static [u8], tx: &'static [u8]) -> RefCell<Self> {
            RefCell::new(Self {
                acked,
                tx,
                master_sda_low: false,
                master_scl_low: false,
                sda_mode: Some(Pull::None),
                scl_mode: Some(Pull::None),
                target_sda_low: false,
                sda: true,
                scl: true,
                phase: Phase::Idle,
                shift: 0,
                bits: 0,
                target_reading: false,
                master_acked: false,
                tx_index: 0,
                received: Vec::new(),
                addressed: Vec::new(),
                starts: 0,
                stops: 0,
                master_nacks: 0,
            })
        }

        fn levels(&self) -> (bool, bool) {
            (
                !(self.master_sda_low || self.target_sda_low),
                !self.master_scl_low,
            )
        }

        /// React to whatever line changed since the last call
        fn settle(&mut self) {
            let (sda, scl) = self.levels();
            let (old_sda, old_scl) = (self.sda, self.scl);
            self.sda = sda;
            self.scl = scl;

            if old_scl && scl {
                if old_sda && !sda {
                    self.on_start();
                } else if !old_sda && sda {
                    self.on_stop();
                }
            } else if !old_scl && scl {
                self.on_clock_rise(sda);
            } else if old_scl && !scl {
                self.on_clock_fall();
                self.sda = self.levels().0;
            }
        }

        fn on_start(&mut self) {
            self.starts += 1;
            self.phase = Phase::Address;
            self.shift = 0;
            self.bits = 0;
            self.target_sda_low = false;
        }

        fn on_stop(&mut self) {
            self.stops += 1;
            self.phase = Phase::Idle;
            self.target_sda_low = false;
        }

        fn on_clock_rise(&mut self, sda: bool) {
            match self.phase {
                Phase::Address | Phase::Receive => {
                    self.shift = (self.shift << 1) | u8::from(sda);
                    self.bits += 1;
                }
                Phase::TransmitAck => {
                    self.master_acked = !sda;
                    if sda {
                        self.master_nacks += 1;
                    }
                }
                _ => {}
            }
        }

        fn on_clock_fall(&mut self) {
            match self.phase {
                Phase::Address if self.bits == 8 => {
                    let address = self.shift >> 1;
                    self.target_reading = self.shift & 1 == 1;
                    if self.acked.contains(&address) {
                        self.addressed.push(address);
                        self.target_sda_low = true;
                        self.phase = Phase::AddressAck;
                    } else {
                        self.phase = Phase::Idle;
                    }
                }
                Phase::Receive if self.bits == 8 => {
                    self.received.push(self.shift);
                    self.target_sda_low = true;
                    self.phase = Phase::ReceiveAck;
                }
                Phase::AddressAck | Phase::ReceiveAck => {
                    self.target_sda_low = false;
                    self.bits = 0;
                    self.shift = 0;
                    if self.phase == Phase::AddressAck && self.target_reading {
                        self.phase = Phase::Transmit;
                        self.drive_tx_bit();
                    } else {
                        self.phase = Phase::Receive;
                    }
                }
                Phase::Transmit => {
                    self.bits += 1;
                    if self.bits == 8 {
                        self.target_sda_low = false;
                        self.tx_index += 1;
                        self.phase = Phase::TransmitAck;
                    } else {
                        self.drive_tx_bit();
                    }
                }
                Phase::TransmitAck => {
                    if self.master_acked {
                        self.bits = 0;
                        self.phase = Phase::Transmit;
                        self.drive_tx_bit();
                    } else {
                        self.phase = Phase::Idle;
                    }
                }
                _ => {}
            }
        }

        fn drive_tx_bit(&mut self) {
            let byte = self.tx.get(self.tx_index).copied().unwrap_or(0xFF);
            self.target_sda_low = (byte >> (7 - self.bits)) & 1 == 0;
        }
    }

    #[derive(Clone, Copy)]
    enum Line {
        Sda,
        Scl,
    }

    struct WirePin<'a> {
        wire: &'a RefCell<Wire>,
        line: Line,
    }

    impl InputPin for WirePin<'_> {
        fn is_high(&self) -> bool {
            let wire = self.wire.borrow();
            match self.line {
                Line::Sda => wire.sda,
                Line::Scl => wire.scl,
            }
        }
    }

    impl FlexPin for WirePin<'_> {
        fn set_as_input(&mut self, pull: Pull) {
            let mut wire = self.wire.borrow_mut();
            match self.line {
                Line::Sda => {
                    wire.master_sda_low = false;
                    wire.sda_mode = Some(pull);
                }
                Line::Scl => {
                    wire.master_scl_low = false;
                    wire.scl_mode = Some(pull);
                }
            }
            wire.settle();
        }

        fn drive_low(&mut self) {
            let mut wire = self.wire.borrow_mut();
            match self.line {
                Line::Sda => {
                    wire.master_sda_low = true;
                    wire.sda_mode = None;
                }
                Line::Scl => {
                    wire.master_scl_low = true;
                    wire.scl_mode = None;
                }
            }
            wire.settle();
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn bus(wire: &RefCell<Wire>) -> BitBangI2c<WirePin<'_>, WirePin<'_>, NoDelay> {
        BitBangI2c::new(
            WirePin {
                wire,
                line: Line::Sda,
            },
            WirePin {
                wire,
                line: Line::Scl,
            },
            NoDelay,
            TimingConfig::DEFAULT.bus_delay_us,
        )
    }

    #[test]
    fn test_probe_finds_primary_address() {
        let wire = Wire::new(&[0x3C], &[]);
        match bus(&wire).probe(&DISPLAY_ADDRESSES) {
            Probe::Found { address, .. } => assert_eq!(address, 0x3C),
            Probe::Absent { .. } => panic!("display not found"),
        }
        let wire = wire.borrow();
        assert_eq!(wire.starts, 1);
        assert_eq!(wire.stops, 1);
        assert_eq!(wire.addressed, [0x3C]);
    }

    #[test]
    fn test_probe_falls_through_to_alternate_address() {
        let wire = Wire::new(&[0x3D], &[]);
        match bus(&wire).probe(&DISPLAY_ADDRESSES) {
            Probe::Found { address, .. } => assert_eq!(address, 0x3D),
            Probe::Absent { .. } => panic!("display not found"),
        }
        assert_eq!(wire.borrow().starts, 2);
    }

    #[test]
    fn test_probe_first_acknowledge_wins() {
        let wire = Wire::new(&[0x3D, 0x3C], &[]);
        match bus(&wire).probe(&DISPLAY_ADDRESSES) {
            Probe::Found { address, .. } => assert_eq!(address, 0x3C),
            Probe::Absent { .. } => panic!("display not found"),
        }
        assert_eq!(wire.borrow().addressed, [0x3C]);
    }

    #[test]
    fn test_probe_absent_releases_pins_as_inputs() {
        let wire = Wire::new(&[], &[]);
        let (sda, scl) = match bus(&wire).probe(&DISPLAY_ADDRESSES) {
            Probe::Absent { sda, scl } => (sda, scl),
            Probe::Found { .. } => panic!("phantom display"),
        };

        {
            let wire = wire.borrow();
            assert_eq!(wire.sda_mode, Some(Pull::None));
            assert_eq!(wire.scl_mode, Some(Pull::None));
            assert_eq!(wire.starts, 2);
            assert_eq!(wire.stops, 2);
        }

        // Usable as ordinary inputs afterwards
        assert!(sda.is_high() && scl.is_high());
        wire.borrow_mut().target_sda_low = true;
        wire.borrow_mut().settle();
        assert!(sda.is_low());
    }

    #[test]
    fn test_write_sends_bytes_in_order() {
        let wire = Wire::new(&[0x3C], &[]);
        let mut bus = bus(&wire);
        bus.write(0x3C, &[0x00, 0xAE, 0x81]).unwrap();

        let wire = wire.borrow();
        assert_eq!(wire.received, [0x00, 0xAE, 0x81]);
        assert_eq!(wire.stops, 1);
    }

    #[test]
    fn test_consecutive_writes_share_one_start() {
        let wire = Wire::new(&[0x3C], &[]);
        let mut bus = bus(&wire);
        bus.transaction(
            0x3C,
            &mut [Operation::Write(&[0x40]), Operation::Write(&[1, 2, 3])],
        )
        .unwrap();

        let wire = wire.borrow();
        assert_eq!(wire.starts, 1);
        assert_eq!(wire.received, [0x40, 1, 2, 3]);
    }

    #[test]
    fn test_nack_reports_address_and_leaves_bus_idle() {
        let wire = Wire::new(&[0x3C], &[]);
        let mut bus = bus(&wire);
        let err = bus.write(0x50, &[0x01]).unwrap_err();

        assert_eq!(err, BusError::AddressNack);
        assert_eq!(err.kind(), ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        let wire = wire.borrow();
        assert!(wire.received.is_empty());
        assert_eq!(wire.stops, 1);
        assert!(wire.sda && wire.scl);
    }

    #[test]
    fn test_write_read_uses_repeated_start() {
        let wire = Wire::new(&[0x3C], &[0xA5, 0x3C]);
        let mut bus = bus(&wire);
        let mut buffer = [0u8; 2];
        bus.write_read(0x3C, &[0x10], &mut buffer).unwrap();

        assert_eq!(buffer, [0xA5, 0x3C]);
        let wire = wire.borrow();
        assert_eq!(wire.received, [0x10]);
        assert_eq!(wire.starts, 2);
        assert_eq!(wire.stops, 1);
        // Only the final byte is NACKed
        assert_eq!(wire.master_nacks, 1);
    }

    #[test]
    fn test_empty_transaction_touches_nothing() {
        let wire = Wire::new(&[0x3C], &[]);
        let mut bus = bus(&wire);
        bus.transaction(0x3C, &mut []).unwrap();
        assert_eq!(wire.borrow().starts, 0);
    }
}
