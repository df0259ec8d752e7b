/*!
Interrupt request lines sampled by the CPU at instruction boundaries.

NMI
- Edge triggered. A low-to-high transition of the line sets a latch; the
  latch stays set until the CPU services it, regardless of what the line does
  afterwards. Holding the line high does not retrigger.

IRQ
- Level triggered and wired-OR: any active source holds the line. The CPU
  re-samples it at every boundary, so a source that stays active re-enters
  the handler as soon as the I flag is cleared. Sources are acknowledged by
  the peripheral that owns them, never by the CPU.

Peripherals mutate these lines only through the setters below; the CPU reads
`nmi_pending`/`irq_asserted` and consumes the NMI latch with `take_nmi`.
*/

use bitflags::bitflags;

bitflags! {
    /// Devices that can hold the shared IRQ line.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct IrqSource: u8 {
        const APU_FRAME = 0b0000_0001;
        const APU_DMC   = 0b0000_0010;
        const MAPPER    = 0b0000_0100;
        const EXTERNAL  = 0b0000_1000;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterruptLines {
    nmi_line: bool,
    nmi_latched: bool,
    irq: IrqSource,
}

impl InterruptLines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drive the NMI line. Only a rising edge latches a request.
    pub fn set_nmi(&mut self, level: bool) {
        if level && !self.nmi_line {
            self.nmi_latched = true;
        }
        self.nmi_line = level;
    }

    /// Raise then release the NMI line (one full edge).
    pub fn pulse_nmi(&mut self) {
        self.set_nmi(true);
        self.set_nmi(false);
    }

    pub fn nmi_line(&self) -> bool {
        self.nmi_line
    }

    pub fn nmi_pending(&self) -> bool {
        self.nmi_latched
    }

    /// Consume the NMI latch. Returns whether one was pending.
    pub fn take_nmi(&mut self) -> bool {
        std::mem::take(&mut self.nmi_latched)
    }

    pub fn clear_nmi_latch(&mut self) {
        self.nmi_latched = false;
    }

    pub fn set_irq(&mut self, source: IrqSource, active: bool) {
        self.irq.set(source, active);
    }

    pub fn irq_asserted(&self) -> bool {
        !self.irq.is_empty()
    }

    pub fn irq_sources(&self) -> IrqSource {
        self.irq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nmi_latches_on_rising_edge_only() {
        let mut lines = InterruptLines::new();
        lines.set_nmi(true);
        assert!(lines.take_nmi());
        // Line still high: no new edge.
        lines.set_nmi(true);
        assert!(!lines.nmi_pending());
        lines.set_nmi(false);
        lines.set_nmi(true);
        assert!(lines.nmi_pending());
    }

    #[test]
    fn nmi_latch_survives_line_release() {
        let mut lines = InterruptLines::new();
        lines.pulse_nmi();
        assert!(!lines.nmi_line());
        assert!(lines.nmi_pending());
        assert!(lines.take_nmi());
        assert!(!lines.take_nmi());
    }

    #[test]
    fn irq_is_wired_or_of_sources() {
        let mut lines = InterruptLines::new();
        lines.set_irq(IrqSource::APU_FRAME, true);
        lines.set_irq(IrqSource::MAPPER, true);
        lines.set_irq(IrqSource::APU_FRAME, false);
        assert!(lines.irq_asserted());
        assert_eq!(lines.irq_sources(), IrqSource::MAPPER);
        lines.set_irq(IrqSource::MAPPER, false);
        assert!(!lines.irq_asserted());
    }
}
