/*!
nes.rs - Emulator assembly: CPU, bus, cartridge and the peripheral ports,
driven at the NTSC clock ratio.

Order of operations per `step`
==============================
1. The CPU executes one instruction (or interrupt entry), reporting N cycles.
2. The PPU port is ticked 3*N dots, the APU port N cycles. Either may raise
   NMI/IRQ through the bus's `InterruptLines`.
3. The mapper's IRQ output is copied onto `IrqSource::MAPPER`.

Interrupts raised in (2) or (3) are seen at the next instruction boundary.
*/

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::bus::{Bus, IrqSource, SharedPort};
use crate::cartridge::Cartridge;
use crate::config::Config;
use crate::cpu::core::Cpu;
use crate::cpu::cycles::RESET_CYCLES;
use crate::error::ConfigError;

/// PPU dots per CPU cycle (NTSC).
pub const PPU_DOTS_PER_CPU_CYCLE: u32 = 3;

pub struct Nes {
    cpu: Cpu,
    bus: Bus,
    /// Owning handle; the bus shares it.
    cartridge: Rc<RefCell<Cartridge>>,
    ppu: Option<SharedPort>,
    apu: Option<SharedPort>,
}

impl Nes {
    pub fn builder() -> NesBuilder {
        NesBuilder::default()
    }

    /// Run one CPU step and bring the peripherals up to the same cycle.
    pub fn step(&mut self) -> u32 {
        let cycles = self.cpu.step(&mut self.bus);
        self.tick_peripherals(cycles);
        cycles
    }

    /// Step until at least `budget` CPU cycles have elapsed; returns the
    /// cycles actually run.
    pub fn run_cycles(&mut self, budget: u64) -> u64 {
        let mut elapsed = 0u64;
        while elapsed < budget {
            elapsed += self.step() as u64;
        }
        elapsed
    }

    /// Reset the CPU and mapper. RAM and peripheral state are kept.
    pub fn reset(&mut self) {
        self.cartridge.borrow_mut().reset();
        let cycles = self.cpu.reset(&mut self.bus);
        self.tick_peripherals(cycles);
    }

    fn tick_peripherals(&mut self, cycles: u32) {
        if let Some(ppu) = &self.ppu {
            ppu.borrow_mut()
                .tick(cycles * PPU_DOTS_PER_CPU_CYCLE, self.bus.interrupts_mut());
        }
        if let Some(apu) = &self.apu {
            apu.borrow_mut().tick(cycles, self.bus.interrupts_mut());
        }
        let mapper_irq = self.cartridge.borrow().irq_pending();
        self.bus.interrupts_mut().set_irq(IrqSource::MAPPER, mapper_irq);
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    pub fn cartridge(&self) -> &Rc<RefCell<Cartridge>> {
        &self.cartridge
    }

    /// Cycles since construction, including the power-on reset.
    pub fn total_cycles(&self) -> u64 {
        self.cpu.total_cycles()
    }

    pub fn trace_line(&self) -> String {
        self.cpu.trace_line(&self.bus)
    }
}

impl std::fmt::Debug for Nes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Nes")
            .field("cpu", &self.cpu)
            .field("bus", &self.bus)
            .field("ppu", &self.ppu.is_some())
            .field("apu", &self.apu.is_some())
            .finish()
    }
}

/// Collects the parts of an `Nes`; only the cartridge is required.
#[derive(Default)]
pub struct NesBuilder {
    config: Config,
    cartridge: Option<Cartridge>,
    ppu: Option<SharedPort>,
    apu: Option<SharedPort>,
    input: Option<SharedPort>,
}

impl NesBuilder {
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn cartridge(mut self, cartridge: Cartridge) -> Self {
        self.cartridge = Some(cartridge);
        self
    }

    pub fn ppu(mut self, port: SharedPort) -> Self {
        self.ppu = Some(port);
        self
    }

    pub fn apu(mut self, port: SharedPort) -> Self {
        self.apu = Some(port);
        self
    }

    pub fn input(mut self, port: SharedPort) -> Self {
        self.input = Some(port);
        self
    }

    /// Wire everything to a fresh bus and reset the CPU.
    pub fn build(self) -> Result<Nes, ConfigError> {
        let cartridge = self.cartridge.ok_or(ConfigError::MissingCartridge)?;
        debug!(
            "assembling NES: mapper {}, {:?}",
            cartridge.mapper_id(),
            self.config
        );
        let cartridge = Rc::new(RefCell::new(cartridge));
        let mut bus = Bus::new(Rc::clone(&cartridge), self.config.bus);
        if let Some(port) = &self.ppu {
            bus.attach_ppu(Rc::clone(port));
        }
        if let Some(port) = &self.apu {
            bus.attach_apu(Rc::clone(port));
        }
        if let Some(port) = self.input {
            bus.attach_input(port);
        }

        let mut nes = Nes {
            cpu: Cpu::with_config(self.config.cpu),
            bus,
            cartridge,
            ppu: self.ppu,
            apu: self.apu,
        };
        let cycles = nes.cpu.reset(&mut nes.bus);
        debug_assert_eq!(cycles, RESET_CYCLES);
        nes.tick_peripherals(cycles);
        Ok(nes)
    }
}

impl std::fmt::Debug for NesBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NesBuilder")
            .field("config", &self.config)
            .field("cartridge", &self.cartridge.as_ref().map(Cartridge::mapper_id))
            .field("ppu", &self.ppu.is_some())
            .field("apu", &self.apu.is_some())
            .field("input", &self.input.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        NMI_HANDLER, PROGRAM_START, cartridge_with_prg, prg_with_program, recording_port,
    };

    fn nes_with(program: &[u8]) -> Nes {
        Nes::builder()
            .cartridge(cartridge_with_prg(prg_with_program(program)))
            .build()
            .expect("cartridge supplied")
    }

    #[test]
    fn build_without_cartridge_fails() {
        let err = Nes::builder().build().unwrap_err();
        assert_eq!(err, ConfigError::MissingCartridge);
    }

    #[test]
    fn build_resets_cpu() {
        let nes = nes_with(&[0xEA]);
        assert_eq!(nes.cpu().pc(), PROGRAM_START);
        assert_eq!(nes.total_cycles(), 7);
    }

    #[test]
    fn peripherals_follow_cpu_cycles() {
        let ppu = recording_port();
        let apu = recording_port();
        let mut nes = Nes::builder()
            .cartridge(cartridge_with_prg(prg_with_program(&[0xAD, 0x00, 0x02])))
            .ppu(ppu.clone())
            .apu(apu.clone())
            .build()
            .expect("cartridge supplied");
        assert_eq!(ppu.borrow().ticked, 21);
        assert_eq!(apu.borrow().ticked, 7);
        assert_eq!(nes.step(), 4);
        assert_eq!(ppu.borrow().ticked, 21 + 12);
        assert_eq!(apu.borrow().ticked, 7 + 4);
    }

    #[test]
    fn ppu_nmi_reaches_cpu_at_next_boundary() {
        let ppu = recording_port();
        ppu.borrow_mut().nmi_after = Some(21 + 6);
        let mut nes = Nes::builder()
            .cartridge(cartridge_with_prg(prg_with_program(&[0xEA, 0xEA, 0xEA])))
            .ppu(ppu.clone())
            .build()
            .expect("cartridge supplied");
        nes.step(); // NOP: 6 dots, NMI raised at the end
        assert_eq!(nes.cpu().pc(), 0x8001);
        assert_eq!(nes.step(), 7);
        assert_eq!(nes.cpu().pc(), NMI_HANDLER);
    }

    #[test]
    fn ppu_registers_routed_through_nes_bus() {
        let ppu = recording_port();
        // LDA #$80; STA $2000; LDA $2002
        let mut nes = Nes::builder()
            .cartridge(cartridge_with_prg(prg_with_program(&[
                0xA9, 0x80, 0x8D, 0x00, 0x20, 0xAD, 0x02, 0x20,
            ])))
            .ppu(ppu.clone())
            .build()
            .expect("cartridge supplied");
        nes.run_cycles(2 + 4 + 4);
        assert_eq!(ppu.borrow().writes, vec![(0x2000, 0x80)]);
        assert_eq!(ppu.borrow().reads, vec![0x2002]);
    }

    #[test]
    fn assembly_and_bus_share_one_cartridge() {
        let nes = nes_with(&[0xEA]);
        assert!(Rc::ptr_eq(nes.cartridge(), nes.bus().cartridge()));
        assert_eq!(Rc::strong_count(nes.cartridge()), 2);
    }

    #[test]
    fn instances_are_independent() {
        let mut a = nes_with(&[0xA9, 0x11, 0x85, 0x00]);
        let mut b = nes_with(&[0xA9, 0x22, 0x85, 0x00]);
        a.run_cycles(5);
        b.run_cycles(5);
        assert_eq!(a.bus_mut().read(0x0000), 0x11);
        assert_eq!(b.bus_mut().read(0x0000), 0x22);
    }

    #[test]
    fn reset_keeps_ram_and_restarts() {
        let mut nes = nes_with(&[0xA9, 0x11, 0x85, 0x00]);
        nes.run_cycles(5);
        nes.reset();
        assert_eq!(nes.cpu().pc(), PROGRAM_START);
        assert_eq!(nes.bus_mut().read(0x0000), 0x11);
        assert_eq!(nes.total_cycles(), 7 + 5 + 7);
    }
}
