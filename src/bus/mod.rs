#![doc = r#"
Bus module: the CPU-visible 16-bit address space.

Overview
- `Bus` owns the 2 KiB internal RAM, the interrupt lines and the open-bus
  latch. It shares the cartridge with the emulator assembly and holds
  handles to the external PPU/APU/input register ports.
- Every address resolves to exactly one handler (see `cpu_interface`).
  Addresses nobody claims follow the configured `UnmappedPolicy`.

Modules and responsibilities
- cpu_interface: address decoder and read/write/peek routing.
- ram: 2 KiB internal RAM with $0000-$1FFF mirroring.
- interrupts: NMI edge latch and wired-OR IRQ sources.
- interfaces: `CpuBus` (what the CPU needs) and `RegisterPort` (what a peripheral provides).
- flat: a 64 KiB flat `CpuBus` for bare-6502 test programs.

Ownership
- One `Bus` per emulator instance; nothing here is global. Shared handles are
  `Rc<RefCell<_>>`, so a bus and everything attached to it stay on one thread.
- The cartridge handle is a strong `Rc`, not a `Weak`. The assembly (`Nes`)
  keeps its own owning handle, but the bus never has to cope with a mapper
  that went away: a bus without a cartridge cannot be constructed, so the
  $4020-$FFFF window and the vectors always have a handler.
"#]

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::cartridge::Cartridge;
use crate::config::{BusConfig, UnmappedPolicy};

pub mod cpu_interface;
pub mod flat;
pub mod interfaces;
pub mod interrupts;
pub mod ram;

pub use cpu_interface::{Access, Region, decode};
pub use flat::FlatMemory;
pub use interfaces::{CpuBus, RegisterPort, SharedPort, shared_port};
pub use interrupts::{InterruptLines, IrqSource};
pub use ram::{CPU_RAM_SIZE, Ram};

pub struct Bus {
    pub(crate) ram: Ram,
    pub(crate) cartridge: Rc<RefCell<Cartridge>>,
    pub(crate) ppu: Option<SharedPort>,
    pub(crate) apu: Option<SharedPort>,
    pub(crate) input: Option<SharedPort>,
    pub(crate) interrupts: InterruptLines,
    pub(crate) open_bus: u8,
    pub(crate) unmapped: UnmappedPolicy,
}

impl std::fmt::Debug for Bus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bus")
            .field("cartridge", &self.cartridge.borrow())
            .field("ppu", &self.ppu.is_some())
            .field("apu", &self.apu.is_some())
            .field("input", &self.input.is_some())
            .field("interrupts", &self.interrupts)
            .field("open_bus", &self.open_bus)
            .field("unmapped", &self.unmapped)
            .finish()
    }
}

impl Bus {
    /// A bus needs a cartridge: without a mapper the $4020-$FFFF window, and
    /// with it the reset vector, would have no handler.
    pub fn new(cartridge: Rc<RefCell<Cartridge>>, config: BusConfig) -> Self {
        Self {
            ram: Ram::new(),
            cartridge,
            ppu: None,
            apu: None,
            input: None,
            interrupts: InterruptLines::new(),
            open_bus: 0,
            unmapped: config.unmapped,
        }
    }

    /// Convenience for owning a cartridge outright.
    pub fn with_cartridge(cartridge: Cartridge, config: BusConfig) -> Self {
        Self::new(Rc::new(RefCell::new(cartridge)), config)
    }

    /// Attach the PPU register handler ($2000-$3FFF and $4014).
    pub fn attach_ppu(&mut self, port: SharedPort) {
        debug!("bus: PPU port attached");
        self.ppu = Some(port);
    }

    /// Attach the APU register handler ($4000-$4015, $4017 writes).
    pub fn attach_apu(&mut self, port: SharedPort) {
        debug!("bus: APU port attached");
        self.apu = Some(port);
    }

    /// Attach the controller handler ($4016, $4017 reads).
    pub fn attach_input(&mut self, port: SharedPort) {
        debug!("bus: input port attached");
        self.input = Some(port);
    }

    #[inline]
    pub fn read(&mut self, addr: u16) -> u8 {
        cpu_interface::cpu_read(self, addr)
    }

    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) {
        cpu_interface::cpu_write(self, addr, value)
    }

    pub fn peek(&self, addr: u16) -> Option<u8> {
        cpu_interface::cpu_peek(self, addr)
    }

    pub fn ram(&self) -> &Ram {
        &self.ram
    }

    pub fn ram_mut(&mut self) -> &mut Ram {
        &mut self.ram
    }

    pub fn cartridge(&self) -> &Rc<RefCell<Cartridge>> {
        &self.cartridge
    }

    pub fn interrupts(&self) -> &InterruptLines {
        &self.interrupts
    }

    pub fn interrupts_mut(&mut self) -> &mut InterruptLines {
        &mut self.interrupts
    }

    /// Last byte driven on the data bus.
    pub fn open_bus(&self) -> u8 {
        self.open_bus
    }

    pub fn unmapped_policy(&self) -> UnmappedPolicy {
        self.unmapped
    }
}

impl CpuBus for Bus {
    #[inline]
    fn read(&mut self, addr: u16) -> u8 {
        Bus::read(self, addr)
    }

    #[inline]
    fn write(&mut self, addr: u16, value: u8) {
        Bus::write(self, addr, value)
    }

    fn peek(&self, addr: u16) -> Option<u8> {
        Bus::peek(self, addr)
    }

    fn interrupts(&self) -> &InterruptLines {
        &self.interrupts
    }

    fn interrupts_mut(&mut self) -> &mut InterruptLines {
        &mut self.interrupts
    }
}

#[cfg(test)]
mod tests;
