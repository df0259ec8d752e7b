//! Shared builders for unit tests.
//!
//! Programs are assembled by hand as byte slices and placed at `PROGRAM_START`
//! in a 32 KiB NROM image with 8 KiB of PRG RAM. Vectors default to:
//! RESET -> $8000, NMI -> `NMI_HANDLER`, IRQ/BRK -> `IRQ_HANDLER`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::bus::{Bus, CpuBus, FlatMemory, InterruptLines, RegisterPort};
use crate::cartridge::{Cartridge, CartridgeImage};
use crate::config::{BusConfig, Config, UnmappedPolicy};
use crate::cpu::core::Cpu;

pub const PROGRAM_START: u16 = 0x8000;
pub const NMI_HANDLER: u16 = 0x9000;
pub const IRQ_HANDLER: u16 = 0x9100;

const PRG_LEN: usize = 0x8000;

/// Write CPU vectors (NMI, RESET, IRQ/BRK) into a 32 KiB PRG image.
pub fn set_vectors_in_prg(prg: &mut [u8], reset: u16, nmi: u16, irq: u16) {
    assert_eq!(prg.len(), PRG_LEN, "vectors helper expects 32 KiB PRG");
    write_le_u16(prg, 0x7FFA, nmi);
    write_le_u16(prg, 0x7FFC, reset);
    write_le_u16(prg, 0x7FFE, irq);
}

/// Place bytes at a CPU address in $8000-$FFFF of a 32 KiB PRG image.
pub fn place(prg: &mut [u8], cpu_addr: u16, bytes: &[u8]) {
    let start = (cpu_addr - 0x8000) as usize;
    prg[start..start + bytes.len()].copy_from_slice(bytes);
}

/// 32 KiB PRG filled with NOPs, `program` at $8000, default vectors.
pub fn prg_with_program(program: &[u8]) -> Vec<u8> {
    let mut prg = vec![0xEA; PRG_LEN];
    place(&mut prg, PROGRAM_START, program);
    set_vectors_in_prg(&mut prg, PROGRAM_START, NMI_HANDLER, IRQ_HANDLER);
    prg
}

pub fn cartridge_with_prg(prg: Vec<u8>) -> Cartridge {
    let image = CartridgeImage::new(prg).with_prg_ram(0x2000);
    Cartridge::from_image(image, 0).expect("valid NROM image")
}

pub fn bus_with_prg(prg: Vec<u8>, config: BusConfig) -> Bus {
    Bus::with_cartridge(cartridge_with_prg(prg), config)
}

/// Bus and reset CPU running `program` under the default configuration.
pub fn setup(program: &[u8]) -> (Cpu, Bus) {
    setup_with(program, Config::default())
}

pub fn setup_with(program: &[u8], config: Config) -> (Cpu, Bus) {
    setup_prg(prg_with_program(program), config)
}

pub fn setup_prg(prg: Vec<u8>, config: Config) -> (Cpu, Bus) {
    let mut bus = bus_with_prg(prg, config.bus);
    let mut cpu = Cpu::with_config(config.cpu);
    cpu.reset(&mut bus);
    (cpu, bus)
}

/// Same program on a flat 64 KiB memory.
pub fn setup_flat(program: &[u8]) -> (Cpu, FlatMemory) {
    let mut mem = FlatMemory::new();
    mem.load(PROGRAM_START, program);
    mem.set_word(0xFFFA, NMI_HANDLER);
    mem.set_word(0xFFFC, PROGRAM_START);
    mem.set_word(0xFFFE, IRQ_HANDLER);
    let mut cpu = Cpu::new();
    cpu.reset(&mut mem);
    (cpu, mem)
}

pub fn open_bus_config() -> BusConfig {
    BusConfig {
        unmapped: UnmappedPolicy::OpenBus,
    }
}

/// Peripheral fake that records every register access.
#[derive(Debug, Default)]
pub struct RecordingPort {
    pub reads: Vec<u16>,
    pub writes: Vec<(u16, u8)>,
    /// Value returned by reads; incremented after each read so repeated
    /// reads are distinguishable.
    pub next_value: u8,
    pub ticked: u32,
    /// Raise an NMI edge once this many cycles have been ticked.
    pub nmi_after: Option<u32>,
}

impl RegisterPort for RecordingPort {
    fn read_register(&mut self, addr: u16) -> u8 {
        self.reads.push(addr);
        let v = self.next_value;
        self.next_value = self.next_value.wrapping_add(1);
        v
    }

    fn write_register(&mut self, addr: u16, value: u8) {
        self.writes.push((addr, value));
    }

    fn tick(&mut self, cycles: u32, lines: &mut InterruptLines) {
        self.ticked += cycles;
        if let Some(limit) = self.nmi_after {
            if self.ticked >= limit {
                lines.pulse_nmi();
                self.nmi_after = None;
            }
        }
    }
}

pub fn recording_port() -> Rc<RefCell<RecordingPort>> {
    Rc::new(RefCell::new(RecordingPort::default()))
}

/// Run `cpu` until PC reaches `addr` or `max_steps` elapse.
pub fn run_until_pc<B: CpuBus>(cpu: &mut Cpu, bus: &mut B, addr: u16, max_steps: usize) -> bool {
    for _ in 0..max_steps {
        if cpu.pc() == addr {
            return true;
        }
        cpu.step(bus);
    }
    cpu.pc() == addr
}

#[inline]
fn write_le_u16(buf: &mut [u8], offset: usize, value: u16) {
    buf[offset] = (value & 0x00FF) as u8;
    buf[offset + 1] = (value >> 8) as u8;
}
