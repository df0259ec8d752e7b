#![doc = r#"
nescore library crate.

The processing core of an NES emulator: a cycle-counted 6502 (2A03) interpreter
wired to a 16-bit bus that decodes RAM, cartridge space and the peripheral
register windows. Video, audio and input live outside the crate and plug in
through [`bus::RegisterPort`] and [`bus::InterruptLines`].

Modules:
- bus: address decoder, 2 KiB mirrored RAM, interrupt lines, trait seams
- cartridge: cartridge storage (PRG ROM/RAM, CHR) behind a Mapper
- config: fidelity policies (illegal opcodes, unmapped accesses)
- cpu: 6502 core (facade + state + addressing + table + dispatch + execute)
- error: configuration errors raised at construction time
- mapper: Mapper trait and the NROM (mapper 0) baseline
- mappers: bank-switching mappers (UxROM, CNROM)
- nes: emulator assembly driving CPU and peripherals at the NTSC clock ratio

In tests, shared program builders are available under `crate::test_utils`.
"#]

pub mod bus;
pub mod cartridge;
pub mod config;
pub mod cpu;
pub mod error;
pub mod mapper;
pub mod mappers;
pub mod nes;

// Re-export commonly used types at the crate root for convenience.
pub use bus::Bus;
pub use cartridge::{Cartridge, CartridgeImage};
pub use config::{BusConfig, Config, CpuConfig, IllegalOpcodePolicy, UnmappedPolicy};
pub use cpu::core::Cpu;
pub use error::ConfigError;
pub use nes::{Nes, NesBuilder};

// Shared test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;
