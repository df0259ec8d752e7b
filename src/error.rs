/*!
Configuration errors.

Everything in this module is raised while an emulator is being assembled,
before the first `step()`. Emulated-machine behaviour (illegal opcodes, open
bus, the indirect JMP quirk) is never reported through these types.
*/

use thiserror::Error;

/// An assembly that cannot run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("no cartridge attached; the 0x4020-0xFFFF window has no mapper")]
    MissingCartridge,

    #[error("PRG ROM image is empty")]
    EmptyPrgRom,

    #[error("{mapper}: PRG ROM must be a non-zero multiple of {bank_size} bytes (got {len})")]
    PrgRomSize {
        mapper: &'static str,
        bank_size: usize,
        len: usize,
    },

    #[error("{mapper}: CHR must be a non-zero multiple of {bank_size} bytes (got {len})")]
    ChrSize {
        mapper: &'static str,
        bank_size: usize,
        len: usize,
    },

    #[error("{mapper}: PRG RAM of {len} bytes exceeds the 8 KiB window")]
    PrgRamSize { mapper: &'static str, len: usize },

    #[error("unsupported mapper number {0}")]
    UnsupportedMapper(u16),
}
