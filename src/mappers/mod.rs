/*
Module: mappers

Bank-switching boards. Each lives in its own file; NROM, the fixed baseline,
sits next to the trait in `crate::mapper`.

Implemented:
- UxROM (Mapper 2): switchable 16 KiB PRG bank
- CNROM (Mapper 3): switchable 8 KiB CHR bank
*/

pub mod cnrom;
pub mod uxrom;

pub use cnrom::Cnrom;
pub use uxrom::Uxrom;
