/*!
interfaces: the traits that decouple the CPU and the bus from their neighbours.

`CpuBus`
- Everything the CPU core needs from the outside world: byte reads and writes
  with full side effects, a side-effect-free `peek` for tracing, and access to
  the interrupt lines it samples at instruction boundaries.
- Implemented by the NES `Bus` and by `FlatMemory` (a plain 64 KiB array used
  for conformance ROMs and for tests that need bytes at arbitrary addresses).
- CPU code is generic over it (static dispatch, no trait objects on the hot path).

`RegisterPort`
- The contract of an external peripheral (PPU, APU, input) as seen from the
  bus: a register read, a register write, and an optional clock hook through
  which the peripheral can drive NMI/IRQ.
- Reads take `&mut self` because many registers have read side effects
  (latch clearing, serial shift). The bus forwards every access immediately
  and never caches a value.
*/

use std::cell::RefCell;
use std::rc::Rc;

use crate::bus::interrupts::InterruptLines;

/// CPU-visible address space.
pub trait CpuBus {
    /// Read with all side effects a real CPU read would have.
    fn read(&mut self, addr: u16) -> u8;

    fn write(&mut self, addr: u16, value: u8);

    /// Read without side effects. `None` when the address can't be observed
    /// without disturbing a peripheral.
    fn peek(&self, addr: u16) -> Option<u8>;

    fn interrupts(&self) -> &InterruptLines;

    fn interrupts_mut(&mut self) -> &mut InterruptLines;

    /// Little-endian word at `addr`, `addr + 1` (wrapping at $FFFF).
    #[inline]
    fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }
}

/// A memory-mapped peripheral's register handler.
pub trait RegisterPort {
    /// `addr` is the canonical register address: $2000-$2007 for the PPU
    /// window (mirrors already folded), the literal address for $4000-$4017.
    fn read_register(&mut self, addr: u16) -> u8;

    fn write_register(&mut self, addr: u16, value: u8);

    /// Advance the device by `cycles` of its own clock. Devices that raise
    /// interrupts do so through `lines`.
    fn tick(&mut self, _cycles: u32, _lines: &mut InterruptLines) {}
}

/// A peripheral shared between the bus (register routing) and the assembly
/// (clocking).
pub type SharedPort = Rc<RefCell<dyn RegisterPort>>;

/// Wrap a concrete peripheral for attachment.
pub fn shared_port<P: RegisterPort + 'static>(port: P) -> SharedPort {
    Rc::new(RefCell::new(port))
}
