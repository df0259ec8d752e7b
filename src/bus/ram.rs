/*!
Internal work RAM: 2 KiB, visible at $0000-$1FFF.

The CPU sees four copies of the same 2 KiB: address lines 11 and 12 are not
decoded, so `addr & 0x07FF` selects the physical byte. The bus owns one `Ram`
and routes the whole $0000-$1FFF range here.

A CPU reset never clears RAM. Only constructing a new `Ram` (power-on) or an
explicit `clear` does.
*/

/// Physical size of the internal RAM.
pub const CPU_RAM_SIZE: usize = 0x0800;

/// 2 KiB RAM addressed with CPU addresses.
#[derive(Clone)]
pub struct Ram {
    data: [u8; CPU_RAM_SIZE],
}

impl Default for Ram {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Ram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ram").field("len", &CPU_RAM_SIZE).finish()
    }
}

impl Ram {
    /// Power-on RAM filled with zeros.
    pub fn new() -> Self {
        Self::filled(0)
    }

    /// Power-on RAM filled with `value`. Real consoles power up with a
    /// board-dependent pattern; some test ROMs expect 0xFF.
    pub fn filled(value: u8) -> Self {
        Self {
            data: [value; CPU_RAM_SIZE],
        }
    }

    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.data[Self::mirror_index(addr)]
    }

    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) {
        self.data[Self::mirror_index(addr)] = value;
    }

    /// Physical contents, for snapshots and diagnostics.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Physical index of a CPU address in $0000-$1FFF.
    #[inline]
    pub const fn mirror_index(addr: u16) -> usize {
        (addr as usize) & (CPU_RAM_SIZE - 1)
    }
}
