/*!
cpu - The 2A03's 6502 core (no decimal mode).

Layout:

```text
    status.rs       - P register bitflags and their stack encoding.
    state.rs        - Register file.
    regs.rs         - `CpuRegs`, the register trait instruction helpers are
                      generic over.
    addressing.rs   - The 13 addressing modes and operand resolution.
    table.rs        - 256-entry opcode table (operation, mode, cycles).
    cycles.rs       - Page-cross and branch timing.
    execute.rs      - Instruction semantics (ALU, stack, RMW).
    dispatch/       - Step orchestration and per-family handlers.
    trace.rs        - Disassembler and trace lines.
    core/           - The `Cpu` facade and its phase machine.
```

Usage:
```rust,ignore
use nescore::cpu::Cpu;

let mut cpu = Cpu::new();
cpu.reset(&mut bus);
let cycles = cpu.step(&mut bus);
```
*/

pub mod addressing;
pub mod core;
pub mod cycles;
pub mod dispatch;
pub(crate) mod execute;
pub mod regs;
pub mod state;
pub mod status;
pub mod table;
pub mod trace;

pub use crate::cpu::addressing::{AddrMode, Operand};
pub use crate::cpu::core::{Cpu, CpuPhase};
pub use crate::cpu::dispatch::{
    IRQ_VECTOR, Interrupt, NMI_VECTOR, RESET_VECTOR, StepEvent, StepResult,
};
pub use crate::cpu::regs::CpuRegs;
pub use crate::cpu::state::CpuState;
pub use crate::cpu::status::Status;
pub use crate::cpu::table::{Instruction, OPCODES, Op, lookup};
pub use crate::cpu::trace::{Disassembly, disassemble, disassemble_range};
