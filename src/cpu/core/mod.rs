/*!
core::Cpu - The 6502 CPU facade: register file, configuration and the
execution state machine.

Phases
======
- `Fetching`: at an instruction boundary; the next step samples interrupts
  and fetches an opcode.
- `Executing` / `ServicingInterrupt`: only observable through `clock()`,
  while the cycles of the current instruction or interrupt entry count down.
- `Halted`: a JAM opcode (or any undocumented opcode under
  `IllegalOpcodePolicy::Halt`) stopped the CPU. Only `reset` leaves it.

Stepping
========
`step` runs one whole instruction (or interrupt entry) and returns its
cycles. `clock` advances exactly one cycle: the work happens on the first
cycle and the rest are counted down, so a scheduler can interleave the CPU
with other components at cycle granularity. Both commit to `total_cycles`.

A halted CPU still burns time: `step` returns 1 and `clock` keeps counting,
so a frame loop driving a jammed program terminates.
*/

use log::{Level, debug, log_enabled, trace};

use crate::bus::CpuBus;
use crate::config::CpuConfig;
use crate::cpu::cycles::RESET_CYCLES;
use crate::cpu::dispatch::{self, RESET_VECTOR, StepEvent, StepResult};
use crate::cpu::state::CpuState;
use crate::cpu::status::Status;
use crate::cpu::trace::disassemble;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CpuPhase {
    #[default]
    Fetching,
    Executing,
    ServicingInterrupt,
    Halted,
}

#[derive(Debug, Clone)]
pub struct Cpu {
    state: CpuState,
    config: CpuConfig,
    phase: CpuPhase,
    /// Cycles of the current instruction still to elapse under `clock`.
    pending_cycles: u32,
    total_cycles: u64,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Power-up register defaults and the default configuration. Call
    /// `reset` before stepping to load PC from the reset vector.
    pub fn new() -> Self {
        Self::with_config(CpuConfig::default())
    }

    pub fn with_config(config: CpuConfig) -> Self {
        Self {
            state: CpuState::new(),
            config,
            phase: CpuPhase::Fetching,
            pending_cycles: 0,
            total_cycles: 0,
        }
    }

    pub fn config(&self) -> CpuConfig {
        self.config
    }

    pub fn set_config(&mut self, config: CpuConfig) {
        self.config = config;
    }

    pub fn state(&self) -> &CpuState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut CpuState {
        &mut self.state
    }

    /// Reset: A=X=Y=0, SP=$FD, P=$24, PC from $FFFC. Clears a pending NMI
    /// and the halted state. RAM is untouched. Costs 7 cycles.
    pub fn reset<B: CpuBus>(&mut self, bus: &mut B) -> u32 {
        self.state = CpuState::new();
        self.state.pc = bus.read_word(RESET_VECTOR);
        bus.interrupts_mut().clear_nmi_latch();
        self.phase = CpuPhase::Fetching;
        self.pending_cycles = 0;
        self.total_cycles += RESET_CYCLES as u64;
        debug!("CPU reset, PC=${:04X}", self.state.pc);
        RESET_CYCLES
    }

    /// Execute one instruction or interrupt entry and return its cycles.
    ///
    /// If `clock` left an instruction part-way through its cycles, this
    /// finishes that instruction instead and returns the remaining count.
    pub fn step<B: CpuBus>(&mut self, bus: &mut B) -> u32 {
        if self.pending_cycles > 0 {
            let rest = self.pending_cycles;
            self.pending_cycles = 0;
            self.total_cycles += rest as u64;
            self.end_instruction();
            return rest;
        }
        if self.is_halted() {
            self.total_cycles += 1;
            return 1;
        }
        let result = self.execute(bus);
        self.total_cycles += result.cycles as u64;
        self.end_instruction();
        result.cycles
    }

    /// Advance one CPU cycle. Returns true on the cycle that completes an
    /// instruction or interrupt entry.
    pub fn clock<B: CpuBus>(&mut self, bus: &mut B) -> bool {
        self.total_cycles += 1;
        if self.pending_cycles == 0 {
            if self.is_halted() {
                return false;
            }
            self.pending_cycles = self.execute(bus).cycles;
        }
        self.pending_cycles = self.pending_cycles.saturating_sub(1);
        if self.pending_cycles == 0 {
            self.end_instruction();
            return true;
        }
        false
    }

    /// Step up to `max_instructions` times, stopping early when halted.
    /// Returns the cycles consumed.
    pub fn run<B: CpuBus>(&mut self, bus: &mut B, max_instructions: usize) -> u64 {
        let mut cycles = 0u64;
        for _ in 0..max_instructions {
            if self.is_halted() {
                break;
            }
            cycles += self.step(bus) as u64;
        }
        cycles
    }

    /// Step until at least `budget` cycles have elapsed. Whole instructions
    /// only, so the result may overshoot by up to 6 cycles.
    pub fn run_cycles<B: CpuBus>(&mut self, bus: &mut B, budget: u64) -> u64 {
        let mut cycles = 0u64;
        while cycles < budget {
            cycles += self.step(bus) as u64;
        }
        cycles
    }

    fn execute<B: CpuBus>(&mut self, bus: &mut B) -> StepResult {
        if log_enabled!(Level::Trace) {
            trace!("{}", self.trace_line(bus));
        }
        let result = dispatch::step(&mut self.state, bus, self.config.illegal_opcodes);
        self.phase = match result.event {
            StepEvent::Instruction { .. } => CpuPhase::Executing,
            StepEvent::Interrupt(_) => CpuPhase::ServicingInterrupt,
            StepEvent::Jammed { .. } => CpuPhase::Halted,
        };
        result
    }

    fn end_instruction(&mut self) {
        if self.phase != CpuPhase::Halted {
            self.phase = CpuPhase::Fetching;
        }
    }

    /// One trace line for the instruction at PC, nestest style.
    pub fn trace_line<B: CpuBus>(&self, bus: &B) -> String {
        let s = &self.state;
        let disasm = match disassemble(bus, s.pc) {
            Some(d) => d.to_string(),
            None => format!("{:04X}  ??", s.pc),
        };
        format!(
            "{disasm:<47} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            s.a,
            s.x,
            s.y,
            s.status.pack(),
            s.sp,
            self.total_cycles
        )
    }

    pub fn phase(&self) -> CpuPhase {
        self.phase
    }

    pub fn is_halted(&self) -> bool {
        self.phase == CpuPhase::Halted
    }

    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    // ---------------------------------------------------------------------
    // Registers
    // ---------------------------------------------------------------------
    pub fn a(&self) -> u8 {
        self.state.a
    }
    pub fn x(&self) -> u8 {
        self.state.x
    }
    pub fn y(&self) -> u8 {
        self.state.y
    }
    pub fn sp(&self) -> u8 {
        self.state.sp
    }
    pub fn pc(&self) -> u16 {
        self.state.pc
    }
    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn set_a(&mut self, v: u8) {
        self.state.a = v;
    }
    pub fn set_x(&mut self, v: u8) {
        self.state.x = v;
    }
    pub fn set_y(&mut self, v: u8) {
        self.state.y = v;
    }
    pub fn set_sp(&mut self, v: u8) {
        self.state.sp = v;
    }
    pub fn set_pc(&mut self, v: u16) {
        self.state.pc = v;
    }
    /// U is forced on.
    pub fn set_status(&mut self, v: Status) {
        self.state.status = v | Status::UNUSED;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::IrqSource;
    use crate::config::{Config, IllegalOpcodePolicy};
    use crate::test_utils::{
        IRQ_HANDLER, NMI_HANDLER, PROGRAM_START, place, prg_with_program, run_until_pc, setup,
        setup_flat, setup_prg, setup_with,
    };

    fn with_policy(policy: IllegalOpcodePolicy) -> Config {
        Config::default().with_illegal_opcodes(policy)
    }

    #[test]
    fn reset_loads_vector_and_defaults() {
        let (mut cpu, mut bus) = setup(&[0xA9, 0x42]);
        cpu.step(&mut bus);
        cpu.set_x(9);
        bus.interrupts_mut().pulse_nmi();
        assert_eq!(cpu.reset(&mut bus), 7);
        assert_eq!(cpu.pc(), PROGRAM_START);
        assert_eq!(cpu.sp(), 0xFD);
        assert_eq!((cpu.a(), cpu.x(), cpu.y()), (0, 0, 0));
        assert_eq!(cpu.status().pack(), 0x24);
        assert!(!bus.interrupts().nmi_pending());
    }

    #[test]
    fn reset_keeps_ram() {
        let (mut cpu, mut bus) = setup(&[0xEA]);
        bus.write(0x0123, 0x99);
        cpu.reset(&mut bus);
        assert_eq!(bus.read(0x0123), 0x99);
    }

    #[test]
    fn total_cycles_include_reset() {
        let (mut cpu, mut bus) = setup(&[0xA9, 0x01, 0xEA]);
        assert_eq!(cpu.total_cycles(), 7);
        cpu.step(&mut bus);
        cpu.step(&mut bus);
        assert_eq!(cpu.total_cycles(), 11);
    }

    #[test]
    fn nmi_beats_irq_at_same_boundary() {
        let (mut cpu, mut bus) = setup(&[0x58, 0xEA]); // CLI; NOP
        cpu.step(&mut bus);
        bus.interrupts_mut().set_irq(IrqSource::EXTERNAL, true);
        bus.interrupts_mut().pulse_nmi();
        assert_eq!(cpu.step(&mut bus), 7);
        assert_eq!(cpu.pc(), NMI_HANDLER);
        assert!(cpu.status().contains(Status::IRQ_DISABLE));
    }

    #[test]
    fn masked_irq_waits_for_cli() {
        // SEI is in effect after reset: NOP runs, then CLI lets the IRQ in.
        let (mut cpu, mut bus) = setup(&[0xEA, 0x58, 0xEA]);
        bus.interrupts_mut().set_irq(IrqSource::APU_FRAME, true);
        assert_eq!(cpu.step(&mut bus), 2);
        assert_eq!(cpu.step(&mut bus), 2);
        assert_eq!(cpu.step(&mut bus), 7);
        assert_eq!(cpu.pc(), IRQ_HANDLER);
    }

    #[test]
    fn nmi_handler_returns_with_rti() {
        let mut prg = prg_with_program(&[0xEA, 0xEA]);
        place(&mut prg, NMI_HANDLER, &[0x40]);
        let (mut cpu, mut bus) = setup_prg(prg, Config::default());
        bus.interrupts_mut().pulse_nmi();
        cpu.step(&mut bus);
        assert_eq!(cpu.pc(), NMI_HANDLER);
        cpu.step(&mut bus);
        assert_eq!(cpu.pc(), PROGRAM_START);
        assert!(cpu.status().contains(Status::IRQ_DISABLE));
    }

    #[test]
    fn illegal_opcode_as_nop_by_default() {
        // $04 NOP zp (undocumented), then LDA #$05.
        let (mut cpu, mut bus) = setup(&[0x04, 0x10, 0xA9, 0x05]);
        assert_eq!(cpu.step(&mut bus), 3);
        assert_eq!(cpu.pc(), 0x8002);
        cpu.step(&mut bus);
        assert_eq!(cpu.a(), 0x05);
    }

    #[test]
    fn illegal_opcode_halts_under_halt_policy() {
        let (mut cpu, mut bus) = setup_with(&[0xA7, 0x10], with_policy(IllegalOpcodePolicy::Halt));
        cpu.step(&mut bus);
        assert!(cpu.is_halted());
        assert_eq!(cpu.phase(), CpuPhase::Halted);
        let pc = cpu.pc();
        assert_eq!(cpu.step(&mut bus), 1);
        assert_eq!(cpu.pc(), pc);
        assert_eq!(cpu.run(&mut bus, 10), 0);
        cpu.reset(&mut bus);
        assert!(!cpu.is_halted());
    }

    #[test]
    fn documented_sbc_twin_is_illegal_under_nop_policy() {
        // $EB is undocumented: no effect on A under the default policy.
        let (mut cpu, mut bus) = setup(&[0xA9, 0x05, 0xEB, 0x01]);
        cpu.step(&mut bus);
        assert_eq!(cpu.step(&mut bus), 2);
        assert_eq!(cpu.a(), 0x05);
    }

    #[test]
    fn clock_counts_down_each_instruction() {
        // LDA $0200 (4 cycles), then NOP (2).
        let (mut cpu, mut bus) = setup(&[0xAD, 0x00, 0x02, 0xEA]);
        assert_eq!(cpu.phase(), CpuPhase::Fetching);
        assert!(!cpu.clock(&mut bus));
        assert_eq!(cpu.phase(), CpuPhase::Executing);
        assert!(!cpu.clock(&mut bus));
        assert!(!cpu.clock(&mut bus));
        assert!(cpu.clock(&mut bus));
        assert_eq!(cpu.phase(), CpuPhase::Fetching);
        assert_eq!(cpu.pc(), 0x8003);
        assert!(!cpu.clock(&mut bus));
        assert!(cpu.clock(&mut bus));
        assert_eq!(cpu.total_cycles(), 7 + 6);
    }

    #[test]
    fn clock_reports_interrupt_phase() {
        let (mut cpu, mut bus) = setup(&[0xEA]);
        bus.interrupts_mut().pulse_nmi();
        cpu.clock(&mut bus);
        assert_eq!(cpu.phase(), CpuPhase::ServicingInterrupt);
        let mut done = 1;
        while !cpu.clock(&mut bus) {
            done += 1;
        }
        assert_eq!(done + 1, 7);
    }

    #[test]
    fn step_finishes_partial_clocked_instruction() {
        let (mut cpu, mut bus) = setup(&[0xAD, 0x00, 0x02, 0xEA]);
        cpu.clock(&mut bus);
        assert_eq!(cpu.step(&mut bus), 3);
        assert_eq!(cpu.step(&mut bus), 2);
        assert_eq!(cpu.total_cycles(), 7 + 6);
    }

    #[test]
    fn clock_while_halted_does_not_underflow() {
        let (mut cpu, mut bus) = setup_with(&[0x02], with_policy(IllegalOpcodePolicy::Unofficial));
        let mut completed = 0;
        for _ in 0..10 {
            if cpu.clock(&mut bus) {
                completed += 1;
            }
        }
        assert!(cpu.is_halted());
        assert_eq!(cpu.phase(), CpuPhase::Halted);
        assert_eq!(completed, 1);
        assert_eq!(cpu.pc(), 0x8001);
        assert_eq!(cpu.total_cycles(), 7 + 10);
    }

    #[test]
    fn run_cycles_reaches_budget() {
        let (mut cpu, mut bus) = setup(&[]);
        let used = cpu.run_cycles(&mut bus, 100);
        assert_eq!(used, 100);
    }

    #[test]
    fn counting_loop_on_flat_memory() {
        // LDX #$05; loop: DEX; BNE loop; NOP
        let (mut cpu, mut mem) = setup_flat(&[0xA2, 0x05, 0xCA, 0xD0, 0xFD, 0xEA]);
        assert!(run_until_pc(&mut cpu, &mut mem, 0x8005, 32));
        assert_eq!(cpu.x(), 0);
        // 2 + 5*DEX(2) + 4*taken(3) + 1*not taken(2)
        assert_eq!(cpu.total_cycles(), 7 + 2 + 10 + 12 + 2);
    }

    #[test]
    fn trace_line_formats_registers() {
        let (cpu, bus) = setup(&[0xA9, 0x42]);
        let line = cpu.trace_line(&bus);
        assert!(line.starts_with("8000  A9 42"), "{line}");
        assert!(line.contains("LDA #$42"), "{line}");
        assert!(line.contains("A:00 X:00 Y:00 P:24 SP:FD CYC:7"), "{line}");
    }
}
