use nescore::{Cartridge, CartridgeImage, Config, ConfigError, IllegalOpcodePolicy, Nes};

/// 16 KiB NROM image: the program at $8000, all vectors pointing at it.
fn demo_image() -> CartridgeImage {
    let mut prg = vec![0xEA; 16 * 1024];

    let program: &[u8] = &[
        0xA9, 0x10, // LDA #$10
        0x69, 0x05, // ADC #$05 => A = $15
        0x8D, 0x00, 0x02, // STA $0200
        0xE8, // INX
        0xD0, 0xFD, // BNE -3: loop until X wraps to 0
        0x02, // JAM: halts under the Unofficial policy
    ];
    prg[..program.len()].copy_from_slice(program);

    // $FFFA-$FFFF land at $3FFA-$3FFF of the mirrored bank.
    for vector in [0x3FFA, 0x3FFC, 0x3FFE] {
        prg[vector] = 0x00;
        prg[vector + 1] = 0x80;
    }

    CartridgeImage::new(prg).with_prg_ram(0x2000)
}

fn main() -> Result<(), ConfigError> {
    let cartridge = Cartridge::from_image(demo_image(), 0)?;
    let mut nes = Nes::builder()
        .config(Config::default().with_illegal_opcodes(IllegalOpcodePolicy::Unofficial))
        .cartridge(cartridge)
        .build()?;

    let max_steps = 10_000;
    let mut steps = 0;
    while !nes.cpu().is_halted() && steps < max_steps {
        nes.step();
        steps += 1;
    }

    let m0200 = nes.bus_mut().read(0x0200);
    let cpu = nes.cpu();
    println!("steps: {steps}, cycles: {}", cpu.total_cycles());
    println!("A: 0x{:02X}", cpu.a());
    println!("X: 0x{:02X}", cpu.x());
    println!("Y: 0x{:02X}", cpu.y());
    println!("SP: 0x{:02X}", cpu.sp());
    println!("PC: 0x{:04X}", cpu.pc());
    println!("P: {} (0x{:02X})", cpu.status(), cpu.status().pack());
    println!("mem[0x0200]: 0x{m0200:02X}");
    Ok(())
}
