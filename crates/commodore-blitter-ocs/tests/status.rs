use commodore_blitter_ocs::emu_core::{ChipRam, Observable, Value};
use commodore_blitter_ocs::{Blitter, Channel, InterruptLatch, STATUS_BBUSY, STATUS_BZERO};

const USE_A: u16 = 0x0800;
const USE_D: u16 = 0x0100;

fn copy_blitter(source: u32, dest: u32) -> Blitter {
    let mut blitter = Blitter::new();
    blitter.set_bltcon0(USE_A | USE_D | 0x00F0);
    blitter.set_bltcon1(0);
    blitter.set_first_word_mask(0xFFFF);
    blitter.set_last_word_mask(0xFFFF);
    blitter.set_pointer(Channel::A, source);
    blitter.set_pointer(Channel::D, dest);
    blitter
}

#[test]
fn size_write_sets_busy_and_completion_clears_it() {
    let mut ram = ChipRam::new(0x1000).unwrap();
    let mut blitter = copy_blitter(0x100, 0x200);
    assert_eq!(blitter.status() & STATUS_BBUSY, 0);

    blitter.set_size((2 << 6) | 3);
    assert_ne!(blitter.status() & STATUS_BBUSY, 0);
    assert!(blitter.is_busy());
    assert_eq!(blitter.query("busy"), Some(Value::Bool(true)));

    let mut interrupts = InterruptLatch::new();
    assert_eq!(blitter.advance_dma(&mut ram, &mut interrupts), Ok(true));

    assert_eq!(blitter.status() & STATUS_BBUSY, 0);
    assert_eq!(blitter.height(), 0);
    assert_eq!(blitter.query("bltsize.height"), Some(Value::U16(0)));
    assert_eq!(blitter.width(), 3, "width is left as programmed");
}

#[test]
fn idle_blitter_does_nothing() {
    let mut ram = ChipRam::new(0x1000).unwrap();
    ram.set_word_at(0x100, 0xFFFF);
    let before = ram.clone();
    let mut blitter = copy_blitter(0x100, 0x200);

    let mut interrupts = InterruptLatch::new();
    assert_eq!(blitter.advance_dma(&mut ram, &mut interrupts), Ok(false));
    assert_eq!(ram, before);
    assert_eq!(interrupts.intreq, 0);
}

#[test]
fn zero_flag_tracks_each_blit() {
    let mut ram = ChipRam::new(0x1000).unwrap();
    ram.set_word_at(0x100, 0x0000);
    ram.set_word_at(0x102, 0x0040);
    let mut interrupts = InterruptLatch::new();

    let mut blitter = copy_blitter(0x100, 0x200);
    blitter.set_size((1 << 6) | 1);
    blitter.advance_dma(&mut ram, &mut interrupts).unwrap();
    assert_eq!(blitter.status(), STATUS_BZERO);

    blitter.set_size((1 << 6) | 1);
    blitter.advance_dma(&mut ram, &mut interrupts).unwrap();
    assert_eq!(blitter.status(), 0, "A now points at the non-zero word");
    assert_eq!(ram.word_at(0x202), 0x0040);

    // The flag is recomputed for every blit, not accumulated.
    blitter.set_pointer(Channel::A, 0x100);
    blitter.set_size((1 << 6) | 1);
    blitter.advance_dma(&mut ram, &mut interrupts).unwrap();
    assert_eq!(blitter.status(), STATUS_BZERO);
    assert_eq!(blitter.query("zero"), Some(Value::Bool(true)));
}

#[test]
fn rearming_runs_the_next_blit_from_current_pointers() {
    let mut ram = ChipRam::new(0x1000).unwrap();
    ram.load_words(0x100, &[0x1111, 0x2222, 0x3333, 0x4444]);
    let mut interrupts = InterruptLatch::new();

    let mut blitter = copy_blitter(0x100, 0x200);
    blitter.set_size((1 << 6) | 2);
    blitter.advance_dma(&mut ram, &mut interrupts).unwrap();
    blitter.set_size((1 << 6) | 2);
    blitter.advance_dma(&mut ram, &mut interrupts).unwrap();

    assert_eq!(ram.word_at(0x200), 0x1111);
    assert_eq!(ram.word_at(0x206), 0x4444);
    assert_eq!(blitter.query("bltdpt"), Some(Value::U32(0x208)));
}
