use super::*;

#[test]
fn l8_to_rgb565_uses_truncation_masks() {
    assert_eq!(l8_to_rgb565(0x00), 0x0000);
    assert_eq!(l8_to_rgb565(0xFF), 0xFFFF);
    // 0x84: r/b = 0x80 -> 16, g = 0x84 -> 33
    assert_eq!(l8_to_rgb565(0x84), (16 << 11) | (33 << 5) | 16);
    for v in 0..=255u8 {
        assert_eq!(l8_to_rgb565(v), rgb888_to_rgb565(Rgb888::gray(v)));
    }
}

#[test]
fn rgb888_to_rgb565_truncates() {
    assert_eq!(rgb888_to_rgb565(Rgb888::new(255, 0, 0)), 0xF800);
    assert_eq!(rgb888_to_rgb565(Rgb888::new(0, 255, 0)), 0x07E0);
    assert_eq!(rgb888_to_rgb565(Rgb888::new(0, 0, 255)), 0x001F);
    assert_eq!(rgb888_to_rgb565(Rgb888::new(7, 3, 7)), 0x0000);
}

#[test]
fn rgb565_expansion_hits_endpoints() {
    assert_eq!(rgb565_to_rgb888(0xFFFF), Rgb888::WHITE);
    assert_eq!(rgb565_to_rgb888(0x0000), Rgb888::BLACK);
    assert_eq!(rgb565_to_rgb888(0xF800), Rgb888::new(255, 0, 0));
    // r=16 -> (16*2106)>>8 = 131, g=32 -> (32*1037)>>8 = 129
    assert_eq!(rgb565_to_rgb888(0x8410), Rgb888::new(131, 129, 131));
}

#[test]
fn rgb565_survives_expand_then_truncate() {
    for c in (0..=u16::MAX).step_by(7) {
        assert_eq!(rgb888_to_rgb565(rgb565_to_rgb888(c)), c);
    }
}

#[test]
fn fields_split_and_join() {
    let c = 0xA5C3;
    let (r, g, b) = rgb565_fields(c);
    assert!(r <= 31 && g <= 63 && b <= 31);
    assert_eq!(rgb565_from_fields(r, g, b), c);
}

#[test]
fn rgb565_is_little_endian() {
    let mut px = [0u8; 2];
    write_rgb565(&mut px, 0xF800);
    assert_eq!(px, [0x00, 0xF8]);
    assert_eq!(read_rgb565(&px), 0xF800);
}

#[test]
fn bgr_layout_and_x_byte() {
    let mut three = [0u8; 3];
    write_bgr(&mut three, Rgb888::new(1, 2, 3));
    assert_eq!(three, [3, 2, 1]);

    let mut four = [9u8; 4];
    write_bgr(&mut four, Rgb888::new(1, 2, 3));
    assert_eq!(four, [3, 2, 1, 0xFF]);
    assert_eq!(read_bgr(&four), Rgb888::new(1, 2, 3));
}
