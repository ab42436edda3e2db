use super::*;

#[test]
fn destination_selection() {
    assert_eq!(
        Destination::for_format("scalar", PixelFormat::Rgb565).unwrap(),
        Destination::Rgb565(Rgb565Dest)
    );
    assert_eq!(
        Destination::for_format("scalar", PixelFormat::Xrgb8888).unwrap(),
        Destination::Rgb888(Rgb888Dest::XRGB8888)
    );
    for f in [PixelFormat::L8, PixelFormat::Al88, PixelFormat::Argb8888] {
        let err = Destination::for_format("scalar", f).unwrap_err();
        assert!(err.is_unsupported());
    }
}

#[test]
fn rgb565_reader_table() {
    let enc = Rgb565Dest;
    let l8 = enc.reader(PixelFormat::L8).unwrap();
    assert_eq!(l8(&[0xFF]), (0xFFFF, 255));

    let al88 = enc.reader(PixelFormat::Al88).unwrap();
    assert_eq!(al88(&[0x00, 0x40]), (0x0000, 0x40));

    let argb = enc.reader(PixelFormat::Argb8888).unwrap();
    assert_eq!(argb(&[0, 0, 255, 99]), (0xF800, 99));

    // the fourth byte of XRGB8888 is never alpha
    let xrgb = enc.reader(PixelFormat::Xrgb8888).unwrap();
    assert_eq!(xrgb(&[255, 0, 0, 0]), (0x001F, 255));

    assert!(enc.reader(PixelFormat::A8).is_none());
}

#[test]
fn rgb888_reader_table() {
    let enc = Rgb888Dest::RGB888;
    let rgb565 = enc.reader(PixelFormat::Rgb565).unwrap();
    assert_eq!(rgb565(&0xF800u16.to_le_bytes()), (Rgb888::new(255, 0, 0), 255));

    let al88 = enc.reader(PixelFormat::Al88).unwrap();
    assert_eq!(al88(&[0x42, 0x10]), (Rgb888::gray(0x42), 0x10));

    let pm = enc.reader(PixelFormat::Argb8888Premultiplied).unwrap();
    assert_eq!(pm(&[1, 2, 3, 4]), (Rgb888::new(3, 2, 1), 4));
    assert_eq!(enc.format(), PixelFormat::Rgb888);
    assert_eq!(Rgb888Dest::XRGB8888.format(), PixelFormat::Xrgb8888);
}

#[test]
fn xrgb_store_sets_filler_byte() {
    let enc = Rgb888Dest::XRGB8888;
    let mut px = [0u8; 4];
    enc.store(&mut px, Rgb888::new(9, 8, 7));
    assert_eq!(px, [7, 8, 9, 0xFF]);
    assert_eq!(enc.load(&px), Rgb888::new(9, 8, 7));
}

#[test]
fn a8_reads_only_alpha() {
    let enc = A8Dest;
    assert_eq!(enc.from_color(Rgb888::BLACK), 0xFF);
    assert_eq!(enc.reader(PixelFormat::A8).unwrap()(&[0x33]), (0xFF, 0x33));
    assert_eq!(enc.reader(PixelFormat::Al88).unwrap()(&[0x99, 0x33]), (0xFF, 0x33));
    assert_eq!(enc.reader(PixelFormat::Argb8888).unwrap()(&[1, 2, 3, 0x33]), (0xFF, 0x33));
    assert_eq!(enc.reader(PixelFormat::Xrgb8888).unwrap()(&[1, 2, 3, 0x33]), (0xFF, 255));
    assert!(enc.reader(PixelFormat::Argb8888Premultiplied).is_none());
    assert!(enc.mix_fn(Mixer::Premultiplied).is_none());
}

#[test]
fn combination_label() {
    assert_eq!(
        combination(PixelFormat::Rgb888, PixelFormat::Xrgb8888),
        "RGB888 -> XRGB8888"
    );
}
