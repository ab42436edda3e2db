use super::*;
use crate::blend::encoding::{A8Dest, Rgb565Dest, Rgb888Dest};
use crate::blend::mixer::BlendMode;
use crate::buffer::view::{BufferViewMut, MaskView};
use crate::foundation::core::Rgb888;
use crate::format::pixel_format::PixelFormat;

fn plan565(color: Rgb888, opa: u8, masked: bool) -> FillPlan<Rgb565Dest> {
    let mut scratch = [0u8; 2];
    let mask = [0u8; 1];
    let dest = BufferViewMut::packed(&mut scratch, 1, 1, PixelFormat::Rgb565).unwrap();
    let mut desc = FillDescriptor::new(dest, color).with_opa(opa);
    if masked {
        desc = desc.with_mask(MaskView::packed(&mask, 1, 1).unwrap());
    }
    FillPlan::new("scalar", Rgb565Dest, &desc).unwrap()
}

#[test]
fn half_opacity_red_over_black() {
    let plan = plan565(Rgb888::new(255, 0, 0), 128, false);
    let mut row = [0u8; 8];
    fill_row(&plan, &mut row, None);
    for px in row.chunks_exact(2) {
        assert_eq!(u16::from_le_bytes([px[0], px[1]]), 0x7800);
    }
}

#[test]
fn opaque_fill_writes_packed_color() {
    let plan = plan565(Rgb888::new(0, 0, 255), 255, false);
    let mut row = [0xAAu8; 6];
    fill_row(&plan, &mut row, None);
    assert_eq!(row, [0x1F, 0x00, 0x1F, 0x00, 0x1F, 0x00]);
}

#[test]
fn masked_fill_skips_zero_coverage() {
    let plan = plan565(Rgb888::WHITE, 255, true);
    let mut row = [0x34u8, 0x12, 0x34, 0x12, 0x34, 0x12];
    fill_row(&plan, &mut row, Some(&[0, 255, 0][..]));
    assert_eq!(row, [0x34, 0x12, 0xFF, 0xFF, 0x34, 0x12]);
}

#[test]
fn xrgb_fill_sets_x_only_where_written() {
    let mut scratch = [0u8; 4];
    let dest = BufferViewMut::packed(&mut scratch, 1, 1, PixelFormat::Xrgb8888).unwrap();
    let desc = FillDescriptor::new(dest, Rgb888::new(10, 20, 30));
    let plan = FillPlan::new("scalar", Rgb888Dest::XRGB8888, &desc).unwrap();

    let mut row = [0u8, 0, 0, 0x11, 0, 0, 0, 0x22];
    fill_row(&plan, &mut row, Some(&[255, 0][..]));
    assert_eq!(row, [30, 20, 10, 0xFF, 0, 0, 0, 0x22]);
}

#[test]
fn a8_fill_accumulates_coverage() {
    let mut scratch = [0u8; 1];
    let dest = BufferViewMut::packed(&mut scratch, 1, 1, PixelFormat::A8).unwrap();
    let desc = FillDescriptor::new(dest, Rgb888::BLACK).with_opa(100);
    let plan = FillPlan::new("scalar", A8Dest, &desc).unwrap();

    let mut row = [0u8, 50, 100, 200];
    fill_row(&plan, &mut row, None);
    assert_eq!(row, [100, 100, 100, 200]);
}

fn mode_plan565(opa: u8, mode: BlendMode) -> FillPlan<Rgb565Dest> {
    let mut scratch = [0u8; 2];
    let dest = BufferViewMut::packed(&mut scratch, 1, 1, PixelFormat::Rgb565).unwrap();
    let desc = FillDescriptor::new(dest, Rgb888::gray(128))
        .with_opa(opa)
        .with_blend_mode(mode);
    FillPlan::new("scalar", Rgb565Dest, &desc).unwrap()
}

#[test]
fn additive_fill_saturates_then_mixes() {
    // gray 128 packs to 0x8410; doubling saturates every field
    let mut row = 0x8410u16.to_le_bytes();
    fill_row(&mode_plan565(255, BlendMode::Additive), &mut row, None);
    assert_eq!(u16::from_le_bytes(row), 0xFFFF);

    // (31*128 + 16*127)>>8 = 23, (63*128 + 32*127)>>8 = 47
    let mut row = 0x8410u16.to_le_bytes();
    fill_row(&mode_plan565(128, BlendMode::Additive), &mut row, None);
    assert_eq!(u16::from_le_bytes(row), (23 << 11) | (47 << 5) | 23);
}

#[test]
fn mode_fill_leaves_zero_coverage_untouched() {
    let plan = mode_plan565(255, BlendMode::Subtractive);
    let mut row = [0xFFu8, 0xFF, 0xFF, 0xFF];
    fill_row(&plan, &mut row, Some(&[0, 255][..]));
    // 31-16, 63-32, 31-16
    assert_eq!(row, [0xFF, 0xFF, 0xEF, 0x7B]);
}

#[test]
fn a8_fill_rejects_color_modes() {
    let mut scratch = [0u8; 1];
    let dest = BufferViewMut::packed(&mut scratch, 1, 1, PixelFormat::A8).unwrap();
    let desc = FillDescriptor::new(dest, Rgb888::WHITE).with_blend_mode(BlendMode::Additive);
    let err = FillPlan::new("scalar", A8Dest, &desc).unwrap_err();
    assert!(err.is_unsupported());
    assert!(err.to_string().contains("additive fill -> A8"), "{err}");
}
