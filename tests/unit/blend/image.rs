use super::*;
use crate::blend::encoding::{A8Dest, Rgb565Dest, Rgb888Dest};
use crate::blend::mixer::BlendMode;
use crate::buffer::view::{BufferView, BufferViewMut, MaskView};
use crate::format::pixel_format::PixelFormat;

fn make_plan<E: DestEncoding>(enc: E, src: PixelFormat, opa: u8, masked: bool) -> BlendResult<ImagePlan<E>> {
    let mut scratch = vec![0u8; enc.px_size()];
    let src_bytes = vec![0u8; src.bytes_per_pixel()];
    let mask = [0u8; 1];
    let dest = BufferViewMut::packed(&mut scratch, 1, 1, enc.format()).unwrap();
    let src = BufferView::packed(&src_bytes, 1, 1, src).unwrap();
    let mut desc = ImageBlendDescriptor::new(dest, src).with_opa(opa);
    if masked {
        desc = desc.with_mask(MaskView::packed(&mask, 1, 1).unwrap());
    }
    ImagePlan::new("scalar", enc, &desc)
}

#[test]
fn argb_onto_white_xrgb() {
    let plan = make_plan(Rgb888Dest::XRGB8888, PixelFormat::Argb8888, 255, false).unwrap();
    let src = [0, 0, 255, 255, 0, 0, 0, 0];
    let mut row = [255u8; 8];
    blend_row(&plan, &mut row, &src, None);
    assert_eq!(row, [0, 0, 255, 255, 255, 255, 255, 255]);
}

#[test]
fn equal_rgb565_pixels_stay_bit_identical() {
    let plan = make_plan(Rgb565Dest, PixelFormat::Rgb565, 200, true).unwrap();
    let src = [0x34, 0x12, 0xC3, 0xA5];
    let mut row = src;
    blend_row(&plan, &mut row, &src, Some(&[0x80, 0x80][..]));
    assert_eq!(row, src);
}

#[test]
fn three_and_four_byte_families_mix_freely() {
    let plan = make_plan(Rgb888Dest::XRGB8888, PixelFormat::Rgb888, 255, false).unwrap();
    let mut row = [0u8; 8];
    blend_row(&plan, &mut row, &[1, 2, 3, 4, 5, 6], None);
    assert_eq!(row, [1, 2, 3, 0xFF, 4, 5, 6, 0xFF]);

    let plan = make_plan(Rgb888Dest::RGB888, PixelFormat::Xrgb8888, 255, false).unwrap();
    let mut row = [0u8; 6];
    blend_row(&plan, &mut row, &[1, 2, 3, 0, 4, 5, 6, 0], None);
    assert_eq!(row, [1, 2, 3, 4, 5, 6]);
}

#[test]
fn al88_alpha_feeds_weight() {
    let plan = make_plan(Rgb565Dest, PixelFormat::Al88, 255, false).unwrap();
    let mut row = [0u8; 2];
    blend_row(&plan, &mut row, &[0xFF, 128], None);
    // (31*128)>>8 = 15, (63*128)>>8 = 31
    assert_eq!(u16::from_le_bytes(row), (15 << 11) | (31 << 5) | 15);
}

#[test]
fn premultiplied_is_scaled_by_opacity() {
    let plan = make_plan(Rgb888Dest::XRGB8888, PixelFormat::Argb8888Premultiplied, 128, false).unwrap();
    // premultiplied opaque grey 128 over black
    let src = [128, 128, 128, 255];
    let mut row = [0u8, 0, 0, 0];
    blend_row(&plan, &mut row, &src, None);
    // k = 128: 128*128>>8 = 64; w = (255*128)>>8 = 127; 64 + 0 = 64
    assert_eq!(row, [64, 64, 64, 0xFF]);
}

#[test]
fn premultiplied_full_opacity_is_unscaled() {
    let plan = make_plan(Rgb888Dest::RGB888, PixelFormat::Argb8888Premultiplied, 255, false).unwrap();
    let src = [100, 50, 0, 128];
    let mut row = [200u8, 200, 200];
    blend_row(&plan, &mut row, &src, None);
    // 100 + (200*127)>>8 = 199, 50 + 99 = 149, 0 + 99 = 99
    assert_eq!(row, [199, 149, 99]);
}

#[test]
fn a8_source_onto_color_is_unsupported() {
    let err = make_plan(Rgb565Dest, PixelFormat::A8, 255, false).unwrap_err();
    assert!(err.is_unsupported());
    assert!(err.to_string().contains("A8 -> RGB565"));
}

#[test]
fn premultiplied_onto_a8_is_unsupported() {
    let err = make_plan(A8Dest, PixelFormat::Argb8888Premultiplied, 255, false).unwrap_err();
    assert!(err.is_unsupported());
}

#[test]
fn a8_image_takes_max_of_alpha() {
    let plan = make_plan(A8Dest, PixelFormat::Argb8888, 255, false).unwrap();
    let src = [9, 9, 9, 10, 9, 9, 9, 240];
    let mut row = [100u8, 100];
    blend_row(&plan, &mut row, &src, None);
    assert_eq!(row, [100, 240]);
}

fn mode_plan<E: DestEncoding>(enc: E, src: PixelFormat, mode: BlendMode) -> BlendResult<ImagePlan<E>> {
    let mut scratch = vec![0u8; enc.px_size()];
    let src_bytes = vec![0u8; src.bytes_per_pixel()];
    let dest = BufferViewMut::packed(&mut scratch, 1, 1, enc.format()).unwrap();
    let src = BufferView::packed(&src_bytes, 1, 1, src).unwrap();
    ImagePlan::new("scalar", enc, &ImageBlendDescriptor::new(dest, src).with_blend_mode(mode))
}

#[test]
fn subtractive_image_clamps_at_zero() {
    let plan = mode_plan(Rgb888Dest::RGB888, PixelFormat::Rgb888, BlendMode::Subtractive).unwrap();
    let mut row = [100u8, 100, 5];
    blend_row(&plan, &mut row, &[10, 20, 30], None);
    assert_eq!(row, [90, 80, 0]);
}

#[test]
fn multiply_result_is_mixed_by_source_alpha() {
    let plan = mode_plan(Rgb888Dest::XRGB8888, PixelFormat::Argb8888, BlendMode::Multiply).unwrap();
    let mut row = [200u8, 100, 50, 0];
    blend_row(&plan, &mut row, &[255, 255, 255, 128], None);
    // white multiplies to (255*d)>>8 = 199/99/49, then mixes at w=128
    assert_eq!(row, [198, 99, 49, 0xFF]);
}

#[test]
fn non_normal_modes_reject_premultiplied_and_a8() {
    let err = mode_plan(Rgb565Dest, PixelFormat::Argb8888Premultiplied, BlendMode::Additive).unwrap_err();
    assert!(err.is_unsupported());
    assert!(err.to_string().contains("additive ARGB8888"), "{err}");

    let err = mode_plan(A8Dest, PixelFormat::Argb8888, BlendMode::Multiply).unwrap_err();
    assert!(err.is_unsupported());
    assert!(err.to_string().contains("-> A8"), "{err}");
}
