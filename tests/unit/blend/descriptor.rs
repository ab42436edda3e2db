use super::*;
use crate::format::pixel_format::PixelFormat;

#[test]
fn builders_set_modulation() {
    let mut dst = [0u8; 8];
    let mask = [0u8; 4];
    let dest = BufferViewMut::packed(&mut dst, 4, 1, PixelFormat::Rgb565).unwrap();
    let d = FillDescriptor::new(dest, Rgb888::WHITE);
    assert_eq!(d.mode(), ModulationMode::Plain);
    let d = d.with_opa(10);
    assert_eq!(d.mode(), ModulationMode::Opacity);
    let d = d.with_mask(MaskView::packed(&mask, 4, 1).unwrap());
    assert_eq!(d.mode(), ModulationMode::OpacityAndMask);
    assert!(d.check_geometry().is_ok());
}

#[test]
fn mask_size_must_match_destination() {
    let mut dst = [0u8; 8];
    let mask = [0u8; 3];
    let dest = BufferViewMut::packed(&mut dst, 4, 1, PixelFormat::Rgb565).unwrap();
    let d = FillDescriptor::new(dest, Rgb888::WHITE).with_mask(MaskView::packed(&mask, 3, 1).unwrap());
    let err = d.check_geometry().unwrap_err();
    assert!(matches!(err, BlendError::GeometryMismatch(_)));
    assert!(err.to_string().contains("mask is 3x1"));
}

#[test]
fn source_size_must_match_destination() {
    let mut dst = [0u8; 8];
    let src = [0u8; 12];
    let dest = BufferViewMut::packed(&mut dst, 2, 2, PixelFormat::Rgb565).unwrap();
    let src = BufferView::packed(&src, 3, 1, PixelFormat::Xrgb8888).unwrap();
    let err = ImageBlendDescriptor::new(dest, src).check_geometry().unwrap_err();
    assert!(err.to_string().contains("source is 3x1, destination is 2x2"));
}

#[test]
fn strides_may_differ() {
    let mut dst = [0u8; 2 * 9];
    let src = [0u8; 16 + 8];
    let dest = BufferViewMut::new(&mut dst, 2, 2, 9, PixelFormat::Xrgb8888).unwrap();
    let src = BufferView::new(&src, 2, 2, 16, PixelFormat::Argb8888).unwrap();
    assert!(ImageBlendDescriptor::new(dest, src).check_geometry().is_ok());
}
