use rayon::prelude::*;

use crate::blend::descriptor::{FillDescriptor, ImageBlendDescriptor};
use crate::blend::encoding::DestEncoding;
use crate::blend::fill::FillPlan;
use crate::blend::image::ImagePlan;
use crate::buffer::view::{BufferView, BufferViewMut, MaskView};
use crate::render::backend::RowThreading;

/// One destination row with its index and the matching mask row.
pub(crate) struct RowSpan<'r> {
    pub(crate) y: u32,
    pub(crate) dest: &'r mut [u8],
    pub(crate) mask: Option<&'r [u8]>,
}

/// Visit every destination row exactly once.
///
/// Sequential mode walks rows top to bottom. Parallel mode hands disjoint row bands to the
/// rayon pool and returns after all of them finish; since each row is written by exactly
/// one task, the output does not depend on the mode.
pub(crate) fn drive_rows<F>(
    threading: RowThreading,
    dest: &mut BufferViewMut<'_>,
    mask: Option<MaskView<'_>>,
    visit: F,
) where
    F: Fn(RowSpan<'_>) + Sync,
{
    let span = |(y, row): (u32, &mut [u8])| {
        visit(RowSpan {
            y,
            dest: row,
            mask: mask.map(|m| m.row(y)),
        })
    };
    match threading {
        RowThreading::Sequential => dest.rows_mut().for_each(span),
        RowThreading::Parallel { min_rows_per_band } => {
            dest.par_rows_mut(min_rows_per_band).for_each(span)
        }
    }
}

pub(crate) fn run_fill<E, K>(
    threading: RowThreading,
    plan: &FillPlan<E>,
    desc: &mut FillDescriptor<'_>,
    kernel: K,
) where
    E: DestEncoding,
    K: Fn(&FillPlan<E>, &mut [u8], Option<&[u8]>) + Sync,
{
    drive_rows(threading, &mut desc.dest, desc.mask, |row| {
        kernel(plan, row.dest, row.mask)
    });
}

pub(crate) fn run_image<E, K>(
    threading: RowThreading,
    plan: &ImagePlan<E>,
    desc: &mut ImageBlendDescriptor<'_>,
    kernel: K,
) where
    E: DestEncoding,
    K: Fn(&ImagePlan<E>, &mut [u8], &[u8], Option<&[u8]>) + Sync,
{
    let src: BufferView<'_> = desc.src;
    drive_rows(threading, &mut desc.dest, desc.mask, |row| {
        kernel(plan, row.dest, src.row(row.y), row.mask)
    });
}

#[cfg(test)]
#[path = "../../tests/unit/render/rows.rs"]
mod tests;
