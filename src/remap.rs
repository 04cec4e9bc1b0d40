// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Remapping of parameter bands between the 10/20/34-band resolutions.
//!
//! Parameters may be transmitted at a lower resolution than the synthesis
//! runs at, and the synthesis resolution can change between frames. The
//! `map_idx_*` functions remap quantized parameter rows; the `map_val_*`
//! functions remap dequantized mixing-matrix rows carried across frames.

use crate::common::{ParMatrix, MAX_NR_IIDICC};

/// Remap each envelope of `par` to the 20-band grid into `buf`, or return
/// `par` directly when it is already at the target resolution.
pub fn remap20<'a>(
    par: &'a ParMatrix,
    buf: &'a mut ParMatrix,
    num_par: usize,
    num_env: usize,
    full: bool,
) -> &'a ParMatrix {
    match num_par {
        34 | 17 => {
            for e in 0..num_env {
                map_idx_34_to_20(&mut buf[e], &par[e], full);
            }
            buf
        }
        10 | 5 => {
            for e in 0..num_env {
                map_idx_10_to_20(&mut buf[e], &par[e], full);
            }
            buf
        }
        _ => par,
    }
}

/// Remap each envelope of `par` to the 34-band grid into `buf`, or return
/// `par` directly when it is already at the target resolution.
pub fn remap34<'a>(
    par: &'a ParMatrix,
    buf: &'a mut ParMatrix,
    num_par: usize,
    num_env: usize,
    full: bool,
) -> &'a ParMatrix {
    match num_par {
        20 | 11 => {
            for e in 0..num_env {
                map_idx_20_to_34(&mut buf[e], &par[e], full);
            }
            buf
        }
        10 | 5 => {
            for e in 0..num_env {
                map_idx_10_to_34(&mut buf[e], &par[e], full);
            }
            buf
        }
        _ => par,
    }
}

fn map_idx_10_to_20(par_mapped: &mut [i8; MAX_NR_IIDICC], par: &[i8; MAX_NR_IIDICC], full: bool) {
    let last = if full {
        9
    }
    else {
        par_mapped[10] = 0;
        4
    };

    for b in (0..=last).rev() {
        par_mapped[2 * b + 1] = par[b];
        par_mapped[2 * b] = par[b];
    }
}

fn map_idx_34_to_20(par_mapped: &mut [i8; MAX_NR_IIDICC], par: &[i8; MAX_NR_IIDICC], full: bool) {
    par_mapped[0] = (2 * par[0] + par[1]) / 3;
    par_mapped[1] = (par[1] + 2 * par[2]) / 3;
    par_mapped[2] = (2 * par[3] + par[4]) / 3;
    par_mapped[3] = (par[4] + 2 * par[5]) / 3;
    par_mapped[4] = (par[6] + par[7]) / 2;
    par_mapped[5] = (par[8] + par[9]) / 2;
    par_mapped[6] = par[10];
    par_mapped[7] = par[11];
    par_mapped[8] = (par[12] + par[13]) / 2;
    par_mapped[9] = (par[14] + par[15]) / 2;
    par_mapped[10] = par[16];

    if full {
        par_mapped[11] = par[17];
        par_mapped[12] = par[18];
        par_mapped[13] = par[19];
        par_mapped[14] = (par[20] + par[21]) / 2;
        par_mapped[15] = (par[22] + par[23]) / 2;
        par_mapped[16] = (par[24] + par[25]) / 2;
        par_mapped[17] = (par[26] + par[27]) / 2;
        par_mapped[18] = (par[28] + par[29] + par[30] + par[31]) / 4;
        par_mapped[19] = (par[32] + par[33]) / 2;
    }
}

fn map_idx_10_to_34(par_mapped: &mut [i8; MAX_NR_IIDICC], par: &[i8; MAX_NR_IIDICC], full: bool) {
    if full {
        par_mapped[33] = par[9];
        par_mapped[32] = par[9];
        par_mapped[31] = par[9];
        par_mapped[30] = par[9];
        par_mapped[29] = par[9];
        par_mapped[28] = par[9];
        par_mapped[27] = par[8];
        par_mapped[26] = par[8];
        par_mapped[25] = par[8];
        par_mapped[24] = par[8];
        par_mapped[23] = par[7];
        par_mapped[22] = par[7];
        par_mapped[21] = par[7];
        par_mapped[20] = par[7];
        par_mapped[19] = par[6];
        par_mapped[18] = par[6];
        par_mapped[17] = par[5];
        par_mapped[16] = par[5];
    }
    else {
        par_mapped[16] = 0;
    }
    par_mapped[15] = par[4];
    par_mapped[14] = par[4];
    par_mapped[13] = par[4];
    par_mapped[12] = par[4];
    par_mapped[11] = par[3];
    par_mapped[10] = par[3];
    par_mapped[9] = par[2];
    par_mapped[8] = par[2];
    par_mapped[7] = par[2];
    par_mapped[6] = par[2];
    par_mapped[5] = par[1];
    par_mapped[4] = par[1];
    par_mapped[3] = par[1];
    par_mapped[2] = par[0];
    par_mapped[1] = par[0];
    par_mapped[0] = par[0];
}

fn map_idx_20_to_34(par_mapped: &mut [i8; MAX_NR_IIDICC], par: &[i8; MAX_NR_IIDICC], full: bool) {
    if full {
        par_mapped[33] = par[19];
        par_mapped[32] = par[19];
        par_mapped[31] = par[18];
        par_mapped[30] = par[18];
        par_mapped[29] = par[18];
        par_mapped[28] = par[18];
        par_mapped[27] = par[17];
        par_mapped[26] = par[17];
        par_mapped[25] = par[16];
        par_mapped[24] = par[16];
        par_mapped[23] = par[15];
        par_mapped[22] = par[15];
        par_mapped[21] = par[14];
        par_mapped[20] = par[14];
        par_mapped[19] = par[13];
        par_mapped[18] = par[12];
        par_mapped[17] = par[11];
    }
    par_mapped[16] = par[10];
    par_mapped[15] = par[9];
    par_mapped[14] = par[9];
    par_mapped[13] = par[8];
    par_mapped[12] = par[8];
    par_mapped[11] = par[7];
    par_mapped[10] = par[6];
    par_mapped[9] = par[5];
    par_mapped[8] = par[5];
    par_mapped[7] = par[4];
    par_mapped[6] = par[4];
    par_mapped[5] = par[3];
    par_mapped[4] = (par[2] + par[3]) / 2;
    par_mapped[3] = par[2];
    par_mapped[2] = par[1];
    par_mapped[1] = (par[0] + par[1]) / 2;
    par_mapped[0] = par[0];
}

/// Remap one persistent mixing-matrix row from 34 to 20 bands in place.
pub fn map_val_34_to_20(par: &mut [f32; MAX_NR_IIDICC]) {
    par[0] = (2.0 * par[0] + par[1]) * 0.33333333;
    par[1] = (par[1] + 2.0 * par[2]) * 0.33333333;
    par[2] = (2.0 * par[3] + par[4]) * 0.33333333;
    par[3] = (par[4] + 2.0 * par[5]) * 0.33333333;
    par[4] = (par[6] + par[7]) * 0.5;
    par[5] = (par[8] + par[9]) * 0.5;
    par[6] = par[10];
    par[7] = par[11];
    par[8] = (par[12] + par[13]) * 0.5;
    par[9] = (par[14] + par[15]) * 0.5;
    par[10] = par[16];
    par[11] = par[17];
    par[12] = par[18];
    par[13] = par[19];
    par[14] = (par[20] + par[21]) * 0.5;
    par[15] = (par[22] + par[23]) * 0.5;
    par[16] = (par[24] + par[25]) * 0.5;
    par[17] = (par[26] + par[27]) * 0.5;
    par[18] = (par[28] + par[29] + par[30] + par[31]) * 0.25;
    par[19] = (par[32] + par[33]) * 0.5;
}

/// Remap one persistent mixing-matrix row from 20 to 34 bands in place.
pub fn map_val_20_to_34(par: &mut [f32; MAX_NR_IIDICC]) {
    par[33] = par[19];
    par[32] = par[19];
    par[31] = par[18];
    par[30] = par[18];
    par[29] = par[18];
    par[28] = par[18];
    par[27] = par[17];
    par[26] = par[17];
    par[25] = par[16];
    par[24] = par[16];
    par[23] = par[15];
    par[22] = par[15];
    par[21] = par[14];
    par[20] = par[14];
    par[19] = par[13];
    par[18] = par[12];
    par[17] = par[11];
    par[16] = par[10];
    par[15] = par[9];
    par[14] = par[9];
    par[13] = par[8];
    par[12] = par[8];
    par[11] = par[7];
    par[10] = par[6];
    par[9] = par[5];
    par[8] = par[5];
    par[7] = par[4];
    par[6] = par[4];
    par[5] = par[3];
    par[4] = (par[2] + par[3]) * 0.5;
    par[3] = par[2];
    par[2] = par[1];
    par[1] = (par[0] + par[1]) * 0.5;
}
