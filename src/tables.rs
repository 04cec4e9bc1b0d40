// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Coefficient tables for the parametric stereo decoder.
//!
//! The trigonometric tables (mixing matrices, phase smoother, hybrid filters
//! and fractional delays) are generated once at first use from their
//! closed-form definitions.

use std::f32::consts::{FRAC_1_SQRT_2, SQRT_2};
use std::f64::consts::PI;

use lazy_static::lazy_static;

use crate::common::*;

/// IID quantization grids in dB, coarse (15 steps) then fine (31 steps).
/// Dequantized to a linear inter-channel amplitude ratio c = 10^(dB/20).
const IID_COARSE_DB: [f32; 15] =
    [-25.0, -18.0, -14.0, -10.0, -7.0, -4.0, -2.0, 0.0, 2.0, 4.0, 7.0, 10.0, 14.0, 18.0, 25.0];

const IID_FINE_DB: [f32; 31] = [
    -50.0, -45.0, -40.0, -35.0, -30.0, -25.0, -22.0, -19.0, -16.0, -13.0, -10.0, -8.0, -6.0,
    -4.0, -2.0, 0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 13.0, 16.0, 19.0, 22.0, 25.0, 30.0, 35.0, 40.0,
    45.0, 50.0,
];

/// Dequantized ICC, quant_rho.
const QUANT_RHO: [f32; 8] = [1.0, 0.937, 0.84118, 0.60092, 0.36764, 0.0, -0.589, -1.0];

/// Quantized IPD/OPD angles, k * pi/4.
const IPDOPD_SIN: [f32; 8] =
    [0.0, FRAC_1_SQRT_2, 1.0, FRAC_1_SQRT_2, 0.0, -FRAC_1_SQRT_2, -1.0, -FRAC_1_SQRT_2];
const IPDOPD_COS: [f32; 8] =
    [1.0, FRAC_1_SQRT_2, 0.0, -FRAC_1_SQRT_2, -1.0, -FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2];

/// First half of the 13-tap symmetric QMF splitting prototypes.
const G0_Q8: [f64; 7] = [
    0.00746082949812,
    0.02270420949825,
    0.04546865930473,
    0.07266113929591,
    0.09885108575264,
    0.11793710567217,
    0.125,
];

const G0_Q12: [f64; 7] = [
    0.04081179924692,
    0.03812810994926,
    0.05144908135699,
    0.06399831151592,
    0.07428313801106,
    0.08100347892914,
    0.08333333333333,
];

const G1_Q8: [f64; 7] = [
    0.01565675600122,
    0.03752716391991,
    0.05417891378782,
    0.08417044116767,
    0.10307344158036,
    0.12222452249753,
    0.125,
];

const G2_Q4: [f64; 7] = [
    -0.05908211155639,
    -0.04871498374946,
    0.0,
    0.07778723915851,
    0.16486303567403,
    0.23279856662996,
    0.25,
];

/// Real 13-tap prototype used by the two-way splits of the 20-band hybrid.
pub const G1_Q2: [f32; 7] =
    [0.0, 0.01899487526049, 0.0, -0.07293139167538, 0.0, 0.30596630545168, 0.5];

/// Band center frequencies of the 20-band hybrid, in units of f_qmf / 8.
const F_CENTER_20: [f32; 10] = [-3.0, -1.0, 1.0, 3.0, 5.0, 7.0, 10.0, 14.0, 18.0, 22.0];

/// Band center frequencies of the 34-band hybrid, in units of f_qmf / 24.
const F_CENTER_34: [f32; 32] = [
    2.0, 6.0, 10.0, 14.0, 18.0, 22.0, 26.0, 30.0, 34.0, -10.0, -6.0, -2.0, 51.0, 57.0, 15.0,
    21.0, 27.0, 33.0, 39.0, 45.0, 54.0, 66.0, 78.0, 42.0, 102.0, 66.0, 78.0, 90.0, 102.0, 114.0,
    126.0, 90.0,
];

const FRACTIONAL_DELAY_LINKS: [f64; AP_LINKS] = [0.43, 0.75, 0.347];
const FRACTIONAL_DELAY_GAIN: f64 = 0.39;

/// Parameter band b(k) for each subsubband k, 20-band resolution.
pub const K_TO_I_20: [u8; 71] = [
    1, 0, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 14, 15, 15, 15, 16, 16, 16, 16, 17,
    17, 17, 17, 17, 18, 18, 18, 18, 18, 18, 18, 18, 18, 18, 18, 18, 19, 19, 19, 19, 19, 19, 19,
    19, 19, 19, 19, 19, 19, 19, 19, 19, 19, 19, 19, 19, 19, 19, 19, 19, 19, 19, 19, 19, 19,
];

/// Parameter band b(k) for each subsubband k, 34-band resolution.
pub const K_TO_I_34: [u8; 91] = [
    0, 1, 2, 3, 4, 5, 6, 6, 7, 2, 1, 0, 10, 10, 4, 5, 6, 7, 8, 9, 10, 11, 12, 9, 14, 11, 12, 13,
    14, 15, 16, 13, 16, 17, 18, 19, 20, 21, 14, 15, 16, 17, 18, 19, 20, 21, 22, 22, 23, 23, 24,
    24, 25, 25, 26, 26, 27, 27, 27, 28, 28, 28, 29, 29, 29, 30, 30, 30, 31, 31, 31, 31, 32, 32,
    32, 32, 33, 33, 33, 33, 33, 33, 33, 33, 33, 33, 33, 33, 33, 33, 33,
];

pub struct PsTables {
    /// Stereo mixing matrices for mixing mode A, indexed
    /// `[iid + 7 + 23 * iid_quant][icc]` -> `[h11, h12, h21, h22]`.
    pub ha: [[[f32; 4]; 8]; 46],
    /// Stereo mixing matrices for mixing mode B.
    pub hb: [[[f32; 4]; 8]; 46],
    /// Smoothed phase rotation, indexed `pd[t-2]*64 + pd[t-1]*8 + pd[t]`.
    pub pd_re_smooth: [f32; 512],
    pub pd_im_smooth: [f32; 512],
    /// Complex splitting filters derived from the prototypes.
    pub f20_0_8: [[[f32; 2]; 7]; 8],
    pub f34_0_12: [[[f32; 2]; 7]; 12],
    pub f34_1_8: [[[f32; 2]; 7]; 8],
    pub f34_2_4: [[[f32; 2]; 7]; 4],
    /// Per-link fractional delays of the all-pass chain,
    /// indexed `[is34][k][link]` -> (re, im).
    pub q_fract_allpass: [[[[f32; 2]; AP_LINKS]; MAX_AP_BANDS]; 2],
    /// Fractional delay of the direct path, indexed `[is34][k]`.
    pub phi_fract: [[[f32; 2]; MAX_AP_BANDS]; 2],
}

fn make_filters_from_proto<const N: usize>(proto: &[f64; 7]) -> [[[f32; 2]; 7]; N] {
    let mut filter = [[[0.0; 2]; 7]; N];
    for (q, filter) in filter.iter_mut().enumerate() {
        for (n, tap) in filter.iter_mut().enumerate() {
            let theta = 2.0 * PI * (q as f64 + 0.5) * (n as f64 - 6.0) / N as f64;
            tap[0] = (proto[n] * theta.cos()) as f32;
            tap[1] = (proto[n] * -theta.sin()) as f32;
        }
    }
    filter
}

impl PsTables {
    fn generate() -> Self {
        let mut tables = PsTables {
            ha: [[[0.0; 4]; 8]; 46],
            hb: [[[0.0; 4]; 8]; 46],
            pd_re_smooth: [0.0; 512],
            pd_im_smooth: [0.0; 512],
            f20_0_8: make_filters_from_proto(&G0_Q8),
            f34_0_12: make_filters_from_proto(&G0_Q12),
            f34_1_8: make_filters_from_proto(&G1_Q8),
            f34_2_4: make_filters_from_proto(&G2_Q4),
            q_fract_allpass: [[[[0.0; 2]; AP_LINKS]; MAX_AP_BANDS]; 2],
            phi_fract: [[[0.0; 2]; MAX_AP_BANDS]; 2],
        };

        // Mixing matrices over the concatenated coarse and fine IID grids.
        let iid_dequant = IID_COARSE_DB.iter().chain(IID_FINE_DB.iter());

        for (iid, &db) in iid_dequant.enumerate() {
            let c = 10f32.powf(db / 20.0);

            for (icc, &rho) in QUANT_RHO.iter().enumerate() {
                // Mixing mode A.
                let alpha = 0.5 * rho.acos();
                let c1 = SQRT_2 / (1.0 + c * c).sqrt();
                let c2 = c * c1;
                let beta = alpha * (c1 - c2) * FRAC_1_SQRT_2;

                tables.ha[iid][icc] = [
                    c2 * (beta + alpha).cos(),
                    c1 * (beta - alpha).cos(),
                    c2 * (beta + alpha).sin(),
                    c1 * (beta - alpha).sin(),
                ];

                // Mixing mode B.
                let rho = rho.max(0.05);
                let mut alpha = 0.5 * (2.0 * c * rho).atan2(c * c - 1.0);
                let mu = c + 1.0 / c;
                let mu = 1.0 + (4.0 * rho * rho - 4.0) / (mu * mu);
                let gamma = ((1.0 - mu.sqrt()) / (1.0 + mu.sqrt())).sqrt().atan();

                if alpha < 0.0 {
                    alpha += 0.5 * std::f32::consts::PI;
                }

                tables.hb[iid][icc] = [
                    SQRT_2 * alpha.cos() * gamma.cos(),
                    SQRT_2 * alpha.sin() * gamma.cos(),
                    -SQRT_2 * alpha.sin() * gamma.sin(),
                    SQRT_2 * alpha.cos() * gamma.sin(),
                ];
            }
        }

        // Phase smoother: weighted sum of the last three quantized angles,
        // renormalized onto the unit circle.
        for pd0 in 0..8 {
            for pd1 in 0..8 {
                for pd2 in 0..8 {
                    let re = 0.25 * IPDOPD_COS[pd0] + 0.5 * IPDOPD_COS[pd1] + IPDOPD_COS[pd2];
                    let im = 0.25 * IPDOPD_SIN[pd0] + 0.5 * IPDOPD_SIN[pd1] + IPDOPD_SIN[pd2];
                    let mag = 1.0 / (re * re + im * im).sqrt();
                    tables.pd_re_smooth[pd0 * 64 + pd1 * 8 + pd2] = re * mag;
                    tables.pd_im_smooth[pd0 * 64 + pd1 * 8 + pd2] = im * mag;
                }
            }
        }

        // Fractional delays of the decorrelator, per resolution.
        for is34 in 0..2 {
            for k in 0..NR_ALLPASS_BANDS[is34] {
                let f_center = if is34 == 0 {
                    if k < F_CENTER_20.len() {
                        f64::from(F_CENTER_20[k]) * 0.125
                    }
                    else {
                        k as f64 - 6.5
                    }
                }
                else if k < F_CENTER_34.len() {
                    f64::from(F_CENTER_34[k]) / 24.0
                }
                else {
                    k as f64 - 26.5
                };

                let theta = -PI * FRACTIONAL_DELAY_GAIN * f_center;
                tables.phi_fract[is34][k] = [theta.cos() as f32, theta.sin() as f32];

                for (m, &link) in FRACTIONAL_DELAY_LINKS.iter().enumerate() {
                    let theta = -PI * link * f_center;
                    tables.q_fract_allpass[is34][k][m] =
                        [theta.cos() as f32, theta.sin() as f32];
                }
            }
        }

        tables
    }
}

lazy_static! {
    pub static ref PS_TABLES: PsTables = PsTables::generate();
}
