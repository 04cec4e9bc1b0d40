// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scalar DSP kernels shared by the hybrid filterbank, the decorrelator and
//! the stereo mixer.

use crate::common::{AP_LINKS, MAX_AP_DELAY, QMF_TIME_SLOTS};

/// Serial all-pass link gains before the decay slope is applied.
const AP_LINK_GAIN: [f32; AP_LINKS] = [0.65143905753106, 0.56471812200776, 0.48954165955695];

/// Accumulate the power of `src` into `dst`.
pub fn add_squares(dst: &mut [f32], src: &[[f32; 2]]) {
    for (dst, s) in dst.iter_mut().zip(src) {
        *dst += s[0] * s[0] + s[1] * s[1];
    }
}

/// Complex-by-real multiply, `dst[n] = src0[n] * src1[n]`.
pub fn mul_pair_single(dst: &mut [[f32; 2]], src0: &[[f32; 2]], src1: &[f32]) {
    for ((d, s0), &s1) in dst.iter_mut().zip(src0).zip(src1) {
        d[0] = s0[0] * s1;
        d[1] = s0[1] * s1;
    }
}

/// Evaluate each 13-tap splitting filter over one input window.
///
/// The filters store only their first 7 complex taps; the remaining 6 follow
/// from conjugate symmetry of the prototype, which folds the window around
/// its center tap.
pub fn hybrid_analysis(out: &mut [[f32; 2]], input: &[[f32; 2]], filters: &[[[f32; 2]; 7]]) {
    for (out, filter) in out.iter_mut().zip(filters) {
        let mut sum_re = filter[6][0] * input[6][0];
        let mut sum_im = filter[6][0] * input[6][1];

        for j in 0..6 {
            let in0 = input[j];
            let in1 = input[12 - j];
            sum_re += filter[j][0] * (in0[0] + in1[0]) - filter[j][1] * (in0[1] - in1[1]);
            sum_im += filter[j][0] * (in0[1] + in1[1]) + filter[j][1] * (in0[0] - in1[0]);
        }

        *out = [sum_re, sum_im];
    }
}

/// Run one subsubband through the fractional-delay and serial all-pass chain.
///
/// `delay` must be positioned such that `delay[n]` is the sample delayed by
/// two slots. Each link m reads its delay line at `n + 2 - m` (delays of 3,
/// 4 and 5 slots) and appends its output at `n + 5`.
#[allow(clippy::too_many_arguments)]
pub fn decorrelate(
    out: &mut [[f32; 2]],
    delay: &[[f32; 2]],
    ap_delay: &mut [[[f32; 2]; QMF_TIME_SLOTS + MAX_AP_DELAY]; AP_LINKS],
    phi_fract: [f32; 2],
    q_fract: &[[f32; 2]; AP_LINKS],
    transient_gain: &[f32],
    g_decay_slope: f32,
) {
    let mut ag = [0f32; AP_LINKS];
    for (ag, &a) in ag.iter_mut().zip(AP_LINK_GAIN.iter()) {
        *ag = a * g_decay_slope;
    }

    for (n, out) in out.iter_mut().enumerate() {
        let mut in_re = delay[n][0] * phi_fract[0] - delay[n][1] * phi_fract[1];
        let mut in_im = delay[n][0] * phi_fract[1] + delay[n][1] * phi_fract[0];

        for m in 0..AP_LINKS {
            let a_re = ag[m] * in_re;
            let a_im = ag[m] * in_im;
            let link_delay = ap_delay[m][n + 2 - m];
            let fract = q_fract[m];
            let apd_re = in_re;
            let apd_im = in_im;

            in_re = link_delay[0] * fract[0] - link_delay[1] * fract[1] - a_re;
            in_im = link_delay[0] * fract[1] + link_delay[1] * fract[0] - a_im;

            ap_delay[m][n + 5][0] = apd_re + ag[m] * in_re;
            ap_delay[m][n + 5][1] = apd_im + ag[m] * in_im;
        }

        out[0] = transient_gain[n] * in_re;
        out[1] = transient_gain[n] * in_im;
    }
}

/// Mix one subsubband with a real mixing matrix interpolated per sample.
pub fn stereo_interpolate(
    l: &mut [[f32; 2]],
    r: &mut [[f32; 2]],
    h: &[[f32; 4]; 2],
    h_step: &[[f32; 4]; 2],
) {
    let [mut h0, mut h1, mut h2, mut h3] = h[0];
    let [hs0, hs1, hs2, hs3] = h_step[0];

    for (l, r) in l.iter_mut().zip(r.iter_mut()) {
        let [l_re, l_im] = *l;
        let [r_re, r_im] = *r;

        // The matrix steps before the first output sample.
        h0 += hs0;
        h1 += hs1;
        h2 += hs2;
        h3 += hs3;

        l[0] = h0 * l_re + h2 * r_re;
        l[1] = h0 * l_im + h2 * r_im;
        r[0] = h1 * l_re + h3 * r_re;
        r[1] = h1 * l_im + h3 * r_im;
    }
}

/// Mix one subsubband with a complex mixing matrix interpolated per sample.
pub fn stereo_interpolate_ipdopd(
    l: &mut [[f32; 2]],
    r: &mut [[f32; 2]],
    h: &[[f32; 4]; 2],
    h_step: &[[f32; 4]; 2],
) {
    let [mut h00, mut h01, mut h02, mut h03] = h[0];
    let [mut h10, mut h11, mut h12, mut h13] = h[1];
    let [hs00, hs01, hs02, hs03] = h_step[0];
    let [hs10, hs11, hs12, hs13] = h_step[1];

    for (l, r) in l.iter_mut().zip(r.iter_mut()) {
        let [l_re, l_im] = *l;
        let [r_re, r_im] = *r;

        h00 += hs00;
        h01 += hs01;
        h02 += hs02;
        h03 += hs03;
        h10 += hs10;
        h11 += hs11;
        h12 += hs12;
        h13 += hs13;

        l[0] = h00 * l_re + h02 * r_re - h10 * l_im - h12 * r_im;
        l[1] = h00 * l_im + h02 * r_im + h10 * l_re + h12 * r_re;
        r[0] = h01 * l_re + h03 * r_re - h11 * l_im - h13 * r_im;
        r[1] = h01 * l_im + h03 * r_im + h11 * l_re + h13 * r_re;
    }
}
