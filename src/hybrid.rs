// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hybrid filterbank.
//!
//! The analysis stage splits the lowest QMF subbands into subsubbands for a
//! finer frequency resolution, 10 in 20-band mode and 32 in 34-band mode,
//! and passes the remaining subbands through unchanged. The synthesis stage
//! sums the subsubbands back into their source subbands.

use crate::common::{HybridBuf, QmfBuf, QMF_TIME_SLOTS};
use crate::dsp;
use crate::tables::{PsTables, G1_Q2};

/// Per-channel analysis history, the last 6 slots of the 5 filtered QMF
/// subbands, indexed `[qmf band][time slot][re/im]`.
pub type HybridHistory = [[[f32; 2]; QMF_TIME_SLOTS + 12]; 5];

/// Split one QMF subband into two subsubbands with the real filter pair
/// derived from `G1_Q2`. The pair shares one evaluation since the second
/// filter is the first with alternating signs.
fn hybrid2_re(
    out: &mut [[[f32; 2]; QMF_TIME_SLOTS]],
    input: &[[f32; 2]],
    filter: &[f32; 7],
    reverse: usize,
) {
    for n in 0..QMF_TIME_SLOTS {
        let win = &input[n..n + 13];

        let re_in = filter[6] * win[6][0];
        let im_in = filter[6] * win[6][1];
        let mut re_op = 0.0;
        let mut im_op = 0.0;

        for j in (0..6).step_by(2) {
            re_op += filter[j + 1] * (win[j + 1][0] + win[12 - j - 1][0]);
            im_op += filter[j + 1] * (win[j + 1][1] + win[12 - j - 1][1]);
        }

        out[reverse][n] = [re_in + re_op, im_in + im_op];
        out[1 - reverse][n] = [re_in - re_op, im_in - im_op];
    }
}

/// Split QMF subband 0 into 6 subsubbands with the 8-filter complex bank,
/// merging the two pairs that straddle the band edges.
fn hybrid6_cx(
    out: &mut [[[f32; 2]; QMF_TIME_SLOTS]],
    input: &[[f32; 2]],
    filters: &[[[f32; 2]; 7]; 8],
) {
    let mut temp = [[0.0f32; 2]; 8];

    for n in 0..QMF_TIME_SLOTS {
        dsp::hybrid_analysis(&mut temp, &input[n..n + 13], filters);

        out[0][n] = temp[6];
        out[1][n] = temp[7];
        out[2][n] = temp[0];
        out[3][n] = temp[1];
        out[4][n] = [temp[2][0] + temp[5][0], temp[2][1] + temp[5][1]];
        out[5][n] = [temp[3][0] + temp[4][0], temp[3][1] + temp[4][1]];
    }
}

/// Split one QMF subband into `filters.len()` subsubbands.
fn hybrid4_8_12_cx(
    out: &mut [[[f32; 2]; QMF_TIME_SLOTS]],
    input: &[[f32; 2]],
    filters: &[[[f32; 2]; 7]],
) {
    let mut temp = [[0.0f32; 2]; 12];
    let n_filters = filters.len();

    for n in 0..QMF_TIME_SLOTS {
        dsp::hybrid_analysis(&mut temp[..n_filters], &input[n..n + 13], filters);

        for (out, t) in out.iter_mut().zip(&temp[..n_filters]) {
            out[n] = *t;
        }
    }
}

/// Pass the unfiltered QMF subbands `first..64` through to the hybrid
/// buffer. `out` must already be offset so that subband `first` lands after
/// the filtered subsubbands.
fn ileave(out: &mut [[[f32; 2]; QMF_TIME_SLOTS]], qmf: &QmfBuf, first: usize) {
    for i in first..64 {
        for n in 0..QMF_TIME_SLOTS {
            out[i][n] = [qmf[0][n][i], qmf[1][n][i]];
        }
    }
}

/// Analyze one channel of QMF samples into the hybrid domain.
///
/// The analysis filters are 13 taps long, so `history` carries the trailing
/// slots of the previous frame and each filtered output is delayed by 6
/// slots relative to the pass-through subbands.
pub fn analysis(
    out: &mut HybridBuf,
    history: &mut HybridHistory,
    qmf: &QmfBuf,
    is34: bool,
    tables: &PsTables,
) {
    for (i, row) in history.iter_mut().enumerate() {
        for j in 0..38 {
            row[j + 6] = [qmf[0][j][i], qmf[1][j][i]];
        }
    }

    if is34 {
        hybrid4_8_12_cx(&mut out[0..12], &history[0], &tables.f34_0_12);
        hybrid4_8_12_cx(&mut out[12..20], &history[1], &tables.f34_1_8);
        hybrid4_8_12_cx(&mut out[20..24], &history[2], &tables.f34_2_4);
        hybrid4_8_12_cx(&mut out[24..28], &history[3], &tables.f34_2_4);
        hybrid4_8_12_cx(&mut out[28..32], &history[4], &tables.f34_2_4);
        ileave(&mut out[27..], qmf, 5);
    }
    else {
        hybrid6_cx(&mut out[0..6], &history[0], &tables.f20_0_8);
        hybrid2_re(&mut out[6..8], &history[1], &G1_Q2, 1);
        hybrid2_re(&mut out[8..10], &history[2], &G1_Q2, 0);
        ileave(&mut out[7..], qmf, 3);
    }

    for row in history.iter_mut() {
        for j in 0..6 {
            row[j] = row[j + QMF_TIME_SLOTS];
        }
    }
}

/// Pass the unfiltered subsubbands back out as QMF subbands `first..64`.
fn deint(out: &mut QmfBuf, input: &[[[f32; 2]; QMF_TIME_SLOTS]], first: usize) {
    for i in first..64 {
        for n in 0..QMF_TIME_SLOTS {
            out[0][n][i] = input[i][n][0];
            out[1][n][i] = input[i][n][1];
        }
    }
}

/// Merge one channel of hybrid samples back into the QMF domain.
pub fn synthesis(out: &mut QmfBuf, input: &HybridBuf, is34: bool) {
    if is34 {
        for n in 0..QMF_TIME_SLOTS {
            for b in 0..5 {
                out[0][n][b] = 0.0;
                out[1][n][b] = 0.0;
            }
            for i in 0..12 {
                out[0][n][0] += input[i][n][0];
                out[1][n][0] += input[i][n][1];
            }
            for i in 12..20 {
                out[0][n][1] += input[i][n][0];
                out[1][n][1] += input[i][n][1];
            }
            for i in 0..4 {
                out[0][n][2] += input[20 + i][n][0];
                out[1][n][2] += input[20 + i][n][1];
                out[0][n][3] += input[24 + i][n][0];
                out[1][n][3] += input[24 + i][n][1];
                out[0][n][4] += input[28 + i][n][0];
                out[1][n][4] += input[28 + i][n][1];
            }
        }
        deint(out, &input[27..], 5);
    }
    else {
        for n in 0..QMF_TIME_SLOTS {
            out[0][n][0] = input[0][n][0] + input[1][n][0] + input[2][n][0]
                + input[3][n][0] + input[4][n][0] + input[5][n][0];
            out[1][n][0] = input[0][n][1] + input[1][n][1] + input[2][n][1]
                + input[3][n][1] + input[4][n][1] + input[5][n][1];
            out[0][n][1] = input[6][n][0] + input[7][n][0];
            out[1][n][1] = input[6][n][1] + input[7][n][1];
            out[0][n][2] = input[8][n][0] + input[9][n][0];
            out[1][n][2] = input[8][n][1] + input[9][n][1];
        }
        deint(out, &input[7..], 3);
    }
}
