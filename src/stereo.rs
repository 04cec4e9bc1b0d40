// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stereo reconstruction.
//!
//! Dequantizes the IID/ICC parameters into 2x2 mixing matrices, optionally
//! rotates them by the smoothed IPD/OPD phases, and applies them to the left
//! and decorrelated right channel with linear interpolation over each
//! envelope.

use crate::common::*;
use crate::decoder::PsDecoder;
use crate::dsp;
use crate::params::PsData;
use crate::remap;
use crate::tables::{K_TO_I_20, K_TO_I_34, PS_TABLES};

impl PsDecoder {
    pub(crate) fn stereo_processing(&mut self, ps: &PsData) {
        let is34 = usize::from(ps.is34bands);
        let k_to_i: &[u8] = if ps.is34bands { &K_TO_I_34 } else { &K_TO_I_20 };
        let tables = &*PS_TABLES;

        // Mixing procedure B requires the finest ICC resolution.
        let h_lut = if ps.baseline || ps.icc_mode < 3 { &tables.ha } else { &tables.hb };

        // The final matrix of the previous frame seeds the interpolation.
        if ps.num_env_old > 0 {
            let e = ps.num_env_old;
            for j in 0..2 {
                self.h11[j][0] = self.h11[j][e];
                self.h12[j][0] = self.h12[j][e];
                self.h21[j][0] = self.h21[j][e];
                self.h22[j][0] = self.h22[j][e];
            }
        }

        let mut iid_buf = [[0i8; MAX_NR_IIDICC]; MAX_NUM_ENV];
        let mut icc_buf = [[0i8; MAX_NR_IIDICC]; MAX_NUM_ENV];
        let mut ipd_buf = [[0i8; MAX_NR_IIDICC]; MAX_NUM_ENV];
        let mut opd_buf = [[0i8; MAX_NR_IIDICC]; MAX_NUM_ENV];

        let iid_mapped;
        let icc_mapped;
        let mut ipd_mapped = &ps.ipd_par;
        let mut opd_mapped = &ps.opd_par;

        if ps.is34bands {
            iid_mapped = remap::remap34(&ps.iid_par, &mut iid_buf, ps.nr_iid_par, ps.num_env, true);
            icc_mapped = remap::remap34(&ps.icc_par, &mut icc_buf, ps.nr_icc_par, ps.num_env, true);
            if ps.enable_ipdopd {
                ipd_mapped =
                    remap::remap34(&ps.ipd_par, &mut ipd_buf, ps.nr_ipdopd_par, ps.num_env, false);
                opd_mapped =
                    remap::remap34(&ps.opd_par, &mut opd_buf, ps.nr_ipdopd_par, ps.num_env, false);
            }
            if !ps.is34bands_old {
                for j in 0..2 {
                    remap::map_val_20_to_34(&mut self.h11[j][0]);
                    remap::map_val_20_to_34(&mut self.h12[j][0]);
                    remap::map_val_20_to_34(&mut self.h21[j][0]);
                    remap::map_val_20_to_34(&mut self.h22[j][0]);
                }
                self.ipd_hist = [0; MAX_NR_IPDOPD];
                self.opd_hist = [0; MAX_NR_IPDOPD];
            }
        }
        else {
            iid_mapped = remap::remap20(&ps.iid_par, &mut iid_buf, ps.nr_iid_par, ps.num_env, true);
            icc_mapped = remap::remap20(&ps.icc_par, &mut icc_buf, ps.nr_icc_par, ps.num_env, true);
            if ps.enable_ipdopd {
                ipd_mapped =
                    remap::remap20(&ps.ipd_par, &mut ipd_buf, ps.nr_ipdopd_par, ps.num_env, false);
                opd_mapped =
                    remap::remap20(&ps.opd_par, &mut opd_buf, ps.nr_ipdopd_par, ps.num_env, false);
            }
            if ps.is34bands_old {
                for j in 0..2 {
                    remap::map_val_34_to_20(&mut self.h11[j][0]);
                    remap::map_val_34_to_20(&mut self.h12[j][0]);
                    remap::map_val_34_to_20(&mut self.h21[j][0]);
                    remap::map_val_34_to_20(&mut self.h22[j][0]);
                }
                self.ipd_hist = [0; MAX_NR_IPDOPD];
                self.opd_hist = [0; MAX_NR_IPDOPD];
            }
        }

        for e in 0..ps.num_env {
            for b in 0..NR_PAR_BANDS[is34] {
                let iid_idx =
                    (i32::from(iid_mapped[e][b]) + 7 + 23 * i32::from(ps.iid_quant)) as usize;
                let icc_idx = icc_mapped[e][b] as usize;

                let mut h11 = h_lut[iid_idx][icc_idx][0];
                let mut h12 = h_lut[iid_idx][icc_idx][1];
                let mut h21 = h_lut[iid_idx][icc_idx][2];
                let mut h22 = h_lut[iid_idx][icc_idx][3];

                if ps.enable_ipdopd && b < NR_IPDOPD_BANDS[is34] {
                    // Smooth each phase over the last three values, then
                    // rotate the matrix: the left column by OPD, the right
                    // by the OPD/IPD difference.
                    let opd_idx = (self.opd_hist[b] as usize) * 8 + opd_mapped[e][b] as usize;
                    let ipd_idx = (self.ipd_hist[b] as usize) * 8 + ipd_mapped[e][b] as usize;
                    let opd_re = tables.pd_re_smooth[opd_idx];
                    let opd_im = tables.pd_im_smooth[opd_idx];
                    let ipd_re = tables.pd_re_smooth[ipd_idx];
                    let ipd_im = tables.pd_im_smooth[ipd_idx];
                    self.opd_hist[b] = (opd_idx & 0x3f) as i8;
                    self.ipd_hist[b] = (ipd_idx & 0x3f) as i8;

                    let ipd_adj_re = opd_re * ipd_re + opd_im * ipd_im;
                    let ipd_adj_im = opd_im * ipd_re - opd_re * ipd_im;

                    self.h11[1][e + 1][b] = h11 * opd_im;
                    self.h12[1][e + 1][b] = h12 * ipd_adj_im;
                    self.h21[1][e + 1][b] = h21 * opd_im;
                    self.h22[1][e + 1][b] = h22 * ipd_adj_im;
                    h11 *= opd_re;
                    h12 *= ipd_adj_re;
                    h21 *= opd_re;
                    h22 *= ipd_adj_re;
                }

                self.h11[0][e + 1][b] = h11;
                self.h12[0][e + 1][b] = h12;
                self.h21[0][e + 1][b] = h21;
                self.h22[0][e + 1][b] = h22;
            }

            let start = i32::from(ps.border_position[e]);
            let stop = i32::from(ps.border_position[e + 1]);
            let width = 1.0 / (stop - start).max(1) as f32;

            for k in 0..NR_BANDS[is34] {
                let b = k_to_i[k] as usize;

                let mut h = [[0.0f32; 4]; 2];
                let mut h_step = [[0.0f32; 4]; 2];

                h[0] = [
                    self.h11[0][e][b],
                    self.h12[0][e][b],
                    self.h21[0][e][b],
                    self.h22[0][e][b],
                ];

                if ps.enable_ipdopd {
                    // The complex conjugate subsubbands run with mirrored
                    // phase.
                    let mirrored = if ps.is34bands { (9..=13).contains(&k) } else { k <= 1 };
                    let sign = if mirrored { -1.0 } else { 1.0 };
                    h[1] = [
                        sign * self.h11[1][e][b],
                        sign * self.h12[1][e][b],
                        sign * self.h21[1][e][b],
                        sign * self.h22[1][e][b],
                    ];
                }

                h_step[0] = [
                    (self.h11[0][e + 1][b] - h[0][0]) * width,
                    (self.h12[0][e + 1][b] - h[0][1]) * width,
                    (self.h21[0][e + 1][b] - h[0][2]) * width,
                    (self.h22[0][e + 1][b] - h[0][3]) * width,
                ];
                if ps.enable_ipdopd {
                    h_step[1] = [
                        (self.h11[1][e + 1][b] - h[1][0]) * width,
                        (self.h12[1][e + 1][b] - h[1][1]) * width,
                        (self.h21[1][e + 1][b] - h[1][2]) * width,
                        (self.h22[1][e + 1][b] - h[1][3]) * width,
                    ];
                }

                if stop > start {
                    let off = (start + 1) as usize;
                    let len = (stop - start) as usize;
                    let l = &mut self.l_hybrid[k][off..off + len];
                    let r = &mut self.r_hybrid[k][off..off + len];

                    if ps.enable_ipdopd {
                        dsp::stereo_interpolate_ipdopd(l, r, &h, &h_step);
                    }
                    else {
                        dsp::stereo_interpolate(l, r, &h, &h_step);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_ps() -> PsData {
        let mut ps = PsData::new(false);
        ps.num_env = 1;
        ps.nr_iid_par = 20;
        ps.nr_icc_par = 20;
        ps.border_position[0] = -1;
        ps.border_position[1] = 31;
        ps
    }

    fn fill_hybrid(dec: &mut PsDecoder) {
        for k in 0..NR_BANDS[0] {
            for n in 0..QMF_TIME_SLOTS {
                dec.l_hybrid[k][n] = [(1 + k + n) as f32, -((1 + n) as f32)];
                dec.r_hybrid[k][n] = [0.25, 0.25];
            }
        }
    }

    #[test]
    fn verify_neutral_parameters_duplicate_left() {
        // IID 0 and ICC 0 yield the identity-like matrix [1 1; 0 0]: both
        // outputs equal the left input. The first frame interpolates up
        // from the zero matrix; from the second frame on the mix is exact.
        let mut dec = Box::new(PsDecoder::new());
        let mut ps = default_ps();

        dec.stereo_processing(&ps);
        ps.num_env_old = 1;

        fill_hybrid(&mut dec);
        let left = dec.l_hybrid;
        dec.stereo_processing(&ps);

        for k in 0..NR_BANDS[0] {
            for n in 0..QMF_TIME_SLOTS {
                assert!((dec.l_hybrid[k][n][0] - left[k][n][0]).abs() < 1e-5);
                assert!((dec.r_hybrid[k][n][0] - left[k][n][0]).abs() < 1e-5);
                assert!((dec.r_hybrid[k][n][1] - left[k][n][1]).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn verify_max_iid_pans_hard_left() {
        let mut dec = Box::new(PsDecoder::new());
        let mut ps = default_ps();
        ps.enable_iid = true;
        for b in 0..20 {
            ps.iid_par[0][b] = 7;
        }

        dec.stereo_processing(&ps);
        ps.num_env_old = 1;
        fill_hybrid(&mut dec);
        dec.stereo_processing(&ps);

        // 25 dB of level difference leaves the right channel well below
        // the left.
        for k in 0..NR_BANDS[0] {
            for n in 0..QMF_TIME_SLOTS {
                assert!(dec.r_hybrid[k][n][0].abs() < 0.2 * dec.l_hybrid[k][n][0].abs());
            }
        }
    }

    #[test]
    fn verify_phase_history_tracks_parameters() {
        let mut dec = Box::new(PsDecoder::new());
        let mut ps = default_ps();
        ps.enable_ipdopd = true;
        ps.nr_ipdopd_par = 11;
        for b in 0..11 {
            ps.ipd_par[0][b] = 3;
            ps.opd_par[0][b] = 5;
        }

        fill_hybrid(&mut dec);
        dec.stereo_processing(&ps);

        // With empty history the smoothing index is just the new value.
        for b in 0..11 {
            assert_eq!(dec.ipd_hist[b], 3);
            assert_eq!(dec.opd_hist[b], 5);
        }

        // The next frame folds the previous two values into the index.
        dec.stereo_processing(&ps);
        for b in 0..11 {
            assert_eq!(dec.ipd_hist[b], (3 * 8 + 3) & 0x3f);
        }
    }

    #[test]
    fn verify_resolution_switch_remaps_matrix_history() {
        let mut dec = Box::new(PsDecoder::new());
        let mut ps = default_ps();
        dec.stereo_processing(&ps);

        // Switch to 34 bands; the carried 20-band matrices must be spread
        // over the wider grid instead of read out of place.
        ps.num_env_old = 1;
        ps.is34bands = true;
        ps.is34bands_old = false;
        ps.nr_iid_par = 34;
        ps.nr_icc_par = 34;
        dec.ipd_hist[0] = 9;

        dec.stereo_processing(&ps);

        assert_eq!(dec.ipd_hist[0], 0);
        // H11 for the highest 34-band group derives from the highest
        // 20-band value, which was 1.0 after the neutral first frame.
        assert!((dec.h11[0][0][33] - 1.0).abs() < 1e-6);
    }
}
