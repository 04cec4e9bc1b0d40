// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-channel-pair synthesis state and the frame driver.

use crate::common::*;
use crate::hybrid;
use crate::hybrid::HybridHistory;
use crate::params::PsData;
use crate::tables::PS_TABLES;

/// Interpolation endpoints of one mixing-matrix coefficient, indexed
/// `[re/im][envelope][parameter band]`. Envelope 0 holds the final matrix of
/// the previous frame.
pub(crate) type MixHistory = [[[f32; MAX_NR_IIDICC]; MAX_NUM_ENV + 1]; 2];

/// Parametric stereo synthesis state.
///
/// Reconstructs a stereo pair of QMF-domain channels from one decoded mono
/// channel and a [`PsData`] parameter set. All filter and smoothing state
/// is carried across frames.
pub struct PsDecoder {
    /// Left channel in the hybrid domain.
    pub(crate) l_hybrid: HybridBuf,
    /// Decorrelated right channel in the hybrid domain.
    pub(crate) r_hybrid: HybridBuf,
    pub(crate) hybrid_history: HybridHistory,
    /// Plain delay lines feeding the decorrelator.
    pub(crate) delay: [[[f32; 2]; QMF_TIME_SLOTS + MAX_DELAY]; MAX_SSB],
    /// Delay lines of the serial all-pass links.
    pub(crate) ap_delay: [[[[f32; 2]; QMF_TIME_SLOTS + MAX_AP_DELAY]; AP_LINKS]; MAX_AP_BANDS],
    pub(crate) peak_decay_nrg: [f32; MAX_NR_IIDICC],
    pub(crate) power_smooth: [f32; MAX_NR_IIDICC],
    pub(crate) peak_decay_diff_smooth: [f32; MAX_NR_IIDICC],
    pub(crate) h11: MixHistory,
    pub(crate) h12: MixHistory,
    pub(crate) h21: MixHistory,
    pub(crate) h22: MixHistory,
    pub(crate) ipd_hist: [i8; MAX_NR_IPDOPD],
    pub(crate) opd_hist: [i8; MAX_NR_IPDOPD],
}

impl PsDecoder {
    pub fn new() -> Self {
        PsDecoder {
            l_hybrid: [[[0.0; 2]; QMF_TIME_SLOTS]; MAX_SSB],
            r_hybrid: [[[0.0; 2]; QMF_TIME_SLOTS]; MAX_SSB],
            hybrid_history: [[[0.0; 2]; QMF_TIME_SLOTS + 12]; 5],
            delay: [[[0.0; 2]; QMF_TIME_SLOTS + MAX_DELAY]; MAX_SSB],
            ap_delay: [[[[0.0; 2]; QMF_TIME_SLOTS + MAX_AP_DELAY]; AP_LINKS]; MAX_AP_BANDS],
            peak_decay_nrg: [0.0; MAX_NR_IIDICC],
            power_smooth: [0.0; MAX_NR_IIDICC],
            peak_decay_diff_smooth: [0.0; MAX_NR_IIDICC],
            h11: [[[0.0; MAX_NR_IIDICC]; MAX_NUM_ENV + 1]; 2],
            h12: [[[0.0; MAX_NR_IIDICC]; MAX_NUM_ENV + 1]; 2],
            h21: [[[0.0; MAX_NR_IIDICC]; MAX_NUM_ENV + 1]; 2],
            h22: [[[0.0; MAX_NR_IIDICC]; MAX_NUM_ENV + 1]; 2],
            ipd_hist: [0; MAX_NR_IPDOPD],
            opd_hist: [0; MAX_NR_IPDOPD],
        }
    }

    /// Clear all carried state, e.g. after a seek.
    pub fn reset(&mut self) {
        *self = PsDecoder::new();
    }

    /// Synthesize one frame of stereo output.
    ///
    /// On entry `left` holds the decoded mono channel; `right` is
    /// overwritten. `top` is the number of populated QMF subbands; delay
    /// lines above it are flushed so stale signal does not leak into a
    /// later frame with more subbands.
    pub fn apply(&mut self, ps: &PsData, left: &mut QmfBuf, right: &mut QmfBuf, top: usize) {
        let is34 = usize::from(ps.is34bands);
        let nr_bands = NR_BANDS[is34];
        let top = (top + nr_bands - 64).min(nr_bands);

        for band in self.delay[top..nr_bands].iter_mut() {
            *band = [[0.0; 2]; QMF_TIME_SLOTS + MAX_DELAY];
        }
        if top < NR_ALLPASS_BANDS[is34] {
            for band in self.ap_delay[top..NR_ALLPASS_BANDS[is34]].iter_mut() {
                *band = [[[0.0; 2]; QMF_TIME_SLOTS + MAX_AP_DELAY]; AP_LINKS];
            }
        }

        hybrid::analysis(
            &mut self.l_hybrid,
            &mut self.hybrid_history,
            left,
            ps.is34bands,
            &PS_TABLES,
        );
        self.decorrelation(ps);
        self.stereo_processing(ps);
        hybrid::synthesis(left, &self.l_hybrid, ps.is34bands);
        hybrid::synthesis(right, &self.r_hybrid, ps.is34bands);
    }
}

impl Default for PsDecoder {
    fn default() -> Self {
        PsDecoder::new()
    }
}
