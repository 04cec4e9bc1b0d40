// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decorrelation.
//!
//! Derives the raw right channel from the left by running the lower
//! subsubbands through a fractional-delay all-pass chain and the upper ones
//! through plain delays, then attenuates both around transients so the
//! artificial reverberation does not smear attacks.

use crate::common::*;
use crate::decoder::PsDecoder;
use crate::dsp;
use crate::params::PsData;
use crate::tables::{K_TO_I_20, K_TO_I_34, PS_TABLES};

const PEAK_DECAY_FACTOR: f32 = 0.76592833836465;
const TRANSIENT_IMPACT: f32 = 1.5;
const A_SMOOTH: f32 = 0.25;
const DECAY_SLOPE: f32 = 0.05;

fn shift_delay(
    delay: &mut [[f32; 2]; QMF_TIME_SLOTS + MAX_DELAY],
    input: &[[f32; 2]; QMF_TIME_SLOTS],
) {
    for j in 0..MAX_DELAY {
        delay[j] = delay[j + QMF_TIME_SLOTS];
    }
    delay[MAX_DELAY..].copy_from_slice(input);
}

impl PsDecoder {
    /// Fill `r_hybrid` with the decorrelated counterpart of `l_hybrid`.
    pub(crate) fn decorrelation(&mut self, ps: &PsData) {
        let is34 = usize::from(ps.is34bands);
        let k_to_i: &[u8] = if ps.is34bands { &K_TO_I_34 } else { &K_TO_I_20 };
        let tables = &*PS_TABLES;

        // The parameter-band grid changed, all carried state is invalid.
        if ps.is34bands != ps.is34bands_old {
            self.peak_decay_nrg = [0.0; MAX_NR_IIDICC];
            self.power_smooth = [0.0; MAX_NR_IIDICC];
            self.peak_decay_diff_smooth = [0.0; MAX_NR_IIDICC];
            self.delay = [[[0.0; 2]; QMF_TIME_SLOTS + MAX_DELAY]; MAX_SSB];
            self.ap_delay =
                [[[[0.0; 2]; QMF_TIME_SLOTS + MAX_AP_DELAY]; AP_LINKS]; MAX_AP_BANDS];
        }

        let mut power = [[0.0f32; QMF_TIME_SLOTS]; MAX_NR_IIDICC];
        for k in 0..NR_BANDS[is34] {
            dsp::add_squares(&mut power[k_to_i[k] as usize], &self.l_hybrid[k]);
        }

        // Transient detection. The smoothed difference between the decaying
        // peak and the instantaneous power rises at an attack; the gain
        // ducks the decorrelated signal in proportion.
        let mut transient_gain = [[0.0f32; QMF_TIME_SLOTS]; MAX_NR_IIDICC];
        for i in 0..NR_PAR_BANDS[is34] {
            for n in 0..QMF_TIME_SLOTS {
                let decayed_peak = PEAK_DECAY_FACTOR * self.peak_decay_nrg[i];
                self.peak_decay_nrg[i] = decayed_peak.max(power[i][n]);
                self.power_smooth[i] += A_SMOOTH * (power[i][n] - self.power_smooth[i]);
                self.peak_decay_diff_smooth[i] += A_SMOOTH
                    * (self.peak_decay_nrg[i] - power[i][n] - self.peak_decay_diff_smooth[i]);

                let denom = TRANSIENT_IMPACT * self.peak_decay_diff_smooth[i];
                transient_gain[i][n] = if denom > self.power_smooth[i] {
                    self.power_smooth[i] / denom
                }
                else {
                    1.0
                };
            }
        }

        for k in 0..NR_ALLPASS_BANDS[is34] {
            let i = k_to_i[k] as usize;
            let g_decay_slope =
                (1.0 - DECAY_SLOPE * (k as f32 - DECAY_CUTOFF[is34] as f32)).max(0.0).min(1.0);

            shift_delay(&mut self.delay[k], &self.l_hybrid[k]);
            for line in self.ap_delay[k].iter_mut() {
                for j in 0..MAX_AP_DELAY {
                    line[j] = line[j + QMF_TIME_SLOTS];
                }
            }

            dsp::decorrelate(
                &mut self.r_hybrid[k],
                &self.delay[k][MAX_DELAY - 2..],
                &mut self.ap_delay[k],
                tables.phi_fract[is34][k],
                &tables.q_fract_allpass[is34][k],
                &transient_gain[i],
                g_decay_slope,
            );
        }

        // Above the all-pass range a plain delay decorrelates well enough:
        // 14 slots up to the short-delay band, one slot beyond it.
        for k in NR_ALLPASS_BANDS[is34]..SHORT_DELAY_BAND[is34] {
            let i = k_to_i[k] as usize;
            shift_delay(&mut self.delay[k], &self.l_hybrid[k]);
            dsp::mul_pair_single(
                &mut self.r_hybrid[k],
                &self.delay[k][MAX_DELAY - 14..],
                &transient_gain[i],
            );
        }

        for k in SHORT_DELAY_BAND[is34]..NR_BANDS[is34] {
            let i = k_to_i[k] as usize;
            shift_delay(&mut self.delay[k], &self.l_hybrid[k]);
            dsp::mul_pair_single(
                &mut self.r_hybrid[k],
                &self.delay[k][MAX_DELAY - 1..],
                &transient_gain[i],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_ps() -> PsData {
        let mut ps = PsData::new(false);
        ps.num_env = 1;
        ps.border_position[0] = -1;
        ps.border_position[1] = 31;
        ps
    }

    #[test]
    fn verify_delay_lines_track_input() {
        let mut dec = Box::new(PsDecoder::new());
        let ps = default_ps();

        for k in 0..NR_BANDS[0] {
            for n in 0..QMF_TIME_SLOTS {
                dec.l_hybrid[k][n] = [(k * 32 + n) as f32, 0.5];
            }
        }
        dec.decorrelation(&ps);

        // The newest frame always lands at the tail of every delay line.
        for k in 0..NR_BANDS[0] {
            assert_eq!(dec.delay[k][MAX_DELAY..], dec.l_hybrid[k]);
        }
    }

    #[test]
    fn verify_short_delay_passes_steady_signal() {
        let mut dec = Box::new(PsDecoder::new());
        let ps = default_ps();

        // A long steady signal has no transients, so the short-delay bands
        // reduce to a pure delay with unit gain.
        let k = SHORT_DELAY_BAND[0];
        for _ in 0..8 {
            for n in 0..QMF_TIME_SLOTS {
                dec.l_hybrid[k][n] = [1.0, -2.0];
            }
            dec.decorrelation(&ps);
        }

        for n in 0..QMF_TIME_SLOTS {
            assert!((dec.r_hybrid[k][n][0] - 1.0).abs() < 1e-6);
            assert!((dec.r_hybrid[k][n][1] + 2.0).abs() < 1e-6);
        }
    }

    #[test]
    fn verify_zero_input_gain_saturates() {
        // With zero input and zero smoothing state the duck denominator is
        // zero, so the gain saturates at exactly 1.0 and the delay bands
        // reduce to the pure delayed signal.
        let mut dec = Box::new(PsDecoder::new());
        let ps = default_ps();

        // Prime the delay-line tails; the frame input itself stays silent.
        let k14 = NR_ALLPASS_BANDS[0];
        let k1 = SHORT_DELAY_BAND[0];
        for n in 0..MAX_DELAY {
            dec.delay[k14][QMF_TIME_SLOTS + n] = [(n + 1) as f32, -1.0];
        }
        dec.delay[k1][QMF_TIME_SLOTS + MAX_DELAY - 1] = [2.0, -1.0];

        dec.decorrelation(&ps);

        // 14-slot delay band: the primed tail comes out unscaled.
        for n in 0..MAX_DELAY {
            assert_eq!(dec.r_hybrid[k14][n], [(n + 1) as f32, -1.0]);
        }
        for n in MAX_DELAY..QMF_TIME_SLOTS {
            assert_eq!(dec.r_hybrid[k14][n], [0.0, 0.0]);
        }

        // 1-slot delay band: only the newest primed sample survives.
        assert_eq!(dec.r_hybrid[k1][0], [2.0, -1.0]);
        for n in 1..QMF_TIME_SLOTS {
            assert_eq!(dec.r_hybrid[k1][n], [0.0, 0.0]);
        }
    }

    #[test]
    fn verify_resolution_change_clears_state() {
        let mut dec = Box::new(PsDecoder::new());
        dec.peak_decay_nrg[3] = 5.0;
        dec.delay[0][0] = [1.0, 1.0];
        dec.ap_delay[0][0][0] = [1.0, 1.0];

        let mut ps = default_ps();
        ps.is34bands = true;
        ps.is34bands_old = false;
        dec.decorrelation(&ps);

        assert_eq!(dec.delay[0][0], [0.0, 0.0]);
        assert_eq!(dec.ap_delay[0][0][0], [0.0, 0.0]);
        // Smoothing state restarts from the new frame's power.
        assert!(dec.peak_decay_nrg[3] != 5.0);
    }

    #[test]
    fn verify_transient_ducks_decorrelated_output() {
        let mut dec = Box::new(PsDecoder::new());
        let ps = default_ps();
        let k = SHORT_DELAY_BAND[0];

        // Quiet history then an impulse. The peak tracker holds the impulse
        // energy while the instantaneous power drops, so the slots after the
        // attack are attenuated.
        for _ in 0..4 {
            for n in 0..QMF_TIME_SLOTS {
                dec.l_hybrid[k][n] = [0.001, 0.0];
            }
            dec.decorrelation(&ps);
        }
        dec.l_hybrid[k] = [[0.0; 2]; QMF_TIME_SLOTS];
        dec.l_hybrid[k][0] = [100.0, 0.0];
        dec.decorrelation(&ps);

        // The one-slot delayed impulse arrives at slot 1 with reduced gain.
        let gain = dec.r_hybrid[k][1][0] / 100.0;
        assert!(gain < 1.0);
        assert!(gain > 0.0);
    }
}
