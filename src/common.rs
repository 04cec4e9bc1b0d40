// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Maximum number of envelopes in one frame (up to 4 signalled, plus the
/// synthetic envelope added by the fix-up step).
pub const MAX_NUM_ENV: usize = 5;
/// Maximum number of IID/ICC parameter bands.
pub const MAX_NR_IIDICC: usize = 34;
/// Maximum number of IPD/OPD parameter bands.
pub const MAX_NR_IPDOPD: usize = 17;
/// Maximum number of hybrid subsubbands (34-band mode).
pub const MAX_SSB: usize = 91;
/// Number of subsubbands covered by the all-pass decorrelator.
pub const MAX_AP_BANDS: usize = 50;
/// QMF time slots per frame.
pub const QMF_TIME_SLOTS: usize = 32;
/// Longest plain delay used in place of the all-pass chain.
pub const MAX_DELAY: usize = 14;
/// Number of serial all-pass links.
pub const AP_LINKS: usize = 3;
/// History kept per all-pass link delay line.
pub const MAX_AP_DELAY: usize = 5;

/// Number of parameter bands, b(k), per stereo-band resolution.
pub const NR_PAR_BANDS: [usize; 2] = [20, 34];
pub const NR_IPDOPD_BANDS: [usize; 2] = [11, 17];
/// Number of subsubbands, k, per stereo-band resolution.
pub const NR_BANDS: [usize; 2] = [71, 91];
/// First subsubband of the all-pass filter decay slope.
pub const DECAY_CUTOFF: [usize; 2] = [10, 32];
pub const NR_ALLPASS_BANDS: [usize; 2] = [30, 50];
/// First subsubband using the short one sample delay.
pub const SHORT_DELAY_BAND: [usize; 2] = [42, 62];

/// QMF-domain channel buffer, indexed `[re/im][time slot][qmf band]`.
pub type QmfBuf = [[[f32; 64]; 38]; 2];

/// Hybrid-domain channel buffer, indexed `[subsubband][time slot][re/im]`.
pub type HybridBuf = [[[f32; 2]; QMF_TIME_SLOTS]; MAX_SSB];

/// Per-envelope parameter rows, indexed `[envelope][parameter band]`.
pub type ParMatrix = [[i8; MAX_NR_IIDICC]; MAX_NUM_ENV];
