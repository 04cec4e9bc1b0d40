// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parametric stereo payload decoder.

use symphonia_core::errors::{decode_error, Result};
use symphonia_core::io::{FiniteBitStream, ReadBitsLtr};

use crate::codebooks;
use crate::common::*;

use log::error;

macro_rules! validate {
    ($a:expr) => {
        if !$a {
            error!("check failed at {}:{}", file!(), line!());
            return decode_error("aacps: invalid data");
        }
    };
}

/// Number of envelopes by frame class and envelope-count selector.
const NUM_ENV_TAB: [[usize; 4]; 2] = [[0, 1, 2, 4], [1, 2, 3, 4]];

/// Number of IID/ICC parameter bands per mode.
const NR_IIDICC_PAR_TAB: [usize; 6] = [10, 20, 34, 10, 20, 34];

/// Number of IPD/OPD parameter bands per IID mode.
const NR_IPDOPD_PAR_TAB: [usize; 6] = [5, 11, 17, 5, 11, 17];

/// Delta-decode one envelope of one parameter type.
///
/// In time mode the prediction runs from the same band of the previous
/// envelope; in frequency mode it accumulates across bands. A non-zero
/// `mask` wraps the decoded value (used by the cyclic IPD/OPD parameters)
/// instead of range checking it.
#[allow(clippy::too_many_arguments)]
fn read_par_data<B: ReadBitsLtr>(
    bs: &mut B,
    table_idx: usize,
    par: &mut ParMatrix,
    num: usize,
    e: usize,
    num_env_old: usize,
    dt: bool,
    mask: i32,
    check: impl Fn(i8) -> bool,
) -> Result<()> {
    let cb = &codebooks::CODEBOOKS[table_idx];
    let offset = codebooks::HUFF_OFFSET[table_idx];

    if dt {
        let e_prev = if e > 0 { e - 1 } else { num_env_old.saturating_sub(1) };

        for b in 0..num {
            let delta = i32::from(bs.read_codebook(cb)?.0) - offset;
            let mut val = i32::from(par[e_prev][b]) + delta;
            if mask != 0 {
                val &= mask;
            }
            par[e][b] = val as i8;
            validate!(check(par[e][b]));
        }
    }
    else {
        let mut val = 0i32;

        for b in 0..num {
            val += i32::from(bs.read_codebook(cb)?.0) - offset;
            if mask != 0 {
                val &= mask;
            }
            par[e][b] = val as i8;
            validate!(check(par[e][b]));
        }
    }

    Ok(())
}

/// Decoded parametric stereo side information for one frame.
///
/// The struct is persistent across frames: header fields keep their values
/// on headerless frames, and the previous frame's envelopes serve as the
/// prediction source for time-delta coding.
pub struct PsData {
    pub(crate) baseline: bool,
    /// True once a header has been decoded successfully. While false the
    /// decoder bypasses stereo synthesis.
    pub start: bool,
    pub(crate) enable_iid: bool,
    /// False selects the coarse IID quantization grid, true the fine grid.
    pub(crate) iid_quant: bool,
    pub(crate) nr_iid_par: usize,
    pub(crate) nr_ipdopd_par: usize,
    pub(crate) enable_icc: bool,
    pub(crate) icc_mode: u8,
    pub(crate) nr_icc_par: usize,
    pub(crate) enable_ext: bool,
    pub(crate) enable_ipdopd: bool,
    pub(crate) frame_class: bool,
    pub(crate) num_env_old: usize,
    pub(crate) num_env: usize,
    /// Envelope borders in QMF slots, `border_position[0] == -1`.
    pub(crate) border_position: [i8; MAX_NUM_ENV + 1],
    pub(crate) iid_par: ParMatrix,
    pub(crate) icc_par: ParMatrix,
    pub(crate) ipd_par: ParMatrix,
    pub(crate) opd_par: ParMatrix,
    pub(crate) is34bands: bool,
    pub(crate) is34bands_old: bool,
}

impl PsData {
    /// Create a new parameter context. In baseline mode the 34-band
    /// resolution, mixing mode B and the IPD/OPD parameters are disabled.
    pub fn new(baseline: bool) -> Self {
        PsData {
            baseline,
            start: false,
            enable_iid: false,
            iid_quant: false,
            nr_iid_par: 0,
            nr_ipdopd_par: 0,
            enable_icc: false,
            icc_mode: 0,
            nr_icc_par: 0,
            enable_ext: false,
            enable_ipdopd: false,
            frame_class: false,
            num_env_old: 0,
            num_env: 0,
            border_position: [0; MAX_NUM_ENV + 1],
            iid_par: [[0; MAX_NR_IIDICC]; MAX_NUM_ENV],
            icc_par: [[0; MAX_NR_IIDICC]; MAX_NUM_ENV],
            ipd_par: [[0; MAX_NR_IIDICC]; MAX_NUM_ENV],
            opd_par: [[0; MAX_NR_IIDICC]; MAX_NUM_ENV],
            is34bands: false,
            is34bands_old: false,
        }
    }

    /// Read one parametric stereo payload.
    ///
    /// `bs` is consumed as a disposable cursor over the remainder of the
    /// host bitstream; the host reader is not advanced by this call. On
    /// success the number of bits consumed is returned and the caller must
    /// skip that many bits on its own reader. On error the parameters are
    /// reset to bypass and the caller must skip the full `bits_left` budget
    /// to resynchronize.
    pub fn read<B: ReadBitsLtr + FiniteBitStream>(
        &mut self,
        mut bs: B,
        bits_left: u32,
    ) -> Result<u32> {
        let start_bits = bs.bits_left();

        match self.read_frame(&mut bs) {
            Ok(()) => {
                let bits_consumed = (start_bits - bs.bits_left()) as u32;

                if bits_consumed <= bits_left {
                    return Ok(bits_consumed);
                }

                error!("expected to read {} PS bits, actually read {}", bits_left, bits_consumed);
            }
            Err(err) => {
                self.reset_to_bypass();
                return Err(err);
            }
        }

        self.reset_to_bypass();
        decode_error("aacps: payload larger than bit budget")
    }

    fn read_frame<B: ReadBitsLtr + FiniteBitStream>(&mut self, bs: &mut B) -> Result<()> {
        let header = bs.read_bool()?;

        if header {
            self.enable_iid = bs.read_bool()?;

            if self.enable_iid {
                let iid_mode = bs.read_bits_leq32(3)? as usize;

                if iid_mode > 5 {
                    error!("iid_mode {} is reserved", iid_mode);
                    return decode_error("aacps: reserved iid mode");
                }

                self.nr_iid_par = NR_IIDICC_PAR_TAB[iid_mode];
                self.iid_quant = iid_mode > 2;
                self.nr_ipdopd_par = NR_IPDOPD_PAR_TAB[iid_mode];
            }

            self.enable_icc = bs.read_bool()?;

            if self.enable_icc {
                let icc_mode = bs.read_bits_leq32(3)? as usize;

                if icc_mode > 5 {
                    error!("icc_mode {} is reserved", icc_mode);
                    return decode_error("aacps: reserved icc mode");
                }

                self.icc_mode = icc_mode as u8;
                self.nr_icc_par = NR_IIDICC_PAR_TAB[icc_mode];
            }

            self.enable_ext = bs.read_bool()?;
        }

        self.frame_class = bs.read_bool()?;
        self.num_env_old = self.num_env;
        self.num_env = NUM_ENV_TAB[usize::from(self.frame_class)][bs.read_bits_leq32(2)? as usize];

        self.border_position[0] = -1;

        if self.frame_class {
            for e in 1..=self.num_env {
                self.border_position[e] = bs.read_bits_leq32(5)? as i8;

                if self.border_position[e] < self.border_position[e - 1] {
                    error!("border_position non monotone");
                    return decode_error("aacps: non-monotone envelope borders");
                }
            }
        }
        else if self.num_env > 0 {
            // Regularly spaced borders. The envelope count is 1, 2 or 4.
            let shift = self.num_env.trailing_zeros();

            for e in 1..=self.num_env {
                self.border_position[e] = ((e * QMF_TIME_SLOTS >> shift) - 1) as i8;
            }
        }

        if self.enable_iid {
            let iid_max = 7 + 8 * i8::from(self.iid_quant);

            for e in 0..self.num_env {
                let dt = bs.read_bool()?;
                let table_idx =
                    codebooks::HUFF_IID[2 * usize::from(dt) + usize::from(self.iid_quant)];

                read_par_data(
                    bs,
                    table_idx,
                    &mut self.iid_par,
                    self.nr_iid_par,
                    e,
                    self.num_env_old,
                    dt,
                    0,
                    |v| v.abs() <= iid_max,
                )?;
            }
        }
        else {
            self.iid_par = [[0; MAX_NR_IIDICC]; MAX_NUM_ENV];
        }

        if self.enable_icc {
            for e in 0..self.num_env {
                let dt = bs.read_bool()?;
                let table_idx =
                    if dt { codebooks::HUFF_ICC_DT } else { codebooks::HUFF_ICC_DF };

                read_par_data(
                    bs,
                    table_idx,
                    &mut self.icc_par,
                    self.nr_icc_par,
                    e,
                    self.num_env_old,
                    dt,
                    0,
                    |v| (0..=7).contains(&v),
                )?;
            }
        }
        else {
            self.icc_par = [[0; MAX_NR_IIDICC]; MAX_NUM_ENV];
        }

        if self.enable_ext {
            let mut cnt = bs.read_bits_leq32(4)? as i32;

            if cnt == 15 {
                cnt += bs.read_bits_leq32(8)? as i32;
            }

            cnt *= 8;

            while cnt > 7 {
                let extension_id = bs.read_bits_leq32(2)?;
                cnt -= 2 + self.read_extension_data(bs, extension_id)? as i32;
            }

            if cnt < 0 {
                error!("ps extension overflow {}", cnt);
                return decode_error("aacps: extension overflow");
            }

            bs.ignore_bits(cnt as u32)?;
        }

        if self.baseline {
            self.enable_ipdopd = false;
        }

        // Fix up the envelopes such that the last one always ends on the
        // final QMF slot. The synthetic envelope repeats the last decoded
        // one, or the final envelope of the previous frame.
        if self.num_env == 0 || self.border_position[self.num_env] < (QMF_TIME_SLOTS - 1) as i8 {
            if self.num_env > 0 || self.num_env_old > 0 {
                let source = if self.num_env > 0 { self.num_env - 1 } else { self.num_env_old - 1 };

                if source != self.num_env {
                    if self.enable_iid {
                        self.iid_par[self.num_env] = self.iid_par[source];
                    }
                    if self.enable_icc {
                        self.icc_par[self.num_env] = self.icc_par[source];
                    }
                    if self.enable_ipdopd {
                        self.ipd_par[self.num_env] = self.ipd_par[source];
                        self.opd_par[self.num_env] = self.opd_par[source];
                    }
                }
            }

            if self.enable_iid {
                let iid_max = 7 + 8 * i8::from(self.iid_quant);

                for b in 0..self.nr_iid_par {
                    validate!(self.iid_par[self.num_env][b].abs() <= iid_max);
                }
            }

            if self.enable_icc {
                for b in 0..self.nr_iid_par {
                    validate!((0..=7).contains(&self.icc_par[self.num_env][b]));
                }
            }

            self.num_env += 1;
            self.border_position[self.num_env] = (QMF_TIME_SLOTS - 1) as i8;
        }

        self.is34bands_old = self.is34bands;

        if !self.baseline && (self.enable_iid || self.enable_icc) {
            self.is34bands = (self.enable_iid && self.nr_iid_par == 34)
                || (self.enable_icc && self.nr_icc_par == 34);
        }

        if !self.enable_ipdopd {
            self.ipd_par = [[0; MAX_NR_IIDICC]; MAX_NUM_ENV];
            self.opd_par = [[0; MAX_NR_IIDICC]; MAX_NUM_ENV];
        }

        if header {
            self.start = true;
        }

        Ok(())
    }

    fn read_extension_data<B: ReadBitsLtr + FiniteBitStream>(
        &mut self,
        bs: &mut B,
        extension_id: u32,
    ) -> Result<u32> {
        if extension_id != 0 {
            return Ok(0);
        }

        let count = bs.bits_left();

        self.enable_ipdopd = bs.read_bool()?;

        if self.enable_ipdopd {
            for e in 0..self.num_env {
                let dt = bs.read_bool()?;
                read_par_data(
                    bs,
                    if dt { codebooks::HUFF_IPD_DT } else { codebooks::HUFF_IPD_DF },
                    &mut self.ipd_par,
                    self.nr_ipdopd_par,
                    e,
                    self.num_env_old,
                    dt,
                    0x07,
                    |_| true,
                )?;

                let dt = bs.read_bool()?;
                read_par_data(
                    bs,
                    if dt { codebooks::HUFF_OPD_DT } else { codebooks::HUFF_OPD_DF },
                    &mut self.opd_par,
                    self.nr_ipdopd_par,
                    e,
                    self.num_env_old,
                    dt,
                    0x07,
                    |_| true,
                )?;
            }
        }

        // reserved_ps
        let _ = bs.read_bool()?;

        Ok((count - bs.bits_left()) as u32)
    }

    /// Reset the parameters such that synthesis bypasses to a duplicated
    /// mono signal until the next valid header.
    fn reset_to_bypass(&mut self) {
        self.start = false;
        self.iid_par = [[0; MAX_NR_IIDICC]; MAX_NUM_ENV];
        self.icc_par = [[0; MAX_NR_IIDICC]; MAX_NUM_ENV];
        self.ipd_par = [[0; MAX_NR_IIDICC]; MAX_NUM_ENV];
        self.opd_par = [[0; MAX_NR_IIDICC]; MAX_NUM_ENV];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codebooks::table;

    use symphonia_core::io::BitReaderLtr;

    /// MSb-first bitstream assembler for synthesizing payloads.
    struct BitWriter {
        bytes: Vec<u8>,
        len: u32,
    }

    impl BitWriter {
        fn new() -> Self {
            BitWriter { bytes: Vec::new(), len: 0 }
        }

        fn put(&mut self, val: u32, n: u32) {
            for i in (0..n).rev() {
                if self.len % 8 == 0 {
                    self.bytes.push(0);
                }
                let byte = self.bytes.last_mut().unwrap();
                *byte |= (((val >> i) & 1) as u8) << (7 - self.len % 8);
                self.len += 1;
            }
        }

        fn put_code(&mut self, table_idx: usize, symbol: usize) {
            let (codes, lens) = table(table_idx);
            self.put(codes[symbol], u32::from(lens[symbol]));
        }

        fn finish(mut self) -> (Vec<u8>, u32) {
            // Trailing padding so codebook lookahead never starves.
            self.bytes.push(0);
            self.bytes.push(0);
            (self.bytes, self.len)
        }
    }

    fn read_ps(ps: &mut PsData, buf: &[u8], bits_left: u32) -> Result<u32> {
        ps.read(BitReaderLtr::new(buf), bits_left)
    }

    /// A single fixed-border envelope with 10 coarse frequency-delta IID
    /// parameters.
    fn write_iid10_frame(deltas: &[i32; 10]) -> (Vec<u8>, u32) {
        let mut bw = BitWriter::new();
        bw.put(1, 1); // header present
        bw.put(1, 1); // enable_iid
        bw.put(0, 3); // iid_mode 0: 10 bands, coarse
        bw.put(0, 1); // enable_icc
        bw.put(0, 1); // enable_ext
        bw.put(0, 1); // fixed frame class
        bw.put(1, 2); // one envelope
        bw.put(0, 1); // frequency deltas
        for &d in deltas {
            bw.put_code(codebooks::HUFF_IID_DF0, (d + 14) as usize);
        }
        bw.finish()
    }

    #[test]
    fn verify_read_iid_frame_bit_accounting() {
        let deltas = [1, -1, 2, -2, 0, 0, 3, -3, 1, 0];
        let (buf, len) = write_iid10_frame(&deltas);

        let mut ps = PsData::new(false);
        let consumed = read_ps(&mut ps, &buf, len).unwrap();

        assert_eq!(consumed, len);
        assert!(ps.start);
        assert!(ps.enable_iid);
        assert_eq!(ps.num_env, 1);
        assert_eq!(ps.border_position[0], -1);
        assert_eq!(ps.border_position[1], 31);

        // Frequency-deltas accumulate across bands.
        let mut val = 0;
        for b in 0..10 {
            val += deltas[b];
            assert_eq!(i32::from(ps.iid_par[0][b]), val);
        }
        assert!(!ps.is34bands);
    }

    #[test]
    fn verify_time_delta_predicts_from_previous_frame() {
        let (buf, len) = write_iid10_frame(&[1, -1, 2, -2, 0, 0, 3, -3, 1, 0]);
        let mut ps = PsData::new(false);
        read_ps(&mut ps, &buf, len).unwrap();
        let prev = ps.iid_par[0];

        let mut bw = BitWriter::new();
        bw.put(0, 1); // no header, settings persist
        bw.put(0, 1); // fixed frame class
        bw.put(1, 2); // one envelope
        bw.put(1, 1); // time deltas
        for _ in 0..10 {
            bw.put_code(codebooks::HUFF_IID_DT0, 14 + 1); // every band +1
        }
        let (buf, len) = bw.finish();
        read_ps(&mut ps, &buf, len).unwrap();

        for b in 0..10 {
            assert_eq!(ps.iid_par[0][b], prev[b] + 1);
        }
    }

    #[test]
    fn verify_non_monotone_borders_reset() {
        let mut bw = BitWriter::new();
        bw.put(1, 1); // header present
        bw.put(0, 1); // enable_iid
        bw.put(0, 1); // enable_icc
        bw.put(0, 1); // enable_ext
        bw.put(1, 1); // variable frame class
        bw.put(1, 2); // two envelopes
        bw.put(10, 5); // border 10
        bw.put(5, 5); // border 5, non-monotone
        let (buf, len) = bw.finish();

        let mut ps = PsData::new(false);
        ps.start = true;
        ps.iid_par[0][0] = 3;

        assert!(read_ps(&mut ps, &buf, len).is_err());
        assert!(!ps.start);
        assert_eq!(ps.iid_par[0][0], 0);
    }

    #[test]
    fn verify_reserved_iid_mode_rejected() {
        let mut bw = BitWriter::new();
        bw.put(1, 1); // header present
        bw.put(1, 1); // enable_iid
        bw.put(6, 3); // reserved mode
        let (buf, len) = bw.finish();

        let mut ps = PsData::new(false);
        assert!(read_ps(&mut ps, &buf, len).is_err());
        assert!(!ps.start);
    }

    #[test]
    fn verify_out_of_range_iid_rejected() {
        // +7 then +1 pushes the accumulated coarse IID past its range.
        let mut bw = BitWriter::new();
        bw.put(1, 1);
        bw.put(1, 1);
        bw.put(0, 3);
        bw.put(0, 1);
        bw.put(0, 1);
        bw.put(0, 1);
        bw.put(1, 2);
        bw.put(0, 1);
        bw.put_code(codebooks::HUFF_IID_DF0, 14 + 7);
        bw.put_code(codebooks::HUFF_IID_DF0, 14 + 1);
        let (buf, len) = bw.finish();

        let mut ps = PsData::new(false);
        assert!(read_ps(&mut ps, &buf, len).is_err());
    }

    #[test]
    fn verify_budget_overrun_resets() {
        let (buf, len) = write_iid10_frame(&[0; 10]);
        let mut ps = PsData::new(false);

        // A budget smaller than the payload must fail and bypass.
        assert!(read_ps(&mut ps, &buf, len - 1).is_err());
        assert!(!ps.start);
    }

    #[test]
    fn verify_envelope_fix_up_short_border() {
        let mut bw = BitWriter::new();
        bw.put(1, 1); // header present
        bw.put(1, 1); // enable_iid
        bw.put(0, 3); // iid_mode 0
        bw.put(0, 1); // enable_icc
        bw.put(0, 1); // enable_ext
        bw.put(1, 1); // variable frame class
        bw.put(0, 2); // one envelope
        bw.put(10, 5); // ends early at slot 10
        bw.put(0, 1); // frequency deltas
        bw.put_code(codebooks::HUFF_IID_DF0, 14 + 1);
        for _ in 1..10 {
            bw.put_code(codebooks::HUFF_IID_DF0, 14);
        }
        let (buf, len) = bw.finish();

        let mut ps = PsData::new(false);
        read_ps(&mut ps, &buf, len).unwrap();

        // A synthetic envelope replicating the last one closes the frame.
        assert_eq!(ps.num_env, 2);
        assert_eq!(ps.border_position[1], 10);
        assert_eq!(ps.border_position[2], 31);
        assert_eq!(ps.iid_par[0][0], 1);
        assert_eq!(ps.iid_par[1], ps.iid_par[0]);
    }

    #[test]
    fn verify_zero_envelope_frame() {
        let mut bw = BitWriter::new();
        bw.put(1, 1); // header present
        bw.put(1, 1); // enable_iid
        bw.put(0, 3);
        bw.put(0, 1);
        bw.put(0, 1);
        bw.put(0, 1); // fixed frame class
        bw.put(0, 2); // zero envelopes
        let (buf, len) = bw.finish();

        let mut ps = PsData::new(false);
        let consumed = read_ps(&mut ps, &buf, len).unwrap();

        assert_eq!(consumed, len);
        assert_eq!(ps.num_env, 1);
        assert_eq!(ps.border_position[1], 31);
        assert_eq!(ps.iid_par[0], [0; MAX_NR_IIDICC]);
    }

    #[test]
    fn verify_ipdopd_extension() {
        let mut bw = BitWriter::new();
        bw.put(1, 1); // header present
        bw.put(1, 1); // enable_iid
        bw.put(0, 3); // iid_mode 0: 5 ipd/opd bands
        bw.put(0, 1); // enable_icc
        bw.put(1, 1); // enable_ext
        bw.put(0, 1); // fixed frame class
        bw.put(1, 2); // one envelope
        bw.put(0, 1); // iid frequency deltas
        for _ in 0..10 {
            bw.put_code(codebooks::HUFF_IID_DF0, 14);
        }
        // Extension: 2 bytes; id 0, ipd/opd enabled, zero deltas everywhere.
        bw.put(2, 4);
        bw.put(0, 2); // extension id 0
        bw.put(1, 1); // enable_ipdopd
        bw.put(0, 1); // ipd frequency deltas
        for _ in 0..5 {
            bw.put_code(codebooks::HUFF_IPD_DF, 0);
        }
        bw.put(0, 1); // opd frequency deltas
        for _ in 0..5 {
            bw.put_code(codebooks::HUFF_OPD_DF, 0);
        }
        bw.put(0, 1); // reserved_ps
        let (buf, len) = bw.finish();

        let mut ps = PsData::new(false);
        let consumed = read_ps(&mut ps, &buf, len).unwrap();

        assert_eq!(consumed, len);
        assert!(ps.enable_ipdopd);
        assert_eq!(ps.ipd_par[0], [0; MAX_NR_IIDICC]);
    }

    #[test]
    fn verify_extension_overflow_rejected() {
        let mut bw = BitWriter::new();
        bw.put(1, 1);
        bw.put(1, 1);
        bw.put(0, 3);
        bw.put(0, 1);
        bw.put(1, 1); // enable_ext
        bw.put(0, 1);
        bw.put(1, 2);
        bw.put(0, 1);
        for _ in 0..10 {
            bw.put_code(codebooks::HUFF_IID_DF0, 14);
        }
        // One byte of extension budget cannot hold the ipd/opd payload.
        bw.put(1, 4);
        bw.put(0, 2); // extension id 0
        bw.put(1, 1); // enable_ipdopd
        bw.put(0, 1);
        for _ in 0..5 {
            bw.put_code(codebooks::HUFF_IPD_DF, 0);
        }
        bw.put(0, 1);
        for _ in 0..5 {
            bw.put_code(codebooks::HUFF_OPD_DF, 0);
        }
        bw.put(0, 1);
        let (buf, len) = bw.finish();

        let mut ps = PsData::new(false);
        assert!(read_ps(&mut ps, &buf, len).is_err());
    }

    #[test]
    fn verify_baseline_strips_ipdopd() {
        let mut bw = BitWriter::new();
        bw.put(1, 1);
        bw.put(1, 1);
        bw.put(0, 3);
        bw.put(0, 1);
        bw.put(1, 1); // enable_ext
        bw.put(0, 1);
        bw.put(1, 2);
        bw.put(0, 1);
        for _ in 0..10 {
            bw.put_code(codebooks::HUFF_IID_DF0, 14);
        }
        // Extension: 5 bytes; 36 bits of id + ipd/opd payload, 4 bits pad.
        bw.put(5, 4);
        bw.put(0, 2);
        bw.put(1, 1); // enable_ipdopd
        bw.put(0, 1);
        for _ in 0..5 {
            bw.put_code(codebooks::HUFF_IPD_DF, 1); // phase step 1
        }
        bw.put(0, 1);
        for _ in 0..5 {
            bw.put_code(codebooks::HUFF_OPD_DF, 1);
        }
        bw.put(0, 1);
        bw.put(0, 4);
        let (buf, len) = bw.finish();

        let mut ps = PsData::new(true);
        read_ps(&mut ps, &buf, len).unwrap();

        assert!(!ps.enable_ipdopd);
        assert_eq!(ps.ipd_par[0], [0; MAX_NR_IIDICC]);
        assert_eq!(ps.opd_par[0], [0; MAX_NR_IIDICC]);
    }
}
