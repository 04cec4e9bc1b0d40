// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Huffman codebooks for the delta-coded parametric stereo parameters.
//!
//! All parameters are transmitted as deltas, either across frequency within
//! one envelope or across time from the previous envelope. Each codebook
//! entry decodes to a symbol index; subtracting the table's offset yields the
//! signed delta.

use symphonia_core::io::vlc::{BitOrder, Codebook, CodebookBuilder, Entry16x16};

use lazy_static::lazy_static;

pub const HUFF_IID_DF1: usize = 0;
pub const HUFF_IID_DT1: usize = 1;
pub const HUFF_IID_DF0: usize = 2;
pub const HUFF_IID_DT0: usize = 3;
pub const HUFF_ICC_DF: usize = 4;
pub const HUFF_ICC_DT: usize = 5;
pub const HUFF_IPD_DF: usize = 6;
pub const HUFF_IPD_DT: usize = 7;
pub const HUFF_OPD_DF: usize = 8;
pub const HUFF_OPD_DT: usize = 9;

/// IID codebook selection by `2 * dt + iid_quant`.
pub const HUFF_IID: [usize; 4] = [HUFF_IID_DF0, HUFF_IID_DF1, HUFF_IID_DT0, HUFF_IID_DT1];

/// Symbol offset per codebook. The decoded symbol index minus this offset is
/// the parameter delta.
pub const HUFF_OFFSET: [i32; 10] = [30, 30, 14, 14, 7, 7, 0, 0, 0, 0];

const HUFF_IID_DF1_BITS: [u8; 61] = [
    18, 18, 18, 18, 18, 18, 18, 18, 18, 17, 18, 17, 17, 16, 16, 15, 14, 14, 13, 12, 12, 11, 10,
    10, 8, 7, 6, 5, 4, 3, 1, 3, 4, 5, 6, 7, 8, 9, 10, 11, 11, 12, 13, 14, 14, 15, 16, 16, 17, 17,
    18, 17, 18, 18, 18, 18, 18, 18, 18, 18, 18,
];

const HUFF_IID_DF1_CODES: [u32; 61] = [
    0x01FEB4, 0x01FEB5, 0x01FD76, 0x01FD77, 0x01FD74, 0x01FD75, 0x01FE8A, 0x01FE8B, 0x01FE88,
    0x00FE80, 0x01FEB6, 0x00FE82, 0x00FEB8, 0x007F42, 0x007FAE, 0x003FAF, 0x001FD1, 0x001FE9,
    0x000FE9, 0x0007EA, 0x0007FB, 0x0003FB, 0x0001FB, 0x0001FF, 0x00007C, 0x00003C, 0x00001C,
    0x00000C, 0x000000, 0x000001, 0x000001, 0x000002, 0x000001, 0x00000D, 0x00001D, 0x00003D,
    0x00007D, 0x0000FC, 0x0001FC, 0x0003FC, 0x0003F4, 0x0007EB, 0x000FEA, 0x001FEA, 0x001FD6,
    0x003FD0, 0x007FAF, 0x007F43, 0x00FEB9, 0x00FE83, 0x01FEB7, 0x00FE81, 0x01FE89, 0x01FE8E,
    0x01FE8F, 0x01FE8C, 0x01FE8D, 0x01FEB2, 0x01FEB3, 0x01FEB0, 0x01FEB1,
];

const HUFF_IID_DT1_BITS: [u8; 61] = [
    16, 16, 16, 16, 16, 16, 16, 16, 16, 15, 15, 15, 15, 15, 15, 14, 14, 13, 13, 13, 12, 12, 11,
    10, 9, 9, 7, 6, 5, 3, 1, 2, 5, 6, 7, 8, 9, 10, 11, 11, 12, 12, 13, 13, 14, 14, 15, 15, 15,
    15, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16,
];

const HUFF_IID_DT1_CODES: [u32; 61] = [
    0x004ED4, 0x004ED5, 0x004ECE, 0x004ECF, 0x004ECC, 0x004ED6, 0x004ED8, 0x004F46, 0x004F60,
    0x002718, 0x002719, 0x002764, 0x002765, 0x00276D, 0x0027B1, 0x0013B7, 0x0013D6, 0x0009C7,
    0x0009E9, 0x0009ED, 0x0004EE, 0x0004F7, 0x000278, 0x000139, 0x00009A, 0x00009F, 0x000020,
    0x000011, 0x00000A, 0x000003, 0x000001, 0x000000, 0x00000B, 0x000012, 0x000021, 0x00004C,
    0x00009B, 0x00013A, 0x000279, 0x000270, 0x0004EF, 0x0004E2, 0x0009EA, 0x0009D8, 0x0013D7,
    0x0013D0, 0x0027B2, 0x0027A2, 0x00271A, 0x00271B, 0x004F66, 0x004F67, 0x004F61, 0x004F47,
    0x004ED9, 0x004ED7, 0x004ECD, 0x004ED2, 0x004ED3, 0x004ED0, 0x004ED1,
];

const HUFF_IID_DF0_BITS: [u8; 29] = [
    17, 17, 17, 17, 16, 15, 13, 10, 9, 7, 6, 5, 4, 3, 1, 3, 4, 5, 6, 6, 9, 9, 11, 13, 14, 14, 15,
    17, 17,
];

const HUFF_IID_DF0_CODES: [u32; 29] = [
    0x01FFFA, 0x01FFFB, 0x01FFFC, 0x01FFFD, 0x00FFFC, 0x007FFC, 0x001FFC, 0x0003FE, 0x0001FC,
    0x00007E, 0x00003C, 0x00001C, 0x00000C, 0x000004, 0x000000, 0x000005, 0x00000D, 0x00001D,
    0x00003D, 0x00003E, 0x0001FD, 0x0001FE, 0x0007FE, 0x001FFD, 0x003FFC, 0x003FFD, 0x007FFD,
    0x01FFFE, 0x01FFFF,
];

const HUFF_IID_DT0_BITS: [u8; 29] = [
    19, 19, 19, 20, 20, 20, 17, 15, 12, 10, 8, 6, 4, 2, 1, 3, 5, 7, 9, 11, 13, 14, 17, 19, 20,
    20, 20, 20, 20,
];

const HUFF_IID_DT0_CODES: [u32; 29] = [
    0x07FFF9, 0x07FFFA, 0x07FFFB, 0x0FFFF8, 0x0FFFF9, 0x0FFFFA, 0x01FFFD, 0x007FFE, 0x000FFE,
    0x0003FE, 0x0000FE, 0x00003E, 0x00000E, 0x000002, 0x000000, 0x000006, 0x00001E, 0x00007E,
    0x0001FE, 0x0007FE, 0x001FFE, 0x003FFE, 0x01FFFC, 0x07FFF8, 0x0FFFFB, 0x0FFFFC, 0x0FFFFD,
    0x0FFFFE, 0x0FFFFF,
];

const HUFF_ICC_DF_BITS: [u8; 15] = [14, 14, 12, 10, 7, 5, 3, 1, 2, 4, 6, 8, 9, 11, 13];

const HUFF_ICC_DF_CODES: [u32; 15] = [
    0x3FFF, 0x3FFE, 0x0FFE, 0x03FE, 0x007E, 0x001E, 0x0006, 0x0000, 0x0002, 0x000E, 0x003E,
    0x00FE, 0x01FE, 0x07FE, 0x1FFE,
];

const HUFF_ICC_DT_BITS: [u8; 15] = [14, 13, 11, 9, 7, 5, 3, 1, 2, 4, 6, 8, 10, 12, 14];

const HUFF_ICC_DT_CODES: [u32; 15] = [
    0x3FFE, 0x1FFE, 0x07FE, 0x01FE, 0x007E, 0x001E, 0x0006, 0x0000, 0x0002, 0x000E, 0x003E,
    0x00FE, 0x03FE, 0x0FFE, 0x3FFF,
];

const HUFF_IPD_DF_BITS: [u8; 8] = [1, 3, 4, 4, 4, 4, 4, 4];

const HUFF_IPD_DF_CODES: [u32; 8] = [0x1, 0x0, 0x6, 0x4, 0x2, 0x3, 0x5, 0x7];

const HUFF_IPD_DT_BITS: [u8; 8] = [1, 3, 4, 5, 5, 4, 4, 3];

const HUFF_IPD_DT_CODES: [u32; 8] = [0x1, 0x2, 0x2, 0x3, 0x2, 0x0, 0x3, 0x3];

const HUFF_OPD_DF_BITS: [u8; 8] = [1, 3, 4, 4, 5, 5, 4, 3];

const HUFF_OPD_DF_CODES: [u32; 8] = [0x1, 0x2, 0x1, 0x3, 0x1, 0x0, 0x2, 0x3];

const HUFF_OPD_DT_BITS: [u8; 8] = [1, 3, 4, 5, 5, 4, 4, 3];

const HUFF_OPD_DT_CODES: [u32; 8] = [0x1, 0x2, 0x1, 0x7, 0x6, 0x0, 0x2, 0x3];

fn make_codebook(codes: &[u32], lens: &[u8]) -> Codebook<Entry16x16> {
    let values: Vec<u16> = (0..lens.len() as u16).collect();
    let mut builder = CodebookBuilder::new(BitOrder::Verbatim);
    builder.bits_per_read(9);
    builder.make::<Entry16x16>(codes, lens, &values).unwrap()
}

lazy_static! {
    /// The ten parametric stereo codebooks, indexed by the `HUFF_*` constants.
    pub static ref CODEBOOKS: [Codebook<Entry16x16>; 10] = [
        make_codebook(&HUFF_IID_DF1_CODES, &HUFF_IID_DF1_BITS),
        make_codebook(&HUFF_IID_DT1_CODES, &HUFF_IID_DT1_BITS),
        make_codebook(&HUFF_IID_DF0_CODES, &HUFF_IID_DF0_BITS),
        make_codebook(&HUFF_IID_DT0_CODES, &HUFF_IID_DT0_BITS),
        make_codebook(&HUFF_ICC_DF_CODES, &HUFF_ICC_DF_BITS),
        make_codebook(&HUFF_ICC_DT_CODES, &HUFF_ICC_DT_BITS),
        make_codebook(&HUFF_IPD_DF_CODES, &HUFF_IPD_DF_BITS),
        make_codebook(&HUFF_IPD_DT_CODES, &HUFF_IPD_DT_BITS),
        make_codebook(&HUFF_OPD_DF_CODES, &HUFF_OPD_DF_BITS),
        make_codebook(&HUFF_OPD_DT_CODES, &HUFF_OPD_DT_BITS),
    ];
}

/// (codes, lens) for each codebook, for test encoders.
#[cfg(test)]
pub fn table(idx: usize) -> (&'static [u32], &'static [u8]) {
    match idx {
        HUFF_IID_DF1 => (&HUFF_IID_DF1_CODES, &HUFF_IID_DF1_BITS),
        HUFF_IID_DT1 => (&HUFF_IID_DT1_CODES, &HUFF_IID_DT1_BITS),
        HUFF_IID_DF0 => (&HUFF_IID_DF0_CODES, &HUFF_IID_DF0_BITS),
        HUFF_IID_DT0 => (&HUFF_IID_DT0_CODES, &HUFF_IID_DT0_BITS),
        HUFF_ICC_DF => (&HUFF_ICC_DF_CODES, &HUFF_ICC_DF_BITS),
        HUFF_ICC_DT => (&HUFF_ICC_DT_CODES, &HUFF_ICC_DT_BITS),
        HUFF_IPD_DF => (&HUFF_IPD_DF_CODES, &HUFF_IPD_DF_BITS),
        HUFF_IPD_DT => (&HUFF_IPD_DT_CODES, &HUFF_IPD_DT_BITS),
        HUFF_OPD_DF => (&HUFF_OPD_DF_CODES, &HUFF_OPD_DF_BITS),
        HUFF_OPD_DT => (&HUFF_OPD_DT_CODES, &HUFF_OPD_DT_BITS),
        _ => unreachable!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use symphonia_core::io::{BitReaderLtr, ReadBitsLtr};

    #[test]
    fn verify_codebooks_build() {
        // Force construction of all ten codebooks.
        assert_eq!(CODEBOOKS.len(), 10);
    }

    #[test]
    fn verify_kraft_complete() {
        // Every table must describe a complete prefix code.
        for idx in 0..10 {
            let (_, lens) = table(idx);
            let sum: u64 = lens.iter().map(|&l| 1u64 << (32 - u32::from(l))).sum();
            assert_eq!(sum, 1u64 << 32, "table {} is not a complete code", idx);
        }
    }

    #[test]
    fn verify_icc_df_decode() {
        // Symbols 7 ('0'), 8 ('10') and 6 ('110') packed MSb first.
        let buf = [0b0101_1000];
        let mut bs = BitReaderLtr::new(&buf);
        let cb = &CODEBOOKS[HUFF_ICC_DF];
        assert_eq!(bs.read_codebook(cb).unwrap(), (7, 1));
        assert_eq!(bs.read_codebook(cb).unwrap(), (8, 2));
        assert_eq!(bs.read_codebook(cb).unwrap(), (6, 3));
    }

    #[test]
    fn verify_ipd_dt_decode() {
        // Symbols 0 ('1'), 3 ('00011') and 7 ('011').
        let buf = [0b1000_1101, 0b1000_0000];
        let mut bs = BitReaderLtr::new(&buf);
        let cb = &CODEBOOKS[HUFF_IPD_DT];
        assert_eq!(bs.read_codebook(cb).unwrap(), (0, 1));
        assert_eq!(bs.read_codebook(cb).unwrap(), (3, 5));
        assert_eq!(bs.read_codebook(cb).unwrap(), (7, 3));
    }
}
