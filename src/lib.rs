// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! MPEG-4 Parametric Stereo (PS) decoder.
//!
//! Parametric Stereo is the stereo-synthesis tool of HE-AAC v2. The mono core
//! signal is decoded normally, and a compact side-information payload steers
//! the reconstruction of a stereo image in the QMF domain.
//!
//! This crate is a building block for an AAC/SBR decoder: [`PsData::read`]
//! decodes the PS payload from the bitstream, and [`PsDecoder::apply`] turns
//! a mono QMF-domain frame into a stereo pair.

mod codebooks;
mod common;
mod decoder;
mod decorrelate;
mod dsp;
mod hybrid;
mod params;
mod remap;
mod stereo;
mod tables;

pub use common::QmfBuf;
pub use decoder::PsDecoder;
pub use params::PsData;
