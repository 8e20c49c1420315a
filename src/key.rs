// Copyright 2022 Aztec
// Copyright 2025 Horizen Labs, Inc.
// SPDX-License-Identifier: Apache-2.0 or MIT

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// 	http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![allow(non_camel_case_types)]

use crate::{
    constants::{GROTH16_VK_FIXED_SIZE, GROUP_ELEMENT_SIZE, MAX_PLONK_POWER, PLONK_VK_SIZE},
    errors::{ConversionError, FieldError},
    errors::GroupError,
    utils::{
        check_g1, check_g2, read_fr, read_g1, read_g2, read_u64, write_g1, write_g2,
        IntoBEBytes32,
    },
    Fr, G1, G2,
};
use alloc::vec::Vec;
use ark_ff::{AdditiveGroup, Field};
use core::fmt;
use snafu::Snafu;

#[derive(Debug, PartialEq, Snafu)]
pub enum VerificationKeyError {
    #[snafu(display("Incorrect buffer size. Expected: {expected_size}; Got: {actual_size}"))]
    IncorrectBufferSize {
        expected_size: usize,
        actual_size: usize,
    },
    #[snafu(display("Group element conversion error: {conv_error}"))]
    GroupConversionError { conv_error: ConversionError },
    #[snafu(display("Invalid scalar for field '{field}': {cause}"))]
    InvalidScalar {
        field: VkCommitmentField,
        cause: FieldError,
    },
    #[snafu(display("The IC vector must contain at least one point"))]
    EmptyIc,
    #[snafu(display("Unsupported number of public inputs: {num_public_inputs}"))]
    TooManyPublicInputs { num_public_inputs: u64 },
    #[snafu(display("Invalid domain power {power}; must be between 1 and {MAX_PLONK_POWER}"))]
    InvalidPower { power: u64 },
    #[snafu(display("w is not a primitive 2^{power}-th root of unity"))]
    InvalidRootOfUnity { power: u64 },
    #[snafu(display("Coset shift '{field}' must be non-zero"))]
    ZeroCosetShift { field: VkCommitmentField },
}

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum VkCommitmentField {
    ALPHA,
    BETA,
    GAMMA,
    DELTA,
    IC(usize),
    K1,
    K2,
    W,
    QM,
    QL,
    QR,
    QO,
    QC,
    S1,
    S2,
    S3,
    X_2,
}

impl fmt::Display for VkCommitmentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VkCommitmentField::ALPHA => write!(f, "alpha"),
            VkCommitmentField::BETA => write!(f, "beta"),
            VkCommitmentField::GAMMA => write!(f, "gamma"),
            VkCommitmentField::DELTA => write!(f, "delta"),
            VkCommitmentField::IC(i) => write!(f, "IC[{i}]"),
            VkCommitmentField::K1 => write!(f, "k1"),
            VkCommitmentField::K2 => write!(f, "k2"),
            VkCommitmentField::W => write!(f, "w"),
            VkCommitmentField::QM => write!(f, "Qm"),
            VkCommitmentField::QL => write!(f, "Ql"),
            VkCommitmentField::QR => write!(f, "Qr"),
            VkCommitmentField::QO => write!(f, "Qo"),
            VkCommitmentField::QC => write!(f, "Qc"),
            VkCommitmentField::S1 => write!(f, "S1"),
            VkCommitmentField::S2 => write!(f, "S2"),
            VkCommitmentField::S3 => write!(f, "S3"),
            VkCommitmentField::X_2 => write!(f, "X_2"),
        }
    }
}

fn point_error(group: GroupError, field: VkCommitmentField) -> VerificationKeyError {
    VerificationKeyError::GroupConversionError {
        conv_error: ConversionError {
            group,
            field: Some(field.into()),
        },
    }
}

fn checked_g1(point: &G1, field: VkCommitmentField) -> Result<(), VerificationKeyError> {
    check_g1(point).map_err(|group| point_error(group, field))
}

fn checked_g2(point: &G2, field: VkCommitmentField) -> Result<(), VerificationKeyError> {
    check_g2(point).map_err(|group| point_error(group, field))
}

fn read_vk_g1(data: &mut &[u8], field: VkCommitmentField) -> Result<G1, VerificationKeyError> {
    read_g1(data).map_err(|group| point_error(group, field))
}

fn read_vk_g2(data: &mut &[u8], field: VkCommitmentField) -> Result<G2, VerificationKeyError> {
    read_g2(data).map_err(|group| point_error(group, field))
}

fn read_vk_fr(data: &mut &[u8], field: VkCommitmentField) -> Result<Fr, VerificationKeyError> {
    read_fr(data).map_err(|cause| VerificationKeyError::InvalidScalar { field, cause })
}

fn read_vk_u64(data: &mut &[u8], expected_size: usize) -> Result<u64, VerificationKeyError> {
    let actual_size = data.len();
    read_u64(data).map_err(|_| VerificationKeyError::IncorrectBufferSize {
        expected_size,
        actual_size,
    })
}

/// Groth16 verifying key: `alpha ∈ G1`, `beta, gamma, delta ∈ G2` and one
/// `IC` point per public input plus the constant term `IC[0]`.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Groth16VerificationKey {
    alpha: G1,
    beta: G2,
    gamma: G2,
    delta: G2,
    ic: Vec<G1>,
}

impl Groth16VerificationKey {
    pub fn new(
        alpha: G1,
        beta: G2,
        gamma: G2,
        delta: G2,
        ic: Vec<G1>,
    ) -> Result<Self, VerificationKeyError> {
        if ic.is_empty() {
            return Err(VerificationKeyError::EmptyIc);
        }
        checked_g1(&alpha, VkCommitmentField::ALPHA)?;
        checked_g2(&beta, VkCommitmentField::BETA)?;
        checked_g2(&gamma, VkCommitmentField::GAMMA)?;
        checked_g2(&delta, VkCommitmentField::DELTA)?;
        for (i, point) in ic.iter().enumerate() {
            checked_g1(point, VkCommitmentField::IC(i))?;
        }
        Ok(Self {
            alpha,
            beta,
            gamma,
            delta,
            ic,
        })
    }

    pub fn alpha(&self) -> &G1 {
        &self.alpha
    }

    pub fn beta(&self) -> &G2 {
        &self.beta
    }

    pub fn gamma(&self) -> &G2 {
        &self.gamma
    }

    pub fn delta(&self) -> &G2 {
        &self.delta
    }

    pub fn ic(&self) -> &[G1] {
        &self.ic
    }

    pub fn num_public_inputs(&self) -> usize {
        self.ic.len() - 1
    }

    /// Serialized size of a key with `num_public_inputs` inputs, or `None` if
    /// it does not fit in memory.
    pub fn byte_size(num_public_inputs: u64) -> Option<usize> {
        usize::try_from(num_public_inputs)
            .ok()?
            .checked_add(1)?
            .checked_mul(GROUP_ELEMENT_SIZE)?
            .checked_add(GROTH16_VK_FIXED_SIZE)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(GROTH16_VK_FIXED_SIZE + self.ic.len() * GROUP_ELEMENT_SIZE);
        out.extend_from_slice(&(self.num_public_inputs() as u64).to_be_bytes());
        write_g1(&self.alpha, &mut out);
        write_g2(&self.beta, &mut out);
        write_g2(&self.gamma, &mut out);
        write_g2(&self.delta, &mut out);
        for point in &self.ic {
            write_g1(point, &mut out);
        }
        out
    }
}

impl TryFrom<&[u8]> for Groth16VerificationKey {
    type Error = VerificationKeyError;

    fn try_from(raw_vk: &[u8]) -> Result<Self, Self::Error> {
        if raw_vk.len() < GROTH16_VK_FIXED_SIZE + GROUP_ELEMENT_SIZE {
            return Err(VerificationKeyError::IncorrectBufferSize {
                expected_size: GROTH16_VK_FIXED_SIZE + GROUP_ELEMENT_SIZE,
                actual_size: raw_vk.len(),
            });
        }

        let mut data = raw_vk;
        let num_public_inputs = read_vk_u64(&mut data, GROTH16_VK_FIXED_SIZE)?;
        let expected_size = Self::byte_size(num_public_inputs)
            .ok_or(VerificationKeyError::TooManyPublicInputs { num_public_inputs })?;
        if raw_vk.len() != expected_size {
            return Err(VerificationKeyError::IncorrectBufferSize {
                expected_size,
                actual_size: raw_vk.len(),
            });
        }

        let alpha = read_vk_g1(&mut data, VkCommitmentField::ALPHA)?;
        let beta = read_vk_g2(&mut data, VkCommitmentField::BETA)?;
        let gamma = read_vk_g2(&mut data, VkCommitmentField::GAMMA)?;
        let delta = read_vk_g2(&mut data, VkCommitmentField::DELTA)?;
        let ic = (0..=num_public_inputs as usize)
            .map(|i| read_vk_g1(&mut data, VkCommitmentField::IC(i)))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(alpha, beta, gamma, delta, ic)
    }
}

/// snarkjs PLONK verifying key over the evaluation domain of size `2^power`.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct PlonkVerificationKey {
    power: u64,
    n_public: usize,
    k1: Fr,
    k2: Fr,
    w: Fr,
    // Selectors
    qm: G1,
    ql: G1,
    qr: G1,
    qo: G1,
    qc: G1,
    // Permutation
    s1: G1,
    s2: G1,
    s3: G1,
    // [tau]_2
    x_2: G2,
}

impl PlonkVerificationKey {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        power: u64,
        n_public: usize,
        k1: Fr,
        k2: Fr,
        w: Fr,
        qm: G1,
        ql: G1,
        qr: G1,
        qo: G1,
        qc: G1,
        s1: G1,
        s2: G1,
        s3: G1,
        x_2: G2,
    ) -> Result<Self, VerificationKeyError> {
        if !(1..=MAX_PLONK_POWER).contains(&power) {
            return Err(VerificationKeyError::InvalidPower { power });
        }
        // The multiplicative order of w is a power of two, so it is exactly
        // 2^power iff w^(2^power) = 1 and w^(2^(power - 1)) = -1.
        let half = w.pow([1u64 << (power - 1)]);
        if half != -Fr::ONE {
            return Err(VerificationKeyError::InvalidRootOfUnity { power });
        }
        if k1 == Fr::ZERO {
            return Err(VerificationKeyError::ZeroCosetShift {
                field: VkCommitmentField::K1,
            });
        }
        if k2 == Fr::ZERO {
            return Err(VerificationKeyError::ZeroCosetShift {
                field: VkCommitmentField::K2,
            });
        }
        if n_public as u64 > 1u64 << power {
            return Err(VerificationKeyError::TooManyPublicInputs {
                num_public_inputs: n_public as u64,
            });
        }
        for (point, field) in [
            (&qm, VkCommitmentField::QM),
            (&ql, VkCommitmentField::QL),
            (&qr, VkCommitmentField::QR),
            (&qo, VkCommitmentField::QO),
            (&qc, VkCommitmentField::QC),
            (&s1, VkCommitmentField::S1),
            (&s2, VkCommitmentField::S2),
            (&s3, VkCommitmentField::S3),
        ] {
            checked_g1(point, field)?;
        }
        checked_g2(&x_2, VkCommitmentField::X_2)?;

        Ok(Self {
            power,
            n_public,
            k1,
            k2,
            w,
            qm,
            ql,
            qr,
            qo,
            qc,
            s1,
            s2,
            s3,
            x_2,
        })
    }

    pub fn power(&self) -> u64 {
        self.power
    }

    /// Size `n = 2^power` of the evaluation domain.
    pub fn domain_size(&self) -> u64 {
        1 << self.power
    }

    pub fn num_public_inputs(&self) -> usize {
        self.n_public
    }

    pub fn k1(&self) -> &Fr {
        &self.k1
    }

    pub fn k2(&self) -> &Fr {
        &self.k2
    }

    pub fn w(&self) -> &Fr {
        &self.w
    }

    pub fn qm(&self) -> &G1 {
        &self.qm
    }

    pub fn ql(&self) -> &G1 {
        &self.ql
    }

    pub fn qr(&self) -> &G1 {
        &self.qr
    }

    pub fn qo(&self) -> &G1 {
        &self.qo
    }

    pub fn qc(&self) -> &G1 {
        &self.qc
    }

    pub fn s1(&self) -> &G1 {
        &self.s1
    }

    pub fn s2(&self) -> &G1 {
        &self.s2
    }

    pub fn s3(&self) -> &G1 {
        &self.s3
    }

    pub fn x_2(&self) -> &G2 {
        &self.x_2
    }

    /// Selector and permutation commitments in transcript order.
    pub(crate) fn transcript_points(&self) -> [&G1; 8] {
        [
            &self.qm, &self.ql, &self.qr, &self.qo, &self.qc, &self.s1, &self.s2, &self.s3,
        ]
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(PLONK_VK_SIZE);
        out.extend_from_slice(&self.power.to_be_bytes());
        out.extend_from_slice(&(self.n_public as u64).to_be_bytes());
        for scalar in [self.k1, self.k2, self.w] {
            out.extend_from_slice(&scalar.into_be_bytes32());
        }
        for point in self.transcript_points() {
            write_g1(point, &mut out);
        }
        write_g2(&self.x_2, &mut out);
        debug_assert_eq!(out.len(), PLONK_VK_SIZE);
        out
    }
}

impl TryFrom<&[u8]> for PlonkVerificationKey {
    type Error = VerificationKeyError;

    fn try_from(raw_vk: &[u8]) -> Result<Self, Self::Error> {
        if raw_vk.len() != PLONK_VK_SIZE {
            return Err(VerificationKeyError::IncorrectBufferSize {
                expected_size: PLONK_VK_SIZE,
                actual_size: raw_vk.len(),
            });
        }

        let mut data = raw_vk;
        let power = read_vk_u64(&mut data, PLONK_VK_SIZE)?;
        let n_public = read_vk_u64(&mut data, PLONK_VK_SIZE)?;
        // Anything above u32 already exceeds the largest supported domain.
        let n_public = u32::try_from(n_public)
            .map_err(|_| VerificationKeyError::TooManyPublicInputs {
                num_public_inputs: n_public,
            })? as usize;

        let k1 = read_vk_fr(&mut data, VkCommitmentField::K1)?;
        let k2 = read_vk_fr(&mut data, VkCommitmentField::K2)?;
        let w = read_vk_fr(&mut data, VkCommitmentField::W)?;
        let qm = read_vk_g1(&mut data, VkCommitmentField::QM)?;
        let ql = read_vk_g1(&mut data, VkCommitmentField::QL)?;
        let qr = read_vk_g1(&mut data, VkCommitmentField::QR)?;
        let qo = read_vk_g1(&mut data, VkCommitmentField::QO)?;
        let qc = read_vk_g1(&mut data, VkCommitmentField::QC)?;
        let s1 = read_vk_g1(&mut data, VkCommitmentField::S1)?;
        let s2 = read_vk_g1(&mut data, VkCommitmentField::S2)?;
        let s3 = read_vk_g1(&mut data, VkCommitmentField::S3)?;
        let x_2 = read_vk_g2(&mut data, VkCommitmentField::X_2)?;

        Self::new(
            power, n_public, k1, k2, w, qm, ql, qr, qo, qc, s1, s2, s3, x_2,
        )
    }
}
