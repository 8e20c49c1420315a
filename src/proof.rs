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
    constants::{
        GROTH16_PROOF_SIZE, NUM_PLONK_COMMITMENTS, NUM_PLONK_EVALUATIONS, PLONK_PROOF_SIZE,
    },
    errors::{ConversionError, FieldError, GroupError},
    utils::{check_g1, check_g2, read_fr, read_g1, read_g2},
    Fr, G1, G2,
};
use alloc::boxed::Box;
use ark_ec::AffineRepr;
use ark_ff::AdditiveGroup;
use core::fmt;
use snafu::Snafu;

#[derive(Debug, PartialEq, Snafu)]
pub enum ProofError {
    #[snafu(display("Incorrect buffer size. Expected: {expected_size}; Got: {actual_size}",))]
    IncorrectBufferSize {
        expected_size: usize,
        actual_size: usize,
    },
    #[snafu(display("Group element conversion error: {conv_error}"))]
    GroupConversionError { conv_error: ConversionError },
    #[snafu(display("Invalid evaluation '{field}': {cause}"))]
    InvalidEvaluation {
        field: &'static str,
        cause: FieldError,
    },
}

/// Proof bytes tagged with the protocol they belong to.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ProofType {
    Groth16(Box<[u8]>),
    Plonk(Box<[u8]>),
}

impl ProofType {
    pub fn protocol(&self) -> &'static str {
        match self {
            ProofType::Groth16(_) => "groth16",
            ProofType::Plonk(_) => "plonk",
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            ProofType::Groth16(bytes) | ProofType::Plonk(bytes) => bytes,
        }
    }
}

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum ProofCommitmentField {
    A,
    B,
    C,
    Z,
    T1,
    T2,
    T3,
    WXI,
    WXIW,
}

impl ProofCommitmentField {
    /// PLONK commitments in wire order.
    pub(crate) const PLONK: [ProofCommitmentField; NUM_PLONK_COMMITMENTS] = [
        ProofCommitmentField::A,
        ProofCommitmentField::B,
        ProofCommitmentField::C,
        ProofCommitmentField::Z,
        ProofCommitmentField::T1,
        ProofCommitmentField::T2,
        ProofCommitmentField::T3,
        ProofCommitmentField::WXI,
        ProofCommitmentField::WXIW,
    ];
}

impl fmt::Display for ProofCommitmentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProofCommitmentField::A => write!(f, "A"),
            ProofCommitmentField::B => write!(f, "B"),
            ProofCommitmentField::C => write!(f, "C"),
            ProofCommitmentField::Z => write!(f, "Z"),
            ProofCommitmentField::T1 => write!(f, "T1"),
            ProofCommitmentField::T2 => write!(f, "T2"),
            ProofCommitmentField::T3 => write!(f, "T3"),
            ProofCommitmentField::WXI => write!(f, "Wxi"),
            ProofCommitmentField::WXIW => write!(f, "Wxiw"),
        }
    }
}

pub(crate) const PLONK_EVALUATION_NAMES: [&str; NUM_PLONK_EVALUATIONS] =
    ["eval_a", "eval_b", "eval_c", "eval_s1", "eval_s2", "eval_zw"];

fn conversion_error(group: GroupError, field: ProofCommitmentField) -> ProofError {
    ProofError::GroupConversionError {
        conv_error: ConversionError {
            group,
            field: Some(field.into()),
        },
    }
}

fn check_size(raw_proof: &[u8], expected_size: usize) -> Result<(), ProofError> {
    if raw_proof.len() != expected_size {
        return Err(ProofError::IncorrectBufferSize {
            expected_size,
            actual_size: raw_proof.len(),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Groth16Proof {
    a: G1,
    b: G2,
    c: G1,
}

impl Groth16Proof {
    /// Builds a proof from affine points, checking that each one is a valid
    /// group element.
    pub fn new(a: G1, b: G2, c: G1) -> Result<Self, ProofError> {
        check_g1(&a).map_err(|e| conversion_error(e, ProofCommitmentField::A))?;
        check_g2(&b).map_err(|e| conversion_error(e, ProofCommitmentField::B))?;
        check_g1(&c).map_err(|e| conversion_error(e, ProofCommitmentField::C))?;
        Ok(Self { a, b, c })
    }

    pub fn a(&self) -> &G1 {
        &self.a
    }

    pub fn b(&self) -> &G2 {
        &self.b
    }

    pub fn c(&self) -> &G1 {
        &self.c
    }
}

impl TryFrom<&[u8]> for Groth16Proof {
    type Error = ProofError;

    fn try_from(raw_proof: &[u8]) -> Result<Self, Self::Error> {
        check_size(raw_proof, GROTH16_PROOF_SIZE)?;

        let mut data = raw_proof;
        let a = read_g1(&mut data).map_err(|e| conversion_error(e, ProofCommitmentField::A))?;
        let b = read_g2(&mut data).map_err(|e| conversion_error(e, ProofCommitmentField::B))?;
        let c = read_g1(&mut data).map_err(|e| conversion_error(e, ProofCommitmentField::C))?;

        Ok(Self { a, b, c })
    }
}

/// snarkjs PLONK proof: nine G1 commitments followed by six opening
/// evaluations.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PlonkProof {
    commitments: [G1; NUM_PLONK_COMMITMENTS],
    evaluations: [Fr; NUM_PLONK_EVALUATIONS],
}

impl PlonkProof {
    /// `commitments` are `[A, B, C, Z, T1, T2, T3, Wxi, Wxiw]` and
    /// `evaluations` are `[eval_a, eval_b, eval_c, eval_s1, eval_s2, eval_zw]`.
    pub fn new(
        commitments: [G1; NUM_PLONK_COMMITMENTS],
        evaluations: [Fr; NUM_PLONK_EVALUATIONS],
    ) -> Result<Self, ProofError> {
        for (commitment, field) in commitments.iter().zip(ProofCommitmentField::PLONK) {
            check_g1(commitment).map_err(|e| conversion_error(e, field))?;
        }
        Ok(Self {
            commitments,
            evaluations,
        })
    }

    pub fn commitments(&self) -> &[G1; NUM_PLONK_COMMITMENTS] {
        &self.commitments
    }

    pub fn evaluations(&self) -> &[Fr; NUM_PLONK_EVALUATIONS] {
        &self.evaluations
    }

    pub fn a(&self) -> &G1 {
        &self.commitments[0]
    }

    pub fn b(&self) -> &G1 {
        &self.commitments[1]
    }

    pub fn c(&self) -> &G1 {
        &self.commitments[2]
    }

    pub fn z(&self) -> &G1 {
        &self.commitments[3]
    }

    pub fn t1(&self) -> &G1 {
        &self.commitments[4]
    }

    pub fn t2(&self) -> &G1 {
        &self.commitments[5]
    }

    pub fn t3(&self) -> &G1 {
        &self.commitments[6]
    }

    pub fn wxi(&self) -> &G1 {
        &self.commitments[7]
    }

    pub fn wxiw(&self) -> &G1 {
        &self.commitments[8]
    }

    pub fn eval_a(&self) -> Fr {
        self.evaluations[0]
    }

    pub fn eval_b(&self) -> Fr {
        self.evaluations[1]
    }

    pub fn eval_c(&self) -> Fr {
        self.evaluations[2]
    }

    pub fn eval_s1(&self) -> Fr {
        self.evaluations[3]
    }

    pub fn eval_s2(&self) -> Fr {
        self.evaluations[4]
    }

    pub fn eval_zw(&self) -> Fr {
        self.evaluations[5]
    }
}

impl TryFrom<&[u8]> for PlonkProof {
    type Error = ProofError;

    fn try_from(raw_proof: &[u8]) -> Result<Self, Self::Error> {
        check_size(raw_proof, PLONK_PROOF_SIZE)?;

        let mut data = raw_proof;
        let mut commitments = [G1::zero(); NUM_PLONK_COMMITMENTS];
        for (commitment, field) in commitments.iter_mut().zip(ProofCommitmentField::PLONK) {
            *commitment = read_g1(&mut data).map_err(|e| conversion_error(e, field))?;
        }
        let mut evaluations = [Fr::ZERO; NUM_PLONK_EVALUATIONS];
        for (evaluation, field) in evaluations.iter_mut().zip(PLONK_EVALUATION_NAMES) {
            *evaluation = read_fr(&mut data)
                .map_err(|cause| ProofError::InvalidEvaluation { field, cause })?;
        }

        Ok(Self {
            commitments,
            evaluations,
        })
    }
}
