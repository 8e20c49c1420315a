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

use crate::{
    constants::{GROUP_ELEMENT_SIZE, NUM_PLONK_V_CHALLENGES},
    key::PlonkVerificationKey,
    proof::PlonkProof,
    utils::IntoBEBytes32,
    EVMWord, Fr, G1,
};
use ark_ec::AffineRepr;
use ark_ff::PrimeField;
use sha3::{Digest, Keccak256};

/// Keccak-256 Fiat-Shamir transcript with the encoding of the snarkjs
/// Solidity verifiers: points are absorbed as `x ‖ y` and scalars as 32-byte
/// big-endian words. Drawing a challenge resets the hasher.
#[derive(Debug, Clone, Default)]
pub(crate) struct Keccak256Transcript {
    hasher: Keccak256,
}

impl Keccak256Transcript {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_scalar(&mut self, scalar: &Fr) {
        self.hasher.update(scalar.into_be_bytes32());
    }

    pub(crate) fn add_g1(&mut self, point: &G1) {
        if point.is_zero() {
            self.hasher.update([0u8; GROUP_ELEMENT_SIZE]);
        } else {
            self.hasher.update(point.x.into_be_bytes32());
            self.hasher.update(point.y.into_be_bytes32());
        }
    }

    pub(crate) fn get_challenge(&mut self) -> Fr {
        let hash: EVMWord = self.hasher.finalize_reset().into();
        Fr::from_be_bytes_mod_order(&hash)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlonkChallenges {
    pub(crate) beta: Fr,
    pub(crate) gamma: Fr,
    pub(crate) alpha: Fr,
    pub(crate) xi: Fr,
    // v[0] = v1, ..., v[4] = v5
    pub(crate) v: [Fr; NUM_PLONK_V_CHALLENGES],
    pub(crate) u: Fr,
}

pub(crate) fn generate_plonk_challenges(
    vk: &PlonkVerificationKey,
    proof: &PlonkProof,
    public_inputs: &[Fr],
) -> PlonkChallenges {
    let mut transcript = Keccak256Transcript::new();

    for point in vk.transcript_points() {
        transcript.add_g1(point);
    }
    for input in public_inputs {
        transcript.add_scalar(input);
    }
    transcript.add_g1(proof.a());
    transcript.add_g1(proof.b());
    transcript.add_g1(proof.c());
    let beta = transcript.get_challenge();

    transcript.add_scalar(&beta);
    let gamma = transcript.get_challenge();

    transcript.add_scalar(&beta);
    transcript.add_scalar(&gamma);
    transcript.add_g1(proof.z());
    let alpha = transcript.get_challenge();

    transcript.add_scalar(&alpha);
    transcript.add_g1(proof.t1());
    transcript.add_g1(proof.t2());
    transcript.add_g1(proof.t3());
    let xi = transcript.get_challenge();

    transcript.add_scalar(&xi);
    for evaluation in proof.evaluations() {
        transcript.add_scalar(evaluation);
    }
    let v1 = transcript.get_challenge();
    let mut power = v1;
    let v = core::array::from_fn(|i| {
        if i > 0 {
            power *= v1;
        }
        power
    });

    transcript.add_g1(proof.wxi());
    transcript.add_g1(proof.wxiw());
    let u = transcript.get_challenge();

    PlonkChallenges {
        beta,
        gamma,
        alpha,
        xi,
        v,
        u,
    }
}
