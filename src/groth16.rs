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

//! Groth16 verification over BN254.
//!
//! A proof `(A, B, C)` is accepted iff
//! `e(A, B) == e(alpha, beta) · e(vk_x, gamma) · e(C, delta)` where
//! `vk_x = IC[0] + Σ input[i] · IC[i + 1]`.

use crate::{
    check_public_input_number,
    curve::{linear_combination, pairing, pairing_product_is_identity},
    errors::VerifyError,
    key::Groth16VerificationKey,
    proof::Groth16Proof,
    Fr, G1Projective,
};
use ark_ec::{AffineRepr, CurveGroup};
use tracing::{debug, trace};

/// `IC[0] + Σ public_inputs[i] · IC[i + 1]`, accumulated from left to right.
pub fn compute_vk_x(
    vk: &Groth16VerificationKey,
    public_inputs: &[Fr],
) -> Result<G1Projective, VerifyError> {
    check_public_input_number(vk.num_public_inputs(), public_inputs.len())?;
    let (ic0, ic) = vk
        .ic()
        .split_first()
        .ok_or_else(|| VerifyError::malformed("verification key has an empty IC vector"))?;
    Ok(ic0.into_group() + linear_combination(ic, public_inputs)?)
}

/// Checks the proof with a single multi-pairing:
/// `e(-A, B) · e(alpha, beta) · e(vk_x, gamma) · e(C, delta) == 1`.
pub fn verify_proof(
    vk: &Groth16VerificationKey,
    proof: &Groth16Proof,
    public_inputs: &[Fr],
) -> Result<bool, VerifyError> {
    trace!("Verifying Groth16 proof with {} public inputs", public_inputs.len());
    let vk_x = compute_vk_x(vk, public_inputs)?.into_affine();

    let verified = pairing_product_is_identity(&[
        (-*proof.a(), *proof.b()),
        (*vk.alpha(), *vk.beta()),
        (vk_x, *vk.gamma()),
        (*proof.c(), *vk.delta()),
    ]);
    if !verified {
        debug!("Groth16 pairing check failed");
    }
    Ok(verified)
}

/// Evaluates the four pairings one by one and compares both sides of the
/// Groth16 equation. Slower than [`verify_proof`] and always agrees with it.
pub fn verify_proof_unbatched(
    vk: &Groth16VerificationKey,
    proof: &Groth16Proof,
    public_inputs: &[Fr],
) -> Result<bool, VerifyError> {
    let vk_x = compute_vk_x(vk, public_inputs)?.into_affine();

    let lhs = pairing(*proof.a(), *proof.b());
    let rhs = pairing(*vk.alpha(), *vk.beta())
        + pairing(vk_x, *vk.gamma())
        + pairing(*proof.c(), *vk.delta());
    Ok(lhs == rhs)
}
