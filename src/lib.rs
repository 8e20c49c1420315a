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

#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

pub mod calldata;
mod constants;
pub mod curve;
pub mod errors;
pub mod groth16;
#[cfg(feature = "json")]
pub mod json;
pub mod key;
pub mod plonk;
pub mod proof;
mod srs;
mod transcript;
mod types;
mod utils;

use crate::calldata::decode_public_inputs;
use errors::VerifyError;
use key::{Groth16VerificationKey, PlonkVerificationKey};
use proof::{Groth16Proof, PlonkProof};
use tracing::{debug, trace};

pub use constants::{GROTH16_PROOF_SIZE, PLONK_PROOF_SIZE, PLONK_VK_SIZE};
pub use proof::ProofType;
pub use types::*;

extern crate alloc;
extern crate core;

/// Verifies `proof_type` against the serialized key `vk_bytes`.
///
/// The key layout follows the protocol of the proof: see
/// [`Groth16VerificationKey`] and [`PlonkVerificationKey`]. Returns `Ok(false)`
/// for a well-formed proof that does not verify.
pub fn verify(vk_bytes: &[u8], proof_type: &ProofType, pubs: &Pubs) -> Result<bool, VerifyError> {
    trace!(
        "Verifying {} proof ({} bytes key, {} public inputs)",
        proof_type.protocol(),
        vk_bytes.len(),
        pubs.len()
    );
    match proof_type {
        ProofType::Groth16(proof_bytes) => {
            let vk = Groth16VerificationKey::try_from(vk_bytes).inspect_err(|e| {
                debug!("Cannot parse Groth16 verification key: {e}");
            })?;
            verify_groth16(&vk, proof_bytes, pubs)
        }
        ProofType::Plonk(proof_bytes) => {
            let vk = PlonkVerificationKey::try_from(vk_bytes).inspect_err(|e| {
                debug!("Cannot parse PLONK verification key: {e}");
            })?;
            verify_plonk(&vk, proof_bytes, pubs)
        }
    }
}

/// Verifies Groth16 calldata against an already parsed key.
pub fn verify_groth16(
    vk: &Groth16VerificationKey,
    proof_bytes: &[u8],
    pubs: &Pubs,
) -> Result<bool, VerifyError> {
    check_public_input_number(vk.num_public_inputs(), pubs.len())?;
    let public_inputs = decode_public_inputs(pubs).inspect_err(|e| {
        debug!("Cannot decode public inputs: {e}");
    })?;
    let proof = Groth16Proof::try_from(proof_bytes).inspect_err(|e| {
        debug!("Cannot decode Groth16 proof: {e}");
    })?;
    groth16::verify_proof(vk, &proof, &public_inputs)
}

/// Verifies PLONK calldata against an already parsed key.
pub fn verify_plonk(
    vk: &PlonkVerificationKey,
    proof_bytes: &[u8],
    pubs: &Pubs,
) -> Result<bool, VerifyError> {
    check_public_input_number(vk.num_public_inputs(), pubs.len())?;
    let public_inputs = decode_public_inputs(pubs).inspect_err(|e| {
        debug!("Cannot decode public inputs: {e}");
    })?;
    let proof = PlonkProof::try_from(proof_bytes).inspect_err(|e| {
        debug!("Cannot decode PLONK proof: {e}");
    })?;
    plonk::verify_proof(vk, &proof, &public_inputs)
}

fn check_public_input_number(expected: usize, actual: usize) -> Result<(), VerifyError> {
    if expected != actual {
        debug!("Public input count mismatch: expected {expected}, got {actual}");
        return Err(VerifyError::InputLengthMismatch { expected, actual });
    }
    Ok(())
}


#[cfg(test)]
mod should;
