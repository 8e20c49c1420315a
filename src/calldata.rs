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

//! Solidity calldata codec.
//!
//! Proofs travel as arrays of 32-byte big-endian words in the order the
//! snarkjs verifier contracts take them:
//!
//! - Groth16 (8 words): `A.x, A.y, B.x.c1, B.x.c0, B.y.c1, B.y.c0, C.x, C.y`.
//!   G2 coordinates put the imaginary part first, as the EIP-197 pairing
//!   precompile expects. snarkjs JSON files list them the other way around.
//! - PLONK (24 words): `A, B, C, Z, T1, T2, T3, Wxi, Wxiw` as `x, y` pairs,
//!   then `eval_a, eval_b, eval_c, eval_s1, eval_s2, eval_zw`.
//!
//! Public inputs follow the proof, one word each.

use crate::{
    constants::{EVM_WORD_SIZE, GROTH16_PROOF_WORDS, PLONK_PROOF_SIZE, PLONK_PROOF_WORDS},
    errors::FieldError,
    proof::{Groth16Proof, PlonkProof, ProofType},
    utils::{field_from_word, parse_u256, to_hex_string, write_g1, write_g2, IntoBEBytes32},
    Fr, PublicInput, Pubs,
};
use alloc::{string::String, vec::Vec};
use core::fmt::Write;
use snafu::Snafu;

#[derive(Debug, PartialEq, Snafu)]
pub enum CalldataError {
    #[snafu(display("Invalid calldata item #{index}: {cause}"))]
    InvalidItem { index: usize, cause: FieldError },
    #[snafu(display("Not enough calldata words. Expected at least: {expected}; Got: {actual}"))]
    NotEnoughWords { expected: usize, actual: usize },
    #[snafu(display("Public input #{index} is not a scalar field element: {cause}"))]
    PublicInputOutOfRange { index: usize, cause: FieldError },
    #[snafu(display("Incorrect proof size. Expected: {expected_size}; Got: {actual_size}"))]
    IncorrectProofSize {
        expected_size: usize,
        actual_size: usize,
    },
}

/// Proof and public inputs recovered from `exportSolidityCallData` text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolidityCalldata {
    pub proof: Vec<u8>,
    pub pubs: Vec<PublicInput>,
}

pub fn encode_groth16_proof(proof: &Groth16Proof) -> Vec<u8> {
    let mut out = Vec::with_capacity(GROTH16_PROOF_WORDS * EVM_WORD_SIZE);
    write_g1(proof.a(), &mut out);
    write_g2(proof.b(), &mut out);
    write_g1(proof.c(), &mut out);
    out
}

pub fn encode_plonk_proof(proof: &PlonkProof) -> Vec<u8> {
    let mut out = Vec::with_capacity(PLONK_PROOF_SIZE);
    for commitment in proof.commitments() {
        write_g1(commitment, &mut out);
    }
    for evaluation in proof.evaluations() {
        out.extend_from_slice(&evaluation.into_be_bytes32());
    }
    out
}

pub fn encode_public_inputs(inputs: &[Fr]) -> Vec<PublicInput> {
    inputs.iter().map(|input| input.into_be_bytes32()).collect()
}

/// Decodes public input words into scalars. Words that are not below the
/// scalar field modulus are rejected rather than reduced.
pub fn decode_public_inputs(pubs: &Pubs) -> Result<Vec<Fr>, CalldataError> {
    pubs.iter()
        .enumerate()
        .map(|(index, word)| {
            field_from_word::<Fr>(word)
                .map_err(|cause| CalldataError::PublicInputOutOfRange { index, cause })
        })
        .collect()
}

fn is_separator(c: char) -> bool {
    matches!(c, '[' | ']' | '"' | '\'' | ',') || c.is_whitespace()
}

/// Hex digits of an item that packs several words into one `0x` string, as
/// the pre-0.7 PLONK export does with the whole proof.
fn packed_digits(item: &str) -> Option<&str> {
    let digits = item.strip_prefix("0x").or_else(|| item.strip_prefix("0X"))?;
    (digits.len() > 2 * EVM_WORD_SIZE).then_some(digits)
}

fn parse_words<'a>(
    items: impl IntoIterator<Item = (usize, &'a str)>,
) -> Result<Vec<PublicInput>, CalldataError> {
    items
        .into_iter()
        .map(|(index, item)| {
            parse_u256(item)
                .map(IntoBEBytes32::into_be_bytes32)
                .map_err(|cause| CalldataError::InvalidItem { index, cause })
        })
        .collect()
}

/// Parses the text produced by snarkjs' `exportSolidityCallData`.
///
/// Brackets, quotes, commas and whitespace all act as separators, so both the
/// nested Groth16 form and the flat PLONK form are accepted. The first
/// `proof_words` items form the proof; the rest are the public inputs.
///
/// The proof may also come as a single `0x` blob of concatenated words
/// (`0x<proof>,[pubs]`). The blob is taken as the whole proof and must hold
/// exactly `proof_words` words.
pub fn parse_solidity_calldata(
    text: &str,
    proof_words: usize,
) -> Result<SolidityCalldata, CalldataError> {
    let items: Vec<&str> = text
        .split(is_separator)
        .filter(|item| !item.is_empty())
        .collect();

    if let Some(digits) = items.first().and_then(|item| packed_digits(item)) {
        let invalid = || CalldataError::InvalidItem {
            index: 0,
            cause: FieldError::InvalidNumber {
                value: items[0].to_string(),
            },
        };
        if digits.len() % (2 * EVM_WORD_SIZE) != 0 {
            return Err(invalid());
        }
        let proof = hex::decode(digits).map_err(|_| invalid())?;
        if proof.len() != proof_words * EVM_WORD_SIZE {
            return Err(CalldataError::IncorrectProofSize {
                expected_size: proof_words * EVM_WORD_SIZE,
                actual_size: proof.len(),
            });
        }
        let pubs = parse_words(items.iter().copied().enumerate().skip(1))?;
        return Ok(SolidityCalldata { proof, pubs });
    }

    let words = parse_words(items.iter().copied().enumerate())?;
    if words.len() < proof_words {
        return Err(CalldataError::NotEnoughWords {
            expected: proof_words,
            actual: words.len(),
        });
    }

    let (proof, pubs) = words.split_at(proof_words);
    Ok(SolidityCalldata {
        proof: proof.concat(),
        pubs: pubs.to_vec(),
    })
}

fn quoted_words<'a>(out: &mut String, words: impl IntoIterator<Item = &'a [u8]>) {
    out.push('[');
    for (i, word) in words.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        // Writing into a String cannot fail.
        let _ = write!(out, "\"{}\"", to_hex_string(word));
    }
    out.push(']');
}

/// Renders proof and public inputs the way `exportSolidityCallData` does:
/// `[a],[[b0],[b1]],[c],[pubs]` for Groth16 and `[proof],[pubs]` for PLONK.
pub fn format_solidity_calldata(proof: &ProofType, pubs: &Pubs) -> Result<String, CalldataError> {
    let (words, expected_words) = match proof {
        ProofType::Groth16(bytes) => (bytes, GROTH16_PROOF_WORDS),
        ProofType::Plonk(bytes) => (bytes, PLONK_PROOF_WORDS),
    };
    if words.len() != expected_words * EVM_WORD_SIZE {
        return Err(CalldataError::IncorrectProofSize {
            expected_size: expected_words * EVM_WORD_SIZE,
            actual_size: words.len(),
        });
    }

    let words: Vec<&[u8]> = words.chunks_exact(EVM_WORD_SIZE).collect();
    let mut out = String::new();
    match proof {
        ProofType::Groth16(_) => {
            quoted_words(&mut out, words[0..2].iter().copied());
            out.push_str(",[");
            quoted_words(&mut out, words[2..4].iter().copied());
            out.push(',');
            quoted_words(&mut out, words[4..6].iter().copied());
            out.push_str("],");
            quoted_words(&mut out, words[6..8].iter().copied());
        }
        ProofType::Plonk(_) => quoted_words(&mut out, words.iter().copied()),
    }
    out.push(',');
    quoted_words(&mut out, pubs.iter().map(|word| &word[..]));
    Ok(out)
}
