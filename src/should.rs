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

use super::*;
use crate::{
    calldata::{
        encode_groth16_proof, encode_plonk_proof, encode_public_inputs, format_solidity_calldata,
        parse_solidity_calldata,
    },
    constants::{EVM_WORD_SIZE, GROTH16_PROOF_WORDS, PLONK_PROOF_WORDS},
    testing,
};
use ark_ff::{BigInteger, PrimeField};
use rstest::rstest;
use tracing_test::traced_test;

struct TestData {
    vk: Vec<u8>,
    proof: ProofType,
    pubs: Vec<PublicInput>,
}

fn groth16_data() -> TestData {
    let (vk, proof, pubs) = testing::groth16_fixture();
    TestData {
        vk: vk.to_bytes(),
        proof: ProofType::Groth16(encode_groth16_proof(&proof).into()),
        pubs: encode_public_inputs(&pubs),
    }
}

fn plonk_data() -> TestData {
    let (vk, proof, pubs) = testing::plonk_fixture();
    TestData {
        vk: vk.to_bytes(),
        proof: ProofType::Plonk(encode_plonk_proof(&proof).into()),
        pubs: encode_public_inputs(&pubs),
    }
}

fn with_bytes(proof: &ProofType, bytes: Vec<u8>) -> ProofType {
    match proof {
        ProofType::Groth16(_) => ProofType::Groth16(bytes.into()),
        ProofType::Plonk(_) => ProofType::Plonk(bytes.into()),
    }
}

fn modulus_word<F: PrimeField>() -> PublicInput {
    let mut word = [0u8; EVM_WORD_SIZE];
    word.copy_from_slice(&F::MODULUS.to_bytes_be());
    word
}

#[rstest]
#[case::groth16(groth16_data())]
#[case::plonk(plonk_data())]
fn verify_a_valid_proof(#[case] data: TestData) {
    assert_eq!(verify(&data.vk, &data.proof, &data.pubs), Ok(true));
}

#[rstest]
#[case::groth16(groth16_data())]
#[case::plonk(plonk_data())]
fn reject_a_proof_for_another_public_input(#[case] data: TestData) {
    let pubs = encode_public_inputs(&[Fr::from(7u64)]);
    assert_eq!(verify(&data.vk, &data.proof, &pubs), Ok(false));
}

#[rstest]
#[case::groth16(groth16_data())]
#[case::plonk(plonk_data())]
fn return_the_same_result_on_repeated_and_concurrent_calls(#[case] data: TestData) {
    let first = verify(&data.vk, &data.proof, &data.pubs);
    assert_eq!(verify(&data.vk, &data.proof, &data.pubs), first);

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| verify(&data.vk, &data.proof, &data.pubs)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), first);
        }
    });
}

#[test]
fn share_a_parsed_key_between_threads() {
    let (vk, proof, pubs) = testing::groth16_fixture();
    let proof = encode_groth16_proof(&proof);
    let pubs = encode_public_inputs(&pubs);
    let other_pubs = encode_public_inputs(&[Fr::from(7u64)]);

    std::thread::scope(|s| {
        let accepted = s.spawn(|| verify_groth16(&vk, &proof, &pubs));
        let rejected = s.spawn(|| verify_groth16(&vk, &proof, &other_pubs));
        assert_eq!(accepted.join().unwrap(), Ok(true));
        assert_eq!(rejected.join().unwrap(), Ok(false));
    });
}

#[test]
fn verify_a_plonk_proof_with_a_parsed_key() {
    let (vk, proof, pubs) = testing::plonk_fixture();
    assert_eq!(
        verify_plonk(&vk, &encode_plonk_proof(&proof), &encode_public_inputs(&pubs)),
        Ok(true)
    );
}

#[rstest]
#[case::groth16(groth16_data(), GROTH16_PROOF_WORDS)]
#[case::plonk(plonk_data(), PLONK_PROOF_WORDS)]
fn verify_proofs_read_from_solidity_calldata(#[case] data: TestData, #[case] proof_words: usize) {
    let text = format_solidity_calldata(&data.proof, &data.pubs).unwrap();
    let calldata = parse_solidity_calldata(&text, proof_words).unwrap();

    let proof = with_bytes(&data.proof, calldata.proof);
    assert_eq!(proof, data.proof);
    assert_eq!(verify(&data.vk, &proof, &calldata.pubs), Ok(true));
}

#[test]
fn reject_the_all_zero_groth16_calldata() {
    let data = groth16_data();
    let calldata = parse_solidity_calldata(
        r#"["0x00", "0x00"],[["0x00", "0x00"],["0x00", "0x00"]],["0x00", "0x00"],["0"]"#,
        GROTH16_PROOF_WORDS,
    )
    .unwrap();
    let proof = ProofType::Groth16(calldata.proof.into());
    assert_eq!(verify(&data.vk, &proof, &calldata.pubs), Ok(false));
}

#[test]
fn reject_the_all_zero_plonk_proof() {
    let data = plonk_data();
    let proof = ProofType::Plonk(vec![0u8; PLONK_PROOF_SIZE].into());
    assert_eq!(
        verify(&data.vk, &proof, &[[0u8; EVM_WORD_SIZE]]),
        Ok(false)
    );
}

#[rstest]
#[case::groth16(groth16_data())]
#[case::plonk(plonk_data())]
fn reject_every_single_bit_mutation_of_the_proof(#[case] data: TestData) {
    let raw = data.proof.bytes();
    for word in 0..raw.len() / EVM_WORD_SIZE {
        // A low bit keeps the word in range; a high one pushes it over the modulus.
        for (byte, bit) in [(EVM_WORD_SIZE - 1, 0), (EVM_WORD_SIZE / 2, 3), (0, 6)] {
            let mut mutated = raw.to_vec();
            mutated[word * EVM_WORD_SIZE + byte] ^= 1 << bit;
            let result = verify(&data.vk, &with_bytes(&data.proof, mutated), &data.pubs);
            assert!(
                matches!(result, Ok(false) | Err(VerifyError::MalformedInput { .. })),
                "word {word}, byte {byte}, bit {bit}: {result:?}"
            );
        }
    }
}

#[test]
fn never_accept_a_groth16_proof_with_swapped_g2_components() {
    let data = groth16_data();
    let mut raw = data.proof.bytes().to_vec();
    // B.x.c1 <-> B.x.c0 and B.y.c1 <-> B.y.c0
    for first in [2, 4] {
        let (lhs, rhs) = raw.split_at_mut((first + 1) * EVM_WORD_SIZE);
        lhs[first * EVM_WORD_SIZE..].swap_with_slice(&mut rhs[..EVM_WORD_SIZE]);
    }
    let result = verify(&data.vk, &ProofType::Groth16(raw.into()), &data.pubs);
    assert!(matches!(
        result,
        Ok(false) | Err(VerifyError::MalformedInput { .. })
    ));
}

#[traced_test]
#[test]
fn log_why_a_proof_was_rejected() {
    let data = groth16_data();
    let pubs = encode_public_inputs(&[Fr::from(7u64)]);
    assert_eq!(verify(&data.vk, &data.proof, &pubs), Ok(false));
    assert!(logs_contain("Groth16 pairing check failed"));
}

mod reject {
    use super::*;

    #[rstest]
    #[case::groth16(groth16_data())]
    #[case::plonk(plonk_data())]
    fn a_coordinate_not_below_the_base_field_modulus(#[case] data: TestData) {
        let mut raw = data.proof.bytes().to_vec();
        raw[..EVM_WORD_SIZE].copy_from_slice(&modulus_word::<Fq>());
        assert!(matches!(
            verify(&data.vk, &with_bytes(&data.proof, raw), &data.pubs),
            Err(VerifyError::MalformedInput { .. })
        ));
    }

    #[rstest]
    #[case::groth16(groth16_data())]
    #[case::plonk(plonk_data())]
    fn a_public_input_not_below_the_scalar_field_modulus(#[case] data: TestData) {
        let pubs = [modulus_word::<Fr>()];
        assert!(matches!(
            verify(&data.vk, &data.proof, &pubs),
            Err(VerifyError::MalformedInput { .. })
        ));
    }

    #[rstest]
    #[case::groth16(groth16_data())]
    #[case::plonk(plonk_data())]
    fn a_public_input_count_mismatch_before_looking_at_the_proof(#[case] data: TestData) {
        let pubs = vec![[0u8; EVM_WORD_SIZE]; 2];
        let expected = Err(VerifyError::InputLengthMismatch {
            expected: 1,
            actual: 2,
        });
        assert_eq!(verify(&data.vk, &data.proof, &pubs), expected);

        let garbage = with_bytes(&data.proof, vec![0xff; 5]);
        assert_eq!(verify(&data.vk, &garbage, &pubs), expected);
        assert_eq!(
            verify(&data.vk, &data.proof, &[]),
            Err(VerifyError::InputLengthMismatch {
                expected: 1,
                actual: 0
            })
        );
    }

    #[rstest]
    #[case::groth16(groth16_data())]
    #[case::plonk(plonk_data())]
    fn a_truncated_proof(#[case] data: TestData) {
        let raw = data.proof.bytes();
        let truncated = with_bytes(&data.proof, raw[..raw.len() - 1].to_vec());
        assert!(matches!(
            verify(&data.vk, &truncated, &data.pubs),
            Err(VerifyError::MalformedInput { .. })
        ));
    }

    #[rstest]
    #[case::groth16(groth16_data())]
    #[case::plonk(plonk_data())]
    fn a_truncated_key(#[case] data: TestData) {
        assert!(matches!(
            verify(&data.vk[..data.vk.len() - 1], &data.proof, &data.pubs),
            Err(VerifyError::MalformedInput { .. })
        ));
    }

    #[test]
    fn a_plonk_key_used_for_a_groth16_proof() {
        let groth16 = groth16_data();
        let plonk = plonk_data();
        assert!(matches!(
            verify(&plonk.vk, &groth16.proof, &groth16.pubs),
            Err(VerifyError::MalformedInput { .. })
        ));
    }

    #[test]
    fn the_single_zero_byte_plonk_proof() {
        let data = plonk_data();
        let proof = ProofType::Plonk(vec![0u8].into());
        assert!(matches!(
            verify(&data.vk, &proof, &[[0u8; EVM_WORD_SIZE]]),
            Err(VerifyError::MalformedInput { .. })
        ));
    }
}

#[cfg(feature = "json")]
mod snarkjs_artifacts {
    use super::*;
    use crate::json::{
        groth16_proof_to_json, groth16_vk_to_json, parse_groth16_proof, parse_groth16_vk,
        parse_plonk_proof, parse_plonk_vk, parse_public_inputs, plonk_proof_to_json,
        plonk_vk_to_json, public_inputs_to_json,
    };

    #[test]
    fn verify_a_groth16_proof_loaded_from_json() {
        let (vk, proof, pubs) = testing::groth16_fixture();
        let vk = parse_groth16_vk(&groth16_vk_to_json(&vk).unwrap()).unwrap();
        let proof = parse_groth16_proof(&groth16_proof_to_json(&proof).unwrap()).unwrap();
        let pubs = parse_public_inputs(&public_inputs_to_json(&pubs).unwrap()).unwrap();

        assert_eq!(groth16::verify_proof(&vk, &proof, &pubs), Ok(true));
        assert_eq!(
            verify_groth16(&vk, &encode_groth16_proof(&proof), &encode_public_inputs(&pubs)),
            Ok(true)
        );
    }

    #[test]
    fn verify_a_plonk_proof_loaded_from_json() {
        let (vk, proof, pubs) = testing::plonk_fixture();
        let vk = parse_plonk_vk(&plonk_vk_to_json(&vk).unwrap()).unwrap();
        let proof = parse_plonk_proof(&plonk_proof_to_json(&proof).unwrap()).unwrap();
        let pubs = parse_public_inputs(&public_inputs_to_json(&pubs).unwrap()).unwrap();

        assert_eq!(plonk::verify_proof(&vk, &proof, &pubs), Ok(true));
    }

    #[test]
    fn surface_json_errors_as_malformed_input() {
        let error: VerifyError = parse_public_inputs("[6]").unwrap_err().into();
        assert!(matches!(error, VerifyError::MalformedInput { .. }));
    }
}

/// snarkjs artifacts and `exportSolidityCallData` text for two small circuits:
/// a Groth16 proof with three public inputs and a PLONK proof with one.
#[cfg(feature = "json")]
mod golden_artifacts {
    use super::*;
    use crate::{
        json::{
            parse_groth16_proof, parse_groth16_vk, parse_plonk_proof, parse_plonk_vk,
            parse_public_inputs,
        },
        utils::IntoBEBytes32,
    };
    use ark_ec::AffineRepr;

    const GROTH16_VK: &str = include_str!("../resources/groth16/verification_key.json");
    const GROTH16_PROOF: &str = include_str!("../resources/groth16/proof.json");
    const GROTH16_PUBLIC: &str = include_str!("../resources/groth16/public.json");
    const GROTH16_CALLDATA: &str = include_str!("../resources/groth16/calldata.txt");
    const PLONK_VK: &str = include_str!("../resources/plonk/verification_key.json");
    const PLONK_PROOF: &str = include_str!("../resources/plonk/proof.json");
    const PLONK_PUBLIC: &str = include_str!("../resources/plonk/public.json");
    const PLONK_CALLDATA: &str = include_str!("../resources/plonk/calldata.txt");
    const PLONK_CALLDATA_PACKED: &str = include_str!("../resources/plonk/calldata_packed.txt");

    fn golden_groth16() -> TestData {
        let vk = parse_groth16_vk(GROTH16_VK).unwrap();
        let proof = parse_groth16_proof(GROTH16_PROOF).unwrap();
        let pubs = parse_public_inputs(GROTH16_PUBLIC).unwrap();
        TestData {
            vk: vk.to_bytes(),
            proof: ProofType::Groth16(encode_groth16_proof(&proof).into()),
            pubs: encode_public_inputs(&pubs),
        }
    }

    fn golden_plonk() -> TestData {
        let vk = parse_plonk_vk(PLONK_VK).unwrap();
        let proof = parse_plonk_proof(PLONK_PROOF).unwrap();
        let pubs = parse_public_inputs(PLONK_PUBLIC).unwrap();
        TestData {
            vk: vk.to_bytes(),
            proof: ProofType::Plonk(encode_plonk_proof(&proof).into()),
            pubs: encode_public_inputs(&pubs),
        }
    }

    #[test]
    fn verify_the_json_artifacts() {
        let vk = parse_groth16_vk(GROTH16_VK).unwrap();
        let proof = parse_groth16_proof(GROTH16_PROOF).unwrap();
        let pubs = parse_public_inputs(GROTH16_PUBLIC).unwrap();
        assert_eq!(pubs, vec![Fr::from(33u64), Fr::from(3u64), Fr::from(11u64)]);
        assert_eq!(groth16::verify_proof(&vk, &proof, &pubs), Ok(true));

        let vk = parse_plonk_vk(PLONK_VK).unwrap();
        let proof = parse_plonk_proof(PLONK_PROOF).unwrap();
        let pubs = parse_public_inputs(PLONK_PUBLIC).unwrap();
        assert_eq!(vk.domain_size(), 8);
        assert!(vk.qc().is_zero());
        assert_eq!(plonk::verify_proof(&vk, &proof, &pubs), Ok(true));
    }

    #[rstest]
    #[case::groth16(golden_groth16(), GROTH16_CALLDATA, GROTH16_PROOF_WORDS)]
    #[case::plonk(golden_plonk(), PLONK_CALLDATA, PLONK_PROOF_WORDS)]
    #[case::plonk_packed(golden_plonk(), PLONK_CALLDATA_PACKED, PLONK_PROOF_WORDS)]
    fn verify_the_exported_calldata(
        #[case] data: TestData,
        #[case] text: &str,
        #[case] proof_words: usize,
    ) {
        let calldata = parse_solidity_calldata(text, proof_words).unwrap();
        let proof = with_bytes(&data.proof, calldata.proof);

        assert_eq!(proof, data.proof);
        assert_eq!(calldata.pubs, data.pubs);
        assert_eq!(verify(&data.vk, &proof, &calldata.pubs), Ok(true));
    }

    #[rstest]
    #[case::groth16(golden_groth16(), GROTH16_CALLDATA)]
    #[case::plonk(golden_plonk(), PLONK_CALLDATA)]
    fn format_calldata_that_matches_the_export(#[case] data: TestData, #[case] text: &str) {
        let formatted = format_solidity_calldata(&data.proof, &data.pubs).unwrap();
        let squash = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
        assert_eq!(squash(&formatted), squash(text));
    }

    #[rstest]
    #[case::groth16(golden_groth16())]
    #[case::plonk(golden_plonk())]
    fn reject_the_exported_proof_for_another_statement(#[case] mut data: TestData) {
        data.pubs[0] = Fr::from(34u64).into_be_bytes32();
        assert_eq!(verify(&data.vk, &data.proof, &data.pubs), Ok(false));
    }
}
