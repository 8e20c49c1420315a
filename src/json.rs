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

//! Loading and writing snarkjs artifacts: `verification_key.json`,
//! `proof.json` and `public.json` for both protocols.
//!
//! Numbers are decimal (or `0x` hexadecimal) strings. Points are projective
//! triples with `z = 1`; the point at infinity is exactly `(0, 1, 0)`. G2
//! coordinates are written `[c0, c1]`, real part first, which is the
//! opposite of the calldata order.

use crate::{
    errors::{FieldError, GroupError},
    key::{Groth16VerificationKey, PlonkVerificationKey, VerificationKeyError},
    proof::{Groth16Proof, PlonkProof, ProofError},
    utils::{parse_field, read_g1, read_g2, IntoBEBytes32},
    Fq, Fr, G1, G2, U256,
};
use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};
use ark_ec::AffineRepr;
use ark_ff::{AdditiveGroup, Field, PrimeField};
use serde::{Deserialize, Serialize};
use snafu::Snafu;

const CURVE: &str = "bn128";
const GROTH16: &str = "groth16";
const PLONK: &str = "plonk";

#[derive(Debug, PartialEq, Snafu)]
pub enum JsonError {
    #[snafu(display("Invalid JSON: {message}"))]
    Syntax { message: String },
    #[snafu(display("Unexpected protocol '{actual}'; expected '{expected}'"))]
    WrongProtocol {
        expected: &'static str,
        actual: String,
    },
    #[snafu(display("Unsupported curve '{curve}'"))]
    UnsupportedCurve { curve: String },
    #[snafu(display("Invalid number for field '{field}': {cause}"))]
    InvalidNumber { field: String, cause: FieldError },
    #[snafu(display("Invalid point for field '{field}': {cause}"))]
    InvalidPoint { field: String, cause: GroupError },
    #[snafu(display("Point '{field}' is neither affine (z = 1) nor the point at infinity"))]
    NotNormalized { field: String },
    #[snafu(display("nPublic is {n_public} but IC has {ic_len} points"))]
    InconsistentInputCount { n_public: usize, ic_len: usize },
    #[snafu(display("Invalid verification key: {cause}"))]
    InvalidKey { cause: VerificationKeyError },
    #[snafu(display("Invalid proof: {cause}"))]
    InvalidProof { cause: ProofError },
}

impl From<serde_json::Error> for JsonError {
    fn from(e: serde_json::Error) -> Self {
        JsonError::Syntax {
            message: e.to_string(),
        }
    }
}

impl From<ProofError> for JsonError {
    fn from(cause: ProofError) -> Self {
        JsonError::InvalidProof { cause }
    }
}

impl From<VerificationKeyError> for JsonError {
    fn from(cause: VerificationKeyError) -> Self {
        JsonError::InvalidKey { cause }
    }
}

type G1Json = [String; 3];
type G2Json = [[String; 2]; 3];

#[derive(Serialize, Deserialize)]
struct Groth16VkJson {
    protocol: String,
    curve: String,
    #[serde(rename = "nPublic")]
    n_public: usize,
    vk_alpha_1: G1Json,
    vk_beta_2: G2Json,
    vk_gamma_2: G2Json,
    vk_delta_2: G2Json,
    #[serde(rename = "IC")]
    ic: Vec<G1Json>,
}

#[derive(Serialize, Deserialize)]
struct Groth16ProofJson {
    pi_a: G1Json,
    pi_b: G2Json,
    pi_c: G1Json,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    curve: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[allow(non_snake_case)]
struct PlonkVkJson {
    protocol: String,
    curve: String,
    nPublic: usize,
    power: u64,
    k1: String,
    k2: String,
    Qm: G1Json,
    Ql: G1Json,
    Qr: G1Json,
    Qo: G1Json,
    Qc: G1Json,
    S1: G1Json,
    S2: G1Json,
    S3: G1Json,
    X_2: G2Json,
    w: String,
}

#[derive(Serialize, Deserialize)]
#[allow(non_snake_case)]
struct PlonkProofJson {
    A: G1Json,
    B: G1Json,
    C: G1Json,
    Z: G1Json,
    T1: G1Json,
    T2: G1Json,
    T3: G1Json,
    Wxi: G1Json,
    Wxiw: G1Json,
    eval_a: String,
    eval_b: String,
    eval_c: String,
    eval_s1: String,
    eval_s2: String,
    eval_zw: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    curve: Option<String>,
}

fn check_header(
    expected: &'static str,
    protocol: Option<&str>,
    curve: Option<&str>,
) -> Result<(), JsonError> {
    if let Some(protocol) = protocol.filter(|p| *p != expected) {
        return Err(JsonError::WrongProtocol {
            expected,
            actual: protocol.to_string(),
        });
    }
    if let Some(curve) = curve.filter(|c| *c != CURVE) {
        return Err(JsonError::UnsupportedCurve {
            curve: curve.to_string(),
        });
    }
    Ok(())
}

fn number<F: PrimeField<BigInt = U256>>(
    value: &str,
    field: &str,
) -> Result<F, JsonError> {
    parse_field(value).map_err(|cause| JsonError::InvalidNumber {
        field: field.to_string(),
        cause,
    })
}

fn not_normalized(field: &str) -> JsonError {
    JsonError::NotNormalized {
        field: field.to_string(),
    }
}

fn off_curve(field: &str) -> JsonError {
    JsonError::InvalidPoint {
        field: field.to_string(),
        cause: GroupError::NotOnCurve,
    }
}

fn fq2(value: &[String; 2], field: &str) -> Result<[Fq; 2], JsonError> {
    Ok([number(&value[0], field)?, number(&value[1], field)?])
}

fn g1_from_json(point: &G1Json, field: &str) -> Result<G1, JsonError> {
    let [x, y, z]: [Fq; 3] = [
        number(&point[0], field)?,
        number(&point[1], field)?,
        number(&point[2], field)?,
    ];
    // snarkjs writes the point at infinity as (0, 1, 0) and nothing else.
    if [x, y, z] == [Fq::ZERO, Fq::ONE, Fq::ZERO] {
        return Ok(G1::zero());
    }
    if z != Fq::ONE {
        return Err(not_normalized(field));
    }
    // (0, 0) is off the curve here, not the calldata encoding of infinity.
    if x == Fq::ZERO && y == Fq::ZERO {
        return Err(off_curve(field));
    }

    let mut raw = Vec::with_capacity(64);
    raw.extend_from_slice(&x.into_be_bytes32());
    raw.extend_from_slice(&y.into_be_bytes32());
    read_g1(&mut &raw[..]).map_err(|cause| JsonError::InvalidPoint {
        field: field.to_string(),
        cause,
    })
}

fn g2_from_json(point: &G2Json, field: &str) -> Result<G2, JsonError> {
    let [x_c0, x_c1] = fq2(&point[0], field)?;
    let [y_c0, y_c1] = fq2(&point[1], field)?;
    let z = fq2(&point[2], field)?;
    let zero = [Fq::ZERO; 2];
    let one = [Fq::ONE, Fq::ZERO];
    if [[x_c0, x_c1], [y_c0, y_c1], z] == [zero, one, zero] {
        return Ok(G2::zero());
    }
    if z != one {
        return Err(not_normalized(field));
    }
    if [x_c0, x_c1, y_c0, y_c1] == [Fq::ZERO; 4] {
        return Err(off_curve(field));
    }

    // JSON lists [c0, c1]; the binary encoding wants c1 first.
    let mut raw = Vec::with_capacity(128);
    for coordinate in [x_c1, x_c0, y_c1, y_c0] {
        raw.extend_from_slice(&coordinate.into_be_bytes32());
    }
    read_g2(&mut &raw[..]).map_err(|cause| JsonError::InvalidPoint {
        field: field.to_string(),
        cause,
    })
}

fn decimal<F: PrimeField>(value: &F) -> String {
    value.into_bigint().to_string()
}

fn g1_to_json(point: &G1) -> G1Json {
    if point.is_zero() {
        return ["0".to_string(), "1".to_string(), "0".to_string()];
    }
    [decimal(&point.x), decimal(&point.y), "1".to_string()]
}

fn g2_to_json(point: &G2) -> G2Json {
    if point.is_zero() {
        return [
            ["0".to_string(), "0".to_string()],
            ["1".to_string(), "0".to_string()],
            ["0".to_string(), "0".to_string()],
        ];
    }
    [
        [decimal(&point.x.c0), decimal(&point.x.c1)],
        [decimal(&point.y.c0), decimal(&point.y.c1)],
        ["1".to_string(), "0".to_string()],
    ]
}

pub fn parse_groth16_vk(json: &str) -> Result<Groth16VerificationKey, JsonError> {
    let vk: Groth16VkJson = serde_json::from_str(json)?;
    check_header(GROTH16, Some(vk.protocol.as_str()), Some(vk.curve.as_str()))?;
    if vk.ic.len().checked_sub(1) != Some(vk.n_public) {
        return Err(JsonError::InconsistentInputCount {
            n_public: vk.n_public,
            ic_len: vk.ic.len(),
        });
    }

    let ic = vk
        .ic
        .iter()
        .enumerate()
        .map(|(i, point)| g1_from_json(point, &format!("IC[{i}]")))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Groth16VerificationKey::new(
        g1_from_json(&vk.vk_alpha_1, "vk_alpha_1")?,
        g2_from_json(&vk.vk_beta_2, "vk_beta_2")?,
        g2_from_json(&vk.vk_gamma_2, "vk_gamma_2")?,
        g2_from_json(&vk.vk_delta_2, "vk_delta_2")?,
        ic,
    )?)
}

pub fn parse_groth16_proof(json: &str) -> Result<Groth16Proof, JsonError> {
    let proof: Groth16ProofJson = serde_json::from_str(json)?;
    check_header(GROTH16, proof.protocol.as_deref(), proof.curve.as_deref())?;
    Ok(Groth16Proof::new(
        g1_from_json(&proof.pi_a, "pi_a")?,
        g2_from_json(&proof.pi_b, "pi_b")?,
        g1_from_json(&proof.pi_c, "pi_c")?,
    )?)
}

pub fn parse_plonk_vk(json: &str) -> Result<PlonkVerificationKey, JsonError> {
    let vk: PlonkVkJson = serde_json::from_str(json)?;
    check_header(PLONK, Some(vk.protocol.as_str()), Some(vk.curve.as_str()))?;
    Ok(PlonkVerificationKey::new(
        vk.power,
        vk.nPublic,
        number(&vk.k1, "k1")?,
        number(&vk.k2, "k2")?,
        number(&vk.w, "w")?,
        g1_from_json(&vk.Qm, "Qm")?,
        g1_from_json(&vk.Ql, "Ql")?,
        g1_from_json(&vk.Qr, "Qr")?,
        g1_from_json(&vk.Qo, "Qo")?,
        g1_from_json(&vk.Qc, "Qc")?,
        g1_from_json(&vk.S1, "S1")?,
        g1_from_json(&vk.S2, "S2")?,
        g1_from_json(&vk.S3, "S3")?,
        g2_from_json(&vk.X_2, "X_2")?,
    )?)
}

pub fn parse_plonk_proof(json: &str) -> Result<PlonkProof, JsonError> {
    let proof: PlonkProofJson = serde_json::from_str(json)?;
    check_header(PLONK, proof.protocol.as_deref(), proof.curve.as_deref())?;
    let commitments = [
        g1_from_json(&proof.A, "A")?,
        g1_from_json(&proof.B, "B")?,
        g1_from_json(&proof.C, "C")?,
        g1_from_json(&proof.Z, "Z")?,
        g1_from_json(&proof.T1, "T1")?,
        g1_from_json(&proof.T2, "T2")?,
        g1_from_json(&proof.T3, "T3")?,
        g1_from_json(&proof.Wxi, "Wxi")?,
        g1_from_json(&proof.Wxiw, "Wxiw")?,
    ];
    let evaluations = [
        number(&proof.eval_a, "eval_a")?,
        number(&proof.eval_b, "eval_b")?,
        number(&proof.eval_c, "eval_c")?,
        number(&proof.eval_s1, "eval_s1")?,
        number(&proof.eval_s2, "eval_s2")?,
        number(&proof.eval_zw, "eval_zw")?,
    ];
    Ok(PlonkProof::new(commitments, evaluations)?)
}

/// Parses `public.json`: an array of decimal strings, each below the scalar
/// field modulus.
pub fn parse_public_inputs(json: &str) -> Result<Vec<Fr>, JsonError> {
    let pubs: Vec<String> = serde_json::from_str(json)?;
    pubs.iter()
        .enumerate()
        .map(|(i, value)| number(value, &format!("public[{i}]")))
        .collect()
}

pub fn groth16_vk_to_json(vk: &Groth16VerificationKey) -> Result<String, JsonError> {
    Ok(serde_json::to_string(&Groth16VkJson {
        protocol: GROTH16.to_string(),
        curve: CURVE.to_string(),
        n_public: vk.num_public_inputs(),
        vk_alpha_1: g1_to_json(vk.alpha()),
        vk_beta_2: g2_to_json(vk.beta()),
        vk_gamma_2: g2_to_json(vk.gamma()),
        vk_delta_2: g2_to_json(vk.delta()),
        ic: vk.ic().iter().map(g1_to_json).collect(),
    })?)
}

pub fn groth16_proof_to_json(proof: &Groth16Proof) -> Result<String, JsonError> {
    Ok(serde_json::to_string(&Groth16ProofJson {
        pi_a: g1_to_json(proof.a()),
        pi_b: g2_to_json(proof.b()),
        pi_c: g1_to_json(proof.c()),
        protocol: Some(GROTH16.to_string()),
        curve: Some(CURVE.to_string()),
    })?)
}

pub fn plonk_vk_to_json(vk: &PlonkVerificationKey) -> Result<String, JsonError> {
    Ok(serde_json::to_string(&PlonkVkJson {
        protocol: PLONK.to_string(),
        curve: CURVE.to_string(),
        nPublic: vk.num_public_inputs(),
        power: vk.power(),
        k1: decimal(vk.k1()),
        k2: decimal(vk.k2()),
        Qm: g1_to_json(vk.qm()),
        Ql: g1_to_json(vk.ql()),
        Qr: g1_to_json(vk.qr()),
        Qo: g1_to_json(vk.qo()),
        Qc: g1_to_json(vk.qc()),
        S1: g1_to_json(vk.s1()),
        S2: g1_to_json(vk.s2()),
        S3: g1_to_json(vk.s3()),
        X_2: g2_to_json(vk.x_2()),
        w: decimal(vk.w()),
    })?)
}

pub fn plonk_proof_to_json(proof: &PlonkProof) -> Result<String, JsonError> {
    let [a, b, c, z, t1, t2, t3, wxi, wxiw] = proof.commitments().each_ref().map(g1_to_json);
    let [eval_a, eval_b, eval_c, eval_s1, eval_s2, eval_zw] =
        proof.evaluations().each_ref().map(decimal);
    Ok(serde_json::to_string(&PlonkProofJson {
        A: a,
        B: b,
        C: c,
        Z: z,
        T1: t1,
        T2: t2,
        T3: t3,
        Wxi: wxi,
        Wxiw: wxiw,
        eval_a,
        eval_b,
        eval_c,
        eval_s1,
        eval_s2,
        eval_zw,
        protocol: Some(PLONK.to_string()),
        curve: Some(CURVE.to_string()),
    })?)
}

pub fn public_inputs_to_json(inputs: &[Fr]) -> Result<String, JsonError> {
    let pubs: Vec<String> = inputs.iter().map(decimal).collect();
    Ok(serde_json::to_string(&pubs)?)
}
