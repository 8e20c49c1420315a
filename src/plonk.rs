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

//! snarkjs PLONK verification over BN254 with a KZG commitment scheme.
//!
//! The verifier recomputes the Fiat-Shamir challenges, evaluates the
//! vanishing polynomial and the Lagrange basis at `xi`, rebuilds the
//! linearisation commitment `D` and the batched commitment `F`, and checks
//! both openings (at `xi` and at `xi·w`) with one pairing product.

use crate::{
    check_public_input_number,
    curve::{batch_inverse, linear_combination, normalize, pairing_product_is_identity},
    errors::VerifyError,
    key::PlonkVerificationKey,
    proof::PlonkProof,
    srs::SRS_G2,
    transcript::{generate_plonk_challenges, PlonkChallenges},
    utils::read_g2,
    Fr, G1Projective, G1,
};
use alloc::vec::Vec;
use ark_ec::AffineRepr;
use ark_ff::{AdditiveGroup, Field};
use tracing::{debug, trace};

/// Values derived from `xi` that the rest of the verifier shares.
#[derive(Debug)]
struct Evaluations {
    // xi^n
    xin: Fr,
    // xi^n - 1
    zh: Fr,
    // L_1(xi), ..., L_max(1, n_public)(xi)
    lagrange: Vec<Fr>,
}

fn evaluate_lagrange(
    vk: &PlonkVerificationKey,
    xi: Fr,
) -> Result<Evaluations, VerifyError> {
    let n = vk.domain_size();
    let xin = xi.pow([n]);
    let zh = xin - Fr::ONE;
    let count = vk.num_public_inputs().max(1);
    let n = Fr::from(n);

    // L_i(xi) = w^(i-1) · zh / (n · (xi - w^(i-1)))
    let mut roots = Vec::with_capacity(count);
    let mut denominators = Vec::with_capacity(count);
    let mut w = Fr::ONE;
    for _ in 0..count {
        roots.push(w);
        denominators.push(n * (xi - w));
        w *= vk.w();
    }
    batch_inverse(&mut denominators)?;

    let lagrange = roots
        .iter()
        .zip(&denominators)
        .map(|(root, inverse)| *root * zh * inverse)
        .collect();

    Ok(Evaluations { xin, zh, lagrange })
}

// PI(xi) = -Σ input[i] · L_{i+1}(xi)
fn evaluate_public_input_polynomial(public_inputs: &[Fr], lagrange: &[Fr]) -> Fr {
    -public_inputs
        .iter()
        .zip(lagrange)
        .fold(Fr::ZERO, |acc, (input, l)| acc + *input * l)
}

fn compute_r0(proof: &PlonkProof, challenges: &PlonkChallenges, pi: Fr, l1: Fr) -> Fr {
    let PlonkChallenges {
        beta, gamma, alpha, ..
    } = *challenges;

    let e1 = pi;
    let e2 = l1 * alpha.square();
    let e3 = alpha
        * (proof.eval_a() + beta * proof.eval_s1() + gamma)
        * (proof.eval_b() + beta * proof.eval_s2() + gamma)
        * (proof.eval_c() + gamma)
        * proof.eval_zw();

    e1 - e2 - e3
}

/// Linearisation commitment `D`.
fn compute_d(
    vk: &PlonkVerificationKey,
    proof: &PlonkProof,
    challenges: &PlonkChallenges,
    evaluations: &Evaluations,
    l1: Fr,
) -> Result<G1Projective, VerifyError> {
    let PlonkChallenges {
        beta,
        gamma,
        alpha,
        xi,
        u,
        ..
    } = *challenges;
    let (a, b, c) = (proof.eval_a(), proof.eval_b(), proof.eval_c());
    let beta_xi = beta * xi;

    let z_scalar = alpha
        * (a + beta_xi + gamma)
        * (b + beta_xi * vk.k1() + gamma)
        * (c + beta_xi * vk.k2() + gamma)
        + l1 * alpha.square()
        + u;
    let s3_scalar = alpha
        * beta
        * proof.eval_zw()
        * (a + beta * proof.eval_s1() + gamma)
        * (b + beta * proof.eval_s2() + gamma);
    let zh = evaluations.zh;
    let xin = evaluations.xin;

    let d = linear_combination(
        &[
            *vk.qm(),
            *vk.ql(),
            *vk.qr(),
            *vk.qo(),
            *vk.qc(),
            *proof.z(),
            *vk.s3(),
            *proof.t1(),
            *proof.t2(),
            *proof.t3(),
        ],
        &[
            a * b,
            a,
            b,
            c,
            Fr::ONE,
            z_scalar,
            -s3_scalar,
            -zh,
            -zh * xin,
            -zh * xin.square(),
        ],
    )?;
    Ok(d)
}

/// Verifies a snarkjs PLONK proof against already-decoded public inputs.
pub fn verify_proof(
    vk: &PlonkVerificationKey,
    proof: &PlonkProof,
    public_inputs: &[Fr],
) -> Result<bool, VerifyError> {
    trace!(
        "Verifying PLONK proof with {} public inputs over a domain of size {}",
        public_inputs.len(),
        vk.domain_size()
    );
    check_public_input_number(vk.num_public_inputs(), public_inputs.len())?;

    let challenges = generate_plonk_challenges(vk, proof, public_inputs);
    trace!("PLONK challenges: {challenges:?}");

    let evaluations = evaluate_lagrange(vk, challenges.xi).inspect_err(|e| {
        debug!("PLONK Lagrange evaluation failed: {e}");
    })?;
    let l1 = evaluations.lagrange[0];
    let pi = evaluate_public_input_polynomial(public_inputs, &evaluations.lagrange);
    let r0 = compute_r0(proof, &challenges, pi, l1);
    let d = compute_d(vk, proof, &challenges, &evaluations, l1)?;

    let PlonkChallenges { xi, v, u, .. } = challenges;

    // F = D + v1·A + v2·B + v3·C + v4·S1 + v5·S2
    let f = d + linear_combination(
        &[*proof.a(), *proof.b(), *proof.c(), *vk.s1(), *vk.s2()],
        &v,
    )?;

    // E = (-r0 + v1·a + v2·b + v3·c + v4·s1 + v5·s2 + u·zw) · G1
    let e_scalar = -r0
        + v[0] * proof.eval_a()
        + v[1] * proof.eval_b()
        + v[2] * proof.eval_c()
        + v[3] * proof.eval_s1()
        + v[4] * proof.eval_s2()
        + u * proof.eval_zw();
    let e = G1::generator() * e_scalar;

    // e(-(Wxi + u·Wxiw), X_2) · e(xi·Wxi + u·xi·w·Wxiw + F - E, G2) == 1
    let wxi = proof.wxi().into_group();
    let wxiw = proof.wxiw().into_group();
    let a1 = -(wxi + wxiw * u);
    let b1 = wxi * xi + wxiw * (u * xi * vk.w()) + f - e;
    let points = normalize(&[a1, b1]);

    let g2 = read_g2(&mut &SRS_G2[..]).map_err(VerifyError::malformed)?;
    let verified = pairing_product_is_identity(&[(points[0], *vk.x_2()), (points[1], g2)]);
    if !verified {
        debug!("PLONK pairing check failed");
    }
    Ok(verified)
}
