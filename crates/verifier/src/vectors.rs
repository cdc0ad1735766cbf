//! Cross-language test vectors for seal v1.
//!
//! The output of [`generate_vectors_v1`] is committed as `docs/Test_Vectors_v1.json`
//! and consumed by the ledger program and SDK test suites.

use serde_json::json;

use sealchain_core::{
    chain_hash, compute_feedback_leaf, compute_response_leaf, compute_revoke_leaf,
    compute_seal_hash, encode_value, keccak256, seal_preimage, Bytes32, ChainKind, Result,
    ScaledValue, SealInput, DOMAIN_SEAL_V1, DOMAIN_TAG_LEN,
};

/// Inputs pinned in the `scaledValues` section.
const SCALED_INPUTS: &[&str] = &[
    "99.77",
    "10.50",
    "1.5e2",
    "1.5e-2",
    "1.2345675",
    "-0.0000005",
    "-0",
    "9223372036854775807",
    "-9223372036854775808",
];

/// `0x`-prefixed lowercase hex, the encoding used for every digest in the vector file.
pub fn hex0x(bytes: impl AsRef<[u8]>) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn domain_hex(tag: &[u8; DOMAIN_TAG_LEN]) -> String {
    hex0x(tag)
}

fn basic_seal() -> Result<SealInput> {
    Ok(SealInput {
        tag1: "uptime".to_string(),
        tag2: "day".to_string(),
        feedback_uri: "ipfs://QmTest123".to_string(),
        ..SealInput::new(ScaledValue::new(9977, 2)?)
    })
}

fn full_seal() -> Result<SealInput> {
    Ok(SealInput {
        score: Some(87),
        tag1: "latency".to_string(),
        tag2: "p95".to_string(),
        endpoint: "https://agent.example/api".to_string(),
        feedback_uri: "ipfs://QmFull".to_string(),
        file_hash: Some(keccak256(b"file")),
        ..SealInput::new(ScaledValue::new(-12345, 3)?)
    })
}

fn seal_entry(input: &SealInput) -> Result<(serde_json::Value, Bytes32)> {
    let hash = compute_seal_hash(input)?;
    let entry = json!({
        "preimage": hex0x(seal_preimage(input)?),
        "hash": hex0x(hash),
    });
    Ok((entry, hash))
}

/// Generate the seal v1 vector set.
pub fn generate_vectors_v1() -> Result<serde_json::Value> {
    let asset = Bytes32::repeat_byte(0x11);
    let client = Bytes32::repeat_byte(0x22);
    let responder = Bytes32::repeat_byte(0x33);

    let scaled_values = SCALED_INPUTS
        .iter()
        .map(|input| -> Result<serde_json::Value> {
            let encoded = encode_value(*input, None)?;
            Ok(json!({
                "input": input,
                "value": encoded.scaled.value(),
                "precision": encoded.scaled.precision(),
                "normalized": encoded.normalized,
            }))
        })
        .collect::<Result<Vec<_>>>()?;

    let basic = basic_seal()?;
    let score_zero = SealInput {
        score: Some(0),
        ..basic.clone()
    };
    let file_hash_zero = SealInput {
        file_hash: Some(Bytes32::ZERO),
        ..basic.clone()
    };
    let full = full_seal()?;

    let (basic_json, basic_hash) = seal_entry(&basic)?;
    let (score_zero_json, score_zero_hash) = seal_entry(&score_zero)?;
    let (file_hash_zero_json, _) = seal_entry(&file_hash_zero)?;
    let (full_json, full_hash) = seal_entry(&full)?;

    // Feedback chain: three records, non-contiguous slots.
    let feedback = [
        (0u64, basic_hash, 1000u64),
        (1, score_zero_hash, 1001),
        (2, full_hash, 1005),
    ];
    let mut feedback_leaves = Vec::with_capacity(feedback.len());
    let mut feedback_digests = Vec::with_capacity(feedback.len());
    let mut digest = Bytes32::ZERO;
    for (index, seal_hash, slot) in feedback {
        let leaf = compute_feedback_leaf(
            asset.as_slice(),
            client.as_slice(),
            index,
            seal_hash.as_slice(),
            slot,
        )?;
        digest = chain_hash(&digest, ChainKind::Feedback.chain_domain(), &leaf);
        feedback_leaves.push(hex0x(leaf));
        feedback_digests.push(hex0x(digest));
    }

    let response_hash = keccak256(b"response-0");
    let response_leaf = compute_response_leaf(
        asset.as_slice(),
        client.as_slice(),
        0,
        responder.as_slice(),
        response_hash.as_slice(),
        basic_hash.as_slice(),
        1010,
    )?;
    let response_digest = chain_hash(
        &Bytes32::ZERO,
        ChainKind::Response.chain_domain(),
        &response_leaf,
    );

    let revoke_leaf = compute_revoke_leaf(
        asset.as_slice(),
        client.as_slice(),
        1,
        score_zero_hash.as_slice(),
        1020,
    )?;
    let revoke_digest = chain_hash(
        &Bytes32::ZERO,
        ChainKind::Revoke.chain_domain(),
        &revoke_leaf,
    );

    Ok(json!({
        "version": "seal-v1",
        "domains": {
            "seal": domain_hex(DOMAIN_SEAL_V1),
            "feedbackLeaf": domain_hex(ChainKind::Feedback.leaf_domain()),
            "responseLeaf": domain_hex(ChainKind::Response.leaf_domain()),
            "revokeLeaf": domain_hex(ChainKind::Revoke.leaf_domain()),
            "feedbackChain": domain_hex(ChainKind::Feedback.chain_domain()),
            "responseChain": domain_hex(ChainKind::Response.chain_domain()),
            "revokeChain": domain_hex(ChainKind::Revoke.chain_domain()),
        },
        "scaledValues": scaled_values,
        "seal": {
            "basic": basic_json,
            "scoreZero": score_zero_json,
            "fileHashZero": file_hash_zero_json,
            "full": full_json,
        },
        "leaves": {
            "feedback": feedback_leaves,
            "response": hex0x(response_leaf),
            "revoke": hex0x(revoke_leaf),
        },
        "chains": {
            "feedback": feedback_digests,
            "response": hex0x(response_digest),
            "revoke": hex0x(revoke_digest),
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex0x() {
        assert_eq!(hex0x(b""), "0x");
        assert_eq!(hex0x([0x00, 0xab]), "0x00ab");
        assert_eq!(hex0x(DOMAIN_SEAL_V1), "0x383030345f5345414c5f56315f5f5f5f");
    }

    #[test]
    fn test_vectors_are_deterministic() {
        assert_eq!(generate_vectors_v1().unwrap(), generate_vectors_v1().unwrap());
    }

    #[test]
    fn test_vectors_shape() {
        let vectors = generate_vectors_v1().unwrap();
        assert_eq!(vectors["version"], "seal-v1");
        assert_eq!(vectors["scaledValues"].as_array().unwrap().len(), SCALED_INPUTS.len());
        assert_eq!(vectors["chains"]["feedback"].as_array().unwrap().len(), 3);
        assert_eq!(
            vectors["seal"]["basic"]["hash"],
            "0x04a564625362a832cb6504c8bbd235fb63010cf1654d202740d73adfce0e91c4"
        );
    }
}
