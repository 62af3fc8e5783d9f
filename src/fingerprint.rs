use std::fmt;

use sha2::{Digest, Sha256};

use crate::store::LabelMap;

/// SHA-256 digest of a map's encoding: id type plus `(label, id)` pairs in
/// insertion order.
///
/// Two maps with equal fingerprints encode and decode every label the same
/// way. Use it to check that the map used at inference time matches the one
/// used to encode training data.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MapFingerprint(pub [u8; 32]);

impl MapFingerprint {
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// First `n` hex characters, for log lines.
    pub fn short(&self, n: usize) -> String {
        let mut s = self.to_hex();
        s.truncate(n.min(64));
        s
    }
}

impl fmt::Debug for MapFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MapFingerprint({})", hex::encode(self.0))
    }
}

impl fmt::Display for MapFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// sha256(id_type + "\n" + (len(label) + label + "|" + id + "\n")*)
///
/// Labels are length-prefixed so a `|` or newline inside a label cannot
/// make two different maps hash alike.
pub fn map_fingerprint(map: &LabelMap) -> MapFingerprint {
    let mut hasher = Sha256::new();
    hasher.update(map.id_type().to_string().as_bytes());
    hasher.update(b"\n");
    for (label, id) in map.map() {
        hasher.update((label.len() as u64).to_le_bytes());
        hasher.update(label.as_bytes());
        hasher.update(b"|");
        hasher.update(id.to_string().as_bytes());
        hasher.update(b"\n");
    }
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&hasher.finalize());
    MapFingerprint(hash)
}
