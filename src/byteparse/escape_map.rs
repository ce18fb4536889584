use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde::Serialize;

/// Byte-stuffing table: each plain byte maps to the multi-byte sequence that
/// represents it on the wire. Decoding reverses the mapping.
///
/// Entries keep insertion order so decoding is deterministic even when the
/// encoded sequences are not prefix-free.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EscapeMap {
    entries: Vec<(u8, Vec<u8>)>,
}

impl EscapeMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, plain: u8, encoded: impl Into<Vec<u8>>) -> Self {
        self.insert(plain, encoded.into());
        self
    }

    pub fn insert(&mut self, plain: u8, encoded: Vec<u8>) {
        self.entries.push((plain, encoded));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &[u8])> {
        self.entries
            .iter()
            .map(|(plain, encoded)| (*plain, encoded.as_slice()))
    }

    /// Reverse the mapping over one field's raw bytes. At each position the
    /// first entry whose encoded sequence is a prefix emits its plain byte;
    /// otherwise the current byte passes through verbatim.
    #[must_use]
    pub fn decode(&self, raw: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(raw.len());
        let mut i = 0;
        while i < raw.len() {
            let mut matched = false;
            for (plain, encoded) in &self.entries {
                if !encoded.is_empty() && raw[i..].starts_with(encoded) {
                    out.push(*plain);
                    i += encoded.len();
                    matched = true;
                    break;
                }
            }
            if !matched {
                out.push(raw[i]);
                i += 1;
            }
        }
        out
    }

    /// Apply the mapping: replace each mapped plain byte with its encoded
    /// sequence. The round-trip partner of [`EscapeMap::decode`] for callers
    /// that frame their own packets.
    #[must_use]
    pub fn encode(&self, plain: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(plain.len());
        for &byte in plain {
            match self.entries.iter().find(|(p, _)| *p == byte) {
                Some((_, encoded)) => out.extend_from_slice(encoded),
                None => out.push(byte),
            }
        }
        out
    }
}

/// Named escape maps available to a parse. Replaces reaching back into the
/// host value for a method of the same name: schemas are explicit values, so
/// the lookup is by registered name instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EscapeRegistry {
    maps: FxHashMap<String, EscapeMap>,
}

impl EscapeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, map: EscapeMap) {
        self.maps.insert(name.into(), map);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EscapeMap> {
        self.maps.get(name)
    }
}

impl From<FxHashMap<String, EscapeMap>> for EscapeRegistry {
    fn from(maps: FxHashMap<String, EscapeMap>) -> Self {
        Self { maps }
    }
}
