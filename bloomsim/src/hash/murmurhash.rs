// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::hash::Hasher;

use byteorder::ByteOrder;
use byteorder::LE;

const C1: u32 = 0xcc9e2d51;
const C2: u32 = 0x1b873593;

/// MurmurHash3 in its x86 32-bit variant: a fast, non-cryptographic hash with a
/// 32-bit seed, so one algorithm yields as many independent functions as there
/// are seeds.
///
/// The hasher is streaming. Bytes may arrive in any number of `write` calls and
/// the digest only depends on their concatenation.
#[derive(Debug, Clone)]
pub struct MurmurHash3X86_32 {
    h1: u32,
    total: u64,
    buf: [u8; 4],
    buf_len: usize,
}

impl MurmurHash3X86_32 {
    pub fn with_seed(seed: u32) -> Self {
        MurmurHash3X86_32 {
            h1: seed,
            total: 0,
            buf: [0; 4],
            buf_len: 0,
        }
    }

    pub fn finish32(&self) -> u32 {
        let mut h1 = self.h1;

        // tail
        if self.buf_len > 0 {
            let mut buf = [0u8; 4];
            buf[..self.buf_len].copy_from_slice(&self.buf[..self.buf_len]);
            h1 ^= mix_k1(u32::from_le_bytes(buf));
        }

        // length is folded in modulo 2^32
        let total = self.total + self.buf_len as u64;
        h1 ^= total as u32;
        fmix32(h1)
    }

    #[inline]
    fn update(&mut self, k1: u32) {
        self.h1 ^= mix_k1(k1);
        self.h1 = self.h1.rotate_left(13);
        self.h1 = self.h1.wrapping_mul(5).wrapping_add(0xe6546b64);
        self.total += 4;
    }
}

impl Hasher for MurmurHash3X86_32 {
    fn finish(&self) -> u64 {
        u64::from(self.finish32())
    }

    fn write(&mut self, mut bytes: &[u8]) {
        if self.buf_len + bytes.len() < 4 {
            self.buf[self.buf_len..self.buf_len + bytes.len()].copy_from_slice(bytes);
            self.buf_len += bytes.len();
            return;
        }

        if self.buf_len != 0 {
            let wanted = 4 - self.buf_len;
            self.buf[self.buf_len..].copy_from_slice(&bytes[..wanted]);
            let k1 = LE::read_u32(&self.buf);
            self.update(k1);

            bytes = &bytes[wanted..];
            self.buf_len = 0;
        }

        let blocks = bytes.len() >> 2; // bytes / 4
        for i in 0..blocks {
            let lo = i << 2;
            let k1 = LE::read_u32(&bytes[lo..lo + 4]);
            self.update(k1);
        }

        let len = bytes.len() & 3;
        if len > 0 {
            self.buf[..len].copy_from_slice(&bytes[blocks << 2..]);
            self.buf_len = len;
        }
    }
}

#[inline]
fn mix_k1(mut k1: u32) -> u32 {
    k1 = k1.wrapping_mul(C1);
    k1 = k1.rotate_left(15);
    k1.wrapping_mul(C2)
}

/// Finalization mix: force all bits of a hash block to avalanche.
#[inline]
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^ (h >> 16)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn murmurhash3_x86_32(key: &[u8], seed: u32) -> u32 {
        let mut hasher = MurmurHash3X86_32::with_seed(seed);
        hasher.write(key);
        hasher.finish32()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(murmurhash3_x86_32(b"", 0), 0);
        assert_eq!(murmurhash3_x86_32(b"", 1), 0x514e28b7);
        assert_eq!(murmurhash3_x86_32(b"", 0xffffffff), 0x81f16f39);
    }

    #[test]
    fn test_known_vectors() {
        // a single full block of zeros
        assert_eq!(murmurhash3_x86_32(&[0, 0, 0, 0], 0), 0x2362f9de);
        assert_eq!(murmurhash3_x86_32(b"aaaa", 0x9747b28c), 0x5a97808a);
        assert_eq!(murmurhash3_x86_32(b"test", 0), 0xba6bd213);

        // remainder of 1 byte
        assert_eq!(murmurhash3_x86_32(b"Hello, world!", 0x9747b28c), 0x24884cba);

        // remainder of 3 bytes
        let key = b"The quick brown fox jumps over the lazy dog";
        assert_eq!(murmurhash3_x86_32(key, 0), 0x2e4ff723);
        assert_eq!(murmurhash3_x86_32(key, 0x9747b28c), 0x2fa826cd);
    }

    #[test]
    fn test_split_writes() {
        let key = b"The quick brown fox jumps over the lazy dog";
        let expected = murmurhash3_x86_32(key, 42);

        for split in 0..key.len() {
            let mut hasher = MurmurHash3X86_32::with_seed(42);
            hasher.write(&key[..split]);
            hasher.write(&key[split..]);
            assert_eq!(hasher.finish32(), expected, "split at {split}");
        }

        let mut hasher = MurmurHash3X86_32::with_seed(42);
        for byte in key.iter() {
            hasher.write(std::slice::from_ref(byte));
        }
        assert_eq!(hasher.finish32(), expected);
    }

    #[test]
    fn test_seed_changes_digest() {
        let a = murmurhash3_x86_32(b"bloom", 11);
        let b = murmurhash3_x86_32(b"bloom", 4214315325);
        assert_ne!(a, b);
    }
}
