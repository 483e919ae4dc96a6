use std::num::NonZeroUsize;

use super::BucketId;

/// Map a key to a bucket ordinal in `[0, bucket_count)`
///
/// Sum of the key's Unicode code points, modulo the bucket count. This is a
/// deliberately weak function: anagrams always collide and short keys pile
/// into low ordinals. Bucket placement and every collision statistic depend
/// on it being exactly this.
pub fn hash_key(key: &str, bucket_count: NonZeroUsize) -> BucketId {
    let sum: u64 = key.chars().map(|c| u64::from(u32::from(c))).sum();
    (sum % bucket_count.get() as u64) as BucketId
}
