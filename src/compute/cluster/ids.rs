//! Cluster id allocation.
//!
//! A cluster id packs a build tag into its high bits and the creation
//! sequence (`point_count + k`) into its low 32 bits. The tag is a hash of
//! the input coordinates and the clustering options, so identical builds
//! hand out identical ids while ids from a different build are rejected.
//! Tags are 21 bits wide, which keeps every id below 2^53 and exact in
//! JavaScript numbers.

use crate::config::ClusterConfig;
use crate::types::ClusterId;
use rustc_hash::FxHasher;
use spatio_cluster_types::point::PointFeature;
use std::hash::Hasher;

const SEQUENCE_BITS: u32 = 32;
const SEQUENCE_MASK: u64 = (1 << SEQUENCE_BITS) - 1;
const TAG_BITS: u32 = 21;

/// Largest input a build accepts. A build creates at most one cluster per
/// input point, so `point_count + k` always fits in the sequence bits.
pub(crate) const MAX_POINTS: usize = 1 << (SEQUENCE_BITS - 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ClusterIds {
    point_count: u64,
    tag: u64,
}

impl ClusterIds {
    pub fn new(point_count: usize, tag: u64) -> Self {
        Self {
            point_count: point_count as u64,
            tag: tag & ((1 << TAG_BITS) - 1),
        }
    }

    /// Ids for a build over `features` with `config`.
    pub fn for_build(features: &[PointFeature], config: &ClusterConfig) -> Self {
        let mut hasher = FxHasher::default();
        hasher.write_u64(config.radius.to_bits());
        hasher.write_u8(config.min_zoom);
        hasher.write_u8(config.max_zoom);
        hasher.write_usize(config.min_points);
        hasher.write_u32(config.extent);
        hasher.write_usize(features.len());
        for feature in features {
            hasher.write_u64(feature.lon().to_bits());
            hasher.write_u64(feature.lat().to_bits());
        }
        // fx mixes best into the high bits
        Self::new(features.len(), hasher.finish() >> (64 - TAG_BITS))
    }

    /// Id of the `seq`-th cluster created in this build.
    pub fn cluster_id(&self, seq: usize) -> ClusterId {
        ClusterId::new((self.tag << SEQUENCE_BITS) | (self.point_count + seq as u64))
    }

    /// Creation sequence of `id`, if it is a cluster id minted by this build.
    pub fn sequence(&self, id: ClusterId) -> Option<usize> {
        let raw = id.get();
        if raw >> SEQUENCE_BITS != self.tag {
            return None;
        }
        (raw & SEQUENCE_MASK)
            .checked_sub(self.point_count)
            .map(|seq| seq as usize)
    }
}
