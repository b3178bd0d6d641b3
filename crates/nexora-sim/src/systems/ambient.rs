//! Ambient refresh: the illustrative counters and address tags shown
//! alongside the animations, re-randomized on a timer.

use std::net::Ipv4Addr;

use glam::DVec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use nexora_core::constants::*;
use nexora_core::state::{SceneStats, TagView};

/// Build the tag list (normalized positions) with fresh random addresses.
pub fn make_tags(positions: &[DVec2], rng: &mut ChaCha8Rng) -> Vec<TagView> {
    positions
        .iter()
        .map(|&position| TagView {
            position,
            address: random_address(rng),
        })
        .collect()
}

/// Nudge the counters and give every tag a new address.
pub fn refresh(stats: &mut SceneStats, tags: &mut [TagView], rng: &mut ChaCha8Rng) {
    stats.detected += rng.gen_range(0..DETECTED_NUDGE_MAX);
    stats.blocked += rng.gen_range(0..RESOLVED_NUDGE_MAX);
    stats.mitigated += rng.gen_range(0..RESOLVED_NUDGE_MAX);
    stats.open = if rng.gen_bool(OPEN_INCIDENT_RISE_CHANCE) {
        stats.open + 1
    } else {
        stats.open.saturating_sub(1).max(1)
    };

    for tag in tags.iter_mut() {
        tag.address = random_address(rng);
    }
}

pub fn random_address(rng: &mut ChaCha8Rng) -> Ipv4Addr {
    Ipv4Addr::new(rng.gen(), rng.gen(), rng.gen(), rng.gen())
}
